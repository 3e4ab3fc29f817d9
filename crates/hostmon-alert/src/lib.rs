//! Alert evaluation for host samples.
//!
//! [`rules::threshold::ThresholdRule`] turns a sample into a composite
//! alert when any metric is over its limit, [`engine::AlertEngine`] applies
//! the repeat cooldown, and [`summary::DailyAccumulator`] collects the values
//! behind the daily summary message.

pub mod engine;
pub mod rules;
pub mod summary;
