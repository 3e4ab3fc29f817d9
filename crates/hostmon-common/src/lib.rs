//! Types shared by the monitor loop and the dashboard.

pub mod logline;
pub mod types;
