//! Sample persistence.
//!
//! The default implementation ([`engine::SqliteSampleStore`]) keeps every
//! sample as one row of the `stats` table in a single SQLite file with WAL
//! mode, so the dashboard can read while the monitor writes.

pub mod engine;
pub mod error;

#[cfg(test)]
mod tests;

use hostmon_common::types::Sample;

pub use error::{Result, StorageError};

/// Number of rows the dashboard shows and exports.
pub const RECENT_LIMIT: usize = 100;

/// Append-only storage of [`Sample`]s.
pub trait SampleStore: Send + Sync {
    /// Persists one sample in its own transaction.
    fn insert(&self, sample: &Sample) -> Result<()>;

    /// Returns up to `limit` samples, newest first.
    fn recent(&self, limit: usize) -> Result<Vec<Sample>>;

    fn count(&self) -> Result<u64>;
}
