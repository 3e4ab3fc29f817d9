/// Errors that can occur within the storage layer.
///
/// # Examples
///
/// ```rust
/// use hostmon_storage::error::StorageError;
///
/// let err = StorageError::InvalidTimestamp {
///     value: "yesterday".to_string(),
/// };
/// assert!(err.to_string().contains("yesterday"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// An underlying SQLite error.
    #[error("Storage: SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The store file does not exist (read-only opens never create it).
    #[error("Storage: database file not found: {path}")]
    Missing { path: String },

    /// A `time` column value did not match `YYYY-MM-DD HH:MM:SS`.
    #[error("Storage: invalid timestamp in stats table: '{value}'")]
    InvalidTimestamp { value: String },

    /// Another thread panicked while holding the connection.
    #[error("Storage: connection lock poisoned")]
    LockPoisoned,
}

/// Convenience `Result` alias for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
