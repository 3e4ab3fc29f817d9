/// Errors raised while reading host metrics.
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    /// The configured mount point is not among the host's disks.
    #[error("Collect: no disk mounted at '{mount}'")]
    DiskNotFound { mount: String },

    /// The host reported no CPUs, so global usage is meaningless.
    #[error("Collect: no CPUs reported by the host")]
    NoCpus,
}

/// Convenience `Result` alias for collection.
pub type Result<T> = std::result::Result<T, CollectError>;
