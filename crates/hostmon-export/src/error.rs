/// Errors raised while exporting the event log.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The event log has not been created yet.
    #[error("Export: event log not found: {path}")]
    LogMissing { path: String },

    #[error("Export: I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Export: CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Export: XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

/// Convenience `Result` alias for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;
