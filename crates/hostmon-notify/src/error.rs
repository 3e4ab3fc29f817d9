/// Errors that can occur within the notification subsystem.
///
/// # Examples
///
/// ```rust
/// use hostmon_notify::error::NotifyError;
///
/// let err = NotifyError::InvalidConfig("missing chat_id".to_string());
/// assert!(err.to_string().contains("chat_id"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// Channel configuration is missing a required field or contains an invalid value.
    #[error("Notify: invalid channel configuration: {0}")]
    InvalidConfig(String),

    /// An HTTP request to an external notification endpoint failed.
    ///
    /// The request URL is stripped before wrapping since it embeds the bot token.
    #[error("Notify: HTTP request failed: {0}")]
    HttpError(reqwest::Error),

    /// The external API returned a non-success response.
    #[error("Notify: API error from {service}: status={status}, body={body}")]
    ApiError {
        service: String,
        status: u16,
        body: String,
    },
}

impl From<reqwest::Error> for NotifyError {
    fn from(e: reqwest::Error) -> Self {
        NotifyError::HttpError(e.without_url())
    }
}

/// Convenience `Result` alias for notification operations.
pub type Result<T> = std::result::Result<T, NotifyError>;
