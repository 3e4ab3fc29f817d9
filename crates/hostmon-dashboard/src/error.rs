use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Request failures surfaced by dashboard handlers.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// The sample store could not be read; the page itself degrades to a
    /// banner, downloads return this.
    #[error("Dashboard: data unavailable: {0}")]
    Storage(#[from] hostmon_storage::StorageError),

    #[error("Dashboard: template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Dashboard: CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Dashboard: JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = match self {
            DashboardError::Storage(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::warn!(error = %self, status = status.as_u16(), "Request failed");
        (status, self.to_string()).into_response()
    }
}
