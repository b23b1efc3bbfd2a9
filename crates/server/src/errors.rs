use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::customer::errors::CustomerError;
use thiserror::Error;
use tracing::error;

/// JSON error body: `{"status": 404, "error": "Not Found", "message": "..."}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: String,
    pub message: String,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: impl Into<String>, message: Option<String>) -> Self {
        Self {
            status,
            error: error.into(),
            message: message.unwrap_or_default(),
        }
    }

    /// Error title taken from the status' canonical reason.
    pub fn from_status(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(status, status.canonical_reason().unwrap_or("Error"), Some(message.into()))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::from_status(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::from_status(StatusCode::BAD_REQUEST, message)
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "status": self.status.as_u16(),
            "error": self.error,
            "message": self.message,
        });
        (self.status, Json(body)).into_response()
    }
}

impl From<CustomerError> for JsonApiError {
    fn from(e: CustomerError) -> Self {
        let code = e.code();
        match e {
            CustomerError::Validation(v) => JsonApiError::bad_request(v.to_string()),
            CustomerError::Repository(msg) => {
                error!(code, error = %msg, "customer store failure");
                JsonApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
