use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use service::auth::errors::AuthError;
use service::errors::ServiceError;

/// Handler error. Renders as `{"error": "..."}` with the status its variant maps to.
#[derive(Debug)]
pub enum ApiError {
    Service(ServiceError),
    /// Body or query that failed to deserialize.
    BadRequest(String),
    Unauthorized(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Service(e) => match e {
                ServiceError::Validation(_)
                | ServiceError::InvalidFormat(_)
                | ServiceError::InvalidSchedule(_)
                | ServiceError::Conflict(_) => StatusCode::BAD_REQUEST,
                ServiceError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
                ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
                ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
                ServiceError::Email(_) | ServiceError::Db(_) | ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self { ApiError::Service(e) }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self { ApiError::Service(e.into()) }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = match self {
            ApiError::BadRequest(m) | ApiError::Unauthorized(m) => m,
            ApiError::Service(ServiceError::Email(detail)) => {
                error!(error = %detail, "email delivery failed");
                "Failed to send email.".to_string()
            }
            ApiError::Service(e) if status.is_server_error() => {
                error!(error = %e, "request failed");
                "An unexpected error occurred.".to_string()
            }
            ApiError::Service(e) => e.to_string(),
        };
        (status, Json(serde_json::json!({"error": msg}))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("email setup failed: {0}")]
    Email(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
