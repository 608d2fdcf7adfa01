use thiserror::Error;

use crate::errors::ServiceError;

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Invalid username or password.")]
    Unauthorized,
    #[error("Invalid or expired token.")]
    InvalidResetToken,
    #[error("Failed to send email.")]
    Email(String),
    #[error("hashing error: {0}")]
    HashError(String),
    #[error("token error: {0}")]
    TokenError(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl From<AuthError> for ServiceError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validation(m) => ServiceError::Validation(m),
            AuthError::Conflict(m) => ServiceError::Conflict(m),
            AuthError::NotFound(m) => ServiceError::NotFound(m),
            AuthError::Unauthorized => ServiceError::Unauthenticated(AuthError::Unauthorized.to_string()),
            AuthError::InvalidResetToken => ServiceError::Validation(AuthError::InvalidResetToken.to_string()),
            AuthError::Email(m) => ServiceError::Email(m),
            AuthError::Repository(m) => ServiceError::Db(m),
            AuthError::HashError(m) | AuthError::TokenError(m) => ServiceError::Internal(m),
        }
    }
}
