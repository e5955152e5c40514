use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

use crate::database::store::StoreError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Store error: {0}")]
    Store(StoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failures reported by the auth collaborator.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("email already in use")]
    EmailInUse,

    #[error("invalid email")]
    InvalidEmail,

    #[error("weak password")]
    WeakPassword,

    #[error("invalid or expired token")]
    InvalidToken,

    #[error("session revoked")]
    SessionRevoked,

    #[error("auth provider failure: {0}")]
    Provider(String),
}

impl AuthError {
    /// The fixed, human-readable message shown to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::EmailInUse => "This email is already in use.",
            AuthError::InvalidEmail => "Invalid email format.",
            AuthError::WeakPassword => "Password is too weak.",
            AuthError::InvalidCredentials => "Invalid email or password.",
            AuthError::InvalidToken | AuthError::SessionRevoked => {
                "Your session has expired. Please sign in again."
            }
            AuthError::Provider(_) => "Something went wrong. Please try again.",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AuthError::EmailInUse => StatusCode::CONFLICT,
            AuthError::InvalidEmail | AuthError::WeakPassword => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials | AuthError::InvalidToken | AuthError::SessionRevoked => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::Provider(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { collection, id } => {
                Error::NotFound(format!("{} document {} not found", collection, id))
            }
            other => Error::Store(other),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, error_message) = match self {
            Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Error::Auth(err) => {
                if let AuthError::Provider(detail) = &err {
                    tracing::error!("Auth provider failure: {}", detail);
                }
                (err.status(), err.user_message().to_string())
            }
            Error::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            Error::Json(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            Error::Store(err) => {
                tracing::error!("Store failure: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            Error::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred".to_string(),
            ),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
