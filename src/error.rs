use axum::response::{IntoResponse, Response};
use thiserror::Error as ThisError;

use crate::types::ApiReply;

#[derive(Debug, ThisError)]
pub enum UserDirError {
    #[error("Validation error: {0}")]
    Validation(&'static str),

    #[error("Database error: {0}")]
    Query(#[from] sqlx::Error),

    #[error("user {username} not found")]
    NotFound { username: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl From<figment::Error> for UserDirError {
    fn from(e: figment::Error) -> Self {
        UserDirError::Config(Box::new(e))
    }
}

impl UserDirError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, UserDirError::NotFound { .. })
    }
}

/// Errors that escape a handler still answer 200 with an ERROR body.
/// Validation messages are shown as-is; other causes stay in the logs.
impl IntoResponse for UserDirError {
    fn into_response(self) -> Response {
        match self {
            UserDirError::Validation(msg) => ApiReply::error(msg).into_response(),
            _ => ApiReply::error("Failed to process the request.").into_response(),
        }
    }
}
