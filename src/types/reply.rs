use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// One-key JSON message. Every outcome, failures included, is sent with 200 OK.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiReply {
    Success(String),
    Failed(String),
    Error(String),
}

pub const MISSING_CREDENTIALS: &str = "username and password is required.";

impl ApiReply {
    pub fn success(msg: impl Into<String>) -> Self {
        ApiReply::Success(msg.into())
    }

    pub fn failed(msg: impl Into<String>) -> Self {
        ApiReply::Failed(msg.into())
    }

    pub fn error(msg: impl Into<String>) -> Self {
        ApiReply::Error(msg.into())
    }

    pub fn body(&self) -> String {
        let value = match self {
            ApiReply::Success(m) => json!({ "SUCCESS": m }),
            ApiReply::Failed(m) => json!({ "FAILED": m }),
            ApiReply::Error(m) => json!({ "ERROR": m }),
        };
        value.to_string()
    }
}

impl IntoResponse for ApiReply {
    fn into_response(self) -> Response {
        json_text(self.body())
    }
}

/// Pre-rendered JSON text with a JSON content type.
pub fn json_text(body: String) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}
