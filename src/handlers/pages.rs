use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
};
use tracing::error;

use crate::error::UserDirError;
use crate::logging::read_log_file;
use crate::router::UserDirState;
use crate::types::ApiReply;
use crate::types::reply::json_text;

pub const WELCOME_PAGE: &str = r#"
    <h1>Welcome to example api V0.1</h1>
    <h2>API's:</h2>
    <h3>POST/GET/DELETE</h3>
    <p>username and password is required</p>
    <p>/api/user</p>
    <p>check user: /api/user_check (POST/GET)</p>
    <h3>RAW</h3>
    <p>add user: /api/add_user/username/password</p>
    <p>check user: /api/user_check/username/password</p>
    <p>/api/get_users</p>
    <p>/api/get_logs</p>
    "#;

/// GET / and the fallback for every unmatched route.
pub async fn welcome() -> Html<&'static str> {
    Html(WELCOME_PAGE)
}

/// GET /api/get_logs -> the log file as one JSON string.
pub async fn get_logs(State(state): State<UserDirState>) -> Response {
    let encoded: Result<String, UserDirError> = read_log_file(&state.log_file)
        .await
        .and_then(|contents| Ok(serde_json::to_string(&contents)?));
    match encoded {
        Ok(body) => json_text(body),
        Err(e) => {
            error!(path = %state.log_file.display(), error = %e, "can't read the log file");
            ApiReply::error("Failed get the logs.").into_response()
        }
    }
}
