use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::{debug, warn};

use crate::middleware::RequiredCredentials;
use crate::router::UserDirState;
use crate::types::ApiReply;
use crate::types::reply::json_text;

/// GET /api/user/ and /api/get_users -> `[[id, user_name, password], ...]`
pub async fn list_users(State(state): State<UserDirState>) -> Response {
    let users = match state.service.list_users().await {
        Ok(users) => users,
        Err(e) => {
            warn!(error = %e, "failed to list users");
            return ApiReply::error("Failed to get the users.").into_response();
        }
    };
    match to_pretty_json(&users) {
        Ok(body) => json_text(body),
        Err(e) => {
            warn!(error = %e, "failed to encode users");
            ApiReply::error("Failed to get the users.").into_response()
        }
    }
}

/// POST /api/user/?username=..&password=..
pub async fn add_user(State(state): State<UserDirState>, creds: RequiredCredentials) -> ApiReply {
    store_user(&state, &creds.username, &creds.password).await
}

/// GET /api/add_user/{username}/{password}
pub async fn raw_add_user(
    State(state): State<UserDirState>,
    Path((username, password)): Path<(String, String)>,
) -> ApiReply {
    store_user(&state, &username, &password).await
}

/// DELETE /api/user/?username=..&password=..
pub async fn delete_user(
    State(state): State<UserDirState>,
    creds: RequiredCredentials,
) -> ApiReply {
    match state
        .service
        .delete_user(&creds.username, &creds.password)
        .await
    {
        Ok(()) => ApiReply::success(format!("user {} deleted.", creds.username)),
        Err(_) => ApiReply::error("Failed to delete the user."),
    }
}

/// GET /api/user_check/{username}/{password}
pub async fn raw_user_check(
    State(state): State<UserDirState>,
    Path((username, password)): Path<(String, String)>,
) -> ApiReply {
    check_user(&state, &username, &password).await
}

/// GET|POST /api/user_check/?username=..&password=..
pub async fn user_check(State(state): State<UserDirState>, creds: RequiredCredentials) -> ApiReply {
    debug!(username = %creds.username, "user_check");
    check_user(&state, &creds.username, &creds.password).await
}

async fn store_user(state: &UserDirState, username: &str, password: &str) -> ApiReply {
    match state.service.add_user(username, password).await {
        Ok(()) => ApiReply::success(format!("user {username} created.")),
        Err(_) => ApiReply::error("Failed to add the user."),
    }
}

async fn check_user(state: &UserDirState, username: &str, password: &str) -> ApiReply {
    match state.service.verify_password(username, password).await {
        Ok(true) => ApiReply::success(format!("user {username} and password matching.")),
        Ok(false) => ApiReply::failed(format!("user {username} or password is wrong.")),
        Err(e) => {
            debug!(username, error = %e, "failed to get the user");
            ApiReply::error("Failed to get the user.")
        }
    }
}

/// Four-space indented JSON.
fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    // serde_json only ever writes valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
