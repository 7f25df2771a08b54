use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use serde_json::Value;
use std::fs;
use tempfile::TempDir;
use tower::ServiceExt;
use user_directory::CredentialService;
use user_directory::db::UsersStorage;
use user_directory::router::{UserDirState, user_dir_router};

struct TestApp {
    _dir: TempDir,
    app: Router,
    log_file: std::path::PathBuf,
}

async fn spawn_app() -> TestApp {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let storage = UsersStorage::connect(&dir.path().join("users.db"))
        .await
        .expect("failed to open database");
    let log_file = dir.path().join("api.log");
    let state = UserDirState::new(CredentialService::new(storage), log_file.clone());
    TestApp {
        app: user_dir_router(state),
        _dir: dir,
        log_file,
    }
}

async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, String) {
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    let status = resp.status();
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let body = String::from_utf8(body.to_vec()).expect("response body was not utf-8");
    (status, body)
}

fn parse(body: &str) -> Value {
    serde_json::from_str(body).expect("response body was not JSON")
}

#[tokio::test]
async fn post_without_password_is_rejected() {
    let t = spawn_app().await;
    let (status, body) = send(&t.app, "POST", "/api/user/?username=alice").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["ERROR"], "username and password is required.");
}

#[tokio::test]
async fn repeated_query_key_uses_first_value() {
    let t = spawn_app().await;
    let (status, body) = send(
        &t.app,
        "POST",
        "/api/user/?username=a&username=b&password=p",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["SUCCESS"], "user a created.");

    let (_, body) = send(&t.app, "GET", "/api/user_check/a/p").await;
    assert_eq!(parse(&body)["SUCCESS"], "user a and password matching.");
    let (_, body) = send(&t.app, "GET", "/api/user_check/b/p").await;
    assert_eq!(parse(&body)["ERROR"], "Failed to get the user.");
}

#[tokio::test]
async fn backend_failures_answer_generic_errors() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let storage = UsersStorage::connect(&dir.path().join("users.db"))
        .await
        .expect("failed to open database");
    sqlx::query("DROP TABLE users")
        .execute(storage.pool())
        .await
        .expect("failed to drop table");
    let state = UserDirState::new(CredentialService::new(storage), dir.path().join("api.log"));
    let app = user_dir_router(state);

    let cases = [
        ("POST", "/api/user/?username=x&password=y", "Failed to add the user."),
        ("GET", "/api/add_user/x/y", "Failed to add the user."),
        ("DELETE", "/api/user/?username=x&password=y", "Failed to delete the user."),
        ("GET", "/api/user/", "Failed to get the users."),
        ("GET", "/api/get_users", "Failed to get the users."),
        ("GET", "/api/user_check/x/y", "Failed to get the user."),
    ];
    for (method, uri, expected) in cases {
        let (status, body) = send(&app, method, uri).await;
        assert_eq!(status, StatusCode::OK, "{method} {uri}");
        assert_eq!(parse(&body)["ERROR"], expected, "{method} {uri}");
    }
}

#[tokio::test]
async fn add_then_check_via_path() {
    let t = spawn_app().await;
    let (_, body) = send(&t.app, "POST", "/api/user/?username=alice&password=pw").await;
    assert_eq!(parse(&body)["SUCCESS"], "user alice created.");

    let (status, body) = send(&t.app, "GET", "/api/user_check/alice/pw").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["SUCCESS"], "user alice and password matching.");

    let (_, body) = send(&t.app, "GET", "/api/user_check/alice/nope").await;
    assert_eq!(parse(&body)["FAILED"], "user alice or password is wrong.");
}

#[tokio::test]
async fn query_check_delegates_and_unknown_user_errors() {
    let t = spawn_app().await;
    send(&t.app, "GET", "/api/add_user/bob/secret").await;

    let (_, body) = send(&t.app, "POST", "/api/user_check/?username=bob&password=secret").await;
    assert_eq!(parse(&body)["SUCCESS"], "user bob and password matching.");

    let (_, body) = send(&t.app, "GET", "/api/user_check/?username=ghost&password=x").await;
    assert_eq!(parse(&body)["ERROR"], "Failed to get the user.");

    let (_, body) = send(&t.app, "GET", "/api/user_check/?username=bob").await;
    assert_eq!(parse(&body)["ERROR"], "username and password is required.");
}

#[tokio::test]
async fn list_returns_triples() {
    let t = spawn_app().await;
    send(&t.app, "GET", "/api/add_user/carol/pw").await;

    let (_, body) = send(&t.app, "GET", "/api/get_users").await;
    let rows = parse(&body);
    let rows = rows.as_array().expect("array of users");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][1], "carol");
    assert_eq!(
        rows[0][2],
        "30c952fab122c3f9759f02a6d95c3758b246b4fee239957b2d4fee46e26170c4"
    );

    let (_, same) = send(&t.app, "GET", "/api/user/").await;
    assert_eq!(body, same);
}

#[tokio::test]
async fn delete_only_with_matching_password() {
    let t = spawn_app().await;
    send(&t.app, "GET", "/api/add_user/dave/pw").await;

    let (_, body) = send(&t.app, "DELETE", "/api/user/?username=dave&password=bad").await;
    assert_eq!(parse(&body)["SUCCESS"], "user dave deleted.");
    let (_, body) = send(&t.app, "GET", "/api/user_check/dave/pw").await;
    assert!(parse(&body).get("SUCCESS").is_some());

    send(&t.app, "DELETE", "/api/user/?username=dave&password=pw").await;
    let (_, body) = send(&t.app, "GET", "/api/user_check/dave/pw").await;
    assert_eq!(parse(&body)["ERROR"], "Failed to get the user.");

    let (_, body) = send(&t.app, "DELETE", "/api/user/?password=pw").await;
    assert_eq!(parse(&body)["ERROR"], "username and password is required.");
}

#[tokio::test]
async fn unknown_route_falls_back_to_welcome() {
    let t = spawn_app().await;
    let (status, body) = send(&t.app, "GET", "/no/such/page").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Welcome to example api V0.1"));

    let (_, root) = send(&t.app, "GET", "/").await;
    assert_eq!(body, root);
}

#[tokio::test]
async fn logs_are_served_as_json_string() {
    let t = spawn_app().await;
    let (_, body) = send(&t.app, "GET", "/api/get_logs").await;
    assert_eq!(parse(&body)["ERROR"], "Failed get the logs.");

    fs::write(&t.log_file, "2026-01-01 INFO started\n").expect("write log");
    let (_, body) = send(&t.app, "GET", "/api/get_logs").await;
    assert_eq!(parse(&body), Value::String("2026-01-01 INFO started\n".into()));
}
