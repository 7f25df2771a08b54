use axum::{Router, routing::get};
use std::path::PathBuf;
use std::sync::Arc;

use crate::handlers::{pages, users};
use crate::service::CredentialService;

#[derive(Clone)]
pub struct UserDirState {
    pub service: CredentialService,
    pub log_file: Arc<PathBuf>,
}

impl UserDirState {
    pub fn new(service: CredentialService, log_file: impl Into<PathBuf>) -> Self {
        Self {
            service,
            log_file: Arc::new(log_file.into()),
        }
    }
}

pub fn user_dir_router(state: UserDirState) -> Router {
    let user_routes = get(users::list_users)
        .post(users::add_user)
        .delete(users::delete_user);
    let check_routes = get(users::user_check).post(users::user_check);

    Router::new()
        .route("/", get(pages::welcome))
        .route("/api/user", user_routes.clone())
        .route("/api/user/", user_routes)
        .route("/api/add_user/{username}/{password}", get(users::raw_add_user))
        .route(
            "/api/user_check/{username}/{password}",
            get(users::raw_user_check),
        )
        .route("/api/user_check", check_routes.clone())
        .route("/api/user_check/", check_routes)
        .route("/api/get_users", get(users::list_users))
        .route("/api/get_logs", get(pages::get_logs))
        .fallback(pages::welcome)
        .with_state(state)
}
