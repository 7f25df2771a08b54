use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use tracing::debug;

use crate::error::UserDirError;
use crate::types::reply::MISSING_CREDENTIALS;

#[derive(Debug, Default)]
pub struct CredentialQuery {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl CredentialQuery {
    /// First occurrence of each key wins; repeats and unknown keys are ignored.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "username" if query.username.is_none() => query.username = Some(value),
                "password" if query.password.is_none() => query.password = Some(value),
                _ => {}
            }
        }
        query
    }
}

/// `username` and `password` taken from the query string.
/// Rejects with the "required" ERROR body when either is absent.
#[derive(Debug, Clone)]
pub struct RequiredCredentials {
    pub username: String,
    pub password: String,
}

impl<S> FromRequestParts<S> for RequiredCredentials
where
    S: Send + Sync,
{
    type Rejection = UserDirError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // An unparsable query string counts as missing fields.
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .unwrap_or_else(|_| Query(Vec::new()));
        let query = CredentialQuery::from_pairs(pairs);
        match (query.username, query.password) {
            (Some(username), Some(password)) => Ok(Self { username, password }),
            _ => {
                debug!(method = %parts.method, path = parts.uri.path(), "username or password is missing");
                Err(UserDirError::Validation(MISSING_CREDENTIALS))
            }
        }
    }
}
