use crate::db::{DbUser, UsersStorage};
use crate::error::UserDirError;
use crate::service::hasher::hash_password;
use subtle::ConstantTimeEq;
use tracing::{debug, info};

/// Accounts created by `seed_demo_users`, for demos and local testing only.
pub const DEMO_USERS: [(&str, &str); 3] = [
    ("admin", "admin"),
    ("test1", "test1"),
    ("user_name", "Password"),
];

/// Add/delete/verify users. Plaintext passwords never reach the storage layer.
#[derive(Clone)]
pub struct CredentialService {
    storage: UsersStorage,
}

impl CredentialService {
    pub fn new(storage: UsersStorage) -> Self {
        Self { storage }
    }

    pub async fn list_users(&self) -> Result<Vec<DbUser>, UserDirError> {
        self.storage.list_all().await
    }

    pub async fn add_user(&self, username: &str, password: &str) -> Result<(), UserDirError> {
        self.storage
            .upsert(username, &hash_password(password))
            .await?;
        info!(username, "user stored");
        Ok(())
    }

    /// Removes the user only if `password` hashes to the stored digest.
    pub async fn delete_user(&self, username: &str, password: &str) -> Result<(), UserDirError> {
        let removed = self
            .storage
            .delete(username, &hash_password(password))
            .await?;
        info!(username, removed, "user delete requested");
        Ok(())
    }

    pub async fn user_exists(&self, username: &str) -> bool {
        self.storage.get_password_hash(username).await.is_ok()
    }

    /// Compare `password` against the stored digest. Lookup failures, including
    /// an unknown user, are returned as errors.
    pub async fn verify_password(
        &self,
        username: &str,
        password: &str,
    ) -> Result<bool, UserDirError> {
        let stored = self.storage.get_password_hash(username).await?;
        let candidate = hash_password(password);
        Ok(bool::from(stored.as_bytes().ct_eq(candidate.as_bytes())))
    }

    pub async fn check_password(&self, username: &str, password: &str) -> bool {
        match self.verify_password(username, password).await {
            Ok(matched) => matched,
            Err(e) => {
                debug!(username, error = %e, "password check failed");
                false
            }
        }
    }

    pub async fn seed_demo_users(&self) -> Result<(), UserDirError> {
        for (username, password) in DEMO_USERS {
            self.add_user(username, password).await?;
        }
        info!(count = DEMO_USERS.len(), "demo users seeded");
        Ok(())
    }
}
