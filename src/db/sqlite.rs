use crate::db::models::DbUser;
use crate::db::schema::{SQLITE_CREATE_USERS, SQLITE_DEDUPE_USERS, SQLITE_UNIQUE_USER_NAME};
use crate::error::UserDirError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use tracing::{debug, error, warn};

pub type SqlitePool = Pool<Sqlite>;

/// Owner of the `users` table. Each call borrows a pooled connection for the
/// duration of one statement and hands it back on every exit path.
#[derive(Clone)]
pub struct UsersStorage {
    pool: SqlitePool,
}

impl UsersStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) the database file at `db_path` and ensure the schema.
    pub async fn connect(db_path: &Path) -> Result<Self, UserDirError> {
        let connect_opts = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .connect_with(connect_opts)
            .await
            .inspect_err(|e| error!(path = %db_path.display(), error = %e, "failed to open database"))?;
        let storage = Self::new(pool);
        storage.init_schema().await?;
        Ok(storage)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the table, drop duplicate names left by older databases, then
    /// add the unique index. Idempotent.
    pub async fn init_schema(&self) -> Result<(), UserDirError> {
        sqlx::query(SQLITE_CREATE_USERS)
            .execute(&self.pool)
            .await
            .inspect_err(|e| error!(error = %e, "failed to create users table"))?;

        let deduped = sqlx::query(SQLITE_DEDUPE_USERS)
            .execute(&self.pool)
            .await
            .inspect_err(|e| error!(error = %e, "failed to remove duplicate users"))?;
        if deduped.rows_affected() > 0 {
            warn!(
                removed = deduped.rows_affected(),
                "removed duplicate user rows, kept the oldest per user_name"
            );
        }

        sqlx::query(SQLITE_UNIQUE_USER_NAME)
            .execute(&self.pool)
            .await
            .inspect_err(|e| error!(error = %e, "failed to index users.user_name"))?;
        Ok(())
    }

    pub async fn list_all(&self) -> Result<Vec<DbUser>, UserDirError> {
        // older tables declare the key as `ID`; alias so the row name is stable
        let rows = sqlx::query_as::<_, DbUser>(
            "SELECT id AS id, user_name, password FROM users ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .inspect_err(|e| error!(error = %e, "can't execute the query"))?;
        Ok(rows)
    }

    /// Upsert by unique user_name; an existing row keeps its id.
    pub async fn upsert(&self, user_name: &str, password_hash: &str) -> Result<(), UserDirError> {
        sqlx::query(
            r#"
            INSERT INTO users (user_name, password) VALUES (?, ?)
            ON CONFLICT(user_name) DO UPDATE SET password=excluded.password
            "#,
        )
        .bind(user_name)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .inspect_err(|e| error!(user_name, error = %e, "can't execute the query"))?;
        Ok(())
    }

    /// Delete rows matching both fields. Zero matches is not an error.
    pub async fn delete(&self, user_name: &str, password_hash: &str) -> Result<u64, UserDirError> {
        let res = sqlx::query("DELETE FROM users WHERE user_name = ? AND password = ?")
            .bind(user_name)
            .bind(password_hash)
            .execute(&self.pool)
            .await
            .inspect_err(|e| error!(user_name, error = %e, "can't execute the query"))?;
        debug!(user_name, removed = res.rows_affected(), "delete executed");
        Ok(res.rows_affected())
    }

    pub async fn get_password_hash(&self, user_name: &str) -> Result<String, UserDirError> {
        let rec: Option<(String,)> =
            sqlx::query_as("SELECT password FROM users WHERE user_name = ? ORDER BY id LIMIT 1")
                .bind(user_name)
                .fetch_optional(&self.pool)
                .await
                .inspect_err(|e| error!(user_name, error = %e, "can't execute the query"))?;
        rec.map(|r| r.0).ok_or_else(|| UserDirError::NotFound {
            username: user_name.to_string(),
        })
    }
}
