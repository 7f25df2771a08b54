//! SQL DDL for initializing the user storage.

/// SQLite table with:
/// - `id` INTEGER PRIMARY KEY AUTOINCREMENT
/// - `user_name` plain TEXT, made unique by a separate index so databases created
///   without the constraint pick it up on the next start
/// - `password` hex SHA-256 digest of the plaintext
pub const SQLITE_CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_name TEXT NOT NULL,
    password TEXT NOT NULL
)
"#;

/// Older tables may hold several rows per name. Lookups always returned the
/// lowest id, so that row is the one kept.
pub const SQLITE_DEDUPE_USERS: &str = r#"
DELETE FROM users
WHERE id NOT IN (SELECT MIN(id) FROM users GROUP BY user_name)
"#;

/// Conflict target for the upsert.
pub const SQLITE_UNIQUE_USER_NAME: &str =
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_users_user_name ON users(user_name)";
