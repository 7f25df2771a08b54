//! Database module: the user table and its storage operations.
//!
//! Layout:
//! - `models.rs`: Rust struct mirroring a `users` row
//! - `schema.rs`: SQL DDL for initializing the database (SQLite)
//! - `sqlite.rs`: `UsersStorage`, the only owner of persisted user records

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::DbUser;
pub use sqlite::{SqlitePool, UsersStorage};
