//! Environment-driven configuration.
//!
//! Defaults are layered under raw environment variables (`LOG_LEVEL`, `DB_PATH`,
//! `LOG_FILE`, `LISTEN_ADDR`, `SEED_DEMO_USERS`). The resulting [`Config`] is
//! passed explicitly into the storage, service and router constructors.

use crate::error::UserDirError;
use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_DB_PATH: &str = "example_db.db";
pub const DEFAULT_LOG_FILE: &str = "example_API_log.log";
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:5000";

const ENV_KEYS: [&str; 5] = [
    "log_level",
    "db_path",
    "log_file",
    "listen_addr",
    "seed_demo_users",
];

/// Verbosity accepted in `LOG_LEVEL`. Anything unrecognised falls back to `Debug`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Error,
    Info,
    #[default]
    Debug,
}

impl LogLevel {
    pub fn parse_or_default(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "ERROR" => LogLevel::Error,
            "INFO" => LogLevel::Info,
            _ => LogLevel::Debug,
        }
    }

    /// Directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_filter())
    }
}

// Env values like `LOG_LEVEL=10` arrive as numbers, so accept any value shape.
impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value {
            serde_json::Value::String(s) => LogLevel::parse_or_default(&s),
            _ => LogLevel::Debug,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub log_level: LogLevel,
    pub db_path: PathBuf,
    pub log_file: PathBuf,
    pub listen_addr: String,
    pub seed_demo_users: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            seed_demo_users: false,
        }
    }
}

impl Config {
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::raw().only(&ENV_KEYS))
    }

    /// Load from the process environment.
    pub fn from_env() -> Result<Self, UserDirError> {
        let cfg: Config = Self::figment().extract()?;
        Ok(cfg.normalized())
    }

    /// Empty path values mean "use the default".
    fn normalized(mut self) -> Self {
        if self.db_path.as_os_str().is_empty() {
            self.db_path = PathBuf::from(DEFAULT_DB_PATH);
        }
        if self.log_file.as_os_str().is_empty() {
            self.log_file = PathBuf::from(DEFAULT_LOG_FILE);
        }
        self
    }
}
