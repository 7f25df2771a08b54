use crate::config::Config;
use crate::error::UserDirError;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber: stdout plus an append-only copy in `cfg.log_file`.
/// `RUST_LOG` takes precedence over `LOG_LEVEL`.
pub fn init(cfg: &Config) -> Result<(), UserDirError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&cfg.log_file)?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.log_level.as_filter()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_level(true)
                .with_target(true)
                .with_writer(Arc::new(file)),
        )
        .init();
    Ok(())
}

/// Whole contents of the log file.
pub async fn read_log_file(path: &Path) -> Result<String, UserDirError> {
    Ok(tokio::fs::read_to_string(path).await?)
}
