use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use user_directory::db::UsersStorage;
use user_directory::router::{UserDirState, user_dir_router};
use user_directory::{Config, CredentialService};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::from_env()?;
    user_directory::logging::init(&cfg)?;

    info!(
        db_path = %cfg.db_path.display(),
        log_file = %cfg.log_file.display(),
        loglevel = %cfg.log_level,
        seed_demo_users = cfg.seed_demo_users
    );

    let storage = UsersStorage::connect(&cfg.db_path).await?;
    let service = CredentialService::new(storage);

    if cfg.seed_demo_users {
        warn!("SEED_DEMO_USERS is set; creating demo accounts with well-known passwords");
        service.seed_demo_users().await?;
    }

    let state = UserDirState::new(service, cfg.log_file.clone());
    let app = user_dir_router(state);

    let listener = TcpListener::bind(cfg.listen_addr.as_str()).await?;
    info!("HTTP server listening on {}", cfg.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
