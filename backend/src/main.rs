//! Backend entry point: config, logging, migrations, and the HTTP server.

use actix_web::HttpServer;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use backend::server::{AppConfig, build_app, build_state};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;

    let pool = match &config.database_url {
        Some(url) => {
            let migration_url = url.clone();
            let applied = tokio::task::spawn_blocking(move || {
                run_pending_migrations(&migration_url)
            })
            .await
            .map_err(std::io::Error::other)?
            .map_err(std::io::Error::other)?;
            if applied > 0 {
                info!(applied, "database migrations applied");
            }

            let pool = DbPool::connect(PoolConfig::new(url))
                .await
                .map_err(std::io::Error::other)?;
            Some(pool)
        }
        None => {
            warn!("DATABASE_URL not set; falling back to in-memory fixture stores");
            None
        }
    };

    let state = build_state(&config, pool);
    let health = state.health.clone();

    info!(addr = %config.bind_addr, "starting server");
    let server = HttpServer::new(move || build_app(state.clone())).bind(config.bind_addr)?;

    health.mark_ready();
    server.run().await
}
