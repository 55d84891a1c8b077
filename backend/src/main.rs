//! Backend entry-point: wires the REST endpoints over PostgreSQL storage.

mod server;

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use server::ServerConfig;
use trivia_backend::inbound::http::HttpState;
use trivia_backend::outbound::persistence::{
    DbPool, DieselCategoryRepository, DieselQuestionRepository, PoolConfig,
};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = ServerConfig::from_env()?;
    let pool = DbPool::new(PoolConfig::new(config.database_url()))
        .await
        .map_err(|err| std::io::Error::other(err.to_string()))?;

    let state = HttpState::new(
        Arc::new(DieselQuestionRepository::new(pool.clone())),
        Arc::new(DieselCategoryRepository::new(pool)),
    );

    info!(addr = %config.bind_addr(), "starting trivia backend");
    server::create_server(state, config.bind_addr())?.await
}
