//! Server binary: reads config from the environment (and `.env`), prepares the store, serves the API.

use hero_powers::{
    app, apply_migrations, connect, ensure_database_exists, seed_if_empty, AppState, MemoryStore, PgStore,
    ServerConfig, StoreBackend,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("hero_powers=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let state = match config.backend {
        StoreBackend::Memory => {
            tracing::warn!("using in-memory store; data is lost on restart");
            AppState::new(MemoryStore::seeded())
        }
        StoreBackend::Postgres => {
            if config.create_database {
                ensure_database_exists(&config.database_url).await?;
            }
            let pool = connect(&config).await?;
            if config.apply_migrations {
                apply_migrations(&pool).await?;
            }
            if config.seed_data {
                seed_if_empty(&pool).await?;
            }
            AppState::new(PgStore::new(pool))
        }
    };

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!(backend = ?config.backend, "listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
