//! Server configuration types.

use std::net::SocketAddr;

/// Default connection string when neither `DATABASE_URL` nor `DB_URI` is set.
pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/hero_powers";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5555";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Which [`crate::store::HeroStore`] implementation backs the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    /// Seeded in-process tables; nothing survives a restart.
    Memory,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub backend: StoreBackend,
    pub max_connections: u32,
    /// Create the target database through the `postgres` admin database when it is missing
    /// (postgres backend only). Needs a role allowed to connect there and run CREATE DATABASE.
    pub create_database: bool,
    /// Run the idempotent table DDL at startup (postgres backend only).
    pub apply_migrations: bool,
    /// Insert sample heroes and powers when the tables are empty (postgres backend only).
    pub seed_data: bool,
}
