//! Load [`ServerConfig`] from environment variables.

use crate::config::types::*;
use crate::error::ConfigError;
use std::net::SocketAddr;

impl ServerConfig {
    /// Read from the process environment. Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_url = get("DATABASE_URL")
            .or_else(|| get("DB_URI"))
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.into());

        let bind_raw = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr: SocketAddr = bind_raw.parse().map_err(|_| ConfigError::Invalid {
            key: "BIND_ADDR",
            value: bind_raw.clone(),
        })?;

        let backend = match get("STORE_BACKEND") {
            None => StoreBackend::Postgres,
            Some(v) => match v.to_lowercase().as_str() {
                "postgres" | "postgresql" => StoreBackend::Postgres,
                "memory" => StoreBackend::Memory,
                _ => return Err(ConfigError::Invalid { key: "STORE_BACKEND", value: v }),
            },
        };

        let max_connections = match get("MAX_CONNECTIONS") {
            None => DEFAULT_MAX_CONNECTIONS,
            Some(v) => match v.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::Invalid { key: "MAX_CONNECTIONS", value: v }),
            },
        };

        Ok(ServerConfig {
            database_url,
            bind_addr,
            backend,
            max_connections,
            create_database: parse_flag("CREATE_DATABASE", get("CREATE_DATABASE"), false)?,
            apply_migrations: parse_flag("APPLY_MIGRATIONS", get("APPLY_MIGRATIONS"), true)?,
            seed_data: parse_flag("SEED_DATA", get("SEED_DATA"), false)?,
        })
    }
}

fn parse_flag(key: &'static str, value: Option<String>, default: bool) -> Result<bool, ConfigError> {
    let Some(v) = value else {
        return Ok(default);
    };
    match v.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid { key, value: v }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let env: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        ServerConfig::from_lookup(|k| env.get(k).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = load(&[]).unwrap();
        assert_eq!(cfg.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(cfg.bind_addr.port(), 5555);
        assert_eq!(cfg.backend, StoreBackend::Postgres);
        assert_eq!(cfg.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert!(!cfg.create_database);
        assert!(cfg.apply_migrations);
        assert!(!cfg.seed_data);
    }

    #[test]
    fn database_url_wins_over_db_uri() {
        let cfg = load(&[("DB_URI", "postgres://a/one"), ("DATABASE_URL", "postgres://b/two")]).unwrap();
        assert_eq!(cfg.database_url, "postgres://b/two");
        let cfg = load(&[("DB_URI", "postgres://a/one"), ("DATABASE_URL", "  ")]).unwrap();
        assert_eq!(cfg.database_url, "postgres://a/one");
    }

    #[test]
    fn memory_backend_and_flags() {
        let cfg = load(&[("STORE_BACKEND", "Memory"), ("APPLY_MIGRATIONS", "off"), ("SEED_DATA", "1")]).unwrap();
        assert_eq!(cfg.backend, StoreBackend::Memory);
        assert!(!cfg.apply_migrations);
        assert!(cfg.seed_data);
    }

    #[test]
    fn database_creation_is_opt_in() {
        assert!(load(&[("CREATE_DATABASE", "true")]).unwrap().create_database);
        assert!(!load(&[("CREATE_DATABASE", "no"), ("APPLY_MIGRATIONS", "yes")]).unwrap().create_database);
        assert!(matches!(
            load(&[("CREATE_DATABASE", "sometimes")]),
            Err(ConfigError::Invalid { key: "CREATE_DATABASE", .. })
        ));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            load(&[("BIND_ADDR", "localhost")]),
            Err(ConfigError::Invalid { key: "BIND_ADDR", .. })
        ));
        assert!(matches!(
            load(&[("STORE_BACKEND", "sqlite")]),
            Err(ConfigError::Invalid { key: "STORE_BACKEND", .. })
        ));
        assert!(matches!(
            load(&[("MAX_CONNECTIONS", "0")]),
            Err(ConfigError::Invalid { key: "MAX_CONNECTIONS", .. })
        ));
        assert!(matches!(
            load(&[("SEED_DATA", "maybe")]),
            Err(ConfigError::Invalid { key: "SEED_DATA", .. })
        ));
    }
}
