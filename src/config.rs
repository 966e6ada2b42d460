use std::{env, str::FromStr, time::Duration};

use crate::errors::ServerError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    Memory,
    Postgres,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub store: StoreKind,
    pub database_url: Option<String>,
    pub pool_size: u32,
    pub seed_example_note: bool,
    /// Sustained requests per second allowed for one peer once the burst is spent.
    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,
}

impl Config {
    /// Reads the process environment; call `dotenv::dotenv()` first to pick up
    /// a `.env` file.
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").filter(|url| !url.is_empty());
        let store = match lookup("NOTAS_STORE").as_deref() {
            Some("memory") => StoreKind::Memory,
            Some("postgres") => StoreKind::Postgres,
            Some(other) => {
                log::error!("NOTAS_STORE must be `memory` or `postgres`, got `{other}`");
                return Err(ServerError::EnvironmentError);
            }
            None if database_url.is_some() => StoreKind::Postgres,
            None => StoreKind::Memory,
        };
        if store == StoreKind::Postgres && database_url.is_none() {
            log::error!("NOTAS_STORE=postgres requires DATABASE_URL");
            return Err(ServerError::EnvironmentError);
        }

        let rate_limit_per_second = parse_or(&lookup, "RATE_LIMIT_PER_SECOND", 2)?;
        let rate_limit_burst = parse_or(&lookup, "RATE_LIMIT_BURST", 120)?;
        if rate_limit_per_second == 0 || rate_limit_burst == 0 {
            log::error!("RATE_LIMIT_PER_SECOND and RATE_LIMIT_BURST must be positive");
            return Err(ServerError::EnvironmentError);
        }

        Ok(Config {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 8000)?,
            store,
            database_url,
            pool_size: parse_or(&lookup, "DATABASE_POOL_SIZE", 10)?,
            seed_example_note: parse_or(&lookup, "SEED_EXAMPLE_NOTE", true)?,
            rate_limit_per_second,
            rate_limit_burst,
        })
    }

    /// Time for one peer to earn back a single request.
    pub fn replenish_interval(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / self.rate_limit_per_second.max(1))
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ServerError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse::<T>().map_err(|_| {
            log::error!("{key} has an invalid value: `{raw}`");
            ServerError::EnvironmentError
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<Config, ServerError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_to_memory_without_database() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.store, StoreKind::Memory);
        assert_eq!(cfg.port, 8000);
        assert!(cfg.seed_example_note);
    }

    #[test]
    fn database_url_selects_postgres() {
        let cfg = config(&[("DATABASE_URL", "postgres://localhost/notas")]).unwrap();
        assert_eq!(cfg.store, StoreKind::Postgres);

        let forced = config(&[
            ("DATABASE_URL", "postgres://localhost/notas"),
            ("NOTAS_STORE", "memory"),
        ])
        .unwrap();
        assert_eq!(forced.store, StoreKind::Memory);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(config(&[("NOTAS_STORE", "postgres")]).is_err());
        assert!(config(&[("NOTAS_STORE", "redis")]).is_err());
        assert!(config(&[("PORT", "eighty")]).is_err());
        assert!(config(&[("SEED_EXAMPLE_NOTE", "yes")]).is_err());
        assert!(config(&[("RATE_LIMIT_PER_SECOND", "0")]).is_err());
        assert!(config(&[("RATE_LIMIT_BURST", "0")]).is_err());
    }

    #[test]
    fn rate_limit_counts_requests_per_second() {
        let default = config(&[]).unwrap();
        assert_eq!(default.replenish_interval(), Duration::from_millis(500));

        let faster = config(&[("RATE_LIMIT_PER_SECOND", "4")]).unwrap();
        assert_eq!(faster.replenish_interval(), Duration::from_millis(250));
        assert!(faster.replenish_interval() < default.replenish_interval());
    }
}
