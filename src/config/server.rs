//! Server configuration loaded from environment variables.
//!
//! Variables may come from the real environment or from a `.env` file loaded by
//! `dotenvy` in `main`. Every setting has a default, so an empty environment
//! yields a working local configuration.

use crate::errors::{Error, Result};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Runtime settings for the HTTP server and its storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host to bind to (`HOST`, default `0.0.0.0`)
    pub host: String,
    /// Port to bind to (`PORT`, default 3000)
    pub port: u16,
    /// Path of the `SQLite` file (`DATABASE_PATH`, default `db/plantas.db`)
    pub database_path: PathBuf,
    /// Upper bound for handling a single request (`REQUEST_TIMEOUT_SECS`, default 30)
    pub request_timeout: Duration,
    /// Allowed CORS origins (`CORS_ORIGINS`, comma separated); empty allows any origin
    pub cors_origins: Vec<String>,
    /// Seed catalog file (`SEED_CONFIG`, default `config.toml`)
    pub seed_config_path: PathBuf,
    /// Directory holding `default.png` (`ASSETS_DIR`, default `assets`)
    pub assets_dir: PathBuf,
    /// Directory the default image is published to (`PUBLIC_DIR`, default `public`)
    pub public_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            database_path: PathBuf::from("db/plantas.db"),
            request_timeout: Duration::from_secs(30),
            cors_origins: Vec::new(),
            seed_config_path: PathBuf::from("config.toml"),
            assets_dir: PathBuf::from("assets"),
            public_dir: PathBuf::from("public"),
        }
    }
}

impl ServerConfig {
    /// Loads the configuration from the process environment.
    ///
    /// # Errors
    /// Returns `Error::Config` if `PORT` or `REQUEST_TIMEOUT_SECS` is not a valid number.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads the configuration through an arbitrary key lookup.
    ///
    /// Blank values are treated as unset.
    ///
    /// # Errors
    /// Returns `Error::Config` if a numeric setting cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let request_timeout = match get("REQUEST_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse_number("REQUEST_TIMEOUT_SECS", &raw)?),
            None => defaults.request_timeout,
        };

        Ok(Self {
            host: get("HOST").unwrap_or(defaults.host),
            port: get("PORT")
                .map(|raw| parse_number("PORT", &raw))
                .transpose()?
                .unwrap_or(defaults.port),
            database_path: get("DATABASE_PATH").map_or(defaults.database_path, PathBuf::from),
            request_timeout,
            cors_origins: get("CORS_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|origin| !origin.is_empty())
                        .map(ToString::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            seed_config_path: get("SEED_CONFIG").map_or(defaults.seed_config_path, PathBuf::from),
            assets_dir: get("ASSETS_DIR").map_or(defaults.assets_dir, PathBuf::from),
            public_dir: get("PUBLIC_DIR").map_or(defaults.public_dir, PathBuf::from),
        })
    }

    /// Socket address string, e.g. `0.0.0.0:3000`.
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_number<T: FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim().parse().map_err(|_| Error::Config {
        message: format!("{key} must be a number, got {raw:?}"),
    })
}
