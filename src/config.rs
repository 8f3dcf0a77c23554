//! Configuration module
//!
//! Settings come from a TOML file (default
//! `~/.config/user-directory/config.toml`), then environment variables,
//! then CLI flags applied by the binary.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::infrastructure::DatabaseConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("user-directory")
        .join("config.toml")
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSettings,
    pub role_service: RoleServiceConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds in-flight requests get to finish after a shutdown signal
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// SeaORM connection URL; `sqlite://` and `postgres://` are supported
    pub url: String,
    pub max_connections: Option<u32>,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        let DatabaseConfig {
            url,
            max_connections,
        } = DatabaseConfig::default();
        Self {
            url,
            max_connections,
        }
    }
}

impl DatabaseSettings {
    pub fn to_database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.url.clone(),
            max_connections: self.max_connections,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleServiceConfig {
    /// Base URL; lookups go to `{base_url}/roles`
    pub base_url: String,
    /// Per-call timeout in seconds, `0` disables it
    pub timeout_secs: u64,
}

impl Default for RoleServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            timeout_secs: 30,
        }
    }
}

impl RoleServiceConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `user_directory=debug,tower_http=info`
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from `path`, falling back to defaults when the file does not
    /// exist, then apply environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = match std::fs::read_to_string(path) {
            Ok(raw) => Self::from_toml(&raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Apply `PORT`, `DATABASE_URL`, `MS_API_URL` and `LOG_LEVEL`.
    ///
    /// Without `DATABASE_URL`, the `DB_*` variables build the database URL
    /// when any of them is set.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(port) = lookup("PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT",
                value: port.clone(),
            })?;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        } else if let Some(url) = database_url_from_parts(&lookup)? {
            self.database.url = url;
        }
        if let Some(url) = lookup("MS_API_URL") {
            self.role_service.base_url = url;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level;
        }
        Ok(())
    }
}

const DB_PART_KEYS: [&str; 5] = [
    "DB_DIALECT",
    "DB_HOST",
    "DB_USERNAME",
    "DB_PASSWORD",
    "DB_DATABASE",
];

/// Connection URL from `DB_DIALECT` (`postgres` or `sqlite`), `DB_HOST`,
/// `DB_USERNAME`, `DB_PASSWORD` and `DB_DATABASE`.
///
/// `None` when none of them is set. Unset or empty parts default to a local
/// postgres `db_door` database with `postgres`/`postgres` credentials.
fn database_url_from_parts(
    lookup: &dyn Fn(&str) -> Option<String>,
) -> Result<Option<String>, ConfigError> {
    let part = |key: &str| lookup(key).filter(|v| !v.is_empty());
    if DB_PART_KEYS.iter().all(|key| part(key).is_none()) {
        return Ok(None);
    }
    let part_or = |key: &str, default: &str| part(key).unwrap_or_else(|| default.to_string());

    let database = part_or("DB_DATABASE", "db_door");
    let dialect = part_or("DB_DIALECT", "postgres");
    match dialect.as_str() {
        "sqlite" => Ok(Some(format!("sqlite://{}?mode=rwc", database))),
        "postgres" | "postgresql" => {
            let host = part_or("DB_HOST", "127.0.0.1");
            let invalid_host = || ConfigError::InvalidValue {
                key: "DB_HOST",
                value: host.clone(),
            };

            let mut url = reqwest::Url::parse(&format!("postgres://{}", host))
                .map_err(|_| invalid_host())?;
            url.set_path(&format!("/{}", database));
            url.set_username(&part_or("DB_USERNAME", "postgres"))
                .map_err(|_| invalid_host())?;
            url.set_password(Some(&part_or("DB_PASSWORD", "postgres")))
                .map_err(|_| invalid_host())?;
            Ok(Some(url.to_string()))
        }
        _ => Err(ConfigError::InvalidValue {
            key: "DB_DIALECT",
            value: dialect,
        }),
    }
}
