pub mod auth_config;
pub mod database_config;
pub mod defaults;
pub mod security_config;
pub mod storage_config;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

pub use auth_config::{AuthConfig, ConfigError};
pub use database_config::DatabaseConfig;
pub use security_config::SecurityConfig;
pub use storage_config::StorageConfig;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default = "defaults::default_host")]
    pub host: String,
    #[serde(default = "defaults::default_port")]
    pub port: u16,
    #[serde(default = "defaults::default_environment")]
    pub environment: String,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub security: SecurityConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "defaults::default_logging_level")]
    pub level: String,
    #[serde(default = "defaults::default_logging_json_format")]
    pub json_format: bool,
}

/// Unprefixed variables commonly set by deploy tooling, and the config path each one fills.
const RAW_ENV_KEYS: &[(&str, &str)] = &[
    ("DATABASE_URL", "database.url"),
    ("JWT_SECRET", "auth.jwt_secret"),
    ("STORAGE_BASE_URL", "storage.base_url"),
    ("STORAGE_SIGNING_SECRET", "storage.signing_secret"),
];

impl AppConfig {
    pub fn from_env() -> Result<Self, Box<figment::Error>> {
        Self::figment().extract().map_err(Box::new)
    }

    /// Layered sources, lowest priority first: `config/default.toml`, an optional
    /// `config/development.toml`, `APP_`-prefixed variables (`__` separates nesting, so
    /// `APP_DATABASE__MAX_CONNECTIONS` sets `database.max_connections`), then the raw keys.
    pub fn figment() -> Figment {
        let raw_vars: Vec<&str> = RAW_ENV_KEYS.iter().map(|(var, _)| *var).collect();

        Figment::new()
            .merge(Toml::file("config/default.toml"))
            .merge(Toml::file("config/development.toml"))
            .merge(Env::prefixed("APP_").split("__"))
            .merge(Env::raw().only(&raw_vars).map(|key| {
                RAW_ENV_KEYS
                    .iter()
                    .find(|(var, _)| key.as_str().eq_ignore_ascii_case(var))
                    .map_or_else(|| key.into(), |(_, path)| (*path).into())
            }))
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.auth.validate()?;
        self.storage.validate()?;
        if self.is_production() && self.security.allows_any_origin() {
            return Err(ConfigError::Security(
                "wildcard CORS origin is not allowed in production".to_string(),
            ));
        }
        Ok(())
    }
}
