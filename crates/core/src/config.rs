use config::{Config, ConfigError, File};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// In-memory SQLite databases live and die with their connection.
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    #[serde(default = "default_access_token_ttl")]
    pub access_token_ttl_seconds: i64,
    #[serde(default = "default_refresh_token_ttl")]
    pub refresh_token_ttl_seconds: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    #[serde(default = "default_items_per_page")]
    pub items_per_page: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            items_per_page: default_items_per_page(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_access_token_ttl() -> i64 {
    30 * 60 // 30 minutes
}

fn default_refresh_token_ttl() -> i64 {
    130 * 24 * 60 * 60 // 130 days
}

fn default_items_per_page() -> u32 {
    12
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from cinema.toml in the current directory
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_file("cinema.toml")
    }

    /// Load configuration with environment variable overrides
    /// Environment variables are prefixed with CINEMA_ and use `__` between
    /// section and key, e.g. CINEMA_DATABASE__URL, CINEMA_AUTH__JWT_SECRET
    ///
    /// Returns the config and a list of environment variable overrides
    pub fn load_with_env() -> Result<(Self, Vec<String>), ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name("cinema").required(false))
            .add_source(
                config::Environment::with_prefix("CINEMA")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let mut overrides = Vec::new();

        let env_vars = [
            ("CINEMA_DATABASE__URL", "database.url"),
            ("CINEMA_DATABASE__MAX_CONNECTIONS", "database.max_connections"),
            ("CINEMA_AUTH__JWT_SECRET", "auth.jwt_secret"),
            ("CINEMA_AUTH__ACCESS_TOKEN_TTL_SECONDS", "auth.access_token_ttl_seconds"),
            ("CINEMA_AUTH__REFRESH_TOKEN_TTL_SECONDS", "auth.refresh_token_ttl_seconds"),
            ("CINEMA_CATALOG__ITEMS_PER_PAGE", "catalog.items_per_page"),
            ("CINEMA_LOG__FILTER", "log.filter"),
        ];

        for (env_var, config_key) in env_vars {
            if std::env::var(env_var).is_ok() {
                overrides.push(config_key.to_string());
            }
        }

        let app_config = config.try_deserialize()?;
        Ok((app_config, overrides))
    }

    /// Configuration for tests: a private in-memory store and a fixed secret
    pub fn testing() -> Self {
        Self {
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
            },
            auth: AuthConfig {
                jwt_secret: "testing_secret".to_string(),
                access_token_ttl_seconds: default_access_token_ttl(),
                refresh_token_ttl_seconds: default_refresh_token_ttl(),
            },
            catalog: CatalogConfig::default(),
            log: LogConfig {
                filter: "debug".to_string(),
            },
        }
    }
}
