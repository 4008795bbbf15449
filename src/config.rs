//! Configuration management
//!
//! Loads configuration from:
//! 1. Default values
//! 2. Configuration file (config/default.toml, config/local.toml)
//! 3. Environment variables (override)

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub providers: ProvidersConfig,
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0")
    pub host: String,
    /// Port number (e.g., 8000)
    pub port: u16,
}

impl ServerConfig {
    /// Address to bind the listener to, e.g. "127.0.0.1:8000"
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration (SQLite only)
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to SQLite database file
    pub path: PathBuf,
}

/// Upstream image provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ProvidersConfig {
    /// Cat API search endpoint (returns a JSON array of `{url}`)
    pub cat_url: String,
    /// Dog API endpoint (returns a JSON object `{url}`)
    pub dog_url: String,
    /// PlaceBear base URL; `/<width>/<height>` is appended
    pub bear_base_url: String,
    /// Per-request timeout for upstream calls
    pub request_timeout_secs: u64,
    /// User-Agent header sent upstream
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl ProvidersConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn default_user_agent() -> String {
    format!("animal-images/{}", env!("CARGO_PKG_VERSION"))
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,
    /// Log format: "pretty" or "json"
    pub format: String,
}

impl LoggingConfig {
    /// Filter used when `RUST_LOG` is not set
    pub fn default_filter(&self) -> String {
        format!("animal_images={},tower_http=debug", self.level)
    }

    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// # Loading Order
    /// 1. Default values
    /// 2. config/default.toml (if exists)
    /// 3. config/local.toml (if exists)
    /// 4. Environment variables (ANIMAL_IMAGES__*)
    ///
    /// # Errors
    /// Returns error if configuration is invalid
    pub fn load() -> Result<Self, crate::error::AppError> {
        use config::{Config, Environment, File};

        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("database.path", "animal_images.db")?
            .set_default(
                "providers.cat_url",
                "https://api.thecatapi.com/v1/images/search",
            )?
            .set_default("providers.dog_url", "https://random.dog/woof.json")?
            .set_default("providers.bear_base_url", "https://placebear.com")?
            .set_default("providers.request_timeout_secs", 5)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            // Load from config/default.toml if it exists
            .add_source(File::with_name("config/default").required(false))
            // Load from config/local.toml if it exists (overrides default)
            .add_source(File::with_name("config/local").required(false))
            // Load from environment variables (ANIMAL_IMAGES__*)
            .add_source(
                Environment::with_prefix("ANIMAL_IMAGES")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| crate::error::AppError::Config(e.to_string()))?;

        let app_config: Self = config
            .try_deserialize()
            .map_err(|e| crate::error::AppError::Config(e.to_string()))?;
        app_config.validate()?;
        Ok(app_config)
    }

    fn validate(&self) -> Result<(), crate::error::AppError> {
        for (key, value) in [
            ("providers.cat_url", &self.providers.cat_url),
            ("providers.dog_url", &self.providers.dog_url),
            ("providers.bear_base_url", &self.providers.bear_base_url),
        ] {
            validate_http_url(key, value)?;
        }

        if self.providers.request_timeout_secs == 0 {
            return Err(crate::error::AppError::Config(
                "providers.request_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(crate::error::AppError::Config(format!(
                "logging.format must be \"pretty\" or \"json\", got {:?}",
                self.logging.format
            )));
        }

        Ok(())
    }
}

fn validate_http_url(key: &str, value: &str) -> Result<(), crate::error::AppError> {
    let parsed = url::Url::parse(value)
        .map_err(|e| crate::error::AppError::Config(format!("{key} is not a valid URL: {e}")))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(crate::error::AppError::Config(format!(
            "{key} must use http or https, got {}",
            parsed.scheme()
        )));
    }

    Ok(())
}
