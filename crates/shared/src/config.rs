//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Warehouse configuration.
    pub warehouse: WarehouseConfig,
    /// Historical insight provider configuration.
    #[serde(default)]
    pub insight: InsightConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Warehouse configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WarehouseConfig {
    /// Warehouse connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Seconds to wait for a pooled connection.
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_acquire_timeout() -> u64 {
    30
}

/// Chat-completions provider used for historical insight.
#[derive(Debug, Clone, Deserialize)]
pub struct InsightConfig {
    /// API key. Falls back to `OPENAI_API_KEY` when unset.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Base URL of an OpenAI-compatible API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model name.
    #[serde(default = "default_model")]
    pub model: String,
    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: Decimal,
    /// Completion token limit.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Request timeout in seconds.
    #[serde(default = "default_insight_timeout")]
    pub timeout_secs: u64,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_insight_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> Decimal {
    Decimal::new(7, 1)
}

fn default_max_tokens() -> u32 {
    1500
}

fn default_insight_timeout() -> u64 {
    60
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("PLANBOARD").separator("__"))
            .build()?;

        let mut app: Self = config.try_deserialize()?;
        if app.insight.api_key.is_none() {
            app.insight.api_key = std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty());
        }
        Ok(app)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_load_from_env_with_defaults() {
        temp_env::with_vars(
            [
                ("PLANBOARD__WAREHOUSE__URL", Some("postgres://localhost/dw")),
                ("OPENAI_API_KEY", None::<&str>),
                ("RUN_MODE", Some("test-none")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.warehouse.url, "postgres://localhost/dw");
                assert_eq!(config.warehouse.max_connections, 10);
                assert_eq!(config.server.port, 8080);
                assert_eq!(config.insight.model, "gpt-4o-mini");
                assert_eq!(config.insight.temperature, dec!(0.7));
                assert_eq!(config.insight.max_tokens, 1500);
                assert!(config.insight.api_key.is_none());
            },
        );
    }

    #[test]
    fn test_api_key_falls_back_to_openai_env() {
        temp_env::with_vars(
            [
                ("PLANBOARD__WAREHOUSE__URL", Some("postgres://localhost/dw")),
                ("OPENAI_API_KEY", Some("sk-test")),
                ("RUN_MODE", Some("test-none")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.insight.api_key.as_deref(), Some("sk-test"));
            },
        );
    }

    #[test]
    fn test_missing_warehouse_url_fails() {
        temp_env::with_vars(
            [
                ("PLANBOARD__WAREHOUSE__URL", None::<&str>),
                ("RUN_MODE", Some("test-none")),
            ],
            || {
                assert!(AppConfig::load().is_err());
            },
        );
    }
}
