//! Application configuration loaded from environment variables.

use serde::Deserialize;

use crate::error::AppError;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,

    // === Observability ===
    /// Log filter (trace, debug, info, warn, error, or an `EnvFilter` directive).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Emit logs as JSON lines.
    #[serde(default)]
    pub log_json: bool,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,

    /// Install the Prometheus exporter and serve `/metrics`.
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            rust_log: default_log_level(),
            log_json: false,
            verbose: false,
            metrics_enabled: default_true(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Ok(envy::from_env()?)
    }

    /// Load configuration from explicit key/value pairs (upper-case keys).
    pub fn from_vars<I>(vars: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::from_iter(vars)?)
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.host.trim().is_empty() {
            return Err(AppError::InvalidConfig("HOST must not be empty".to_string()));
        }

        if self.port == 0 {
            return Err(AppError::InvalidConfig("PORT must be non-zero".to_string()));
        }

        Ok(())
    }

    /// `host:port` string suitable for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
