use std::path::PathBuf;
use std::time::Duration;

use domain::models::SearchPrecedence;
use remote::HttpConfig;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub filter: FilterConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base route of the internet users API.
    #[serde(default)]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// JSON file holding the persisted session object with the bearer token.
    #[serde(default = "default_session_path")]
    pub path: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: default_session_path(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterConfig {
    /// Let non-identity search matches bypass the equality filters.
    #[serde(default)]
    pub legacy_search_precedence: bool,
}

fn default_request_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_session_path() -> PathBuf {
    PathBuf::from("session.json")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml
    /// 2. config/local.toml (optional, not in git)
    /// 3. Environment variables with IU__ prefix
    /// 4. `overrides`, typically from command line flags
    pub fn load(overrides: &[(&str, String)]) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("IU").separator("__"));

        for (key, value) in overrides {
            builder = builder.set_override(*key, value.as_str())?;
        }

        let cfg: Self = builder.build()?.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    /// Build a configuration from a TOML string plus overrides, validated.
    ///
    /// Does not touch the file system or the environment.
    pub fn from_toml(toml: &str, overrides: &[(&str, &str)]) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml));

        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        let cfg: Self = builder.build()?.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    /// Load configuration for testing with custom overrides, skipping
    /// validation so partial configs can be inspected.
    #[cfg(test)]
    pub fn load_for_test(overrides: &[(&str, &str)]) -> Result<Self, config::ConfigError> {
        let defaults = r#"
            [api]
            base_url = ""
            request_timeout_secs = 30
            connect_timeout_secs = 10

            [session]
            path = "session.json"

            [logging]
            level = "info"
            format = "pretty"

            [filter]
            legacy_search_precedence = false
        "#;

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(defaults, config::FileFormat::Toml));

        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<(), ConfigValidationError> {
        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "IU__API__BASE_URL environment variable or api.base_url must be set".to_string(),
            ));
        }

        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigValidationError::InvalidValue(format!(
                "api.base_url must start with http:// or https://, got {}",
                base_url
            )));
        }

        if self.api.request_timeout_secs == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "api.request_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if !matches!(self.logging.format.as_str(), "json" | "pretty") {
            return Err(ConfigValidationError::InvalidValue(format!(
                "logging.format must be json or pretty, got {}",
                self.logging.format
            )));
        }

        Ok(())
    }

    pub fn http_config(&self) -> HttpConfig {
        HttpConfig {
            base_url: self.api.base_url.trim().to_string(),
            request_timeout: Duration::from_secs(self.api.request_timeout_secs),
            connect_timeout: Duration::from_secs(self.api.connect_timeout_secs),
        }
    }

    pub fn search_precedence(&self) -> SearchPrecedence {
        if self.filter.legacy_search_precedence {
            SearchPrecedence::Legacy
        } else {
            SearchPrecedence::Strict
        }
    }
}
