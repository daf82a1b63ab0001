//! Application configuration loaded from environment variables.

use anyhow::{Context, Result};
use market_mate_client::ClientConfig;
use registration_form::{ControllerSettings, LOGIN_ROUTE, REDIRECT_DELAY};
use serde::Deserialize;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// User service configuration
    pub api: ApiConfig,

    /// Registration flow configuration
    #[serde(default)]
    pub registration: RegistrationConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the Market Mate user service
    pub base_url: String,

    /// Request timeout
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,

    /// Keep session cookies and send them with every request
    #[serde(default = "default_true")]
    pub with_credentials: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationConfig {
    /// Delay before redirecting to the login page
    #[serde(default = "default_redirect_delay", with = "humantime_serde")]
    pub redirect_delay: Duration,

    /// Login page route
    #[serde(default = "default_login_route")]
    pub login_route: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default implementations
impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            redirect_delay: default_redirect_delay(),
            login_route: default_login_route(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// Default value functions
fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_true() -> bool {
    true
}

fn default_redirect_delay() -> Duration {
    REDIRECT_DELAY
}

fn default_login_route() -> String {
    LOGIN_ROUTE.into()
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_environment(config::Environment::default())
    }

    fn from_environment(environment: config::Environment) -> Result<Self> {
        let config = config::Config::builder()
            .add_source(environment.separator("__").try_parsing(false))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Settings for the HTTP client.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.api.base_url)
            .with_timeout(self.api.timeout)
            .with_credentials(self.api.with_credentials)
    }

    /// Settings for the registration controller.
    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            redirect_delay: self.registration.redirect_delay,
            login_route: self.registration.login_route.clone(),
        }
    }
}
