//! Configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `VATRC_ACTIVE` - Whether reverse charge evaluation is active
//!   (default: false)
//! - `VIES_ENDPOINT` - Base URL of the VIES REST service
//!   (default: the EU production endpoint)
//! - `VIES_TIMEOUT_SECS` - Request timeout for registry calls (default: 10)

use std::time::Duration;

use thiserror::Error;

/// Default base URL of the EU VIES REST service.
pub const DEFAULT_VIES_ENDPOINT: &str = "https://ec.europa.eu/taxation_customs/vies/rest-api";

const DEFAULT_VIES_TIMEOUT_SECS: u64 = 10;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Reverse charge extension configuration.
///
/// The extension ships inactive; hosts opt in per deployment.
#[derive(Debug, Clone)]
pub struct ReverseChargeConfig {
    /// Whether reverse charge evaluation runs at all.
    pub active: bool,
    /// VIES registry client configuration.
    pub vies: ViesConfig,
}

/// VIES registry client configuration.
#[derive(Debug, Clone)]
pub struct ViesConfig {
    /// Base URL of the VIES REST service.
    pub endpoint: String,
    /// Timeout for a single registry request.
    pub timeout: Duration,
}

impl Default for ViesConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_VIES_ENDPOINT.to_owned(),
            timeout: Duration::from_secs(DEFAULT_VIES_TIMEOUT_SECS),
        }
    }
}

impl Default for ReverseChargeConfig {
    fn default() -> Self {
        Self {
            active: false,
            vies: ViesConfig::default(),
        }
    }
}

impl ReverseChargeConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let active = get_env_or_default("VATRC_ACTIVE", "false")
            .parse::<bool>()
            .map_err(|e| ConfigError::InvalidEnvVar("VATRC_ACTIVE".to_owned(), e.to_string()))?;

        let endpoint = get_env_or_default("VIES_ENDPOINT", DEFAULT_VIES_ENDPOINT);
        let timeout_secs = get_env_or_default(
            "VIES_TIMEOUT_SECS",
            &DEFAULT_VIES_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar("VIES_TIMEOUT_SECS".to_owned(), e.to_string()))?;

        Ok(Self {
            active,
            vies: ViesConfig {
                endpoint,
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}
