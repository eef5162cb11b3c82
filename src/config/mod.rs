//! Configuration module for R2 Uploadr
//!
//! Builds the single immutable [`Config`] value the uploader runs with. The
//! value comes either from the environment (`CF_ACCOUNT_ID`) or from an
//! optional YAML file with environment variable expansion, and is validated
//! before any client is built.

use crate::s3::endpoint_url;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

mod loader;

pub use loader::ConfigLoader;

/// Environment variable holding the Cloudflare account identifier
pub const ACCOUNT_ID_ENV: &str = "CF_ACCOUNT_ID";

/// Region R2 expects for every request
pub const DEFAULT_REGION: &str = "auto";

// ============================================================================
// Environment Variable Expansion
// ============================================================================

/// Expand environment variables in a string.
///
/// Supports two syntaxes:
/// - `${VAR_NAME}` - Simple expansion, keeps placeholder if var not found
/// - `${VAR_NAME:-default}` - Expansion with default value
///
/// Variable names must start with a letter or underscore and contain only
/// uppercase letters, digits, and underscores.
pub(crate) fn expand_env_vars(s: &str) -> String {
    let re = env_var_pattern();
    let mut last_match = 0;
    let mut result = String::with_capacity(s.len());

    for cap in re.captures_iter(s) {
        let (Some(full_match), Some(var_name)) = (cap.get(0), cap.get(1)) else {
            continue;
        };

        result.push_str(&s[last_match..full_match.start()]);

        let value = match std::env::var(var_name.as_str()) {
            Ok(val) => val,
            Err(_) => match cap.get(2) {
                Some(default) => default.as_str().to_string(),
                // No env var and no default. Keep the original placeholder.
                None => full_match.as_str().to_string(),
            },
        };
        result.push_str(&value);

        last_match = full_match.end();
    }

    result.push_str(&s[last_match..]);

    result
}

fn env_var_pattern() -> &'static regex_lite::Regex {
    static PATTERN: std::sync::OnceLock<regex_lite::Regex> = std::sync::OnceLock::new();
    PATTERN.get_or_init(|| {
        regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)(?::-([^}]+))?\}").unwrap()
    })
}

// ============================================================================
// Validation Helpers
// ============================================================================

/// Validate that a URL starts with http:// or https://
fn is_valid_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Uploader configuration
///
/// Constructed once per process and passed by reference into client
/// construction. Never mutated afterwards.
///
/// # Example
///
/// ```yaml
/// account_id: "${CF_ACCOUNT_ID}"
/// region: auto
/// endpoint: "http://localhost:9000"
/// force_path_style: true
/// access_key: "${R2_ACCESS_KEY_ID}"
/// secret_key: "${R2_SECRET_ACCESS_KEY}"
/// operation_timeout_secs: 30
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Cloudflare account identifier used to template the endpoint
    #[serde(default)]
    pub account_id: String,

    /// Signing region. Default: "auto"
    #[serde(default = "default_region")]
    pub region: String,

    /// Explicit endpoint URL, overriding the account-derived one
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Address buckets by path instead of virtual host
    #[serde(default)]
    pub force_path_style: bool,

    /// Static access key. Must be paired with `secret_key`.
    #[serde(default)]
    pub access_key: Option<String>,

    /// Static secret key. Must be paired with `access_key`.
    #[serde(default)]
    pub secret_key: Option<String>,

    /// Upper bound on the whole put call, in seconds
    #[serde(default)]
    pub operation_timeout_secs: Option<u64>,
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

impl Config {
    /// Create a configuration for an account with R2 defaults
    pub fn new(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            region: default_region(),
            ..Default::default()
        }
    }

    /// Build the configuration from `CF_ACCOUNT_ID`
    ///
    /// A missing variable is treated as an empty account id and rejected by
    /// validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        let account_id = std::env::var(ACCOUNT_ID_ENV).unwrap_or_default();
        let config = Self::new(account_id);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        ConfigLoader::load(path)
    }

    /// Endpoint URL the client is bound to
    pub fn endpoint(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.clone(),
            None => endpoint_url(&self.account_id),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.endpoint {
            Some(endpoint) => {
                if !is_valid_http_url(endpoint) {
                    return Err(ConfigError::ValidationError(format!(
                        "Invalid endpoint '{}': must start with http:// or https://",
                        endpoint
                    )));
                }
            }
            None => {
                if self.account_id.trim().is_empty() {
                    return Err(ConfigError::ValidationError(format!(
                        "Account id is empty: set {} or configure an endpoint",
                        ACCOUNT_ID_ENV
                    )));
                }
            }
        }

        if self.region.trim().is_empty() {
            return Err(ConfigError::ValidationError("Region cannot be empty".into()));
        }

        match (&self.access_key, &self.secret_key) {
            (Some(_), None) => {
                return Err(ConfigError::ValidationError(
                    "access_key is set but secret_key is missing".into(),
                ))
            }
            (None, Some(_)) => {
                return Err(ConfigError::ValidationError(
                    "secret_key is set but access_key is missing".into(),
                ))
            }
            _ => {}
        }

        if self.operation_timeout_secs == Some(0) {
            return Err(ConfigError::ValidationError(
                "operation_timeout_secs must be greater than zero".into(),
            ));
        }

        Ok(())
    }
}
