//! S3 Credentials Module
//!
//! Decides where the client's credentials come from.
//!
//! - `CredentialSource::Static` - key pair from the configuration file
//! - `CredentialSource::DefaultChain` - the SDK default chain
//!   (`AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY`, shared profiles, ...)
//!
//! # Example
//!
//! ```
//! use r2_uploadr::config::Config;
//! use r2_uploadr::s3::CredentialSource;
//!
//! let config = Config {
//!     access_key: Some("access-key".into()),
//!     secret_key: Some("secret-key".into()),
//!     ..Config::new("account")
//! };
//!
//! match CredentialSource::from_config(&config) {
//!     CredentialSource::Static(creds) => assert_eq!(creds.access_key_id(), "access-key"),
//!     CredentialSource::DefaultChain => unreachable!(),
//! }
//! ```

use crate::config::Config;
use aws_credential_types::Credentials;

/// Provider name attached to credentials read from the config file
pub const STATIC_PROVIDER_NAME: &str = "r2-uploadr-config";

/// Where the client gets its credentials
#[derive(Debug, Clone)]
pub enum CredentialSource {
    /// Fixed key pair from configuration
    Static(Credentials),
    /// Whatever the SDK default chain resolves at request time
    DefaultChain,
}

impl CredentialSource {
    /// Pick the credential source for a configuration
    ///
    /// Static credentials are only used when both halves of the key pair are
    /// present; anything else falls through to the default chain.
    pub fn from_config(config: &Config) -> Self {
        match (&config.access_key, &config.secret_key) {
            (Some(access_key), Some(secret_key)) => Self::Static(Credentials::new(
                access_key,
                secret_key,
                None,
                None,
                STATIC_PROVIDER_NAME,
            )),
            _ => Self::DefaultChain,
        }
    }

    /// Short label for logs. Never includes key material.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Static(_) => "static",
            Self::DefaultChain => "default-chain",
        }
    }
}
