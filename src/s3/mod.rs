//! S3 Client module
//!
//! Resolves the R2 endpoint for an account and builds the `aws_sdk_s3::Client`
//! the uploader writes through.
//!
//! # Example
//!
//! ```no_run
//! use r2_uploadr::config::Config;
//! use r2_uploadr::s3::build_client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env()?;
//! let client = build_client(&config).await?;
//! # let _ = client;
//! # Ok(())
//! # }
//! ```

use crate::config::{Config, ConfigError};
use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::config::{RequestChecksumCalculation, ResponseChecksumValidation};
use std::time::Duration;
use thiserror::Error;

mod credentials;

pub use credentials::{CredentialSource, STATIC_PROVIDER_NAME};

/// Host suffix of the Cloudflare R2 S3 API
pub const R2_DOMAIN: &str = "r2.cloudflarestorage.com";

/// S3 client errors
#[derive(Error, Debug)]
pub enum S3ClientError {
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),
}

/// Map an account identifier to its R2 endpoint URL
///
/// ```
/// assert_eq!(
///     r2_uploadr::s3::endpoint_url("abc123"),
///     "https://abc123.r2.cloudflarestorage.com"
/// );
/// ```
pub fn endpoint_url(account_id: &str) -> String {
    format!("https://{}.{}", account_id, R2_DOMAIN)
}

/// Build an S3 client bound to the configured endpoint
///
/// The configuration is validated first, so no client is ever built for an
/// empty or malformed endpoint. Nothing here touches the network; credentials
/// from the default chain are resolved lazily on the first request.
#[tracing::instrument(
    name = "s3.build_client",
    skip(config),
    fields(
        s3.endpoint = tracing::field::Empty,
        s3.region = %config.region,
        s3.credentials = tracing::field::Empty
    ),
    err(level = "debug")
)]
pub async fn build_client(config: &Config) -> Result<aws_sdk_s3::Client, S3ClientError> {
    config.validate()?;

    let endpoint = config.endpoint();
    let credentials = CredentialSource::from_config(config);

    let span = tracing::Span::current();
    span.record("s3.endpoint", endpoint.as_str());
    span.record("s3.credentials", credentials.describe());

    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.region.clone()))
        .endpoint_url(&endpoint);

    if let CredentialSource::Static(creds) = credentials {
        loader = loader.credentials_provider(creds);
    }

    if let Some(secs) = config.operation_timeout_secs {
        loader = loader.timeout_config(
            TimeoutConfig::builder()
                .operation_timeout(Duration::from_secs(secs))
                .build(),
        );
    }

    let sdk_config = loader.load().await;

    // R2 and local emulators expect the plain body, not aws-chunked with a
    // trailing checksum.
    let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
        .force_path_style(config.force_path_style)
        .request_checksum_calculation(RequestChecksumCalculation::WhenRequired)
        .response_checksum_validation(ResponseChecksumValidation::WhenRequired)
        .build();

    tracing::debug!(endpoint = %endpoint, "S3 client configured");

    Ok(aws_sdk_s3::Client::from_conf(s3_config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url() {
        assert_eq!(
            endpoint_url("0123456789abcdef"),
            "https://0123456789abcdef.r2.cloudflarestorage.com"
        );
    }

    #[test]
    fn test_endpoint_url_is_pure() {
        assert_eq!(endpoint_url("acct"), endpoint_url("acct"));
        assert_ne!(endpoint_url("a"), endpoint_url("b"));
    }

    #[tokio::test]
    async fn test_build_client_rejects_empty_account() {
        let result = build_client(&Config::new("")).await;
        assert!(matches!(result, Err(S3ClientError::ConfigError(_))));
    }

    #[tokio::test]
    async fn test_build_client_with_override() {
        let config = Config {
            endpoint: Some("http://localhost:9000".into()),
            force_path_style: true,
            access_key: Some("minioadmin".into()),
            secret_key: Some("minioadmin".into()),
            ..Config::new("")
        };

        let client = build_client(&config).await.unwrap();
        let region = client.config().region().map(|r| r.to_string());
        assert_eq!(region.as_deref(), Some("auto"));
    }
}
