//! R2 Uploadr Library
//!
//! Uploads a single local file to Cloudflare R2 (or any S3-compatible store)
//! with one PutObject call.
//!
//! # Features
//!
//! - **Explicit Configuration**: One immutable [`Config`] built at startup
//! - **R2 Endpoints**: `https://<account-id>.r2.cloudflarestorage.com`
//! - **Two Failure Kinds**: local open failure or remote put failure
//!
//! # Example
//!
//! ```no_run
//! use r2_uploadr::{config::Config, s3::build_client, upload::upload};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let client = build_client(&config).await?;
//!     upload(&client, Path::new("report.csv")).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod s3;
pub mod upload;

// Re-export commonly used types
pub use config::Config;
pub use upload::{upload, UploadError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
