//! Upload module
//!
//! Writes one local file to the fixed bucket and key.

use aws_sdk_s3::error::{DisplayErrorContext, SdkError};
use aws_sdk_s3::operation::put_object::PutObjectError;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod put_object;

pub use put_object::upload;

/// Bucket every upload is written to
pub const BUCKET: &str = "my-bucket-2023e4a";

/// Object key every upload is written to. Each upload overwrites the last.
pub const KEY: &str = "test";

/// Upload errors
#[derive(Error, Debug)]
pub enum UploadError {
    /// The local file could not be opened or read
    #[error("failed to open file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The remote write failed, for whatever reason
    #[error("failed to put object: {}", DisplayErrorContext(.0.as_ref()))]
    Put(#[source] Box<SdkError<PutObjectError>>),
}

impl UploadError {
    pub(crate) fn open(path: &Path, source: std::io::Error) -> Self {
        Self::Open {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Whether the failure happened before any network call
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }
}

impl From<SdkError<PutObjectError>> for UploadError {
    fn from(err: SdkError<PutObjectError>) -> Self {
        Self::Put(Box::new(err))
    }
}
