//! PutObject upload
//!
//! Streams a local file as the body of a single PutObject call.
//!
//! # Example
//!
//! ```no_run
//! use r2_uploadr::config::Config;
//! use r2_uploadr::s3::build_client;
//! use r2_uploadr::upload::upload;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = build_client(&Config::from_env()?).await?;
//! upload(&client, Path::new("/path/to/local/file")).await?;
//! # Ok(())
//! # }
//! ```

use super::{UploadError, BUCKET, KEY};
use aws_sdk_s3::primitives::ByteStream;
use std::io;
use std::path::Path;
use std::time::Instant;
use tokio::fs::File;

/// Upload the file at `path` to [`BUCKET`]/[`KEY`]
///
/// The file is opened before any request is made, so a missing or unreadable
/// file fails with [`UploadError::Open`] without touching the network. Every
/// remote failure is reported as [`UploadError::Put`]. The file handle is
/// owned by the request body and closed when this returns.
///
/// Deadlines come from the client's operation timeout or from the caller
/// wrapping this future in `tokio::time::timeout`.
#[tracing::instrument(
    name = "upload.put_object",
    skip(client),
    fields(
        s3.bucket = BUCKET,
        s3.key = KEY,
        upload.path = %path.display(),
        upload.bytes = tracing::field::Empty
    ),
    err(level = "debug")
)]
pub async fn upload(client: &aws_sdk_s3::Client, path: &Path) -> Result<(), UploadError> {
    let file = File::open(path)
        .await
        .map_err(|e| UploadError::open(path, e))?;

    let metadata = file
        .metadata()
        .await
        .map_err(|e| UploadError::open(path, e))?;
    if !metadata.is_file() {
        return Err(UploadError::open(
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
        ));
    }
    tracing::Span::current().record("upload.bytes", metadata.len());

    let body = ByteStream::read_from()
        .file(file)
        .build()
        .await
        .map_err(|e| UploadError::open(path, io::Error::other(e)))?;

    let start_time = Instant::now();

    client
        .put_object()
        .bucket(BUCKET)
        .key(KEY)
        .body(body)
        .send()
        .await?;

    tracing::info!(
        bytes = metadata.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "PutObject upload completed"
    );

    Ok(())
}
