//! Common Test Infrastructure
//!
//! Provides a throwaway in-process object store that speaks enough of the S3
//! HTTP API (path-style CreateBucket, PutObject, GetObject) for round-trip
//! tests, plus helpers to build clients against it.

#![allow(dead_code)]

use r2_uploadr::config::Config;
use r2_uploadr::s3::build_client;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Default credentials accepted by the emulator
pub const TEST_ACCESS_KEY: &str = "minioadmin";
pub const TEST_SECRET_KEY: &str = "minioadmin";

type Buckets = HashMap<String, HashMap<String, Vec<u8>>>;

/// In-memory object store answering S3 requests
#[derive(Clone, Default)]
pub struct ObjectStore {
    buckets: Arc<Mutex<Buckets>>,
    requests: Arc<AtomicUsize>,
}

impl ObjectStore {
    /// Create a bucket directly, without going through HTTP
    pub fn create_bucket(&self, bucket: &str) {
        self.buckets
            .lock()
            .unwrap()
            .entry(bucket.to_string())
            .or_default();
    }

    /// Read an object directly, without going through HTTP
    pub fn object(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.buckets
            .lock()
            .unwrap()
            .get(bucket)
            .and_then(|objects| objects.get(key).cloned())
    }

    /// Number of HTTP requests served so far
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

fn error_response(status: u16, code: &str, message: &str) -> ResponseTemplate {
    let body = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <Error><Code>{}</Code><Message>{}</Message><RequestId>emulator</RequestId></Error>",
        code, message
    );
    ResponseTemplate::new(status).set_body_raw(body, "application/xml")
}

impl Respond for ObjectStore {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        self.requests.fetch_add(1, Ordering::SeqCst);

        let path = request.url.path().trim_start_matches('/');
        let (bucket, key) = match path.split_once('/') {
            Some((bucket, key)) if !key.is_empty() => (bucket, Some(key)),
            Some((bucket, _)) => (bucket, None),
            None => (path, None),
        };

        let mut buckets = self.buckets.lock().unwrap();

        match (request.method.as_str(), key) {
            ("PUT", None) => {
                buckets.entry(bucket.to_string()).or_default();
                ResponseTemplate::new(200)
            }
            ("PUT", Some(key)) => match buckets.get_mut(bucket) {
                Some(objects) => {
                    objects.insert(key.to_string(), request.body.clone());
                    ResponseTemplate::new(200)
                        .insert_header("ETag", format!("\"{:032x}\"", request.body.len()))
                }
                None => error_response(404, "NoSuchBucket", "The specified bucket does not exist"),
            },
            ("GET", Some(key)) => match buckets.get(bucket).and_then(|o| o.get(key)) {
                Some(data) => ResponseTemplate::new(200)
                    .insert_header("Content-Type", "application/octet-stream")
                    .set_body_bytes(data.clone()),
                None => error_response(404, "NoSuchKey", "The specified key does not exist."),
            },
            _ => error_response(405, "MethodNotAllowed", "Method not allowed"),
        }
    }
}

/// Running emulator with its backing store
pub struct TestStore {
    pub server: MockServer,
    pub store: ObjectStore,
}

impl TestStore {
    /// Start an emulator with no buckets
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let store = ObjectStore::default();

        Mock::given(any())
            .respond_with(store.clone())
            .mount(&server)
            .await;

        Self { server, store }
    }

    /// Uploader configuration pointing at this emulator
    pub fn config(&self) -> Config {
        Config {
            endpoint: Some(self.server.uri()),
            force_path_style: true,
            access_key: Some(TEST_ACCESS_KEY.to_string()),
            secret_key: Some(TEST_SECRET_KEY.to_string()),
            operation_timeout_secs: Some(10),
            ..Config::new("")
        }
    }

    /// Client built through the same path the binary uses
    pub async fn client(&self) -> aws_sdk_s3::Client {
        build_client(&self.config()).await.unwrap()
    }
}
