use crate::paths;
use crate::traits::{AccessError, AccessResult, FileAccess};
use crate::AccessBackend;
use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use chrono::{DateTime, Utc};
use filefacts_core::models::FileStat;
use reqwest::header::{CONTENT_LENGTH, LAST_MODIFIED, RANGE};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Range-addressable HTTP file store access
///
/// Size comes from `HEAD` and prefixes from `GET` with a `Range` header. The client is
/// pooled and shared by every task.
#[derive(Clone, Debug)]
pub struct RemoteFileAccess {
    client: Client,
    base_url: String,
    strip_prefix: String,
}

impl RemoteFileAccess {
    /// Create a new RemoteFileAccess instance
    ///
    /// # Arguments
    /// * `base_url` - Root URL of the file store, e.g. `http://storage:8080`
    /// * `strip_prefix` - Leading path segment(s) removed from locators before joining
    /// * `timeout` - Bound applied to every request
    pub fn new(
        base_url: impl Into<String>,
        strip_prefix: impl Into<String>,
        timeout: Duration,
    ) -> AccessResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| AccessError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(client, base_url, strip_prefix))
    }

    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        strip_prefix: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            strip_prefix: strip_prefix.into(),
        }
    }

    /// URL a locator resolves to on the file store.
    pub fn url_for(&self, path: &str) -> String {
        paths::remote_url(&self.base_url, &self.strip_prefix, path)
    }

    fn request_error(path: &str, err: reqwest::Error) -> AccessError {
        AccessError::Request {
            path: path.to_string(),
            message: err.to_string(),
        }
    }
}

#[async_trait]
impl FileAccess for RemoteFileAccess {
    async fn stat(&self, path: &str) -> AccessResult<FileStat> {
        let url = self.url_for(path);

        let response = self
            .client
            .head(&url)
            .send()
            .await
            .map_err(|e| Self::request_error(path, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AccessError::Http {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        // Response::content_length() reflects the (empty) HEAD body, not the header.
        let headers = response.headers();
        let size = headers
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .ok_or_else(|| AccessError::InvalidResponse {
                path: path.to_string(),
                message: "missing or invalid Content-Length".to_string(),
            })?;

        let modified = headers
            .get(LAST_MODIFIED)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| DateTime::parse_from_rfc2822(v).ok())
            .map(|dt| dt.with_timezone(&Utc));

        tracing::debug!(url = %url, size_bytes = size, "Remote stat successful");

        Ok(FileStat { size, modified })
    }

    async fn read_range(&self, path: &str, start: u64, len: usize) -> AccessResult<Bytes> {
        if len == 0 {
            return Ok(Bytes::new());
        }

        let started = std::time::Instant::now();
        let url = self.url_for(path);
        let end = start + len as u64 - 1;

        let mut response = self
            .client
            .get(&url)
            .header(RANGE, format!("bytes={}-{}", start, end))
            .send()
            .await
            .map_err(|e| Self::request_error(path, e))?;

        match response.status() {
            StatusCode::OK | StatusCode::PARTIAL_CONTENT => {}
            StatusCode::RANGE_NOT_SATISFIABLE => return Ok(Bytes::new()),
            status => {
                return Err(AccessError::Http {
                    path: path.to_string(),
                    status: status.as_u16(),
                })
            }
        }

        // A 200 means the store ignored the range; stop once enough has arrived.
        let mut buf = BytesMut::with_capacity(len.min(64 * 1024));
        while buf.len() < len {
            let Some(chunk) = response
                .chunk()
                .await
                .map_err(|e| Self::request_error(path, e))?
            else {
                break;
            };
            let take = chunk.len().min(len - buf.len());
            buf.extend_from_slice(&chunk[..take]);
        }

        tracing::debug!(
            url = %url,
            start,
            requested = len,
            size_bytes = buf.len(),
            duration_ms = started.elapsed().as_secs_f64() * 1000.0,
            "Remote range read successful"
        );

        Ok(buf.freeze())
    }

    fn backend_type(&self) -> AccessBackend {
        AccessBackend::Remote
    }
}
