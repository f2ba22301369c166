//! Metadata sink
//!
//! Best-effort writes of extracted facts to the meta-core store. A failed write is
//! logged once and otherwise ignored: the task that produced the facts still
//! completes.

use anyhow::{Context, Result};
use async_trait::async_trait;
use filefacts_core::{Config, MetaCoreWriteMode};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Client;
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;

/// Everything but RFC 3986 unreserved characters is escaped in path segments.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Metadata store request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Metadata store returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },
}

pub type SinkResult<T> = std::result::Result<T, SinkError>;

/// Destination for extracted metadata fields.
#[async_trait]
pub trait MetadataSink: Send + Sync {
    /// Store `fields` under `cid` at the store rooted at `base_url`.
    ///
    /// Never fails from the caller's point of view.
    async fn write(&self, base_url: &str, cid: &str, fields: &BTreeMap<String, String>);
}

/// HTTP client for the meta-core store
#[derive(Clone)]
pub struct MetaCoreSink {
    http_client: Client,
    mode: MetaCoreWriteMode,
}

impl MetaCoreSink {
    pub fn new(timeout: Duration, mode: MetaCoreWriteMode) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .context("Failed to create HTTP client for metadata store")?;

        Ok(Self { http_client, mode })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            Duration::from_secs(config.meta_core_timeout_secs),
            config.meta_core_write_mode,
        )
    }

    fn meta_url(base_url: &str, cid: &str) -> String {
        format!(
            "{}/meta/{}",
            base_url.trim_end_matches('/'),
            utf8_percent_encode(cid, SEGMENT)
        )
    }

    /// One merge request carrying every field.
    async fn patch(&self, url: &str, fields: &BTreeMap<String, String>) -> SinkResult<()> {
        let response = self.http_client.patch(url).json(fields).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SinkError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(())
    }

    /// One request per field; the first failure ends the write.
    async fn put_each(&self, url: &str, fields: &BTreeMap<String, String>) -> SinkResult<()> {
        for (field, value) in fields {
            let field_url = format!("{}/{}", url, utf8_percent_encode(field, SEGMENT));
            let response = self
                .http_client
                .put(&field_url)
                .json(&serde_json::json!({ "value": value }))
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(SinkError::Status {
                    url: field_url,
                    status: status.as_u16(),
                });
            }
        }
        Ok(())
    }
}

#[async_trait]
impl MetadataSink for MetaCoreSink {
    #[tracing::instrument(skip(self, fields))]
    async fn write(&self, base_url: &str, cid: &str, fields: &BTreeMap<String, String>) {
        if fields.is_empty() {
            return;
        }

        let url = Self::meta_url(base_url, cid);
        let result = match self.mode {
            MetaCoreWriteMode::Patch => self.patch(&url, fields).await,
            MetaCoreWriteMode::PerField => self.put_each(&url, fields).await,
        };

        match result {
            Ok(()) => {
                tracing::debug!(
                    cid = %cid,
                    field_count = fields.len(),
                    "Metadata written"
                );
            }
            Err(e) => {
                tracing::warn!(
                    cid = %cid,
                    mode = %self.mode,
                    error = %e,
                    "Metadata write failed, continuing without it"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn sample_fields() -> BTreeMap<String, String> {
        BTreeMap::from([
            ("fileType".to_string(), "document".to_string()),
            ("sizeByte".to_string(), "11".to_string()),
        ])
    }

    fn sink(mode: MetaCoreWriteMode) -> MetaCoreSink {
        MetaCoreSink::new(Duration::from_secs(2), mode).unwrap()
    }

    #[test]
    fn test_meta_url_encodes_cid() {
        assert_eq!(
            MetaCoreSink::meta_url("http://meta:8080/", "c1"),
            "http://meta:8080/meta/c1"
        );
        assert_eq!(
            MetaCoreSink::meta_url("http://meta", "movie-1_v2/a b"),
            "http://meta/meta/movie-1_v2%2Fa%20b"
        );
    }

    #[tokio::test]
    async fn test_patch_sends_all_fields_once() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PATCH", "/meta/c1")
            .match_body(Matcher::Json(
                json!({"fileType": "document", "sizeByte": "11"}),
            ))
            .with_status(200)
            .expect(1)
            .create_async()
            .await;

        sink(MetaCoreWriteMode::Patch)
            .write(&server.url(), "c1", &sample_fields())
            .await;

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_per_field_puts_each_value() {
        let mut server = mockito::Server::new_async().await;
        let file_type = server
            .mock("PUT", "/meta/c1/fileType")
            .match_body(Matcher::Json(json!({"value": "document"})))
            .with_status(204)
            .expect(1)
            .create_async()
            .await;
        let size = server
            .mock("PUT", "/meta/c1/sizeByte")
            .match_body(Matcher::Json(json!({"value": "11"})))
            .with_status(204)
            .expect(1)
            .create_async()
            .await;

        sink(MetaCoreWriteMode::PerField)
            .write(&server.url(), "c1", &sample_fields())
            .await;

        file_type.assert_async().await;
        size.assert_async().await;
    }

    #[tokio::test]
    async fn test_per_field_stops_at_first_failure() {
        let mut server = mockito::Server::new_async().await;
        let _file_type = server
            .mock("PUT", "/meta/c1/fileType")
            .with_status(500)
            .create_async()
            .await;
        let size = server
            .mock("PUT", "/meta/c1/sizeByte")
            .with_status(204)
            .expect(0)
            .create_async()
            .await;

        sink(MetaCoreWriteMode::PerField)
            .write(&server.url(), "c1", &sample_fields())
            .await;

        size.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_status_is_swallowed() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PATCH", "/meta/c1")
            .with_status(503)
            .expect(1)
            .create_async()
            .await;

        sink(MetaCoreWriteMode::Patch)
            .write(&server.url(), "c1", &sample_fields())
            .await;

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unreachable_store_is_swallowed() {
        sink(MetaCoreWriteMode::Patch)
            .write("http://127.0.0.1:1", "c1", &sample_fields())
            .await;
    }

    #[tokio::test]
    async fn test_empty_fields_send_nothing() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PATCH", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        sink(MetaCoreWriteMode::Patch)
            .write(&server.url(), "c1", &BTreeMap::new())
            .await;

        mock.assert_async().await;
    }
}
