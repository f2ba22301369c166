//! Configuration module
//!
//! Process-wide settings for the worker: HTTP shell, file access provider selection,
//! content sniffing, metadata-store and callback clients. Loaded once at startup from
//! the environment (and an optional `.env` file).

use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::access_backend::AccessBackend;

// Common constants
const SERVER_PORT: u16 = 3000;
const FILE_ACCESS_STRIP_PREFIX: &str = "/files";
const FILE_ACCESS_TIMEOUT_SECS: u64 = 30;
const SNIFF_BYTES: usize = 4096;
const META_CORE_TIMEOUT_SECS: u64 = 5;
const CALLBACK_TIMEOUT_SECS: u64 = 10;
const HTTP_CONCURRENCY_LIMIT: usize = 1024;

/// How the metadata store is written to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MetaCoreWriteMode {
    /// One `PATCH /meta/{cid}` carrying every field.
    #[default]
    Patch,
    /// Legacy `PUT /meta/{cid}/{field}` per field.
    PerField,
}

impl FromStr for MetaCoreWriteMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "patch" | "merge" => Ok(MetaCoreWriteMode::Patch),
            "per_field" | "per-field" | "put" => Ok(MetaCoreWriteMode::PerField),
            _ => Err(anyhow::anyhow!("Invalid metadata write mode: {}", s)),
        }
    }
}

impl Display for MetaCoreWriteMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            MetaCoreWriteMode::Patch => write!(f, "patch"),
            MetaCoreWriteMode::PerField => write!(f, "per_field"),
        }
    }
}

/// Which category image files fold into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImagePolicy {
    #[default]
    Document,
    Other,
}

impl FromStr for ImagePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "document" => Ok(ImagePolicy::Document),
            "other" => Ok(ImagePolicy::Other),
            _ => Err(anyhow::anyhow!("Invalid image category: {}", s)),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(anyhow::anyhow!("Invalid log format: {}", s)),
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub log_format: LogFormat,
    // File access configuration
    /// Base URL of the range-addressable file store. When unset the local filesystem is used.
    pub file_access_base_url: Option<String>,
    pub file_access_strip_prefix: String,
    pub file_access_timeout_secs: u64,
    // Classification
    pub sniff_bytes: usize,
    pub image_policy: ImagePolicy,
    // Metadata store
    pub meta_core_timeout_secs: u64,
    pub meta_core_write_mode: MetaCoreWriteMode,
    // Callback delivery
    pub callback_timeout_secs: u64,
    // Dispatch
    /// Upper bound on tasks processed at once. `None` leaves concurrency unbounded.
    pub max_concurrent_tasks: Option<usize>,
    pub http_concurrency_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: SERVER_PORT,
            environment: "development".to_string(),
            log_format: LogFormat::Pretty,
            file_access_base_url: None,
            file_access_strip_prefix: FILE_ACCESS_STRIP_PREFIX.to_string(),
            file_access_timeout_secs: FILE_ACCESS_TIMEOUT_SECS,
            sniff_bytes: SNIFF_BYTES,
            image_policy: ImagePolicy::Document,
            meta_core_timeout_secs: META_CORE_TIMEOUT_SECS,
            meta_core_write_mode: MetaCoreWriteMode::Patch,
            callback_timeout_secs: CALLBACK_TIMEOUT_SECS,
            max_concurrent_tasks: None,
            http_concurrency_limit: HTTP_CONCURRENCY_LIMIT,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let config = Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            environment,
            log_format: env::var("LOG_FORMAT")
                .ok()
                .map(|s| s.parse())
                .transpose()?
                .unwrap_or_default(),
            file_access_base_url: env::var("FILE_ACCESS_BASE_URL")
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            file_access_strip_prefix: env::var("FILE_ACCESS_STRIP_PREFIX")
                .unwrap_or_else(|_| FILE_ACCESS_STRIP_PREFIX.to_string()),
            file_access_timeout_secs: env::var("FILE_ACCESS_TIMEOUT_SECS")
                .unwrap_or_else(|_| FILE_ACCESS_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(FILE_ACCESS_TIMEOUT_SECS),
            sniff_bytes: env::var("SNIFF_BYTES")
                .unwrap_or_else(|_| SNIFF_BYTES.to_string())
                .parse::<usize>()
                .unwrap_or(SNIFF_BYTES)
                .max(1),
            image_policy: env::var("IMAGE_CATEGORY")
                .ok()
                .map(|s| s.parse())
                .transpose()?
                .unwrap_or_default(),
            meta_core_timeout_secs: env::var("META_CORE_TIMEOUT_SECS")
                .unwrap_or_else(|_| META_CORE_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(META_CORE_TIMEOUT_SECS),
            meta_core_write_mode: env::var("META_CORE_WRITE_MODE")
                .ok()
                .map(|s| s.parse())
                .transpose()?
                .unwrap_or_default(),
            callback_timeout_secs: env::var("CALLBACK_TIMEOUT_SECS")
                .unwrap_or_else(|_| CALLBACK_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CALLBACK_TIMEOUT_SECS),
            max_concurrent_tasks: env::var("MAX_CONCURRENT_TASKS")
                .ok()
                .and_then(|s| s.parse::<usize>().ok())
                .filter(|&n| n > 0),
            http_concurrency_limit: env::var("HTTP_CONCURRENCY_LIMIT")
                .ok()
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(HTTP_CONCURRENCY_LIMIT)
                .max(1),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if let Some(base_url) = &self.file_access_base_url {
            if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                return Err(anyhow::anyhow!(
                    "FILE_ACCESS_BASE_URL must be an http:// or https:// URL"
                ));
            }
        }

        if self.file_access_timeout_secs == 0 {
            return Err(anyhow::anyhow!("FILE_ACCESS_TIMEOUT_SECS must be greater than 0"));
        }

        if self.meta_core_timeout_secs == 0 {
            return Err(anyhow::anyhow!("META_CORE_TIMEOUT_SECS must be greater than 0"));
        }

        if self.callback_timeout_secs == 0 {
            return Err(anyhow::anyhow!("CALLBACK_TIMEOUT_SECS must be greater than 0"));
        }

        if self.sniff_bytes == 0 {
            return Err(anyhow::anyhow!("SNIFF_BYTES must be greater than 0"));
        }

        Ok(())
    }

    /// The access backend implied by configuration: remote when a base URL is set.
    pub fn access_backend(&self) -> AccessBackend {
        if self.file_access_base_url.is_some() {
            AccessBackend::Remote
        } else {
            AccessBackend::Local
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid_and_local() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.access_backend(), AccessBackend::Local);
        assert_eq!(config.sniff_bytes, 4096);
        assert_eq!(config.meta_core_timeout_secs, 5);
        assert_eq!(config.file_access_strip_prefix, "/files");
    }

    #[test]
    fn base_url_selects_remote_backend() {
        let config = Config {
            file_access_base_url: Some("http://storage:8080".to_string()),
            ..Config::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.access_backend(), AccessBackend::Remote);
    }

    #[test]
    fn rejects_non_http_base_url() {
        let config = Config {
            file_access_base_url: Some("ftp://storage".to_string()),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_timeouts() {
        let config = Config {
            meta_core_timeout_secs: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn write_mode_parsing() {
        assert_eq!(
            "PATCH".parse::<MetaCoreWriteMode>().unwrap(),
            MetaCoreWriteMode::Patch
        );
        assert_eq!(
            "per_field".parse::<MetaCoreWriteMode>().unwrap(),
            MetaCoreWriteMode::PerField
        );
        assert!("bulk".parse::<MetaCoreWriteMode>().is_err());
    }

    #[test]
    fn image_policy_parsing() {
        assert_eq!("other".parse::<ImagePolicy>().unwrap(), ImagePolicy::Other);
        assert_eq!(" Document ".parse::<ImagePolicy>().unwrap(), ImagePolicy::Document);
        assert!("image".parse::<ImagePolicy>().is_err());
    }
}
