#[cfg(feature = "access-local")]
use crate::LocalFileAccess;
#[cfg(feature = "access-remote")]
use crate::RemoteFileAccess;
use crate::{AccessBackend, AccessError, AccessResult, FileAccess};
use filefacts_core::Config;
use std::sync::Arc;

/// Create the file access provider based on configuration
///
/// Called once at startup. The provider is shared by every task for the lifetime of
/// the process.
pub fn create_file_access(config: &Config) -> AccessResult<Arc<dyn FileAccess>> {
    match config.access_backend() {
        #[cfg(feature = "access-remote")]
        AccessBackend::Remote => {
            let base_url = config.file_access_base_url.clone().ok_or_else(|| {
                AccessError::Config("FILE_ACCESS_BASE_URL not configured".to_string())
            })?;

            let access = RemoteFileAccess::new(
                base_url,
                config.file_access_strip_prefix.clone(),
                std::time::Duration::from_secs(config.file_access_timeout_secs),
            )?;
            Ok(Arc::new(access))
        }

        #[cfg(not(feature = "access-remote"))]
        AccessBackend::Remote => Err(AccessError::Config(
            "Remote file access not available (access-remote feature not enabled)".to_string(),
        )),

        #[cfg(feature = "access-local")]
        AccessBackend::Local => Ok(Arc::new(LocalFileAccess::new())),

        #[cfg(not(feature = "access-local"))]
        AccessBackend::Local => Err(AccessError::Config(
            "Local file access not available (access-local feature not enabled)".to_string(),
        )),
    }
}

#[cfg(all(test, feature = "access-local", feature = "access-remote"))]
mod tests {
    use super::*;

    #[test]
    fn local_by_default() {
        let access = create_file_access(&Config::default()).unwrap();
        assert_eq!(access.backend_type(), AccessBackend::Local);
    }

    #[test]
    fn remote_when_base_url_configured() {
        let config = Config {
            file_access_base_url: Some("http://storage:8080".to_string()),
            ..Config::default()
        };
        let access = create_file_access(&config).unwrap();
        assert_eq!(access.backend_type(), AccessBackend::Remote);
    }
}
