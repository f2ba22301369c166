use crate::traits::{AccessError, AccessResult, FileAccess};
use crate::AccessBackend;
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use filefacts_core::models::FileStat;
use std::io::SeekFrom;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

/// Upper bound on the initial read buffer; larger reads grow it as needed.
const INITIAL_READ_CAPACITY: usize = 64 * 1024;

/// Local filesystem access
///
/// Locators are used as filesystem paths as-is.
#[derive(Clone, Debug, Default)]
pub struct LocalFileAccess;

impl LocalFileAccess {
    pub fn new() -> Self {
        LocalFileAccess
    }
}

#[async_trait]
impl FileAccess for LocalFileAccess {
    async fn stat(&self, path: &str) -> AccessResult<FileStat> {
        let meta = fs::metadata(path)
            .await
            .map_err(|e| AccessError::from_io(path, e))?;

        if meta.is_dir() {
            return Err(AccessError::InvalidResponse {
                path: path.to_string(),
                message: "path is a directory".to_string(),
            });
        }

        Ok(FileStat {
            size: meta.len(),
            modified: meta.modified().ok().map(DateTime::<Utc>::from),
        })
    }

    async fn read_range(&self, path: &str, start: u64, len: usize) -> AccessResult<Bytes> {
        if len == 0 {
            return Ok(Bytes::new());
        }

        let started = std::time::Instant::now();

        let mut file = fs::File::open(path)
            .await
            .map_err(|e| AccessError::from_io(path, e))?;

        if start > 0 {
            file.seek(SeekFrom::Start(start))
                .await
                .map_err(|e| AccessError::from_io(path, e))?;
        }

        let mut buf = Vec::with_capacity(len.min(INITIAL_READ_CAPACITY));
        file.take(len as u64)
            .read_to_end(&mut buf)
            .await
            .map_err(|e| AccessError::from_io(path, e))?;

        tracing::debug!(
            path = %path,
            start,
            requested = len,
            size_bytes = buf.len(),
            duration_ms = started.elapsed().as_secs_f64() * 1000.0,
            "Local range read successful"
        );

        Ok(Bytes::from(buf))
    }

    fn backend_type(&self) -> AccessBackend {
        AccessBackend::Local
    }
}

#[cfg(all(test, feature = "access-local"))]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_file(dir: &std::path::Path, name: &str, data: &[u8]) -> String {
        let path = dir.join(name);
        std::fs::write(&path, data).unwrap();
        path.to_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_stat_reports_size_and_mtime() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "clip.mkv", &[7u8; 1500]);

        let stat = LocalFileAccess::new().stat(&path).await.unwrap();
        assert_eq!(stat.size, 1500);
        assert!(stat.modified.is_some());
    }

    #[tokio::test]
    async fn test_stat_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        let path = path.to_str().unwrap();

        let err = LocalFileAccess::new().stat(path).await.unwrap_err();
        assert!(matches!(err, AccessError::NotFound { .. }));
        assert!(err.to_string().contains("missing.txt"));
    }

    #[tokio::test]
    async fn test_stat_rejects_directory() {
        let dir = tempdir().unwrap();
        let err = LocalFileAccess::new()
            .stat(dir.path().to_str().unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, AccessError::InvalidResponse { .. }));
    }

    #[tokio::test]
    async fn test_read_prefix_is_bounded() {
        let dir = tempdir().unwrap();
        let data: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
        let path = write_file(dir.path(), "big.bin", &data);

        let prefix = LocalFileAccess::new().read_prefix(&path, 4096).await.unwrap();
        assert_eq!(prefix.len(), 4096);
        assert_eq!(&prefix[..], &data[..4096]);
    }

    #[tokio::test]
    async fn test_read_range_with_offset_and_short_file() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "small.txt", b"hello world");
        let access = LocalFileAccess::new();

        let middle = access.read_range(&path, 6, 100).await.unwrap();
        assert_eq!(&middle[..], b"world");

        let past_end = access.read_range(&path, 50, 10).await.unwrap();
        assert!(past_end.is_empty());

        let nothing = access.read_range(&path, 0, 0).await.unwrap();
        assert!(nothing.is_empty());
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let err = LocalFileAccess::new()
            .read_prefix("/definitely/not/here.bin", 16)
            .await
            .unwrap_err();
        assert!(matches!(err, AccessError::NotFound { .. }));
    }

    #[test]
    fn test_parse_name_and_backend() {
        let access = LocalFileAccess::new();
        let parsed = access.parse_name("/tmp/readme.txt");
        assert_eq!(parsed.file_name, "readme.txt");
        assert_eq!(parsed.extension, "txt");
        assert_eq!(access.backend_type(), AccessBackend::Local);
    }
}
