//! Task processor
//!
//! Runs one task end to end: stat the file, sniff its leading bytes, classify it,
//! write the facts to the metadata store and build the outcome. Access errors are the
//! only fatal ones; sniffing and metadata-store failures degrade silently.

use std::sync::Arc;
use std::time::Instant;

use filefacts_core::models::{FileFacts, FileReference, TaskOutcome, TaskRequest};
use filefacts_infra::MetadataSink;
use filefacts_processing::{detect_mime, Classifier};
use filefacts_storage::{AccessResult, FileAccess};

pub struct TaskProcessor {
    access: Arc<dyn FileAccess>,
    classifier: Classifier,
    sink: Arc<dyn MetadataSink>,
    sniff_bytes: usize,
}

impl TaskProcessor {
    pub fn new(
        access: Arc<dyn FileAccess>,
        classifier: Classifier,
        sink: Arc<dyn MetadataSink>,
        sniff_bytes: usize,
    ) -> Self {
        Self {
            access,
            classifier,
            sink,
            sniff_bytes: sniff_bytes.max(1),
        }
    }

    pub fn access(&self) -> &Arc<dyn FileAccess> {
        &self.access
    }

    /// Process one task. Always returns an outcome; failures are reported in it.
    #[tracing::instrument(
        skip(self, request),
        fields(task_id = %request.task_id, cid = %request.cid)
    )]
    pub async fn process(&self, request: &TaskRequest) -> TaskOutcome {
        let started = Instant::now();
        let file = FileReference {
            cid: request.cid.clone(),
            path: request.file_path.clone(),
            backend: self.access.backend_type(),
        };

        let facts = match self.extract(&file).await {
            Ok(facts) => facts,
            Err(e) => {
                let duration = elapsed_ms(started);
                tracing::warn!(
                    file_path = %file.path,
                    backend = %file.backend,
                    error = %e,
                    duration_ms = duration,
                    "Task failed"
                );
                return TaskOutcome::failed(&request.task_id, duration, e.to_string());
            }
        };

        self.sink
            .write(&request.meta_core_url, &file.cid, &facts.to_fields())
            .await;

        let duration = elapsed_ms(started);
        tracing::info!(
            file_type = %facts.file_type,
            mime_type = ?facts.mime_type,
            size_bytes = facts.size_byte,
            duration_ms = duration,
            "Task completed"
        );

        TaskOutcome::completed(&request.task_id, duration, facts)
    }

    async fn extract(&self, file: &FileReference) -> AccessResult<FileFacts> {
        let path = file.path.as_str();
        let name = self.access.parse_name(path);
        let stat = self.access.stat(path).await?;

        let sniffed = match self.access.read_prefix(path, self.sniff_bytes).await {
            Ok(bytes) => detect_mime(&bytes),
            Err(e) => {
                tracing::debug!(error = %e, "Content sniffing skipped");
                None
            }
        };

        let classification = self.classifier.resolve(&name.extension, sniffed.as_deref());

        Ok(FileFacts {
            file_type: classification.file_type,
            mime_type: Some(classification.mime_type),
            size_byte: stat.size,
            file_name: name.file_name,
            extension: name.extension,
            file_path: path.to_string(),
        })
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
