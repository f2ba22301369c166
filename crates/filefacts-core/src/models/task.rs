use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

use super::file::FileFacts;
use crate::error::AppError;

/// One request to extract facts from one file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskRequest {
    pub task_id: String,
    pub cid: String,
    pub file_path: String,
    pub callback_url: String,
    pub meta_core_url: String,
    /// Metadata gathered by earlier stages. Read-only context, accepted in any shape.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub existing_meta: Option<serde_json::Value>,
}

impl TaskRequest {
    /// Reject requests missing any field the processor depends on.
    pub fn validate(&self) -> Result<(), AppError> {
        let required = [
            ("taskId", &self.task_id),
            ("cid", &self.cid),
            ("filePath", &self.file_path),
            ("callbackUrl", &self.callback_url),
            ("metaCoreUrl", &self.meta_core_url),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(AppError::MissingField(name));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Completed,
    Failed,
    /// Reserved; not produced by this worker.
    Skipped,
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            TaskStatus::Completed => write!(f, "completed"),
            TaskStatus::Failed => write!(f, "failed"),
            TaskStatus::Skipped => write!(f, "skipped"),
        }
    }
}

/// Result of one task, delivered to the callback URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskOutcome {
    pub task_id: String,
    pub status: TaskStatus,
    /// Elapsed milliseconds.
    pub duration: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<FileFacts>,
}

impl TaskOutcome {
    pub fn completed(task_id: impl Into<String>, duration: u64, facts: FileFacts) -> Self {
        Self {
            task_id: task_id.into(),
            status: TaskStatus::Completed,
            duration,
            error: None,
            metadata: Some(facts),
        }
    }

    pub fn failed(task_id: impl Into<String>, duration: u64, error: impl Into<String>) -> Self {
        let error = error.into();
        let error = if error.trim().is_empty() {
            "unknown error".to_string()
        } else {
            error
        };
        Self {
            task_id: task_id.into(),
            status: TaskStatus::Failed,
            duration,
            error: Some(error),
            metadata: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}
