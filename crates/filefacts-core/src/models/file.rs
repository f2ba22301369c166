use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::access_backend::AccessBackend;

/// Coarse file category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Video,
    Audio,
    Document,
    Subtitle,
    Torrent,
    Archive,
    Other,
    /// Accepted from upstream metadata; never produced by the classifier.
    Undefined,
}

impl FileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Video => "video",
            FileType::Audio => "audio",
            FileType::Document => "document",
            FileType::Subtitle => "subtitle",
            FileType::Torrent => "torrent",
            FileType::Archive => "archive",
            FileType::Other => "other",
            FileType::Undefined => "undefined",
        }
    }
}

impl Display for FileType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// The file under processing. Fixed for the lifetime of a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReference {
    pub cid: String,
    pub path: String,
    pub backend: AccessBackend,
}

/// Size and modification time reported by an access provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    pub size: u64,
    pub modified: Option<DateTime<Utc>>,
}

/// Basename and lowercase extension (without the dot) parsed from a locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    pub file_name: String,
    pub extension: String,
}

/// Facts extracted for one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileFacts {
    pub file_type: FileType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    pub size_byte: u64,
    pub file_name: String,
    pub extension: String,
    pub file_path: String,
}

impl FileFacts {
    pub const FIELD_FILE_TYPE: &'static str = "fileType";
    pub const FIELD_MIME_TYPE: &'static str = "mimeType";
    pub const FIELD_SIZE_BYTE: &'static str = "sizeByte";
    pub const FIELD_FILE_NAME: &'static str = "fileName";
    pub const FIELD_EXTENSION: &'static str = "extension";
    pub const FIELD_FILE_PATH: &'static str = "filePath";

    /// Field name to string value, as written to the metadata store.
    pub fn to_fields(&self) -> BTreeMap<String, String> {
        let mut fields = BTreeMap::new();
        fields.insert(
            Self::FIELD_FILE_TYPE.to_string(),
            self.file_type.to_string(),
        );
        if let Some(mime_type) = &self.mime_type {
            fields.insert(Self::FIELD_MIME_TYPE.to_string(), mime_type.clone());
        }
        fields.insert(
            Self::FIELD_SIZE_BYTE.to_string(),
            self.size_byte.to_string(),
        );
        fields.insert(Self::FIELD_FILE_NAME.to_string(), self.file_name.clone());
        fields.insert(Self::FIELD_EXTENSION.to_string(), self.extension.clone());
        fields.insert(Self::FIELD_FILE_PATH.to_string(), self.file_path.clone());
        fields
    }
}
