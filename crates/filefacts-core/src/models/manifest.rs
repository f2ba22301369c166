//! Published task manifest
//!
//! Consumed by the orchestrator to order workers and to learn which metadata fields
//! this worker owns.

use serde::{Deserialize, Serialize};

use super::file::FileFacts;

/// Position in the worker chain. Lower runs earlier.
pub const MANIFEST_PRIORITY: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub readonly: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub name: String,
    pub version: String,
    pub description: String,
    pub priority: u32,
    pub dependencies: Vec<String>,
    pub output: Vec<ManifestField>,
}

impl Manifest {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        let field = |name: &str, field_type: &str| ManifestField {
            name: name.to_string(),
            field_type: field_type.to_string(),
            readonly: true,
        };

        Self {
            name: name.into(),
            version: version.into(),
            description: "Detects file type, MIME type, size, name and extension".to_string(),
            priority: MANIFEST_PRIORITY,
            dependencies: Vec::new(),
            output: vec![
                field(FileFacts::FIELD_FILE_TYPE, "string"),
                field(FileFacts::FIELD_MIME_TYPE, "string"),
                field(FileFacts::FIELD_SIZE_BYTE, "number"),
                field(FileFacts::FIELD_FILE_NAME, "string"),
                field(FileFacts::FIELD_EXTENSION, "string"),
                field(FileFacts::FIELD_FILE_PATH, "string"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_declares_readonly_fields_and_no_dependencies() {
        let manifest = Manifest::new("file-info", "0.1.0");
        assert!(manifest.dependencies.is_empty());
        assert_eq!(manifest.priority, MANIFEST_PRIORITY);

        let names: Vec<&str> = manifest.output.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["fileType", "mimeType", "sizeByte", "fileName", "extension", "filePath"]
        );
        assert!(manifest.output.iter().all(|f| f.readonly));

        let json = serde_json::to_value(&manifest).unwrap();
        assert_eq!(json["output"][2]["type"], "number");
    }
}
