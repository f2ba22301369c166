pub mod file;
pub mod manifest;
pub mod task;

pub use file::{FileFacts, FileReference, FileStat, FileType, ParsedName};
pub use manifest::{Manifest, ManifestField};
pub use task::{TaskOutcome, TaskRequest, TaskStatus};
