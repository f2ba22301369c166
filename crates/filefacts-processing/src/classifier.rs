use filefacts_core::models::FileType;
use filefacts_core::ImagePolicy;

use crate::sniff;

/// MIME type reported when neither content nor extension identify the file.
pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

const SUBTITLE_MIME_TYPES: &[&str] = &[
    "application/x-subrip",
    "text/srt",
    "text/vtt",
    "text/x-ssa",
    "text/x-ass",
    "text/x-microdvd",
    "application/x-sami",
    "application/x-vobsub",
    "application/x-pgs",
];

const ARCHIVE_MIME_TYPES: &[&str] = &[
    "application/zip",
    "application/x-zip-compressed",
    "application/vnd.rar",
    "application/x-rar-compressed",
    "application/x-7z-compressed",
    "application/x-tar",
    "application/gzip",
    "application/x-gzip",
    "application/x-bzip2",
    "application/x-xz",
    "application/zstd",
    "application/x-iso9660-image",
];

const DOCUMENT_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/rtf",
    "application/epub+zip",
    "application/x-mobipocket-ebook",
    "application/vnd.amazon.ebook",
    "application/vnd.ms-excel",
    "application/vnd.ms-powerpoint",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    "application/vnd.oasis.opendocument.text",
    "application/vnd.oasis.opendocument.spreadsheet",
    "application/vnd.oasis.opendocument.presentation",
];

/// Result of classifying one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub file_type: FileType,
    pub mime_type: String,
}

/// File type classifier
///
/// Holds the category tables' only tunable, the category images fold into. Cheap to
/// copy and shared read-only by every task.
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier {
    image_policy: ImagePolicy,
}

impl Classifier {
    pub fn new(image_policy: ImagePolicy) -> Self {
        Self { image_policy }
    }

    /// Category for an extension. Case-insensitive, a leading dot is tolerated.
    /// Unknown and empty extensions are [`FileType::Other`].
    pub fn classify_by_extension(&self, extension: &str) -> FileType {
        self.known_extension(extension).unwrap_or(FileType::Other)
    }

    fn known_extension(&self, extension: &str) -> Option<FileType> {
        let extension = extension.trim_start_matches('.').to_lowercase();

        let file_type = match extension.as_str() {
            // Video
            "mkv" | "mp4" | "m4v" | "avi" | "mov" | "wmv" | "flv" | "webm" | "mpg" | "mpeg"
            | "m2ts" | "mts" | "ts" | "vob" | "3gp" | "ogv" | "divx" | "rmvb" => FileType::Video,
            // Audio
            "mp3" | "flac" | "wav" | "aac" | "m4a" | "ogg" | "oga" | "opus" | "wma" | "aiff"
            | "aif" | "ape" | "mka" | "ac3" | "dts" | "alac" => FileType::Audio,
            // Documents
            "pdf" | "doc" | "docx" | "odt" | "rtf" | "txt" | "md" | "nfo" | "epub" | "mobi"
            | "azw3" | "xls" | "xlsx" | "ods" | "ppt" | "pptx" | "odp" | "csv" => {
                FileType::Document
            }
            // Subtitles
            "srt" | "vtt" | "ass" | "ssa" | "sub" | "idx" | "sup" | "smi" => FileType::Subtitle,
            "torrent" => FileType::Torrent,
            // Archives
            "zip" | "rar" | "7z" | "tar" | "gz" | "tgz" | "bz2" | "xz" | "zst" | "iso" => {
                FileType::Archive
            }
            // Images
            "jpg" | "jpeg" | "png" | "gif" | "webp" | "bmp" | "tif" | "tiff" | "svg" | "heic"
            | "avif" => self.image_category(),
            _ => return None,
        };

        Some(file_type)
    }

    /// Category implied by a MIME type, if any. Parameters such as `; charset=utf-8`
    /// are ignored.
    pub fn category_for_mime(&self, mime: &str) -> Option<FileType> {
        let essence = mime
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_lowercase();
        let essence = essence.as_str();

        if SUBTITLE_MIME_TYPES.contains(&essence) {
            return Some(FileType::Subtitle);
        }
        if essence == "application/x-bittorrent" {
            return Some(FileType::Torrent);
        }
        if ARCHIVE_MIME_TYPES.contains(&essence) {
            return Some(FileType::Archive);
        }
        if essence.starts_with("video/") {
            return Some(FileType::Video);
        }
        if essence.starts_with("audio/") || essence == "application/ogg" {
            return Some(FileType::Audio);
        }
        if DOCUMENT_MIME_TYPES.contains(&essence) || essence.starts_with("text/") {
            return Some(FileType::Document);
        }
        if essence.starts_with("image/") {
            return Some(self.image_category());
        }

        None
    }

    /// Combine extension and sniffed content into the reported type and MIME.
    ///
    /// The MIME type prefers the sniffed value, then the extension's conventional type,
    /// then [`FALLBACK_MIME_TYPE`]. The category comes from the extension whenever the
    /// extension is known; MIME categories only fill in for unknown extensions.
    pub fn resolve(&self, extension: &str, sniffed: Option<&str>) -> Classification {
        let sniffed = sniffed.map(str::trim).filter(|m| !m.is_empty());
        let extension_mime = sniff::mime_from_extension(extension);

        let file_type = match self.known_extension(extension) {
            Some(file_type) => file_type,
            None => sniffed
                .and_then(|m| self.category_for_mime(m))
                .or_else(|| {
                    extension_mime
                        .as_deref()
                        .and_then(|m| self.category_for_mime(m))
                })
                .unwrap_or(FileType::Other),
        };

        let mime_type = sniffed
            .map(str::to_string)
            .or(extension_mime)
            .unwrap_or_else(|| FALLBACK_MIME_TYPE.to_string());

        tracing::trace!(
            extension = %extension,
            sniffed = ?sniffed,
            file_type = %file_type,
            mime_type = %mime_type,
            "Resolved classification"
        );

        Classification {
            file_type,
            mime_type,
        }
    }

    fn image_category(&self) -> FileType {
        match self.image_policy {
            ImagePolicy::Document => FileType::Document,
            ImagePolicy::Other => FileType::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions_are_case_insensitive() {
        let classifier = Classifier::default();
        assert_eq!(classifier.classify_by_extension("mkv"), FileType::Video);
        assert_eq!(classifier.classify_by_extension("MKV"), FileType::Video);
        assert_eq!(classifier.classify_by_extension(".Mp3"), FileType::Audio);
    }

    #[test]
    fn every_category_has_an_extension() {
        let classifier = Classifier::default();
        assert_eq!(classifier.classify_by_extension("pdf"), FileType::Document);
        assert_eq!(classifier.classify_by_extension("srt"), FileType::Subtitle);
        assert_eq!(classifier.classify_by_extension("torrent"), FileType::Torrent);
        assert_eq!(classifier.classify_by_extension("7z"), FileType::Archive);
    }

    #[test]
    fn unknown_and_empty_extensions_are_other() {
        let classifier = Classifier::default();
        assert_eq!(classifier.classify_by_extension("xyz"), FileType::Other);
        assert_eq!(classifier.classify_by_extension(""), FileType::Other);
    }

    #[test]
    fn images_follow_policy() {
        assert_eq!(
            Classifier::new(ImagePolicy::Document).classify_by_extension("png"),
            FileType::Document
        );
        assert_eq!(
            Classifier::new(ImagePolicy::Other).classify_by_extension("png"),
            FileType::Other
        );
        assert_eq!(
            Classifier::new(ImagePolicy::Other).category_for_mime("image/jpeg"),
            Some(FileType::Other)
        );
    }

    #[test]
    fn mime_table_order() {
        let classifier = Classifier::default();
        assert_eq!(classifier.category_for_mime("text/vtt"), Some(FileType::Subtitle));
        assert_eq!(
            classifier.category_for_mime("text/plain; charset=utf-8"),
            Some(FileType::Document)
        );
        assert_eq!(
            classifier.category_for_mime("application/x-bittorrent"),
            Some(FileType::Torrent)
        );
        assert_eq!(
            classifier.category_for_mime("application/gzip"),
            Some(FileType::Archive)
        );
        assert_eq!(
            classifier.category_for_mime("Video/MP4"),
            Some(FileType::Video)
        );
        assert_eq!(
            classifier.category_for_mime("application/ogg"),
            Some(FileType::Audio)
        );
        assert_eq!(classifier.category_for_mime("application/x-unknown"), None);
    }

    #[test]
    fn sniffed_mime_wins_but_extension_keeps_category() {
        let classifier = Classifier::default();
        let result = classifier.resolve("txt", Some("image/png"));
        assert_eq!(result.file_type, FileType::Document);
        assert_eq!(result.mime_type, "image/png");

        let result = Classifier::new(ImagePolicy::Other).resolve("mkv", Some("application/zip"));
        assert_eq!(result.file_type, FileType::Video);
        assert_eq!(result.mime_type, "application/zip");
    }

    #[test]
    fn extension_mime_is_the_fallback() {
        let result = Classifier::default().resolve("mkv", None);
        assert_eq!(result.file_type, FileType::Video);
        assert_eq!(result.mime_type, "video/x-matroska");
    }

    #[test]
    fn unknown_extension_uses_sniffed_category() {
        let result = Classifier::default().resolve("bin", Some("video/mp4"));
        assert_eq!(result.file_type, FileType::Video);
        assert_eq!(result.mime_type, "video/mp4");

        let result = Classifier::default().resolve("", Some("application/pdf"));
        assert_eq!(result.file_type, FileType::Document);
    }

    #[test]
    fn nothing_known_falls_back() {
        let result = Classifier::default().resolve("", None);
        assert_eq!(result.file_type, FileType::Other);
        assert_eq!(result.mime_type, FALLBACK_MIME_TYPE);

        let result = Classifier::default().resolve("qqq", Some("  "));
        assert_eq!(result.file_type, FileType::Other);
        assert_eq!(result.mime_type, FALLBACK_MIME_TYPE);
    }

    #[test]
    fn never_undefined() {
        let classifier = Classifier::default();
        for ext in ["", "xyz", "mkv", "png", "tar", "bin"] {
            assert_ne!(classifier.resolve(ext, None).file_type, FileType::Undefined);
        }
    }
}
