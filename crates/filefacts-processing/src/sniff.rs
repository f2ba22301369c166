//! MIME detection from content signatures and from extensions.

/// Detect a MIME type from the leading bytes of a file.
///
/// Returns `None` when no signature matches, including for empty input.
pub fn detect_mime(bytes: &[u8]) -> Option<String> {
    if bytes.is_empty() {
        return None;
    }
    infer::get(bytes).map(|kind| kind.mime_type().to_string())
}

/// Look up the conventional MIME type for a lowercase extension (no dot).
pub fn mime_from_extension(extension: &str) -> Option<String> {
    let extension = extension.trim_start_matches('.').to_lowercase();
    if extension.is_empty() {
        return None;
    }

    if let Some(mime) = supplemental_mime(&extension) {
        return Some(mime.to_string());
    }

    mime_guess::from_ext(&extension)
        .first_raw()
        .map(str::to_string)
}

// Subtitle and torrent types mime_guess either lacks or maps to unrelated formats.
fn supplemental_mime(extension: &str) -> Option<&'static str> {
    let mime = match extension {
        "srt" => "application/x-subrip",
        "vtt" => "text/vtt",
        "ass" | "ssa" => "text/x-ssa",
        "sub" => "text/x-microdvd",
        "smi" => "application/x-sami",
        "idx" => "application/x-vobsub",
        "sup" => "application/x-pgs",
        "torrent" => "application/x-bittorrent",
        "nfo" => "text/x-nfo",
        "mka" => "audio/x-matroska",
        _ => return None,
    };
    Some(mime)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D];

    #[test]
    fn detects_png_signature() {
        assert_eq!(detect_mime(PNG_MAGIC).as_deref(), Some("image/png"));
    }

    #[test]
    fn detects_pdf_signature() {
        assert_eq!(
            detect_mime(b"%PDF-1.7\n%\xe2\xe3\xcf\xd3\n").as_deref(),
            Some("application/pdf")
        );
    }

    #[test]
    fn plain_text_and_empty_input_have_no_signature() {
        assert_eq!(detect_mime(b"hello world, just some text\n"), None);
        assert_eq!(detect_mime(&[]), None);
    }

    #[test]
    fn extension_lookup() {
        assert_eq!(mime_from_extension("txt").as_deref(), Some("text/plain"));
        assert_eq!(mime_from_extension("PDF").as_deref(), Some("application/pdf"));
        assert_eq!(
            mime_from_extension("mkv").as_deref(),
            Some("video/x-matroska")
        );
        assert_eq!(mime_from_extension(".mp3").as_deref(), Some("audio/mpeg"));
    }

    #[test]
    fn supplemental_types_win() {
        assert_eq!(
            mime_from_extension("srt").as_deref(),
            Some("application/x-subrip")
        );
        assert_eq!(
            mime_from_extension("torrent").as_deref(),
            Some("application/x-bittorrent")
        );
    }

    #[test]
    fn unknown_or_empty_extension() {
        assert_eq!(mime_from_extension(""), None);
        assert_eq!(mime_from_extension("definitelynotanext"), None);
    }
}
