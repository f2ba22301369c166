//! Locator parsing and local-to-remote path translation.

use filefacts_core::models::ParsedName;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped inside a single URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Split a locator into basename and lowercase extension.
///
/// The extension is whatever follows the last dot of the basename. Names without a
/// dot, names whose only dot is leading (`.bashrc`) and names ending in a dot have no
/// extension.
pub fn parse_name(path: &str) -> ParsedName {
    let trimmed = path.trim_end_matches('/');
    let file_name = trimmed.rsplit('/').next().unwrap_or(trimmed).to_string();

    let extension = match file_name.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < file_name.len() => file_name[idx + 1..].to_lowercase(),
        _ => String::new(),
    };

    ParsedName {
        file_name,
        extension,
    }
}

/// Remove `prefix` from the front of `path` when it matches whole segments.
///
/// `/files/a` loses `/files`; `/filesystem/a` is left alone.
pub fn strip_path_prefix<'a>(path: &'a str, prefix: &str) -> &'a str {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return path;
    }
    match path.strip_prefix(prefix) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => path,
    }
}

/// Translate a local-style locator into a URL on the remote file store.
///
/// The prefix is stripped, every remaining segment is percent-encoded and the result
/// is joined onto `base_url` with exactly one separating slash. The same input always
/// produces the same URL.
pub fn remote_url(base_url: &str, strip_prefix: &str, path: &str) -> String {
    let rest = strip_path_prefix(path, strip_prefix);
    let encoded: Vec<String> = rest
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string())
        .collect();

    format!("{}/{}", base_url.trim_end_matches('/'), encoded.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_dot_wins() {
        let parsed = parse_name("/movies/Movie.Name.2010.1080p.mkv");
        assert_eq!(parsed.file_name, "Movie.Name.2010.1080p.mkv");
        assert_eq!(parsed.extension, "mkv");
    }

    #[test]
    fn extension_is_lowercased() {
        let parsed = parse_name("/tmp/VIDEO.MKV");
        assert_eq!(parsed.file_name, "VIDEO.MKV");
        assert_eq!(parsed.extension, "mkv");
    }

    #[test]
    fn names_without_extension() {
        assert_eq!(parse_name("/usr/bin/README").extension, "");
        assert_eq!(parse_name("/home/u/.bashrc").extension, "");
        assert_eq!(parse_name("/tmp/odd.").extension, "");
        assert_eq!(parse_name("plain").file_name, "plain");
    }

    #[test]
    fn trailing_slash_is_ignored() {
        let parsed = parse_name("/data/archive.tar.gz/");
        assert_eq!(parsed.file_name, "archive.tar.gz");
        assert_eq!(parsed.extension, "gz");
    }

    #[test]
    fn strips_prefix_only_at_segment_boundary() {
        assert_eq!(strip_path_prefix("/files/a/b.mkv", "/files"), "/a/b.mkv");
        assert_eq!(strip_path_prefix("/files", "/files/"), "");
        assert_eq!(strip_path_prefix("/filesystem/a", "/files"), "/filesystem/a");
        assert_eq!(strip_path_prefix("/other/a", "/files"), "/other/a");
        assert_eq!(strip_path_prefix("/a", ""), "/a");
    }

    #[test]
    fn remote_url_normalizes_slashes() {
        assert_eq!(
            remote_url("http://store:8080/", "/files", "/files/movies/a.mkv"),
            "http://store:8080/movies/a.mkv"
        );
        assert_eq!(
            remote_url("http://store:8080", "/files", "/files//movies/a.mkv"),
            "http://store:8080/movies/a.mkv"
        );
        assert_eq!(
            remote_url("http://store:8080/raw", "/files", "relative/a.txt"),
            "http://store:8080/raw/relative/a.txt"
        );
    }

    #[test]
    fn remote_url_encodes_segments() {
        assert_eq!(
            remote_url("http://store", "/files", "/files/My Movie #1?.mkv"),
            "http://store/My%20Movie%20%231%3F.mkv"
        );
    }

    #[test]
    fn remote_url_is_deterministic() {
        let a = remote_url("http://store", "/files", "/files/x/y.srt");
        let b = remote_url("http://store", "/files", "/files/x/y.srt");
        assert_eq!(a, b);
    }
}
