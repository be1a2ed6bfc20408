//! File type classification by extension.

use std::path::Path;

use crate::metadata::PayloadKind;

/// MIME type used when the extension is unknown.
pub const DEFAULT_MIME: &str = "application/octet-stream";

/// Extensions whose contents are already compressed.
pub const PRECOMPRESSED: &[&str] = &["zip", "gz", "bz2", "7z", "rar", "jpg", "jpeg", "mp3", "mp4"];

/// Lowercase extension -> (category, MIME type).
static EXTENSIONS: &[(&str, PayloadKind, &str)] = &[
    // text
    ("txt", PayloadKind::Text, "text/plain"),
    ("md", PayloadKind::Text, "text/markdown"),
    ("log", PayloadKind::Text, "text/plain"),
    ("csv", PayloadKind::Text, "text/csv"),
    ("json", PayloadKind::Text, "application/json"),
    ("xml", PayloadKind::Text, "application/xml"),
    ("html", PayloadKind::Text, "text/html"),
    ("css", PayloadKind::Text, "text/css"),
    ("js", PayloadKind::Text, "text/javascript"),
    ("py", PayloadKind::Text, "text/x-python"),
    ("sh", PayloadKind::Text, "application/x-sh"),
    ("c", PayloadKind::Text, "text/x-c"),
    ("cpp", PayloadKind::Text, "text/x-c++"),
    ("java", PayloadKind::Text, "text/x-java"),
    // document
    ("pdf", PayloadKind::Document, "application/pdf"),
    ("doc", PayloadKind::Document, "application/msword"),
    (
        "docx",
        PayloadKind::Document,
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    ("odt", PayloadKind::Document, "application/vnd.oasis.opendocument.text"),
    ("rtf", PayloadKind::Document, "application/rtf"),
    ("tex", PayloadKind::Document, "application/x-tex"),
    // image
    ("jpg", PayloadKind::Image, "image/jpeg"),
    ("jpeg", PayloadKind::Image, "image/jpeg"),
    ("png", PayloadKind::Image, "image/png"),
    ("gif", PayloadKind::Image, "image/gif"),
    ("bmp", PayloadKind::Image, "image/bmp"),
    ("tiff", PayloadKind::Image, "image/tiff"),
    ("svg", PayloadKind::Image, "image/svg+xml"),
    ("webp", PayloadKind::Image, "image/webp"),
    // archive
    ("zip", PayloadKind::Archive, "application/zip"),
    ("tar", PayloadKind::Archive, "application/x-tar"),
    ("gz", PayloadKind::Archive, "application/gzip"),
    ("bz2", PayloadKind::Archive, "application/x-bzip2"),
    ("7z", PayloadKind::Archive, "application/x-7z-compressed"),
    ("rar", PayloadKind::Archive, "application/vnd.rar"),
    // media
    ("mp3", PayloadKind::Media, "audio/mpeg"),
    ("mp4", PayloadKind::Media, "video/mp4"),
    ("avi", PayloadKind::Media, "video/x-msvideo"),
    ("mkv", PayloadKind::Media, "video/x-matroska"),
    ("wav", PayloadKind::Media, "audio/x-wav"),
    ("flac", PayloadKind::Media, "audio/flac"),
    // binary
    ("exe", PayloadKind::Binary, "application/x-msdownload"),
    ("bin", PayloadKind::Binary, DEFAULT_MIME),
    ("dat", PayloadKind::Binary, DEFAULT_MIME),
    ("db", PayloadKind::Binary, DEFAULT_MIME),
    ("sqlite", PayloadKind::Binary, "application/x-sqlite3"),
];

/// Lowercased extension of `path`, if any.
pub fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Classifies a file name into a payload category and MIME type.
///
/// Unknown or missing extensions are binary.
pub fn classify<P: AsRef<Path>>(path: P) -> (PayloadKind, &'static str) {
    let Some(ext) = extension(path.as_ref()) else {
        return (PayloadKind::Binary, DEFAULT_MIME);
    };

    EXTENSIONS
        .iter()
        .find(|(known, _, _)| *known == ext)
        .map(|&(_, kind, mime)| (kind, mime))
        .unwrap_or((PayloadKind::Binary, DEFAULT_MIME))
}

/// True when compressing the file again is not worth trying.
pub fn is_precompressed<P: AsRef<Path>>(path: P) -> bool {
    extension(path.as_ref())
        .map(|ext| PRECOMPRESSED.contains(&ext.as_str()))
        .unwrap_or(false)
}
