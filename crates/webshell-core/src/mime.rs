// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// MIME type <-> file extension registry.
//
// Lookups go to the `mime_guess` database. A short override table comes
// first for types where the preferred extension is not the crate's first
// (alphabetical) choice, or where the crate has no entry at all.

/// (MIME type, preferred extension) pairs consulted before `mime_guess`.
const PREFERRED: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/tiff", "tiff"),
    ("text/plain", "txt"),
    ("text/html", "html"),
    ("application/xml", "xml"),
    ("text/xml", "xml"),
    ("audio/mpeg", "mp3"),
    ("video/mp4", "mp4"),
    ("video/x-matroska", "mkv"),
    ("application/javascript", "js"),
    ("text/javascript", "js"),
    ("audio/aac", "aac"),
    ("application/x-hwp", "hwp"),
];

/// Never mapped to an extension: it says nothing about the content.
const GENERIC: &str = "application/octet-stream";

/// Strip parameters (`; charset=...`) and normalise case.
pub fn essence(mime: &str) -> String {
    mime.split(';').next().unwrap_or_default().trim().to_ascii_lowercase()
}

/// Registered extension (without the dot) for a MIME type.
pub fn extension_for_mime(mime: &str) -> Option<&'static str> {
    let mime = essence(mime);
    if mime.is_empty() || mime == GENERIC {
        return None;
    }
    if let Some((_, ext)) = PREFERRED.iter().find(|(m, _)| *m == mime) {
        return Some(*ext);
    }
    mime_guess::get_mime_extensions_str(&mime).and_then(|exts| exts.first().copied())
}

/// MIME type registered for a file extension (leading dot optional).
pub fn mime_for_extension(ext: &str) -> Option<&'static str> {
    let ext = ext.trim_start_matches('.').to_ascii_lowercase();
    if ext.is_empty() {
        return None;
    }
    if let Some((mime, _)) = PREFERRED.iter().find(|(_, e)| *e == ext) {
        return Some(*mime);
    }
    mime_guess::from_ext(&ext).first_raw()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preferred_extension_wins() {
        assert_eq!(extension_for_mime("image/jpeg"), Some("jpg"));
        assert_eq!(extension_for_mime("image/png"), Some("png"));
        assert_eq!(extension_for_mime("application/pdf"), Some("pdf"));
    }

    #[test]
    fn parameters_and_case_are_ignored() {
        assert_eq!(extension_for_mime("Text/Plain; charset=UTF-8"), Some("txt"));
    }

    #[test]
    fn unknown_types_have_no_extension() {
        assert_eq!(extension_for_mime("application/octet-stream"), None);
        assert_eq!(extension_for_mime(""), None);
    }

    #[test]
    fn registry_covers_web_and_media_types() {
        assert_eq!(extension_for_mime("text/css"), Some("css"));
        assert_eq!(extension_for_mime("application/javascript"), Some("js"));
        assert_eq!(extension_for_mime("audio/aac"), Some("aac"));
        assert_eq!(extension_for_mime("audio/flac"), Some("flac"));
        assert_eq!(extension_for_mime("application/epub+zip"), Some("epub"));
        assert_eq!(extension_for_mime("application/xml"), Some("xml"));
        assert_eq!(extension_for_mime("video/x-matroska"), Some("mkv"));
    }

    #[test]
    fn types_missing_from_the_database_use_overrides() {
        assert_eq!(extension_for_mime("application/x-hwp"), Some("hwp"));
        assert_eq!(mime_for_extension("hwp"), Some("application/x-hwp"));
    }

    #[test]
    fn reverse_lookup() {
        assert_eq!(mime_for_extension("JPEG"), Some("image/jpeg"));
        assert_eq!(mime_for_extension(".pdf"), Some("application/pdf"));
        assert_eq!(mime_for_extension("css"), Some("text/css"));
        assert_eq!(mime_for_extension("nope"), None);
        assert_eq!(mime_for_extension(""), None);
    }
}
