// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Download filename derivation.
//
// Resolution order (first hit wins):
//   1. Content-Disposition `filename*=UTF-8''...`, then `filename=...`
//   2. platform-style guess from Content-Disposition, URL and MIME type
//   3. percent-decode (keep the raw value if that fails), then drop any
//      directory part
//   4. append the MIME type's registered extension if there is no dot

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use webshell_core::mime::{essence, extension_for_mime};

/// RFC 5987 extended form. Only the UTF-8 charset is understood.
static EXTENDED_FILENAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)filename\*\s*=\s*UTF-8''([^;]+)"#).expect("static regex")
});

/// Plain `filename=value` or `filename="value"`.
static PLAIN_FILENAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:^|[;\s])filename\s*=\s*"?([^";]+)"?"#).expect("static regex")
});

/// What the platform guesser accepts: an attachment with a filename.
static ATTACHMENT_FILENAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)attachment;\s*filename\s*=\s*("?)([^"]*)"?\s*$"#).expect("static regex")
});

/// Last-resort base name when neither the header nor the URL has one.
const FALLBACK_BASENAME: &str = "downloadfile";

/// Run the full resolution pipeline. The result is never empty and never
/// carries a directory part.
pub fn resolve_filename(content_disposition: Option<&str>, url: &str, mime_type: &str) -> String {
    let from_header = content_disposition
        .and_then(extract_header_filename)
        .and_then(|raw| last_segment(&decode_or_raw(raw)));

    let name = from_header.unwrap_or_else(|| {
        let guess = guess_file_name(url, content_disposition, mime_type);
        last_segment(&decode_or_raw(guess.clone())).unwrap_or(guess)
    });
    ensure_extension(name, mime_type)
}

/// Percent-decoded `raw`, or `raw` itself if decoding leaves nothing.
fn decode_or_raw(raw: String) -> String {
    let decoded = percent_decode(&raw);
    if decoded.trim().is_empty() { raw } else { decoded }
}

/// Pull a filename out of a Content-Disposition header.
///
/// The extended form is preferred over the plain one when both are present,
/// regardless of their order in the header. The value is returned still
/// percent-encoded.
pub fn extract_header_filename(header: &str) -> Option<String> {
    if let Some(caps) = EXTENDED_FILENAME.captures(header) {
        return Some(caps[1].trim().to_string());
    }
    PLAIN_FILENAME
        .captures(header)
        .map(|caps| caps[1].trim().to_string())
}

/// Guess a reasonable filename the way the platform download manager does.
pub fn guess_file_name(url: &str, content_disposition: Option<&str>, mime_type: &str) -> String {
    let from_header = content_disposition.and_then(|cd| {
        ATTACHMENT_FILENAME
            .captures(cd)
            .map(|caps| caps[2].to_string())
            .and_then(|name| last_segment(&name))
    });

    let base = from_header
        .or_else(|| filename_from_url(url))
        .unwrap_or_else(|| FALLBACK_BASENAME.to_string());

    if base.contains('.') {
        return base;
    }

    let mime = essence(mime_type);
    let ext = extension_for_mime(&mime).unwrap_or_else(|| {
        if mime == "text/html" {
            "html"
        } else if mime.starts_with("text/") {
            "txt"
        } else {
            "bin"
        }
    });
    format!("{base}.{ext}")
}

/// Form-style decoding: `+` is a space, `%XX` escapes are UTF-8.
///
/// Returns the input unchanged if the decoded bytes are not valid UTF-8.
pub fn percent_decode(value: &str) -> String {
    let spaced = value.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => value.to_string(),
    }
}

/// Append the registered extension for `mime_type` when `filename` has none.
pub fn ensure_extension(filename: String, mime_type: &str) -> String {
    if filename.contains('.') {
        return filename;
    }
    match extension_for_mime(mime_type) {
        Some(ext) => format!("{filename}.{ext}"),
        None => filename,
    }
}

/// Decoded final path segment of `url`, if it has a usable one.
fn filename_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let segment = parsed.path_segments()?.filter(|s| !s.is_empty()).last()?;
    let decoded = urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string());
    last_segment(&decoded)
}

/// Strip any directory part; reject names that are empty or a bare
/// relative reference afterwards.
fn last_segment(name: &str) -> Option<String> {
    let tail = name.rsplit(['/', '\\']).next().unwrap_or(name).trim();
    if tail.is_empty() || tail == "." || tail == ".." {
        None
    } else {
        Some(tail.to_string())
    }
}
