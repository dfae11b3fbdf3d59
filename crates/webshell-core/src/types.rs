// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types shared between the bridge and the platform layers.

use serde::{Deserialize, Serialize};

/// Opaque locator of a user-selected resource (a `content://` URI on
/// Android, a path or `file://` URL elsewhere).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceLocator(pub String);

impl ResourceLocator {
    pub fn new(locator: impl Into<String>) -> Self {
        Self(locator.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ResourceLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Public storage directory a download lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageCategory {
    /// `image/*` content.
    Pictures,
    /// Everything else.
    Downloads,
}

impl StorageCategory {
    /// Route by MIME type: `image/` goes to pictures.
    pub fn for_mime(mime: &str) -> Self {
        if mime.starts_with("image/") {
            Self::Pictures
        } else {
            Self::Downloads
        }
    }

    /// Name of the matching `Environment.DIRECTORY_*` public directory.
    pub fn directory_name(self) -> &'static str {
        match self {
            Self::Pictures => "Pictures",
            Self::Downloads => "Download",
        }
    }
}

/// Everything the platform download service needs for one transfer.
///
/// Built only once every field is final, then handed off and forgotten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadDescriptor {
    pub source_url: String,
    /// Forwarded as the `User-Agent` request header.
    pub user_agent: String,
    /// Never empty. Also used as the notification title.
    pub filename: String,
    pub mime_type: String,
    /// Advisory; servers may send -1 or lie.
    pub content_length: i64,
    pub category: StorageCategory,
    pub description: String,
    pub notify_on_completion: bool,
    /// Make the file visible to the platform media catalog.
    pub media_scannable: bool,
}

/// Opaque id handed back by the platform download service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DownloadHandle(pub i64);

impl std::fmt::Display for DownloadHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
