// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for the WebView shell.

use thiserror::Error;

/// Top-level error type for all shell operations.
///
/// None of these ever reach the hosted web app: the bridge entry points log
/// them and carry on.
#[derive(Debug, Error)]
pub enum ShellError {
    // -- Bridge protocol --
    #[error("malformed bridge message: {0}")]
    MalformedMessage(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- File chooser --
    #[error("file chooser could not be launched: {0}")]
    ChooserLaunch(String),

    // -- Downloads --
    #[error("download could not be enqueued: {0}")]
    Download(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    // -- Configuration / persistence --
    #[error("configuration error: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ShellError>;
