// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! Asynchronous bridge between a hosted web app and the native shell.
//!
//! Three boundaries are reconciled here:
//!
//! - `<input type="file">` activations become a native picker launch whose
//!   result is delivered back to the page exactly once
//!   ([`file_chooser::FileSelectionCoordinator`]).
//! - Web-initiated downloads are turned into a finished
//!   [`DownloadDescriptor`](webshell_core::DownloadDescriptor) and handed to
//!   the platform download service ([`download::DownloadInterceptor`]).
//! - JSON messages posted by the page drive login state, bottom-bar layout
//!   and history clearing ([`handler::BridgeProtocolHandler`]).
//!
//! Platform services sit behind the traits in [`traits`]. Desktop and CI
//! builds get the headless implementation in [`stub`]; Android builds get
//! the JNI implementation in `android`.

pub mod download;
pub mod file_chooser;
pub mod filename;
pub mod handler;
pub mod layout;
pub mod login_state;
pub mod navigation;
pub mod protocol;
pub mod shell;
pub mod stub;
pub mod traits;
pub mod ui_queue;

#[cfg(target_os = "android")]
pub mod android;

pub use shell::WebShell;

/// Install the global `tracing` subscriber.
///
/// Honours `RUST_LOG`, defaulting to `info`. Calling it more than once is
/// harmless; later calls are ignored.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}
