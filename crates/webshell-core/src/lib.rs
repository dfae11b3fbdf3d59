// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// WebView shell — core types, configuration and error definitions shared by
// the bridge and platform crates.

pub mod config;
pub mod error;
pub mod mime;
pub mod types;

pub use config::ShellConfig;
pub use error::ShellError;
pub use types::*;
