// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for the services the bridge drives.
//
// Every platform (Android via JNI, the headless desktop stub, test fakes)
// provides one implementation of each service trait and bundles them into a
// `PlatformServices` value.

use std::sync::Arc;

use webshell_core::config::WebViewSettings;
use webshell_core::error::Result;
use webshell_core::{DownloadDescriptor, DownloadHandle, ResourceLocator};

/// One-shot callback delivering a file chooser outcome to the page.
///
/// `None` means "no selection" (cancelled or failed to launch); otherwise a
/// single-element list with the chosen resource.
pub type CompletionHandle = Box<dyn FnOnce(Option<Vec<ResourceLocator>>) + Send + 'static>;

/// Unit of work that must run on the UI thread.
pub type UiTask = Box<dyn FnOnce() + Send + 'static>;

/// What the native picker is asked to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerRequest {
    /// MIME filter passed to the picker.
    pub mime_filter: String,
    /// Only items that can be opened as a stream.
    pub openable_only: bool,
    pub allow_multiple: bool,
}

impl PickerRequest {
    /// Single item of any type; the only flow the shell supports.
    pub fn any_single() -> Self {
        Self {
            mime_filter: "*/*".into(),
            openable_only: true,
            allow_multiple: false,
        }
    }
}

/// Launch the native "pick content" UI.
pub trait FileChooser: Send + Sync {
    /// Show the picker. `Ok(())` means it is on screen; the outcome arrives
    /// later through `FileSelectionCoordinator::on_pick_result`.
    fn launch_picker(&self, request: &PickerRequest) -> Result<()>;
}

/// Hand transfers to the OS download manager.
pub trait DownloadService: Send + Sync {
    /// Queue a transfer. The handle is not tracked any further.
    fn enqueue(&self, descriptor: &DownloadDescriptor) -> Result<DownloadHandle>;
}

/// The embedded WebView: static configuration, page loads and back stack.
///
/// Mutating methods must be called on the UI thread.
pub trait WebViewHost: Send + Sync {
    /// Apply static settings and expose the bridge object under `channel`.
    fn apply_settings(&self, settings: &WebViewSettings, user_agent: &str, channel: &str) -> Result<()>;

    fn load_url(&self, url: &str) -> Result<()>;

    /// Drop the back-navigation stack.
    fn clear_history(&self) -> Result<()>;

    fn can_go_back(&self) -> Result<bool>;

    fn go_back(&self) -> Result<()>;

    fn current_url(&self) -> Result<Option<String>>;
}

/// Apply the logged-in / logged-out bottom bar. UI thread only; idempotent.
pub trait UiStateProjector: Send + Sync {
    fn apply_login_state(&self, logged_in: bool);
}

/// Marshal work onto the UI thread.
pub trait UiThread: Send + Sync {
    /// Schedule `task`; it may run after this call returns.
    fn run_on_ui_thread(&self, task: UiTask);
}

/// The platform collaborators consumed by `WebShell`.
///
/// UI-thread marshalling is not part of this set: the shell owns its
/// `UiQueue` and the host pumps it.
#[derive(Clone)]
pub struct PlatformServices {
    pub chooser: Arc<dyn FileChooser>,
    pub downloads: Arc<dyn DownloadService>,
    pub webview: Arc<dyn WebViewHost>,
    pub projector: Arc<dyn UiStateProjector>,
}
