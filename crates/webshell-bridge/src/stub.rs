// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub platform for desktop/CI builds where no native WebView exists.
//
// The picker and the download manager return `PlatformUnavailable`, which
// the bridge turns into "no selection" and "download abandoned". The WebView
// is headless: it keeps an in-memory back stack so navigation logic can run
// end to end.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, warn};

use webshell_core::config::WebViewSettings;
use webshell_core::error::{Result, ShellError};
use webshell_core::{DownloadDescriptor, DownloadHandle};

use crate::layout::BottomBarLayout;
use crate::traits::*;

/// No-op bridge for the services that need a real device.
pub struct StubBridge;

impl StubBridge {
    /// Stub services around a fresh headless WebView.
    pub fn services() -> PlatformServices {
        let bridge = Arc::new(StubBridge);
        PlatformServices {
            chooser: bridge.clone(),
            downloads: bridge.clone(),
            webview: Arc::new(HeadlessWebView::new()),
            projector: bridge,
        }
    }
}

impl FileChooser for StubBridge {
    fn launch_picker(&self, _request: &PickerRequest) -> Result<()> {
        warn!("FileChooser::launch_picker called on stub bridge");
        Err(ShellError::PlatformUnavailable)
    }
}

impl DownloadService for StubBridge {
    fn enqueue(&self, descriptor: &DownloadDescriptor) -> Result<DownloadHandle> {
        warn!(filename = %descriptor.filename, "DownloadService::enqueue called on stub bridge");
        Err(ShellError::PlatformUnavailable)
    }
}

impl UiStateProjector for StubBridge {
    fn apply_login_state(&self, logged_in: bool) {
        let layout = BottomBarLayout::for_login_state(logged_in);
        debug!(
            logged_in,
            menu = layout.menu.visible,
            my_page = layout.my_page.visible,
            "bottom bar projected (stub)"
        );
    }
}

#[derive(Debug, Default)]
struct History {
    entries: Vec<String>,
    /// Index of the current entry; meaningless while `entries` is empty.
    index: usize,
    settings: Option<WebViewSettings>,
    user_agent: Option<String>,
    channel: Option<String>,
}

/// WebView without a renderer: records loads and walks a back stack.
#[derive(Debug, Default)]
pub struct HeadlessWebView {
    state: Mutex<History>,
}

impl HeadlessWebView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings from the last `apply_settings` call.
    pub fn applied_settings(&self) -> Option<(WebViewSettings, String, String)> {
        let state = self.state();
        Some((
            state.settings.clone()?,
            state.user_agent.clone()?,
            state.channel.clone()?,
        ))
    }

    /// Number of entries in the back/forward list.
    pub fn history_len(&self) -> usize {
        self.state().entries.len()
    }

    fn state(&self) -> MutexGuard<'_, History> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl WebViewHost for HeadlessWebView {
    fn apply_settings(&self, settings: &WebViewSettings, user_agent: &str, channel: &str) -> Result<()> {
        let mut state = self.state();
        state.settings = Some(settings.clone());
        state.user_agent = Some(user_agent.to_string());
        state.channel = Some(channel.to_string());
        Ok(())
    }

    fn load_url(&self, url: &str) -> Result<()> {
        let mut state = self.state();
        // Loading drops any forward entries.
        if !state.entries.is_empty() {
            let keep = state.index + 1;
            state.entries.truncate(keep);
        }
        state.entries.push(url.to_string());
        state.index = state.entries.len() - 1;
        debug!(%url, "headless load");
        Ok(())
    }

    fn clear_history(&self) -> Result<()> {
        let mut state = self.state();
        if let Some(current) = state.entries.get(state.index).cloned() {
            state.entries = vec![current];
        }
        state.index = 0;
        Ok(())
    }

    fn can_go_back(&self) -> Result<bool> {
        Ok(self.state().index > 0)
    }

    fn go_back(&self) -> Result<()> {
        let mut state = self.state();
        if state.index > 0 {
            state.index -= 1;
        }
        Ok(())
    }

    fn current_url(&self) -> Result<Option<String>> {
        let state = self.state();
        Ok(state.entries.get(state.index).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_services_are_unavailable() {
        let services = StubBridge::services();
        assert!(matches!(
            services.chooser.launch_picker(&PickerRequest::any_single()),
            Err(ShellError::PlatformUnavailable)
        ));
    }

    #[test]
    fn headless_history_walks_back() {
        let webview = HeadlessWebView::new();
        assert_eq!(webview.current_url().unwrap(), None);
        assert!(!webview.can_go_back().unwrap());

        webview.load_url("https://a.test/").unwrap();
        webview.load_url("https://a.test/one").unwrap();
        webview.load_url("https://a.test/two").unwrap();
        assert!(webview.can_go_back().unwrap());

        webview.go_back().unwrap();
        assert_eq!(webview.current_url().unwrap().as_deref(), Some("https://a.test/one"));

        // New load from the middle drops the forward entry.
        webview.load_url("https://a.test/three").unwrap();
        assert_eq!(webview.history_len(), 3);
    }

    #[test]
    fn clear_history_keeps_current_page() {
        let webview = HeadlessWebView::new();
        webview.load_url("https://a.test/login").unwrap();
        webview.load_url("https://a.test/home").unwrap();
        webview.clear_history().unwrap();

        assert!(!webview.can_go_back().unwrap());
        assert_eq!(webview.current_url().unwrap().as_deref(), Some("https://a.test/home"));
        assert_eq!(webview.history_len(), 1);
    }
}
