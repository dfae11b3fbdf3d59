// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Back-navigation guard.

use std::sync::Arc;

use tracing::{debug, warn};

use webshell_core::error::Result;

use crate::traits::WebViewHost;

/// Refuses to step back while an authentication page is showing.
pub struct NavigationGate {
    webview: Arc<dyn WebViewHost>,
    login_guard: String,
}

impl NavigationGate {
    pub fn new(webview: Arc<dyn WebViewHost>, login_guard: impl Into<String>) -> Self {
        Self {
            webview,
            login_guard: login_guard.into(),
        }
    }

    /// Step back once if there is history and the current URL is not a
    /// login page. Returns whether a step was taken. UI thread only.
    pub fn go_back_if_possible(&self) -> bool {
        match self.try_go_back() {
            Ok(stepped) => stepped,
            Err(e) => {
                warn!(error = %e, "back navigation failed");
                false
            }
        }
    }

    fn try_go_back(&self) -> Result<bool> {
        if !self.webview.can_go_back()? {
            return Ok(false);
        }
        if let Some(url) = self.webview.current_url()? {
            if url.contains(&self.login_guard) {
                debug!(%url, "back navigation blocked on login page");
                return Ok(false);
            }
        }
        self.webview.go_back()?;
        Ok(true)
    }
}
