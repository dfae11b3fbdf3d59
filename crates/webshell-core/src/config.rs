// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shell configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use url::Url;

use crate::error::{Result, ShellError};

/// User-Agent presented to origin servers. Some of them refuse downloads
/// from anything that does not look like mobile Chrome.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 12; Mobile) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/119.0.6045.199 Mobile Safari/537.36";

/// How the WebView treats HTTP sub-resources on HTTPS pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MixedContentMode {
    AlwaysAllow,
    CompatibilityMode,
    NeverAllow,
}

impl MixedContentMode {
    /// Value of the matching `WebSettings.MIXED_CONTENT_*` constant.
    pub fn platform_value(self) -> i32 {
        match self {
            Self::AlwaysAllow => 0,
            Self::NeverAllow => 1,
            Self::CompatibilityMode => 2,
        }
    }
}

/// Static WebView flags applied once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebViewSettings {
    pub javascript_enabled: bool,
    pub dom_storage_enabled: bool,
    /// Needed for `<input type="file">` to hand back local files.
    pub allow_file_access: bool,
    pub allow_content_access: bool,
    pub mixed_content: MixedContentMode,
}

impl Default for WebViewSettings {
    fn default() -> Self {
        Self {
            javascript_enabled: true,
            dom_storage_enabled: true,
            allow_file_access: true,
            allow_content_access: true,
            mixed_content: MixedContentMode::AlwaysAllow,
        }
    }
}

/// One entry of the bottom-bar popup menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub id: String,
    pub label: String,
    /// Path relative to [`ShellConfig::base_url`].
    pub path: String,
}

impl MenuEntry {
    pub fn new(id: &str, label: &str, path: &str) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            path: path.into(),
        }
    }
}

/// Persistent shell settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Web app loaded at startup; every menu path is resolved against it.
    pub base_url: String,
    /// User-Agent for the WebView and for download requests.
    pub user_agent: String,
    /// Name under which the bridge object is exposed to page scripts.
    pub bridge_channel: String,
    /// A `ROUTE_CHANGE` to exactly this path always means "logged out".
    pub login_path: String,
    /// Back-navigation is refused while the current URL contains this.
    pub login_guard: String,
    /// Path of the "my page" button.
    pub my_page_path: String,
    /// Popup menu entries, in display order.
    pub menu: Vec<MenuEntry>,
    /// Description shown in the download notification.
    pub download_description: String,
    pub settings: WebViewSettings,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            base_url: "http://192.168.0.23:3000".into(),
            user_agent: DEFAULT_USER_AGENT.into(),
            bridge_channel: "Android".into(),
            login_path: "/user/login.do".into(),
            login_guard: "/login".into(),
            my_page_path: "/user/view.do".into(),
            menu: vec![
                MenuEntry::new("home", "Home", "/"),
                MenuEntry::new("notice", "Notice", "/board/list.do"),
            ],
            download_description: "Downloading file".into(),
            settings: WebViewSettings::default(),
        }
    }
}

impl ShellConfig {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`load`](Self::load), but any failure yields the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => {
                info!(path = %path.display(), "shell config loaded");
                config
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "using default shell config");
                Self::default()
            }
        }
    }

    /// Write the config as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }

    /// Reject configs the shell cannot run with.
    pub fn validate(&self) -> Result<()> {
        let base = Url::parse(&self.base_url)
            .map_err(|e| ShellError::Config(format!("base_url {:?}: {e}", self.base_url)))?;
        if base.cannot_be_a_base() {
            return Err(ShellError::Config(format!(
                "base_url {:?} cannot carry paths",
                self.base_url
            )));
        }
        if self.bridge_channel.is_empty() {
            return Err(ShellError::Config("bridge_channel is empty".into()));
        }
        Ok(())
    }

    /// Append `path` to the base URL.
    ///
    /// Plain concatenation, so a base URL with its own path prefix keeps it.
    pub fn resolve(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Look up a menu entry by id.
    pub fn menu_entry(&self, id: &str) -> Option<&MenuEntry> {
        self.menu.iter().find(|entry| entry.id == id)
    }
}
