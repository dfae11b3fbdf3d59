// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// WebShell — one WebView plus its file chooser, downloads, message bridge
// and bottom bar, wired to a set of platform services.
//
// The host forwards its platform callbacks to the `on_*` methods and calls
// `pump_ui()` from its UI loop. Button handlers (`go_back_if_possible`,
// `select_menu_entry`, `load_my_page`) are called on the UI thread.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use webshell_core::config::{MenuEntry, ShellConfig};
use webshell_core::error::Result;
use webshell_core::{DownloadHandle, ResourceLocator};

use crate::download::{DownloadEvent, DownloadInterceptor};
use crate::file_chooser::FileSelectionCoordinator;
use crate::handler::BridgeProtocolHandler;
use crate::login_state::LoginState;
use crate::navigation::NavigationGate;
use crate::traits::{CompletionHandle, PlatformServices, WebViewHost};
use crate::ui_queue::UiQueue;

pub struct WebShell {
    config: ShellConfig,
    login: LoginState,
    webview: Arc<dyn WebViewHost>,
    ui: Arc<UiQueue>,
    files: FileSelectionCoordinator,
    downloads: DownloadInterceptor,
    bridge: BridgeProtocolHandler,
    gate: NavigationGate,
}

impl WebShell {
    /// Shell with a plain UI queue; the host must poll `pump_ui()`.
    pub fn new(config: ShellConfig, services: PlatformServices) -> Self {
        Self::with_ui_queue(config, services, UiQueue::new())
    }

    /// Shell with a caller-supplied queue, typically one with a waker.
    pub fn with_ui_queue(config: ShellConfig, services: PlatformServices, ui: UiQueue) -> Self {
        let login = LoginState::new();
        let ui = Arc::new(ui);

        let files = FileSelectionCoordinator::new(services.chooser);
        let downloads = DownloadInterceptor::new(services.downloads, config.download_description.clone());
        let bridge = BridgeProtocolHandler::new(
            login.clone(),
            config.login_path.clone(),
            services.projector,
            services.webview.clone(),
            ui.clone(),
        );
        let gate = NavigationGate::new(services.webview.clone(), config.login_guard.clone());

        Self {
            config,
            login,
            webview: services.webview,
            ui,
            files,
            downloads,
            bridge,
            gate,
        }
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// Apply WebView settings and load the start page. UI thread only.
    #[instrument(skip_all, fields(base_url = %self.config.base_url))]
    pub fn start(&self) -> Result<()> {
        self.webview.apply_settings(
            &self.config.settings,
            &self.config.user_agent,
            &self.config.bridge_channel,
        )?;
        self.webview.load_url(&self.config.base_url)?;
        info!("web shell started");
        Ok(())
    }

    // -- Platform callbacks ------------------------------------------------

    /// `<input type="file">` was activated. See
    /// [`FileSelectionCoordinator::on_file_input_activated`].
    pub fn on_file_input_activated(&self, handle: CompletionHandle) -> bool {
        self.files.on_file_input_activated(handle)
    }

    /// The native picker returned.
    pub fn on_pick_result(&self, selected: Option<ResourceLocator>) {
        self.files.on_pick_result(selected)
    }

    pub fn is_awaiting_file(&self) -> bool {
        self.files.is_awaiting_result()
    }

    /// The WebView wants to download something.
    pub fn on_download_event(&self, event: &DownloadEvent) -> Option<DownloadHandle> {
        self.downloads.on_download_event(event)
    }

    /// A message arrived on the bridge channel. Any thread.
    pub fn on_message(&self, raw: &str) {
        self.bridge.on_message(raw)
    }

    /// Run UI work queued by bridge callbacks. UI thread only.
    pub fn pump_ui(&self) -> usize {
        self.ui.pump()
    }

    // -- Bottom bar --------------------------------------------------------

    pub fn is_logged_in(&self) -> bool {
        self.login.is_logged_in()
    }

    pub fn go_back_if_possible(&self) -> bool {
        self.gate.go_back_if_possible()
    }

    /// Menu entries to show; empty while logged out.
    pub fn menu_entries(&self) -> &[MenuEntry] {
        if self.login.is_logged_in() {
            &self.config.menu
        } else {
            &[]
        }
    }

    /// Load the page behind menu entry `id`. Returns `false` if the menu is
    /// hidden, the id is unknown, or the load failed.
    pub fn select_menu_entry(&self, id: &str) -> bool {
        if !self.login.is_logged_in() {
            return false;
        }
        let Some(entry) = self.config.menu_entry(id) else {
            warn!(%id, "unknown menu entry");
            return false;
        };
        self.load_path(&entry.path)
    }

    pub fn load_my_page(&self) -> bool {
        self.load_path(&self.config.my_page_path)
    }

    fn load_path(&self, path: &str) -> bool {
        let url = self.config.resolve(path);
        match self.webview.load_url(&url) {
            Ok(()) => true,
            Err(e) => {
                warn!(%url, error = %e, "page load failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stub::{HeadlessWebView, StubBridge};
    use crate::traits::{DownloadService, UiStateProjector};
    use std::sync::Mutex;
    use webshell_core::DownloadDescriptor;

    #[derive(Default)]
    struct RecordingProjector {
        applied: Mutex<Vec<bool>>,
    }

    impl UiStateProjector for RecordingProjector {
        fn apply_login_state(&self, logged_in: bool) {
            self.applied.lock().unwrap().push(logged_in);
        }
    }

    #[derive(Default)]
    struct RecordingDownloads {
        enqueued: Mutex<Vec<DownloadDescriptor>>,
    }

    impl DownloadService for RecordingDownloads {
        fn enqueue(&self, descriptor: &DownloadDescriptor) -> Result<DownloadHandle> {
            self.enqueued.lock().unwrap().push(descriptor.clone());
            Ok(DownloadHandle(7))
        }
    }

    struct Harness {
        shell: WebShell,
        webview: Arc<HeadlessWebView>,
        projector: Arc<RecordingProjector>,
        downloads: Arc<RecordingDownloads>,
    }

    fn harness() -> Harness {
        let webview = Arc::new(HeadlessWebView::new());
        let projector = Arc::new(RecordingProjector::default());
        let downloads = Arc::new(RecordingDownloads::default());
        let services = PlatformServices {
            chooser: Arc::new(StubBridge),
            downloads: downloads.clone(),
            webview: webview.clone(),
            projector: projector.clone(),
        };
        let mut config = ShellConfig::default();
        config.base_url = "https://app.test".into();
        let shell = WebShell::new(config, services);
        Harness { shell, webview, projector, downloads }
    }

    #[test]
    fn start_applies_settings_and_loads_base_url() {
        let h = harness();
        h.shell.start().unwrap();

        let (settings, ua, channel) = h.webview.applied_settings().expect("settings applied");
        assert!(settings.javascript_enabled);
        assert_eq!(ua, h.shell.config().user_agent);
        assert_eq!(channel, "Android");
        assert_eq!(h.webview.current_url().unwrap().as_deref(), Some("https://app.test"));
    }

    #[test]
    fn starts_optimistically_logged_in() {
        let h = harness();
        assert!(h.shell.is_logged_in());
        assert_eq!(h.shell.menu_entries().len(), 2);
    }

    #[test]
    fn menu_hidden_after_logout_route() {
        let h = harness();
        h.shell.start().unwrap();
        h.shell
            .on_message(r#"{"type":"ROUTE_CHANGE","path":"/user/login.do","userId":""}"#);

        assert!(!h.shell.is_logged_in());
        assert!(h.shell.menu_entries().is_empty());
        assert!(!h.shell.select_menu_entry("home"));
        assert_eq!(h.shell.pump_ui(), 1);
        assert_eq!(*h.projector.applied.lock().unwrap(), vec![false]);
    }

    #[test]
    fn menu_entry_loads_resolved_url() {
        let h = harness();
        h.shell.start().unwrap();
        assert!(h.shell.select_menu_entry("notice"));
        assert_eq!(
            h.webview.current_url().unwrap().as_deref(),
            Some("https://app.test/board/list.do")
        );
        assert!(!h.shell.select_menu_entry("does-not-exist"));
    }

    #[test]
    fn my_page_loads_regardless_of_login() {
        let h = harness();
        h.shell.on_message(r#"{"type":"ROUTE_CHANGE","path":"/","userId":""}"#);
        assert!(h.shell.load_my_page());
        assert_eq!(
            h.webview.current_url().unwrap().as_deref(),
            Some("https://app.test/user/view.do")
        );
    }

    #[test]
    fn login_flow_clears_history_and_blocks_back_on_login_page() {
        let h = harness();
        h.shell.start().unwrap();
        h.webview.load_url("https://app.test/user/login.do").unwrap();
        // Back is refused on the login page.
        assert!(!h.shell.go_back_if_possible());

        h.webview.load_url("https://app.test/home").unwrap();
        h.shell.on_message(r#"{"type":"LOGIN"}"#);
        h.shell
            .on_message(r#"{"type":"ROUTE_CHANGE","path":"/home","userId":"u1"}"#);
        h.shell.pump_ui();

        assert!(!h.shell.go_back_if_possible());
        assert_eq!(h.webview.current_url().unwrap().as_deref(), Some("https://app.test/home"));
        assert!(h.shell.is_logged_in());
    }

    #[test]
    fn stub_chooser_failure_resolves_no_selection() {
        let h = harness();
        let result = Arc::new(Mutex::new(None));
        let r = result.clone();

        let launched = h.shell.on_file_input_activated(Box::new(move |selection| {
            *r.lock().unwrap() = Some(selection);
        }));

        assert!(!launched);
        assert_eq!(*result.lock().unwrap(), Some(None));
        assert!(!h.shell.is_awaiting_file());
    }

    #[test]
    fn download_event_reaches_service() {
        let h = harness();
        let handle = h.shell.on_download_event(&DownloadEvent {
            url: "https://app.test/board/download.do?fileNo=3".into(),
            user_agent: h.shell.config().user_agent.clone(),
            content_disposition: Some("attachment; filename=\"notice.hwp\"".into()),
            mime_type: "application/x-hwp".into(),
            content_length: 51_200,
        });

        assert_eq!(handle, Some(DownloadHandle(7)));
        let enqueued = h.downloads.enqueued.lock().unwrap();
        assert_eq!(enqueued[0].filename, "notice.hwp");
        assert_eq!(enqueued[0].description, "Downloading file");
    }
}
