// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge protocol handler: the native end of the page's message channel.
//
// May be called from the JS bridge thread. The login flag is the only state
// it touches directly; projector and WebView work goes through `UiThread`.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::login_state::LoginState;
use crate::protocol::{BridgeMessage, route_is_logged_in};
use crate::traits::{UiStateProjector, UiThread, WebViewHost};

pub struct BridgeProtocolHandler {
    login: LoginState,
    login_path: String,
    projector: Arc<dyn UiStateProjector>,
    webview: Arc<dyn WebViewHost>,
    ui: Arc<dyn UiThread>,
}

impl BridgeProtocolHandler {
    pub fn new(
        login: LoginState,
        login_path: impl Into<String>,
        projector: Arc<dyn UiStateProjector>,
        webview: Arc<dyn WebViewHost>,
        ui: Arc<dyn UiThread>,
    ) -> Self {
        Self {
            login,
            login_path: login_path.into(),
            projector,
            webview,
            ui,
        }
    }

    /// Entry point for raw payloads from the page. Never fails.
    #[instrument(skip_all, fields(len = raw.len()))]
    pub fn on_message(&self, raw: &str) {
        match BridgeMessage::parse(raw) {
            Ok(message) => self.dispatch(message),
            Err(e) => warn!(error = %e, "bridge message dropped"),
        }
    }

    /// Apply the side effects of one decoded message.
    pub fn dispatch(&self, message: BridgeMessage) {
        debug!(message_type = message.kind(), "bridge message received");
        match message {
            BridgeMessage::RouteChange { path, user_id } => {
                let logged_in = route_is_logged_in(&path, &user_id, &self.login_path);
                info!(%path, user_id = %user_id, logged_in, "route change");

                self.login.set(logged_in);
                let projector = self.projector.clone();
                self.ui
                    .run_on_ui_thread(Box::new(move || projector.apply_login_state(logged_in)));
            }
            BridgeMessage::Login => {
                info!("login completed, clearing back stack");
                let webview = self.webview.clone();
                self.ui.run_on_ui_thread(Box::new(move || {
                    if let Err(e) = webview.clear_history() {
                        warn!(error = %e, "clearing WebView history failed");
                    }
                }));
            }
            BridgeMessage::Ignored { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stub::HeadlessWebView;
    use crate::ui_queue::UiQueue;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingProjector {
        applied: Mutex<Vec<bool>>,
    }

    impl UiStateProjector for RecordingProjector {
        fn apply_login_state(&self, logged_in: bool) {
            self.applied.lock().unwrap().push(logged_in);
        }
    }

    struct Fixture {
        login: LoginState,
        projector: Arc<RecordingProjector>,
        webview: Arc<HeadlessWebView>,
        ui: Arc<UiQueue>,
        handler: BridgeProtocolHandler,
    }

    fn fixture() -> Fixture {
        let login = LoginState::new();
        let projector = Arc::new(RecordingProjector::default());
        let webview = Arc::new(HeadlessWebView::new());
        let ui = Arc::new(UiQueue::new());
        let handler = BridgeProtocolHandler::new(
            login.clone(),
            "/user/login.do",
            projector.clone(),
            webview.clone(),
            ui.clone(),
        );
        Fixture { login, projector, webview, ui, handler }
    }

    #[test]
    fn login_page_route_logs_out() {
        let f = fixture();
        f.handler.on_message(r#"{"type":"ROUTE_CHANGE","path":"/user/login.do","userId":"u1"}"#);
        assert!(!f.login.is_logged_in());
        f.ui.pump();
        assert_eq!(*f.projector.applied.lock().unwrap(), vec![false]);
    }

    #[test]
    fn regular_route_with_user_logs_in() {
        let f = fixture();
        f.login.set(false);
        f.handler.on_message(r#"{"type":"ROUTE_CHANGE","path":"/home","userId":"u1"}"#);
        assert!(f.login.is_logged_in());
        f.ui.pump();
        assert_eq!(*f.projector.applied.lock().unwrap(), vec![true]);
    }

    #[test]
    fn missing_or_empty_user_logs_out() {
        let f = fixture();
        f.handler.on_message(r#"{"type":"ROUTE_CHANGE","path":"/home"}"#);
        assert!(!f.login.is_logged_in());
        f.login.set(true);
        f.handler.on_message(r#"{"type":"ROUTE_CHANGE","path":"/home","userId":""}"#);
        assert!(!f.login.is_logged_in());
    }

    #[test]
    fn login_state_updates_before_projection_runs() {
        let f = fixture();
        f.handler.on_message(r#"{"type":"ROUTE_CHANGE","path":"/user/login.do","userId":"u1"}"#);
        // Flag already flipped, projection still queued.
        assert!(!f.login.is_logged_in());
        assert!(f.projector.applied.lock().unwrap().is_empty());
        assert_eq!(f.ui.pump(), 1);
    }

    #[test]
    fn projections_follow_delivery_order() {
        let f = fixture();
        f.handler.on_message(r#"{"type":"ROUTE_CHANGE","path":"/user/login.do","userId":""}"#);
        f.handler.on_message(r#"{"type":"ROUTE_CHANGE","path":"/home","userId":"u1"}"#);
        f.handler.on_message(r#"{"type":"ROUTE_CHANGE","path":"/user/login.do","userId":"u1"}"#);
        f.ui.pump();
        assert_eq!(*f.projector.applied.lock().unwrap(), vec![false, true, false]);
        assert!(!f.login.is_logged_in());
    }

    #[test]
    fn message_from_bridge_thread_is_projected_on_pump() {
        let f = fixture();
        let handler = Arc::new(f.handler);

        let worker = {
            let handler = handler.clone();
            std::thread::spawn(move || {
                handler.on_message(r#"{"type":"ROUTE_CHANGE","path":"/user/login.do","userId":"u1"}"#);
            })
        };
        worker.join().unwrap();

        // Flag written on the bridge thread, visible here.
        assert!(!f.login.is_logged_in());
        assert!(f.projector.applied.lock().unwrap().is_empty());

        assert_eq!(f.ui.pump(), 1);
        assert_eq!(*f.projector.applied.lock().unwrap(), vec![false]);
    }

    #[test]
    fn login_message_clears_history_on_ui_thread() {
        let f = fixture();
        f.webview.load_url("https://app.test/user/login.do").unwrap();
        f.webview.load_url("https://app.test/home").unwrap();
        assert!(f.webview.can_go_back().unwrap());

        f.handler.on_message(r#"{"type":"LOGIN"}"#);
        assert!(f.webview.can_go_back().unwrap(), "cleared before UI pump");
        f.ui.pump();
        assert!(!f.webview.can_go_back().unwrap());
        // No login state change.
        assert!(f.login.is_logged_in());
        assert!(f.projector.applied.lock().unwrap().is_empty());
    }

    #[test]
    fn malformed_json_has_no_effect() {
        let f = fixture();
        f.handler.on_message("not json");
        f.handler.on_message(r#"["ROUTE_CHANGE"]"#);
        assert!(f.login.is_logged_in());
        assert_eq!(f.ui.pump(), 0);
        assert!(f.projector.applied.lock().unwrap().is_empty());
    }

    #[test]
    fn unknown_type_has_no_effect() {
        let f = fixture();
        f.handler.on_message(r#"{"type":"LOGOUT","userId":""}"#);
        f.handler.on_message(r#"{"userId":""}"#);
        assert!(f.login.is_logged_in());
        assert_eq!(f.ui.pump(), 0);
    }
}
