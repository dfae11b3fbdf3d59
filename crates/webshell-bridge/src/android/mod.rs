// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android platform bridge via JNI.
//
// ## Architecture notes
//
// The Java side is a thin host: the Activity owns the layout and the
// WebView, and forwards every platform callback to the `NativeBridge`
// exports at the bottom of this file. Everything else (picker intents,
// DownloadManager requests, WebView settings, history) is driven from here
// through JNI.
//
// The host Activity must provide:
//
//   void applyBottomBar(boolean menuVisible, boolean myPageVisible,
//                       boolean backFullWidth, int heightPx)
//   void requestUiPump()   // post NativeBridge.nativePumpUi() to the main looper
//
// and route `onActivityResult(REQUEST_PICK_FILE, ...)` to
// `NativeBridge.nativeFileChooserResult(uri)`.

#![cfg(target_os = "android")]

use std::sync::{Arc, RwLock};

use jni::objects::{GlobalRef, JClass, JObject, JString, JValue};
use jni::sys::{JNI_FALSE, JNI_TRUE, jboolean, jint, jlong, jsize};
use jni::{JNIEnv, JavaVM};
use tracing::{error, info, warn};

use webshell_core::config::{ShellConfig, WebViewSettings};
use webshell_core::error::{Result, ShellError};
use webshell_core::{DownloadDescriptor, DownloadHandle, ResourceLocator};

use crate::download::DownloadEvent;
use crate::layout::{BUTTON_HEIGHT_DP, BottomBarLayout, ButtonWidth, dp_to_px};
use crate::shell::WebShell;
use crate::traits::*;
use crate::ui_queue::UiQueue;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Request code for the file picker. The host Activity must recognise it in
/// `onActivityResult`. FragmentActivity only accepts the lower 16 bits.
pub const REQUEST_PICK_FILE: i32 = 0x5753; // "WS"

const _: () = assert!(REQUEST_PICK_FILE & !0xFFFF == 0, "request code must fit in 16 bits");

/// Java class exposed to page scripts through `addJavascriptInterface`.
const CHANNEL_CLASS: &str = "com/mya/shell/BridgeChannel";

/// `DownloadManager.Request.VISIBILITY_VISIBLE_NOTIFY_COMPLETED`.
const VISIBILITY_VISIBLE_NOTIFY_COMPLETED: i32 = 1;

const REQUEST_RET: &str = "Landroid/app/DownloadManager$Request;";

// ---------------------------------------------------------------------------
// JNI helpers
// ---------------------------------------------------------------------------

/// Convenience: map any `jni::errors::Error` into `ShellError::Bridge`.
fn jni_err(context: &str, e: jni::errors::Error) -> ShellError {
    ShellError::Bridge(format!("{context}: {e}"))
}

/// Read a possibly-null Java string.
fn opt_string(env: &mut JNIEnv<'_>, value: &JString<'_>) -> Option<String> {
    if value.is_null() {
        return None;
    }
    env.get_string(value).ok().map(Into::into)
}

fn set_bool(env: &mut JNIEnv<'_>, target: &JObject<'_>, method: &str, value: bool) -> Result<()> {
    env.call_method(target, method, "(Z)V", &[JValue::Bool(value as jboolean)])
        .map_err(|e| jni_err(method, e))?;
    Ok(())
}

/// `request.<method>(a, b)` on a `DownloadManager.Request`.
fn request_call2(env: &mut JNIEnv<'_>, request: &JObject<'_>, method: &str, a: &str, b: &str) -> Result<()> {
    let j_a = env.new_string(a).map_err(|e| jni_err("new_string", e))?;
    let j_b = env.new_string(b).map_err(|e| jni_err("new_string", e))?;
    env.call_method(
        request,
        method,
        &format!("(Ljava/lang/String;Ljava/lang/String;){REQUEST_RET}"),
        &[JValue::Object(&j_a), JValue::Object(&j_b)],
    )
    .map_err(|e| jni_err(method, e))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Bridge struct
// ---------------------------------------------------------------------------

/// Android implementation of the platform services.
///
/// Holds global references to the host Activity and its WebView; all other
/// state lives on the Java side.
pub struct AndroidBridge {
    vm: JavaVM,
    activity: GlobalRef,
    webview: GlobalRef,
    /// Display density, read once at construction.
    density: f32,
}

impl AndroidBridge {
    pub fn new(env: &mut JNIEnv<'_>, activity: &JObject<'_>, webview: &JObject<'_>) -> Result<Self> {
        let vm = env.get_java_vm().map_err(|e| jni_err("get_java_vm", e))?;
        let activity_ref = env.new_global_ref(activity).map_err(|e| jni_err("new_global_ref(activity)", e))?;
        let webview_ref = env.new_global_ref(webview).map_err(|e| jni_err("new_global_ref(webview)", e))?;
        let density = read_density(env, activity)?;

        Ok(Self {
            vm,
            activity: activity_ref,
            webview: webview_ref,
            density,
        })
    }

    /// Bundle this bridge as the full set of platform services.
    pub fn services(self: &Arc<Self>) -> PlatformServices {
        PlatformServices {
            chooser: self.clone(),
            downloads: self.clone(),
            webview: self.clone(),
            projector: self.clone(),
        }
    }

    /// Run `f` with a JNI env for the current thread. A pending Java
    /// exception is logged and cleared before the error is returned.
    fn with_env<T>(&self, f: impl FnOnce(&mut JNIEnv<'_>) -> Result<T>) -> Result<T> {
        let mut env = self
            .vm
            .attach_current_thread()
            .map_err(|e| jni_err("attach_current_thread", e))?;
        let result = f(&mut env);
        if result.is_err() && env.exception_check().unwrap_or(false) {
            let _ = env.exception_describe();
            let _ = env.exception_clear();
        }
        result
    }

    /// Ask the host to schedule `nativePumpUi()` on the main looper.
    fn request_ui_pump(&self) {
        let result = self.with_env(|env| {
            env.call_method(self.activity.as_obj(), "requestUiPump", "()V", &[])
                .map_err(|e| jni_err("requestUiPump", e))?;
            Ok(())
        });
        if let Err(e) = result {
            error!(error = %e, "could not schedule UI pump");
        }
    }

    /// Deliver a picker outcome to a `ValueCallback<Uri[]>`.
    fn resolve_callback(&self, callback: &GlobalRef, selection: Option<Vec<ResourceLocator>>) -> Result<()> {
        self.with_env(|env| {
            let uris = match selection {
                None => JObject::null(),
                Some(locators) => {
                    let uri_class = env.find_class("android/net/Uri").map_err(|e| jni_err("find_class(Uri)", e))?;
                    let array = env
                        .new_object_array(locators.len() as jsize, &uri_class, JObject::null())
                        .map_err(|e| jni_err("new_object_array(Uri)", e))?;
                    for (i, locator) in locators.iter().enumerate() {
                        let uri = parse_uri(env, locator.as_str())?;
                        env.set_object_array_element(&array, i as jsize, uri)
                            .map_err(|e| jni_err("set_object_array_element", e))?;
                    }
                    JObject::from(array)
                }
            };
            env.call_method(
                callback.as_obj(),
                "onReceiveValue",
                "(Ljava/lang/Object;)V",
                &[JValue::Object(&uris)],
            )
            .map_err(|e| jni_err("ValueCallback.onReceiveValue", e))?;
            Ok(())
        })
    }
}

fn read_density(env: &mut JNIEnv<'_>, activity: &JObject<'_>) -> Result<f32> {
    let resources = env
        .call_method(activity, "getResources", "()Landroid/content/res/Resources;", &[])
        .and_then(|v| v.l())
        .map_err(|e| jni_err("getResources", e))?;
    let metrics = env
        .call_method(&resources, "getDisplayMetrics", "()Landroid/util/DisplayMetrics;", &[])
        .and_then(|v| v.l())
        .map_err(|e| jni_err("getDisplayMetrics", e))?;
    env.get_field(&metrics, "density", "F")
        .and_then(|v| v.f())
        .map_err(|e| jni_err("DisplayMetrics.density", e))
}

/// `Uri.parse(value)`.
fn parse_uri<'local>(env: &mut JNIEnv<'local>, value: &str) -> Result<JObject<'local>> {
    let j_value = env.new_string(value).map_err(|e| jni_err("new_string(uri)", e))?;
    env.call_static_method(
        "android/net/Uri",
        "parse",
        "(Ljava/lang/String;)Landroid/net/Uri;",
        &[JValue::Object(&j_value)],
    )
    .and_then(|v| v.l())
    .map_err(|e| jni_err("Uri.parse", e))
}

// ---------------------------------------------------------------------------
// FileChooser — ACTION_GET_CONTENT
// ---------------------------------------------------------------------------

impl FileChooser for AndroidBridge {
    /// Launch `ACTION_GET_CONTENT`. The chosen `content://` URI comes back
    /// through `onActivityResult` with [`REQUEST_PICK_FILE`].
    fn launch_picker(&self, request: &PickerRequest) -> Result<()> {
        self.with_env(|env| {
            let j_action = env
                .new_string("android.intent.action.GET_CONTENT")
                .map_err(|e| jni_err("new_string(ACTION_GET_CONTENT)", e))?;
            let intent = env
                .new_object("android/content/Intent", "(Ljava/lang/String;)V", &[JValue::Object(&j_action)])
                .map_err(|e| jni_err("new Intent(GET_CONTENT)", e))?;

            if request.openable_only {
                let j_category = env
                    .new_string("android.intent.category.OPENABLE")
                    .map_err(|e| jni_err("new_string(CATEGORY_OPENABLE)", e))?;
                env.call_method(
                    &intent,
                    "addCategory",
                    "(Ljava/lang/String;)Landroid/content/Intent;",
                    &[JValue::Object(&j_category)],
                )
                .map_err(|e| jni_err("addCategory(OPENABLE)", e))?;
            }

            let j_type = env.new_string(&request.mime_filter).map_err(|e| jni_err("new_string(type)", e))?;
            env.call_method(
                &intent,
                "setType",
                "(Ljava/lang/String;)Landroid/content/Intent;",
                &[JValue::Object(&j_type)],
            )
            .map_err(|e| jni_err("setType", e))?;

            if request.allow_multiple {
                let j_extra = env
                    .new_string("android.intent.extra.ALLOW_MULTIPLE")
                    .map_err(|e| jni_err("new_string(EXTRA_ALLOW_MULTIPLE)", e))?;
                env.call_method(
                    &intent,
                    "putExtra",
                    "(Ljava/lang/String;Z)Landroid/content/Intent;",
                    &[JValue::Object(&j_extra), JValue::Bool(JNI_TRUE)],
                )
                .map_err(|e| jni_err("putExtra(EXTRA_ALLOW_MULTIPLE)", e))?;
            }

            env.call_method(
                self.activity.as_obj(),
                "startActivityForResult",
                "(Landroid/content/Intent;I)V",
                &[JValue::Object(&intent), JValue::Int(REQUEST_PICK_FILE)],
            )
            .map_err(|e| ShellError::ChooserLaunch(format!("startActivityForResult(GET_CONTENT): {e}")))?;

            info!(request_code = REQUEST_PICK_FILE, "Android: GET_CONTENT dispatched, awaiting onActivityResult");
            Ok(())
        })
    }
}

// ---------------------------------------------------------------------------
// DownloadService — android.app.DownloadManager
// ---------------------------------------------------------------------------

impl DownloadService for AndroidBridge {
    fn enqueue(&self, descriptor: &DownloadDescriptor) -> Result<DownloadHandle> {
        self.with_env(|env| {
            let uri = parse_uri(env, &descriptor.source_url)?;
            let request = env
                .new_object(
                    "android/app/DownloadManager$Request",
                    "(Landroid/net/Uri;)V",
                    &[JValue::Object(&uri)],
                )
                .map_err(|e| ShellError::Download(format!("new DownloadManager.Request: {e}")))?;

            let j_mime = env.new_string(&descriptor.mime_type).map_err(|e| jni_err("new_string(mime)", e))?;
            env.call_method(
                &request,
                "setMimeType",
                &format!("(Ljava/lang/String;){REQUEST_RET}"),
                &[JValue::Object(&j_mime)],
            )
            .map_err(|e| jni_err("setMimeType", e))?;

            request_call2(env, &request, "addRequestHeader", "User-Agent", &descriptor.user_agent)?;

            for (method, value) in [
                ("setDescription", descriptor.description.as_str()),
                ("setTitle", descriptor.filename.as_str()),
            ] {
                let j_value = env.new_string(value).map_err(|e| jni_err("new_string", e))?;
                env.call_method(
                    &request,
                    method,
                    &format!("(Ljava/lang/CharSequence;){REQUEST_RET}"),
                    &[JValue::Object(&j_value)],
                )
                .map_err(|e| jni_err(method, e))?;
            }

            if descriptor.media_scannable {
                env.call_method(&request, "allowScanningByMediaScanner", "()V", &[])
                    .map_err(|e| jni_err("allowScanningByMediaScanner", e))?;
            }
            if descriptor.notify_on_completion {
                env.call_method(
                    &request,
                    "setNotificationVisibility",
                    &format!("(I){REQUEST_RET}"),
                    &[JValue::Int(VISIBILITY_VISIBLE_NOTIFY_COMPLETED)],
                )
                .map_err(|e| jni_err("setNotificationVisibility", e))?;
            }

            request_call2(
                env,
                &request,
                "setDestinationInExternalPublicDir",
                descriptor.category.directory_name(),
                &descriptor.filename,
            )?;

            // -- Enqueue ------------------------------------------------------------
            let j_service = env.new_string("download").map_err(|e| jni_err("new_string(DOWNLOAD_SERVICE)", e))?;
            let manager = env
                .call_method(
                    self.activity.as_obj(),
                    "getSystemService",
                    "(Ljava/lang/String;)Ljava/lang/Object;",
                    &[JValue::Object(&j_service)],
                )
                .and_then(|v| v.l())
                .map_err(|e| jni_err("getSystemService(DOWNLOAD_SERVICE)", e))?;
            if manager.is_null() {
                return Err(ShellError::Download("DownloadManager service unavailable".into()));
            }

            let id = env
                .call_method(
                    &manager,
                    "enqueue",
                    "(Landroid/app/DownloadManager$Request;)J",
                    &[JValue::Object(&request)],
                )
                .and_then(|v| v.j())
                .map_err(|e| ShellError::Download(format!("DownloadManager.enqueue: {e}")))?;

            Ok(DownloadHandle(id))
        })
    }
}

// ---------------------------------------------------------------------------
// WebViewHost — android.webkit.WebView
// ---------------------------------------------------------------------------

impl WebViewHost for AndroidBridge {
    fn apply_settings(&self, settings: &WebViewSettings, user_agent: &str, channel: &str) -> Result<()> {
        self.with_env(|env| {
            let webview = self.webview.as_obj();
            let web_settings = env
                .call_method(webview, "getSettings", "()Landroid/webkit/WebSettings;", &[])
                .and_then(|v| v.l())
                .map_err(|e| jni_err("getSettings", e))?;

            set_bool(env, &web_settings, "setJavaScriptEnabled", settings.javascript_enabled)?;
            set_bool(env, &web_settings, "setDomStorageEnabled", settings.dom_storage_enabled)?;
            set_bool(env, &web_settings, "setAllowFileAccess", settings.allow_file_access)?;
            set_bool(env, &web_settings, "setAllowContentAccess", settings.allow_content_access)?;
            env.call_method(
                &web_settings,
                "setMixedContentMode",
                "(I)V",
                &[JValue::Int(settings.mixed_content.platform_value())],
            )
            .map_err(|e| jni_err("setMixedContentMode", e))?;

            let j_ua = env.new_string(user_agent).map_err(|e| jni_err("new_string(user_agent)", e))?;
            env.call_method(&web_settings, "setUserAgentString", "(Ljava/lang/String;)V", &[JValue::Object(&j_ua)])
                .map_err(|e| jni_err("setUserAgentString", e))?;

            let channel_obj = env.new_object(CHANNEL_CLASS, "()V", &[]).map_err(|e| jni_err("new BridgeChannel", e))?;
            let j_channel = env.new_string(channel).map_err(|e| jni_err("new_string(channel)", e))?;
            env.call_method(
                webview,
                "addJavascriptInterface",
                "(Ljava/lang/Object;Ljava/lang/String;)V",
                &[JValue::Object(&channel_obj), JValue::Object(&j_channel)],
            )
            .map_err(|e| jni_err("addJavascriptInterface", e))?;

            info!(%channel, "Android: WebView configured");
            Ok(())
        })
    }

    fn load_url(&self, url: &str) -> Result<()> {
        self.with_env(|env| {
            let j_url = env.new_string(url).map_err(|e| jni_err("new_string(url)", e))?;
            env.call_method(self.webview.as_obj(), "loadUrl", "(Ljava/lang/String;)V", &[JValue::Object(&j_url)])
                .map_err(|e| jni_err("loadUrl", e))?;
            Ok(())
        })
    }

    fn clear_history(&self) -> Result<()> {
        self.with_env(|env| {
            env.call_method(self.webview.as_obj(), "clearHistory", "()V", &[])
                .map_err(|e| jni_err("clearHistory", e))?;
            Ok(())
        })
    }

    fn can_go_back(&self) -> Result<bool> {
        self.with_env(|env| {
            env.call_method(self.webview.as_obj(), "canGoBack", "()Z", &[])
                .and_then(|v| v.z())
                .map_err(|e| jni_err("canGoBack", e))
        })
    }

    fn go_back(&self) -> Result<()> {
        self.with_env(|env| {
            env.call_method(self.webview.as_obj(), "goBack", "()V", &[])
                .map_err(|e| jni_err("goBack", e))?;
            Ok(())
        })
    }

    fn current_url(&self) -> Result<Option<String>> {
        self.with_env(|env| {
            let url = env
                .call_method(self.webview.as_obj(), "getUrl", "()Ljava/lang/String;", &[])
                .and_then(|v| v.l())
                .map_err(|e| jni_err("getUrl", e))?;
            Ok(opt_string(env, &JString::from(url)))
        })
    }
}

// ---------------------------------------------------------------------------
// UiStateProjector — host Activity bottom bar
// ---------------------------------------------------------------------------

impl UiStateProjector for AndroidBridge {
    fn apply_login_state(&self, logged_in: bool) {
        let layout = BottomBarLayout::for_login_state(logged_in);
        let height_px = dp_to_px(BUTTON_HEIGHT_DP, self.density);
        let result = self.with_env(|env| {
            env.call_method(
                self.activity.as_obj(),
                "applyBottomBar",
                "(ZZZI)V",
                &[
                    JValue::Bool(layout.menu.visible as jboolean),
                    JValue::Bool(layout.my_page.visible as jboolean),
                    JValue::Bool((layout.back.width == ButtonWidth::FullWidth) as jboolean),
                    JValue::Int(height_px),
                ],
            )
            .map_err(|e| jni_err("applyBottomBar", e))?;
            Ok(())
        });
        if let Err(e) = result {
            error!(error = %e, logged_in, "bottom bar projection failed");
        }
    }
}

// ---------------------------------------------------------------------------
// JNI exports — com.mya.shell.NativeBridge
// ---------------------------------------------------------------------------

struct Session {
    bridge: Arc<AndroidBridge>,
    shell: WebShell,
}

/// Current Activity's shell. Replaced on every `nativeInit`.
static SESSION: RwLock<Option<Arc<Session>>> = RwLock::new(None);

fn session() -> Option<Arc<Session>> {
    let guard = SESSION.read().unwrap_or_else(|poisoned| poisoned.into_inner());
    let session = guard.clone();
    if session.is_none() {
        warn!("NativeBridge called before nativeInit");
    }
    session
}

fn to_jboolean(value: bool) -> jboolean {
    if value { JNI_TRUE } else { JNI_FALSE }
}

fn parse_config(json: Option<String>) -> Result<ShellConfig> {
    match json.filter(|s| !s.trim().is_empty()) {
        None => Ok(ShellConfig::default()),
        Some(json) => {
            let config: ShellConfig = serde_json::from_str(&json)?;
            config.validate()?;
            Ok(config)
        }
    }
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_mya_shell_NativeBridge_nativeInit<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    activity: JObject<'local>,
    webview: JObject<'local>,
    config_json: JString<'local>,
) -> jboolean {
    crate::init_logging();

    let config = match parse_config(opt_string(&mut env, &config_json)) {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "invalid shell config, using defaults");
            ShellConfig::default()
        }
    };

    let bridge = match AndroidBridge::new(&mut env, &activity, &webview) {
        Ok(bridge) => Arc::new(bridge),
        Err(e) => {
            error!(error = %e, "Android bridge init failed");
            return JNI_FALSE;
        }
    };

    let waker = bridge.clone();
    let ui = UiQueue::with_waker(move || waker.request_ui_pump());
    let shell = WebShell::with_ui_queue(config, bridge.services(), ui);

    let mut guard = SESSION.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = Some(Arc::new(Session { bridge, shell }));
    info!("Android shell session initialised");
    JNI_TRUE
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_mya_shell_NativeBridge_nativeStart<'local>(
    _env: JNIEnv<'local>,
    _class: JClass<'local>,
) -> jboolean {
    let Some(session) = session() else { return JNI_FALSE };
    match session.shell.start() {
        Ok(()) => JNI_TRUE,
        Err(e) => {
            error!(error = %e, "shell start failed");
            JNI_FALSE
        }
    }
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_mya_shell_NativeBridge_nativeDestroy<'local>(
    _env: JNIEnv<'local>,
    _class: JClass<'local>,
) {
    let mut guard = SESSION.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.take();
}

/// `@JavascriptInterface receiveMessage(String)`; runs on the JS bridge thread.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_mya_shell_NativeBridge_nativeReceiveMessage<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    message: JString<'local>,
) {
    let Some(session) = session() else { return };
    let Some(message) = opt_string(&mut env, &message) else {
        warn!("null bridge message dropped");
        return;
    };
    session.shell.on_message(&message);
}

/// `WebChromeClient.onShowFileChooser`; `callback` is a `ValueCallback<Uri[]>`.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_mya_shell_NativeBridge_nativeShowFileChooser<'local>(
    env: JNIEnv<'local>,
    _class: JClass<'local>,
    callback: JObject<'local>,
) -> jboolean {
    let Some(session) = session() else { return JNI_FALSE };
    let callback = match env.new_global_ref(&callback) {
        Ok(callback) => callback,
        Err(e) => {
            error!(error = %e, "could not retain file chooser callback");
            return JNI_FALSE;
        }
    };

    let bridge = session.bridge.clone();
    let handle: CompletionHandle = Box::new(move |selection| {
        if let Err(e) = bridge.resolve_callback(&callback, selection) {
            error!(error = %e, "file chooser callback failed");
        }
    });
    to_jboolean(session.shell.on_file_input_activated(handle))
}

/// `onActivityResult(REQUEST_PICK_FILE, ...)`; `uri` is null on cancel.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_mya_shell_NativeBridge_nativeFileChooserResult<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    uri: JString<'local>,
) {
    let Some(session) = session() else { return };
    let selected = opt_string(&mut env, &uri).map(ResourceLocator::new);
    session.shell.on_pick_result(selected);
}

/// `DownloadListener.onDownloadStart`.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_mya_shell_NativeBridge_nativeDownloadStart<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    url: JString<'local>,
    user_agent: JString<'local>,
    content_disposition: JString<'local>,
    mime_type: JString<'local>,
    content_length: jlong,
) {
    let Some(session) = session() else { return };
    let Some(url) = opt_string(&mut env, &url) else {
        warn!("download with null URL ignored");
        return;
    };
    let event = DownloadEvent {
        url,
        user_agent: opt_string(&mut env, &user_agent).unwrap_or_default(),
        content_disposition: opt_string(&mut env, &content_disposition),
        mime_type: opt_string(&mut env, &mime_type).unwrap_or_default(),
        content_length,
    };
    session.shell.on_download_event(&event);
}

/// Posted by the host in response to `requestUiPump()`; main thread.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_mya_shell_NativeBridge_nativePumpUi<'local>(
    _env: JNIEnv<'local>,
    _class: JClass<'local>,
) -> jint {
    let Some(session) = session() else { return 0 };
    session.shell.pump_ui() as jint
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_mya_shell_NativeBridge_nativeGoBack<'local>(
    _env: JNIEnv<'local>,
    _class: JClass<'local>,
) -> jboolean {
    let Some(session) = session() else { return JNI_FALSE };
    to_jboolean(session.shell.go_back_if_possible())
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_mya_shell_NativeBridge_nativeIsLoggedIn<'local>(
    _env: JNIEnv<'local>,
    _class: JClass<'local>,
) -> jboolean {
    let Some(session) = session() else { return JNI_FALSE };
    to_jboolean(session.shell.is_logged_in())
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_mya_shell_NativeBridge_nativeSelectMenu<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    id: JString<'local>,
) -> jboolean {
    let Some(session) = session() else { return JNI_FALSE };
    let Some(id) = opt_string(&mut env, &id) else { return JNI_FALSE };
    to_jboolean(session.shell.select_menu_entry(&id))
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_mya_shell_NativeBridge_nativeLoadMyPage<'local>(
    _env: JNIEnv<'local>,
    _class: JClass<'local>,
) -> jboolean {
    let Some(session) = session() else { return JNI_FALSE };
    to_jboolean(session.shell.load_my_page())
}
