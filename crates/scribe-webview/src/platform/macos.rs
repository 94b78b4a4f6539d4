//! macOS WKWebView implementation.

use std::cell::{Cell, RefCell};
use std::ffi::{c_char, c_void, CStr};

use block2::RcBlock;
use objc2::rc::Retained;
use objc2::runtime::AnyObject;
use objc2::{msg_send, MainThreadMarker};
use objc2_app_kit::NSView;
use objc2_foundation::{NSError, NSNumber, NSString, NSURL};
use objc2_web_kit::{WKWebView, WKWebViewConfiguration};
use scribe_core::{EvalError, RichEditor, ScriptCallback, ScriptEngine, ScriptValue};

use super::macos_navigation::NavigationDelegate;
use crate::error::{Result, WebViewError};
use crate::WebViewConfig;

/// macOS editor WebView backed by WKWebView.
pub struct MacosWebView {
    webview: Retained<WKWebView>,
    navigation: RefCell<Option<NavigationDelegate>>,
    attached: Cell<bool>,
}

impl MacosWebView {
    /// Attach a WKWebView to the given parent NSView and start loading the
    /// editor page.
    ///
    /// # Safety
    ///
    /// `parent` must be a valid `NSView` pointer. Must be called from the
    /// main thread.
    pub unsafe fn attach_to_parent(parent: *mut c_void, config: &WebViewConfig) -> Result<Self> {
        if parent.is_null() {
            return Err(WebViewError::CreationFailed("null parent view".into()));
        }

        let mtm = MainThreadMarker::new().ok_or_else(|| {
            WebViewError::CreationFailed("must be called from the main thread".into())
        })?;

        let base_url = match config.base_url {
            Some(url) => Some(
                NSURL::URLWithString(&NSString::from_str(url))
                    .ok_or_else(|| WebViewError::InvalidBaseUrl(url.to_owned()))?,
            ),
            None => None,
        };

        // SAFETY: caller guarantees `parent` is a valid NSView pointer.
        let parent_view: &NSView = unsafe { &*(parent as *const NSView) };
        let frame = parent_view.frame();

        // SAFETY: WKWebViewConfiguration::new is safe when called on the main thread.
        let wk_config = unsafe { WKWebViewConfiguration::new(mtm) };

        // SAFETY: frame and wk_config are valid; we are on the main thread.
        let webview = unsafe {
            WKWebView::initWithFrame_configuration(mtm.alloc(), frame, &wk_config)
        };

        if config.dev_tools {
            // SAFETY: setInspectable is safe to call on a valid WKWebView.
            unsafe { webview.setInspectable(true) };
        }

        let html = NSString::from_str(config.html);
        // SAFETY: html is a valid NSString; base_url is a valid NSURL or None.
        unsafe { webview.loadHTMLString_baseURL(&html, base_url.as_deref()) };

        parent_view.addSubview(&webview);

        Ok(Self {
            webview,
            navigation: RefCell::new(None),
            attached: Cell::new(true),
        })
    }

    /// Send this WebView's navigation-policy decisions to `editor`.
    ///
    /// Replaces any previous routing. Must be called from the main thread.
    pub fn route_navigation(&self, editor: &RichEditor) {
        let Some(mtm) = MainThreadMarker::new() else {
            log::error!("route_navigation must be called from the main thread");
            return;
        };

        // SAFETY: we are on the main thread.
        let delegate = unsafe { NavigationDelegate::new(editor, mtm) };
        // SAFETY: the delegate object implements the WKNavigationDelegate
        // methods WebKit calls. WKWebView holds it weakly; `self` keeps it alive.
        unsafe {
            let _: () = msg_send![&*self.webview, setNavigationDelegate: delegate.as_object()];
        }
        *self.navigation.borrow_mut() = Some(delegate);
    }

    /// Update the WebView frame.
    pub fn set_frame(&self, x: i32, y: i32, width: i32, height: i32) {
        let frame = objc2_foundation::NSRect::new(
            objc2_foundation::NSPoint::new(x as f64, y as f64),
            objc2_foundation::NSSize::new(width as f64, height as f64),
        );
        self.webview.setFrame(frame);
    }

    /// Remove the WebView from its parent.
    ///
    /// Later evaluations report [`EvalError::Unavailable`]. Evaluations
    /// already in flight may never complete.
    pub fn detach(&self) {
        if !self.attached.replace(false) {
            return;
        }
        // SAFETY: clearing the delegate on a valid WKWebView.
        unsafe {
            let _: () = msg_send![&*self.webview, setNavigationDelegate: std::ptr::null::<AnyObject>()];
        }
        self.navigation.borrow_mut().take();
        self.webview.removeFromSuperview();
    }
}

impl Drop for MacosWebView {
    fn drop(&mut self) {
        self.detach();
    }
}

impl ScriptEngine for MacosWebView {
    fn evaluate_script(&self, script: &str, done: ScriptCallback) {
        if !self.attached.get() {
            done(Err(EvalError::Unavailable));
            return;
        }

        // WebKit types the handler as a reusable block but calls it once.
        let done = Cell::new(Some(done));
        let completion = RcBlock::new(move |result: *mut AnyObject, error: *mut NSError| {
            let Some(done) = done.take() else { return };
            if !error.is_null() {
                // SAFETY: WebKit passes a valid NSError when evaluation fails.
                let error = unsafe { &*error };
                done(Err(EvalError::Script(error.localizedDescription().to_string())));
                return;
            }
            // SAFETY: result is nil or an object WebKit keeps alive for the call.
            done(Ok(unsafe { native_value(result) }));
        });

        let script = NSString::from_str(script);
        // SAFETY: valid WKWebView and NSString; WebKit copies the block and
        // invokes it on the main thread.
        unsafe {
            self.webview
                .evaluateJavaScript_completionHandler(&script, Some(&*completion));
        }
    }
}

/// Convert an evaluation result into a [`ScriptValue`].
///
/// WebKit bridges script strings to `NSString` and numbers and booleans to
/// `NSNumber`; booleans carry the `BOOL` type encoding.
///
/// # Safety
///
/// `result` must be nil or a valid Objective-C object.
unsafe fn native_value(result: *mut AnyObject) -> ScriptValue {
    if result.is_null() {
        return ScriptValue::Absent;
    }
    // SAFETY: non-null and valid per the function contract.
    let object: &AnyObject = unsafe { &*result };

    if let Some(string) = object.downcast_ref::<NSString>() {
        return ScriptValue::Text(string.to_string());
    }

    if let Some(number) = object.downcast_ref::<NSNumber>() {
        // SAFETY: objCType returns a NUL-terminated type encoding owned by the number.
        let encoding: *const c_char = unsafe { msg_send![number, objCType] };
        // SAFETY: non-null per the NSValue contract.
        let encoding = unsafe { CStr::from_ptr(encoding) };
        if encoding == c"c" || encoding == c"B" {
            return ScriptValue::Boolean(number.boolValue());
        }
        return ScriptValue::from_number(number.doubleValue());
    }

    ScriptValue::Absent
}
