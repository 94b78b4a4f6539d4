//! Fallback for platforms without a WebView engine.

use std::ffi::c_void;

use scribe_core::{EvalError, RichEditor, ScriptCallback, ScriptEngine};

use crate::error::{Result, WebViewError};
use crate::WebViewConfig;

/// Placeholder engine. It cannot be attached, and every evaluation
/// reports [`EvalError::Unavailable`].
pub struct UnsupportedWebView {
    _private: (),
}

impl UnsupportedWebView {
    /// Always fails with [`WebViewError::PlatformNotSupported`].
    ///
    /// # Safety
    ///
    /// No requirements; the signature matches the other platforms.
    pub unsafe fn attach_to_parent(
        _parent: *mut c_void,
        _config: &WebViewConfig<'_>,
    ) -> Result<Self> {
        Err(WebViewError::PlatformNotSupported)
    }

    pub fn route_navigation(&self, _editor: &RichEditor) {}

    pub fn set_frame(&self, _x: i32, _y: i32, _width: i32, _height: i32) {}

    pub fn detach(&self) {}
}

impl ScriptEngine for UnsupportedWebView {
    fn evaluate_script(&self, _script: &str, done: ScriptCallback) {
        done(Err(EvalError::Unavailable));
    }
}
