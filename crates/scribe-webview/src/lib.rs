//! Platform WebView engines for the Scribe rich-text editor.
//!
//! Each platform type hosts the editor page, implements
//! [`ScriptEngine`](scribe_core::ScriptEngine) on top of the native
//! script-evaluation API, and forwards navigation-policy decisions to a
//! [`RichEditor`] so the notification signal can be intercepted.

mod error;
pub mod platform;

use std::ffi::c_void;
use std::rc::Rc;

use scribe_core::{EditorConfig, RichEditor, Viewport};

pub use error::{Result, WebViewError};
pub use platform::PlatformWebView;

/// Configuration for an editor WebView.
pub struct WebViewConfig<'a> {
    /// Editor page markup, loaded when the WebView is attached.
    pub html: &'a str,
    /// Base URL for resolving relative references in `html`.
    pub base_url: Option<&'a str>,
    /// Whether to enable developer tools.
    pub dev_tools: bool,
}

/// Attach a WebView to `parent` and wire a [`RichEditor`] to it.
///
/// The returned editor is unloaded until the page reports `ready`.
///
/// # Safety
///
/// `parent` must be a valid native view handle for the current platform
/// (`NSView*` on macOS). Must be called from the main thread.
pub unsafe fn attach_editor(
    parent: *mut c_void,
    webview_config: &WebViewConfig<'_>,
    viewport: Rc<dyn Viewport>,
    editor_config: EditorConfig,
) -> Result<(Rc<PlatformWebView>, RichEditor)> {
    // SAFETY: forwarded from the caller's contract.
    let webview = match unsafe { PlatformWebView::attach_to_parent(parent, webview_config) } {
        Ok(webview) => Rc::new(webview),
        Err(e) => {
            log::error!("Failed to create editor WebView: {e}");
            return Err(e);
        }
    };

    let editor = RichEditor::new(webview.clone(), viewport, editor_config);
    webview.route_navigation(&editor);
    Ok((webview, editor))
}
