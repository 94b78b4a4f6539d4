//! # Scribe
//!
//! WebView-backed rich-text editing for Rust hosts.
//!
//! The editor document and its editing logic run inside an embedded web
//! engine. Scribe is the host half: a [`RichEditor`](core::RichEditor)
//! that sends commands into the page, drains the page's notification
//! queue, caches the editor state and keeps the caret in view.
//!
//! ## Architecture
//!
//! ```text
//! Host UI (toolbar, container view, delegate)
//!        ↓
//! RichEditor (scribe-core)
//!        ↓
//! ScriptEngine (scribe-webview: WKWebView on macOS)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use scribe::prelude::*;
//!
//! struct Sink;
//!
//! impl EditorDelegate for Sink {
//!     fn on_content_changed(&self, html: &str) {
//!         println!("{html}");
//!     }
//! }
//!
//! let page = WebViewConfig { html: EDITOR_HTML, base_url: None, dev_tools: false };
//! let (webview, editor) = unsafe {
//!     scribe::webview::attach_editor(parent_view, &page, viewport, EditorConfig::new())
//! }?;
//! editor.set_delegate(Rc::new(Sink));
//! editor.set_html("<p>Hello</p>");
//! editor.apply(FormatCommand::Bold);
//! ```

// Re-export sub-crates
pub use scribe_core as core;

#[cfg(feature = "webview")]
pub use scribe_webview as webview;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use scribe::prelude::*;
/// ```
pub mod prelude {
    pub use scribe_core::{
        EditorConfig, EditorDelegate, FormatCommand, NavigationKind, NavigationPolicy,
        NavigationRequest, Point, RichEditor, ScriptEngine, ScriptValue, Size, Viewport,
    };

    #[cfg(feature = "webview")]
    pub use scribe_webview::{PlatformWebView, WebViewConfig, WebViewError};
}
