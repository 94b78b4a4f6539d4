//! Host-side bridge for WebView-backed rich-text editors.
//!
//! The editor document lives inside an embedded web engine. This crate is
//! the host half of the bridge: it pushes commands into the content as
//! script strings, drains the notifications the content queues for the
//! host, keeps a cache of the editor state, and keeps the caret scrolled
//! into view.
//!
//! ```text
//! host UI ──► RichEditor ──► CommandChannel ──► ScriptEngine (embedded content)
//!                ▲                                     │
//!                │        re-callback:// navigation    │
//!                └── dispatch ◄── NotificationQueue ◄──┘
//! ```
//!
//! Everything here runs on a single owner thread. Engine integrations live
//! in `scribe-webview`.

pub mod channel;
pub mod command;
pub mod config;
pub mod delegate;
mod dispatch;
pub mod editor;
pub mod engine;
mod error;
pub mod notification;
pub mod scroll;
pub mod state;
pub mod value;

#[cfg(test)]
mod testing;

pub use channel::CommandChannel;
pub use command::{Command, FormatCommand};
pub use config::{EditorConfig, DEFAULT_LINE_HEIGHT};
pub use delegate::EditorDelegate;
pub use editor::{RichEditor, WeakRichEditor};
pub use engine::{ScriptCallback, ScriptEngine};
pub use error::{EvalError, Result};
pub use notification::{
    NavigationKind, NavigationPolicy, NavigationRequest, Notification, NotificationQueue,
};
pub use scroll::{Point, Size, Viewport};
pub use value::ScriptValue;
