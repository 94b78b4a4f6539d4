//! The editor bridge object.
//!
//! [`RichEditor`] owns the cached [`EditorState`] and is the only thing that
//! talks to the embedded content. It lives on the owner thread; every
//! continuation it hands to the engine holds a [`WeakRichEditor`] and does
//! nothing once the editor is gone.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::channel::CommandChannel;
use crate::command::{Command, FormatCommand};
use crate::config::EditorConfig;
use crate::delegate::EditorDelegate;
use crate::engine::ScriptEngine;
use crate::notification::NotificationQueue;
use crate::scroll::Viewport;
use crate::state::{EditorState, PendingConfig};
use crate::value::{canonical_bool, canonical_int};

pub(crate) struct Inner {
    pub(crate) config: EditorConfig,
    pub(crate) channel: CommandChannel,
    pub(crate) queue: NotificationQueue,
    pub(crate) viewport: Rc<dyn Viewport>,
    pub(crate) delegate: RefCell<Option<Rc<dyn EditorDelegate>>>,
    pub(crate) state: RefCell<EditorState>,
}

/// Host-side handle to a WebView-backed rich-text editor.
///
/// Cloning yields another handle to the same editor.
#[derive(Clone)]
pub struct RichEditor {
    pub(crate) inner: Rc<Inner>,
}

/// Non-owning handle to a [`RichEditor`].
#[derive(Clone)]
pub struct WeakRichEditor {
    inner: Weak<Inner>,
}

impl WeakRichEditor {
    /// Get the editor back if it is still alive.
    pub fn upgrade(&self) -> Option<RichEditor> {
        self.inner.upgrade().map(|inner| RichEditor { inner })
    }
}

impl RichEditor {
    /// Create an editor over `engine`, scrolling `viewport`.
    ///
    /// The engine is expected to be loading the editor content already;
    /// the editor stays unloaded until the content reports `ready`.
    pub fn new(
        engine: Rc<dyn ScriptEngine>,
        viewport: Rc<dyn Viewport>,
        config: EditorConfig,
    ) -> Self {
        let channel = CommandChannel::new(engine);
        let queue = NotificationQueue::new(channel.clone(), &config);
        Self {
            inner: Rc::new(Inner {
                config,
                channel,
                queue,
                viewport,
                delegate: RefCell::new(None),
                state: RefCell::new(EditorState::new(&config)),
            }),
        }
    }

    /// Register the event sink, replacing any previous one.
    pub fn set_delegate(&self, delegate: Rc<dyn EditorDelegate>) {
        *self.inner.delegate.borrow_mut() = Some(delegate);
    }

    /// Remove the event sink.
    pub fn clear_delegate(&self) {
        *self.inner.delegate.borrow_mut() = None;
    }

    pub fn downgrade(&self) -> WeakRichEditor {
        WeakRichEditor {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.inner.config
    }

    // =====================================================================
    // Cached state
    // =====================================================================

    /// Whether the content has reported `ready`.
    pub fn is_loaded(&self) -> bool {
        self.inner.state.borrow().load.is_loaded()
    }

    /// Content HTML.
    ///
    /// Before load this is the HTML that will be pushed on `ready`. After
    /// load it is the last HTML the content reported, which may lag a
    /// `set_html` until the follow-up refresh completes.
    pub fn html(&self) -> String {
        self.inner.state.borrow().html().to_owned()
    }

    /// Last measured content height (px).
    pub fn content_height(&self) -> i64 {
        self.inner.state.borrow().height
    }

    pub fn placeholder(&self) -> String {
        self.inner.state.borrow().placeholder.clone()
    }

    pub fn is_editable(&self) -> bool {
        self.inner.state.borrow().editable
    }

    pub fn font_size(&self) -> u32 {
        self.inner.state.borrow().font_size
    }

    // =====================================================================
    // Setters
    // =====================================================================

    /// Replace the document HTML.
    pub fn set_html(&self, html: &str) {
        if self.park(|pending| pending.html = html.to_owned()) {
            return;
        }
        self.send(self.command("setHtml").arg(html));
        self.refresh_html();
        self.refresh_height();
    }

    pub fn set_editable(&self, editable: bool) {
        self.inner.state.borrow_mut().editable = editable;
        if self.park(|pending| pending.editable = editable) {
            return;
        }
        self.send(self.command("setContentEditable").bool(editable));
    }

    pub fn set_placeholder(&self, text: &str) {
        self.inner.state.borrow_mut().placeholder = text.to_owned();
        if self.park(|pending| pending.placeholder = text.to_owned()) {
            return;
        }
        self.send(self.command("setPlaceholderText").arg(text));
    }

    /// Set the font size (px).
    pub fn set_font_size(&self, size: u32) {
        self.inner.state.borrow_mut().font_size = size;
        if self.park(|pending| pending.font_size = size) {
            return;
        }
        self.send(self.command("setFontSize").px(size));
    }

    /// Set the line height (px).
    pub fn set_line_height(&self, line_height: u32) {
        self.inner.state.borrow_mut().line_height = line_height;
        if self.park(|pending| pending.line_height = line_height) {
            return;
        }
        self.send(self.command("setLineHeight").px(line_height));
    }

    /// Park a value for the `ready` push. Returns `false` once loaded.
    fn park(&self, update: impl FnOnce(&mut PendingConfig)) -> bool {
        let mut state = self.inner.state.borrow_mut();
        match state.load.pending_mut() {
            Some(pending) => {
                update(pending);
                true
            }
            None => false,
        }
    }

    // =====================================================================
    // Queries
    // =====================================================================

    /// Line height (px) as rendered by the content.
    ///
    /// Before load this is the line height that will be pushed on `ready`.
    /// After load the content is asked and its answer is cached; when it
    /// reports something that is not a line height, the cached value is
    /// used instead.
    pub fn line_height<F>(&self, done: F)
    where
        F: FnOnce(u32) + 'static,
    {
        let cached = self.inner.state.borrow().line_height;
        if !self.is_loaded() {
            done(cached);
            return;
        }
        let weak = self.downgrade();
        self.inner.channel.evaluate(self.command("getLineHeight"), move |result| {
            let reported = canonical_int(&result)
                .and_then(|n| u32::try_from(n).ok())
                .filter(|&n| n > 0);
            let line_height = match (reported, weak.upgrade()) {
                (Some(n), Some(editor)) => {
                    editor.inner.state.borrow_mut().line_height = n;
                    n
                }
                (Some(n), None) => n,
                (None, Some(editor)) => editor.inner.state.borrow().line_height,
                (None, None) => cached,
            };
            done(line_height);
        });
    }

    /// `href` of the link around the selection, if any.
    pub fn selected_href<F>(&self, done: F)
    where
        F: FnOnce(Option<String>) + 'static,
    {
        self.query(self.command("getSelectedHref"), move |href| {
            done((!href.is_empty()).then_some(href));
        });
    }

    /// Whether a non-collapsed selection exists.
    pub fn has_range_selection<F>(&self, done: F)
    where
        F: FnOnce(bool) + 'static,
    {
        self.query(self.command("rangeSelectionExists"), move |r| done(canonical_bool(&r)));
    }

    /// Whether a selection or a caret exists.
    pub fn has_range_or_caret_selection<F>(&self, done: F)
    where
        F: FnOnce(bool) + 'static,
    {
        self.query(self.command("rangeOrCaretSelectionExists"), move |r| {
            done(canonical_bool(&r));
        });
    }

    /// Plain text of the current selection.
    pub fn selected_text<F>(&self, done: F)
    where
        F: FnOnce(String) + 'static,
    {
        self.query(self.command("getSelectedText"), done);
    }

    /// Evaluate an arbitrary script and receive its canonical result.
    ///
    /// Runs regardless of load state.
    pub fn run_script<F>(&self, script: &str, done: F)
    where
        F: FnOnce(String) + 'static,
    {
        self.inner.channel.evaluate(script, done);
    }

    /// Content-dependent query. Answers `""` without a round trip before
    /// load.
    fn query<F>(&self, command: Command, done: F)
    where
        F: FnOnce(String) + 'static,
    {
        if !self.is_loaded() {
            log::debug!("content not loaded; answering {command} with empty result");
            done(String::new());
            return;
        }
        self.inner.channel.evaluate(command, done);
    }

    // =====================================================================
    // Editing commands
    // =====================================================================

    /// Apply a formatting or editing command. Dropped before load.
    pub fn apply(&self, command: FormatCommand) {
        if !self.is_loaded() {
            log::debug!("content not loaded; dropping {command:?}");
            return;
        }
        if command.needs_insertion_point() {
            self.send(self.command("prepareInsert"));
        }
        self.send(command.to_command(self.inner.config.namespace));
    }

    pub fn focus(&self) {
        self.send_loaded(self.command("focus"));
    }

    /// Focus and place the caret at a point in content coordinates.
    pub fn focus_at(&self, x: i64, y: i64) {
        self.send_loaded(self.command("focusAtPoint").int(x).int(y));
    }

    pub fn blur(&self) {
        self.send_loaded(self.command("blurFocus"));
    }

    fn send_loaded(&self, command: Command) {
        if self.is_loaded() {
            self.send(command);
        } else {
            log::debug!("content not loaded; dropping {command}");
        }
    }

    // =====================================================================
    // Plumbing shared with the dispatcher and scroller
    // =====================================================================

    pub(crate) fn command(&self, operation: &str) -> Command {
        Command::call(self.inner.config.namespace, operation)
    }

    pub(crate) fn send(&self, command: Command) {
        self.inner.channel.send(command);
    }

    /// Call the delegate, if one is registered.
    pub(crate) fn notify(&self, event: impl FnOnce(&dyn EditorDelegate)) {
        let delegate = self.inner.delegate.borrow().clone();
        if let Some(delegate) = delegate {
            event(delegate.as_ref());
        }
    }

    /// Assign the cached HTML. Every assignment reports a content change.
    pub(crate) fn store_html(&self, html: String) {
        self.inner.state.borrow_mut().content_html.clone_from(&html);
        self.notify(|d| d.on_content_changed(&html));
    }

    /// Re-read the HTML from the content.
    pub(crate) fn refresh_html(&self) {
        let weak = self.downgrade();
        self.inner.channel.evaluate(self.command("getHtml"), move |html| {
            if let Some(editor) = weak.upgrade() {
                editor.store_html(html);
            }
        });
    }

    /// Re-measure the content height, reporting it only if it changed.
    pub(crate) fn refresh_height(&self) {
        let weak = self.downgrade();
        self.inner
            .channel
            .evaluate(self.command("getClientHeight"), move |result| {
                let Some(editor) = weak.upgrade() else { return };
                let Some(height) = canonical_int(&result) else {
                    log::debug!("content height unavailable; keeping cached value");
                    return;
                };
                let changed = editor.inner.state.borrow_mut().record_height(height);
                if changed {
                    editor.notify(|d| d.on_height_changed(height));
                }
            });
    }
}
