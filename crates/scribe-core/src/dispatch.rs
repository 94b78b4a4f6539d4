//! Notification dispatch.
//!
//! Navigation requests come in from the engine; callback-scheme requests
//! are cancelled and turned into a queue drain, and each drained
//! notification is applied to the editor state in order.

use crate::editor::RichEditor;
use crate::notification::{
    decode_batch, NavigationPolicy, NavigationRequest, NavigationRoute, Notification,
};

impl RichEditor {
    /// Decide whether the engine may perform a navigation.
    ///
    /// Call this from the engine's navigation-policy hook. Notification
    /// signals are always cancelled and trigger a drain of the
    /// content's queue. Link activations are allowed only if the delegate
    /// agrees. Everything else, including the initial content load, is
    /// allowed.
    pub fn decide_navigation(&self, request: &NavigationRequest<'_>) -> NavigationPolicy {
        match self.inner.queue.route(request) {
            NavigationRoute::Callback => {
                self.drain_notifications();
                NavigationPolicy::Cancel
            }
            NavigationRoute::Link => {
                let mut allowed = false;
                self.notify(|d| allowed = d.should_interact_with(request.url));
                if allowed {
                    NavigationPolicy::Allow
                } else {
                    NavigationPolicy::Cancel
                }
            }
            NavigationRoute::Passthrough => NavigationPolicy::Allow,
        }
    }

    /// Dispatch an already-drained notification payload (a JSON array of
    /// strings), for engines that can push it directly.
    pub fn receive_batch(&self, payload: &str) {
        for raw in decode_batch(payload) {
            self.dispatch(&raw);
        }
    }

    fn drain_notifications(&self) {
        let weak = self.downgrade();
        self.inner.queue.drain(move |batch| {
            let Some(editor) = weak.upgrade() else { return };
            for raw in &batch {
                editor.dispatch(raw);
            }
        });
    }

    /// Apply a single notification.
    ///
    /// Unrecognized notifications are ignored.
    pub fn dispatch(&self, raw: &str) {
        let Some(notification) = Notification::parse(raw) else {
            log::debug!("ignoring unrecognized notification: {raw}");
            return;
        };

        match notification {
            Notification::Ready => self.handle_ready(),
            Notification::Input => {
                self.scroll_caret_to_visible();
                self.refresh_html();
                self.refresh_height();
            }
            Notification::UpdateHeight => self.refresh_height(),
            Notification::Focus => self.notify(|d| d.on_focus()),
            Notification::Blur => self.notify(|d| d.on_blur()),
            Notification::Action(name) => {
                self.refresh_html();
                self.notify(|d| d.on_custom_action(&name));
            }
        }
    }

    /// The first `ready` pushes the parked configuration; every `ready`
    /// re-measures the height.
    fn handle_ready(&self) {
        let pending = self.inner.state.borrow_mut().load.finish_loading();

        if let Some(pending) = pending {
            log::debug!("editor content loaded");
            self.send(self.command("setFontSize").px(pending.font_size));
            self.send(self.command("setHtml").arg(&pending.html));
            self.send(self.command("setContentEditable").bool(pending.editable));
            self.send(self.command("setPlaceholderText").arg(&pending.placeholder));
            self.send(self.command("setLineHeight").px(pending.line_height));
            self.store_html(pending.html);
            self.notify(|d| d.on_loaded());
        }

        self.refresh_height();
    }
}
