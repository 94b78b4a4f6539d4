//! Editor event sink.

/// Receives editor events on the owner thread.
///
/// Every method has a no-op default, so implement only what you need.
/// An editor with no delegate simply skips the callbacks.
pub trait EditorDelegate {
    /// The embedded content finished loading. Fires once per editor.
    fn on_loaded(&self) {}

    /// The measured content height changed.
    fn on_height_changed(&self, _height: i64) {}

    /// The cached content HTML was refreshed from the embedded content.
    fn on_content_changed(&self, _html: &str) {}

    /// The editable area gained focus.
    fn on_focus(&self) {}

    /// The editable area lost focus.
    fn on_blur(&self) {}

    /// Whether a link the user activated may be followed inside the editor.
    ///
    /// Defaults to `false`, which keeps the editor on its own content.
    fn should_interact_with(&self, _url: &str) -> bool {
        false
    }

    /// The content reported a custom `action/<name>` notification.
    fn on_custom_action(&self, _name: &str) {}
}
