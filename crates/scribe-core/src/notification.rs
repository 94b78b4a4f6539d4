//! Notification queue protocol.
//!
//! The embedded content has no push channel to the host. It appends
//! notification strings to a queue on its side and then attempts to
//! navigate to the reserved callback scheme. The host cancels that
//! navigation and drains the queue with one command, receiving a JSON array
//! of strings.
//!
//! This module covers how the signal arrives and what a notification
//! string means. Acting on notifications is the dispatcher's job
//! (see [`RichEditor::decide_navigation`](crate::RichEditor::decide_navigation)).

use serde::Deserialize;

use crate::channel::CommandChannel;
use crate::command::Command;
use crate::config::EditorConfig;

const ACTION_PREFIX: &str = "action/";

/// A notification reported by the embedded content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// The editor script finished initializing.
    Ready,
    /// The user changed the document.
    Input,
    /// The content height may have changed.
    UpdateHeight,
    /// The editable area gained focus.
    Focus,
    /// The editable area lost focus.
    Blur,
    /// A custom action, named by whatever follows `action/`.
    Action(String),
}

impl Notification {
    /// Classify a raw notification string by prefix.
    ///
    /// The fixed single-word prefixes are tested first, in table order.
    /// Unrecognized strings yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.starts_with("ready") {
            Some(Self::Ready)
        } else if raw.starts_with("input") {
            Some(Self::Input)
        } else if raw.starts_with("updateHeight") {
            Some(Self::UpdateHeight)
        } else if raw.starts_with("focus") {
            Some(Self::Focus)
        } else if raw.starts_with("blur") {
            Some(Self::Blur)
        } else {
            raw.strip_prefix(ACTION_PREFIX)
                .map(|name| Self::Action(name.to_owned()))
        }
    }
}

/// How a navigation was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKind {
    /// The user activated a link in the content.
    LinkActivated,
    /// Anything else (initial load, reload, script-driven, form submission).
    Other,
}

/// A navigation the engine is asking permission for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationRequest<'a> {
    /// Target URL.
    pub url: &'a str,
    /// What triggered it.
    pub kind: NavigationKind,
}

impl<'a> NavigationRequest<'a> {
    /// Create a request for `url`.
    pub fn new(url: &'a str, kind: NavigationKind) -> Self {
        Self { url, kind }
    }
}

/// Answer to a [`NavigationRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationPolicy {
    Allow,
    Cancel,
}

/// Which path a navigation takes through the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationRoute {
    /// Notification signal. Always cancelled; triggers a drain.
    Callback,
    /// User link activation. The delegate decides.
    Link,
    /// Everything else is allowed unconditionally.
    Passthrough,
}

#[derive(Deserialize)]
#[serde(transparent)]
struct NotificationBatch(Vec<String>);

/// Decode a drained queue payload.
///
/// Malformed payloads are logged and treated as an empty batch. An empty
/// payload is what the channel reports for a failed evaluation; that fault
/// has already been logged.
pub fn decode_batch(payload: &str) -> Vec<String> {
    if payload.is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<NotificationBatch>(payload) {
        Ok(NotificationBatch(batch)) => batch,
        Err(e) => {
            log::warn!("discarding malformed notification batch: {e}");
            Vec::new()
        }
    }
}

/// Host side of the queue: recognizes the signal and drains the queue.
#[derive(Clone)]
pub struct NotificationQueue {
    channel: CommandChannel,
    callback_scheme: &'static str,
    drain_command: String,
}

impl NotificationQueue {
    /// Create a queue that drains through `channel`.
    pub fn new(channel: CommandChannel, config: &EditorConfig) -> Self {
        Self {
            channel,
            callback_scheme: config.callback_scheme,
            drain_command: Command::call(config.namespace, "getCommandQueue").into_script(),
        }
    }

    /// Whether `url` is the notification signal.
    pub fn is_signal(&self, url: &str) -> bool {
        url.starts_with(self.callback_scheme)
    }

    /// Route a navigation request.
    ///
    /// A signal URL carries nothing; anything after the scheme is logged
    /// and discarded, and the request still counts as a signal.
    pub fn route(&self, request: &NavigationRequest<'_>) -> NavigationRoute {
        if let Some(rest) = request.url.strip_prefix(self.callback_scheme) {
            if !rest.is_empty() {
                log::warn!("discarding data on notification signal URL: {}", request.url);
            }
            NavigationRoute::Callback
        } else if request.kind == NavigationKind::LinkActivated {
            NavigationRoute::Link
        } else {
            NavigationRoute::Passthrough
        }
    }

    /// Fetch all pending notifications and hand them to `deliver` in queue
    /// order. `deliver` always runs once the drain completes, possibly with
    /// an empty batch.
    pub fn drain<F>(&self, deliver: F)
    where
        F: FnOnce(Vec<String>) + 'static,
    {
        self.channel
            .evaluate(&self.drain_command, move |payload| deliver(decode_batch(&payload)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeEngine;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn queue(engine: &Rc<FakeEngine>) -> NotificationQueue {
        NotificationQueue::new(CommandChannel::new(engine.clone()), &EditorConfig::new())
    }

    #[test]
    fn test_parse_fixed_prefixes() {
        assert_eq!(Notification::parse("ready"), Some(Notification::Ready));
        assert_eq!(Notification::parse("input"), Some(Notification::Input));
        assert_eq!(Notification::parse("updateHeight"), Some(Notification::UpdateHeight));
        assert_eq!(Notification::parse("focus"), Some(Notification::Focus));
        assert_eq!(Notification::parse("blur"), Some(Notification::Blur));
    }

    #[test]
    fn test_parse_matches_by_prefix() {
        assert_eq!(Notification::parse("ready/2"), Some(Notification::Ready));
        assert_eq!(Notification::parse("focusin"), Some(Notification::Focus));
    }

    #[test]
    fn test_parse_action() {
        assert_eq!(
            Notification::parse("action/bold"),
            Some(Notification::Action("bold".into()))
        );
        assert_eq!(Notification::parse("action/"), Some(Notification::Action(String::new())));
        assert_eq!(
            Notification::parse("action/a/b"),
            Some(Notification::Action("a/b".into()))
        );
    }

    #[test]
    fn test_parse_unrecognized() {
        assert_eq!(Notification::parse(""), None);
        assert_eq!(Notification::parse("selectionchange"), None);
        assert_eq!(Notification::parse("action"), None);
        assert_eq!(Notification::parse("Ready"), None);
    }

    #[test]
    fn test_decode_batch() {
        assert_eq!(decode_batch(r#"["focus","input","blur"]"#), vec!["focus", "input", "blur"]);
        assert_eq!(decode_batch("[]"), Vec::<String>::new());
        assert!(decode_batch("not json").is_empty());
        assert!(decode_batch(r#"[1, 2]"#).is_empty());
        assert!(decode_batch(r#"{"a":"b"}"#).is_empty());
        assert!(decode_batch("").is_empty());
    }

    #[test]
    fn test_route() {
        let engine = FakeEngine::new();
        let queue = queue(&engine);

        let signal = NavigationRequest::new("re-callback://", NavigationKind::Other);
        assert_eq!(queue.route(&signal), NavigationRoute::Callback);

        // Signal wins even when the engine reports it as a link click.
        let signal = NavigationRequest::new("re-callback://x", NavigationKind::LinkActivated);
        assert_eq!(queue.route(&signal), NavigationRoute::Callback);

        let link = NavigationRequest::new("https://example.com", NavigationKind::LinkActivated);
        assert_eq!(queue.route(&link), NavigationRoute::Link);

        let bootstrap = NavigationRequest::new("about:blank", NavigationKind::Other);
        assert_eq!(queue.route(&bootstrap), NavigationRoute::Passthrough);
    }

    #[test]
    fn test_drain_delivers_batch_in_order() {
        let engine = FakeEngine::new();
        engine.respond("RE.getCommandQueue", r#"["ready","action/save"]"#);

        let delivered = Rc::new(RefCell::new(Vec::new()));
        {
            let delivered = delivered.clone();
            queue(&engine).drain(move |batch| delivered.borrow_mut().extend(batch));
        }

        assert_eq!(engine.scripts(), vec!["RE.getCommandQueue()"]);
        assert_eq!(*delivered.borrow(), vec!["ready", "action/save"]);
    }

    #[test]
    fn test_drain_malformed_delivers_empty_batch() {
        let engine = FakeEngine::new();
        engine.respond("RE.getCommandQueue", "not json");

        let delivered = Rc::new(RefCell::new(None));
        {
            let delivered = delivered.clone();
            queue(&engine).drain(move |batch| *delivered.borrow_mut() = Some(batch));
        }

        assert_eq!(*delivered.borrow(), Some(Vec::new()));
    }
}
