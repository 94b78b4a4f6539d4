//! Test doubles for the engine, viewport and delegate seams.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use crate::delegate::EditorDelegate;
use crate::engine::{ScriptCallback, ScriptEngine};
use crate::error::{EvalError, Result};
use crate::scroll::{Point, Size, Viewport};
use crate::value::ScriptValue;

/// Scripted engine. Answers by command prefix; the most recent matching
/// rule wins, and unmatched commands answer with the absent value.
#[derive(Default)]
pub(crate) struct FakeEngine {
    rules: RefCell<Vec<(String, Result<ScriptValue>)>>,
    scripts: RefCell<Vec<String>>,
    deferred: Cell<bool>,
    pending: RefCell<VecDeque<(ScriptCallback, Result<ScriptValue>)>>,
}

impl FakeEngine {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub(crate) fn respond(&self, prefix: &str, value: impl Into<ScriptValue>) {
        self.rules.borrow_mut().push((prefix.to_owned(), Ok(value.into())));
    }

    pub(crate) fn fail(&self, prefix: &str, error: EvalError) {
        self.rules.borrow_mut().push((prefix.to_owned(), Err(error)));
    }

    /// Hold completions until [`step`](Self::step) or [`flush`](Self::flush).
    pub(crate) fn set_deferred(&self, deferred: bool) {
        self.deferred.set(deferred);
    }

    /// Complete the oldest pending evaluation. Returns whether one ran.
    pub(crate) fn step(&self) -> bool {
        let next = self.pending.borrow_mut().pop_front();
        match next {
            Some((done, result)) => {
                done(result);
                true
            }
            None => false,
        }
    }

    /// Complete pending evaluations, including ones they submit, until
    /// none are left.
    pub(crate) fn flush(&self) {
        while self.step() {}
    }

    pub(crate) fn scripts(&self) -> Vec<String> {
        self.scripts.borrow().clone()
    }

    pub(crate) fn clear_scripts(&self) {
        self.scripts.borrow_mut().clear();
    }

    pub(crate) fn count(&self, prefix: &str) -> usize {
        self.scripts.borrow().iter().filter(|s| s.starts_with(prefix)).count()
    }

    fn answer(&self, script: &str) -> Result<ScriptValue> {
        self.rules
            .borrow()
            .iter()
            .rev()
            .find(|(prefix, _)| script.starts_with(prefix.as_str()))
            .map_or(Ok(ScriptValue::Absent), |(_, result)| result.clone())
    }
}

impl ScriptEngine for FakeEngine {
    fn evaluate_script(&self, script: &str, done: ScriptCallback) {
        self.scripts.borrow_mut().push(script.to_owned());
        let result = self.answer(script);
        if self.deferred.get() {
            self.pending.borrow_mut().push_back((done, result));
        } else {
            done(result);
        }
    }
}

/// Viewport with a fixed frame that records what the editor does to it.
pub(crate) struct FakeViewport {
    frame: Size,
    offset: Cell<Point>,
    content_size: Cell<Option<Size>>,
    offsets: RefCell<Vec<Point>>,
}

impl FakeViewport {
    pub(crate) fn new(frame: Size, offset: Point) -> Rc<Self> {
        Rc::new(Self {
            frame,
            offset: Cell::new(offset),
            content_size: Cell::new(None),
            offsets: RefCell::new(Vec::new()),
        })
    }

    pub(crate) fn offset(&self) -> Point {
        self.offset.get()
    }

    pub(crate) fn set_offset(&self, offset: Point) {
        self.offset.set(offset);
    }

    pub(crate) fn content_size(&self) -> Option<Size> {
        self.content_size.get()
    }

    /// Offsets the editor scrolled to, oldest first.
    pub(crate) fn offsets(&self) -> Vec<Point> {
        self.offsets.borrow().clone()
    }
}

impl Viewport for FakeViewport {
    fn frame(&self) -> Size {
        self.frame
    }

    fn content_offset(&self) -> Point {
        self.offset.get()
    }

    fn set_content_offset(&self, offset: Point) {
        self.offset.set(offset);
        self.offsets.borrow_mut().push(offset);
    }

    fn set_content_size(&self, size: Size) {
        self.content_size.set(Some(size));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    Loaded,
    Height(i64),
    Content(String),
    Focus,
    Blur,
    Action(String),
}

/// Delegate that records every callback.
#[derive(Default)]
pub(crate) struct RecordingDelegate {
    events: RefCell<Vec<Event>>,
    allow_links: Cell<bool>,
    link_requests: RefCell<Vec<String>>,
}

impl RecordingDelegate {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub(crate) fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub(crate) fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    pub(crate) fn allow_links(&self, allow: bool) {
        self.allow_links.set(allow);
    }

    pub(crate) fn link_requests(&self) -> Vec<String> {
        self.link_requests.borrow().clone()
    }

    fn record(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }
}

impl EditorDelegate for RecordingDelegate {
    fn on_loaded(&self) {
        self.record(Event::Loaded);
    }

    fn on_height_changed(&self, height: i64) {
        self.record(Event::Height(height));
    }

    fn on_content_changed(&self, html: &str) {
        self.record(Event::Content(html.to_owned()));
    }

    fn on_focus(&self) {
        self.record(Event::Focus);
    }

    fn on_blur(&self) {
        self.record(Event::Blur);
    }

    fn should_interact_with(&self, url: &str) -> bool {
        self.link_requests.borrow_mut().push(url.to_owned());
        self.allow_links.get()
    }

    fn on_custom_action(&self, name: &str) {
        self.record(Event::Action(name.to_owned()));
    }
}
