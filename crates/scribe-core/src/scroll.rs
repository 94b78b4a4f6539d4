//! Caret visibility scrolling.
//!
//! After every input the host scrolls its viewport so the caret stays in
//! view. The geometry comes from three sequential queries: client height,
//! then line height, then the caret's Y position relative to the visible
//! area. Each query is issued only after the previous one has answered.

use crate::editor::RichEditor;
use crate::value::canonical_int;

/// A point in viewport coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A size in viewport coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// The host's scrollable container around the editor content.
pub trait Viewport {
    /// Visible frame size.
    fn frame(&self) -> Size;

    /// Current scroll offset.
    fn content_offset(&self) -> Point;

    /// Scroll to `offset`.
    fn set_content_offset(&self, offset: Point);

    /// Update the scrollable content size.
    fn set_content_size(&self, size: Size);
}

/// Results of the three geometry queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaretMetrics {
    /// Content client height, or the frame height if the content could not
    /// report one.
    pub client_height: f64,
    pub line_height: f64,
    /// Caret Y relative to the top of the visible area. Negative when the
    /// caret is above it.
    pub caret_y: f64,
}

/// What the viewport should do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollPlan {
    /// Always applied.
    pub content_size: Size,
    /// `None` when the caret is already visible.
    pub offset: Option<Point>,
}

/// Decide how to scroll so the caret is visible.
pub fn plan_caret_scroll(
    metrics: &CaretMetrics,
    frame: Size,
    offset: Point,
    caret_padding: u32,
) -> ScrollPlan {
    let viewport_height = frame.height;
    let content_size = Size::new(frame.width, metrics.client_height.max(viewport_height));
    let cursor_height = metrics.line_height - f64::from(caret_padding);

    let offset = if metrics.caret_y + cursor_height > viewport_height {
        let y = (metrics.caret_y + metrics.line_height) - viewport_height + offset.y;
        Some(Point::new(0.0, y))
    } else if metrics.caret_y < 0.0 {
        Some(Point::new(offset.x, (offset.y + metrics.caret_y).max(0.0)))
    } else {
        None
    };

    ScrollPlan { content_size, offset }
}

impl RichEditor {
    /// Run the three-stage pipeline and apply the resulting scroll.
    pub(crate) fn scroll_caret_to_visible(&self) {
        let weak = self.downgrade();
        self.client_height(move |client_height| {
            let Some(editor) = weak.upgrade() else { return };
            let weak = editor.downgrade();
            editor.line_height(move |line_height| {
                let Some(editor) = weak.upgrade() else { return };
                let weak = editor.downgrade();
                editor.relative_caret_y(move |caret_y| {
                    let Some(editor) = weak.upgrade() else { return };
                    editor.apply_caret_scroll(&CaretMetrics {
                        client_height,
                        line_height: f64::from(line_height),
                        caret_y,
                    });
                });
            });
        });
    }

    /// Stage 1: content client height, falling back to the frame height.
    fn client_height<F>(&self, done: F)
    where
        F: FnOnce(f64) + 'static,
    {
        let viewport = self.inner.viewport.clone();
        self.inner
            .channel
            .evaluate(self.command("getClientHeight"), move |result| {
                let height = canonical_int(&result)
                    .map_or_else(|| viewport.frame().height, |h| h as f64);
                done(height);
            });
    }

    /// Stage 3: caret Y relative to the visible area. Zero if unknown.
    fn relative_caret_y<F>(&self, done: F)
    where
        F: FnOnce(f64) + 'static,
    {
        self.inner
            .channel
            .evaluate(self.command("getRelativeCaretYPosition"), move |result| {
                done(canonical_int(&result).unwrap_or(0) as f64);
            });
    }

    fn apply_caret_scroll(&self, metrics: &CaretMetrics) {
        let viewport = &self.inner.viewport;
        let plan = plan_caret_scroll(
            metrics,
            viewport.frame(),
            viewport.content_offset(),
            self.inner.config.caret_padding,
        );

        viewport.set_content_size(plan.content_size);
        if let Some(offset) = plan.offset {
            log::debug!("scrolling caret into view: y={}", offset.y);
            viewport.set_content_offset(offset);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::testing::{FakeEngine, FakeViewport};

    fn metrics(client_height: f64, line_height: f64, caret_y: f64) -> CaretMetrics {
        CaretMetrics { client_height, line_height, caret_y }
    }

    #[test]
    fn test_scroll_down_when_caret_below() {
        let plan = plan_caret_scroll(
            &metrics(400.0, 28.0, 290.0),
            Size::new(320.0, 300.0),
            Point::new(0.0, 50.0),
            4,
        );
        assert_eq!(plan.content_size, Size::new(320.0, 400.0));
        assert_eq!(plan.offset, Some(Point::new(0.0, 68.0)));
    }

    #[test]
    fn test_scroll_up_clamps_to_zero() {
        let plan = plan_caret_scroll(
            &metrics(400.0, 28.0, -10.0),
            Size::new(320.0, 300.0),
            Point::new(7.0, 5.0),
            4,
        );
        assert_eq!(plan.offset, Some(Point::new(7.0, 0.0)));
    }

    #[test]
    fn test_scroll_up_partial() {
        let plan = plan_caret_scroll(
            &metrics(900.0, 28.0, -30.0),
            Size::new(320.0, 300.0),
            Point::new(0.0, 100.0),
            4,
        );
        assert_eq!(plan.offset, Some(Point::new(0.0, 70.0)));
    }

    #[test]
    fn test_no_scroll_when_visible() {
        let plan = plan_caret_scroll(
            &metrics(400.0, 28.0, 276.0),
            Size::new(320.0, 300.0),
            Point::new(0.0, 50.0),
            4,
        );
        // 276 + 24 == 300 is still visible.
        assert_eq!(plan.offset, None);
        assert_eq!(plan.content_size, Size::new(320.0, 400.0));
    }

    #[test]
    fn test_content_size_never_below_frame() {
        let plan = plan_caret_scroll(
            &metrics(120.0, 28.0, 0.0),
            Size::new(320.0, 300.0),
            Point::default(),
            4,
        );
        assert_eq!(plan.content_size, Size::new(320.0, 300.0));
        assert_eq!(plan.offset, None);
    }

    #[test]
    fn test_pipeline_queries_in_sequence() {
        let engine = FakeEngine::new();
        engine.set_deferred(true);
        engine.respond("RE.getClientHeight", 400);
        engine.respond("RE.getRelativeCaretYPosition", 290);
        let viewport = FakeViewport::new(Size::new(320.0, 300.0), Point::new(0.0, 50.0));
        let editor = RichEditor::new(engine.clone(), viewport.clone(), EditorConfig::new());

        editor.scroll_caret_to_visible();
        assert_eq!(engine.scripts(), vec!["RE.getClientHeight()"]);

        // Not loaded: the line height stage answers with the default
        // without a round trip, so the caret query follows immediately.
        engine.step();
        assert_eq!(
            engine.scripts(),
            vec!["RE.getClientHeight()", "RE.getRelativeCaretYPosition()"]
        );
        assert_eq!(viewport.offset(), Point::new(0.0, 50.0));

        engine.step();
        assert_eq!(viewport.offset(), Point::new(0.0, 68.0));
        assert_eq!(viewport.content_size(), Some(Size::new(320.0, 400.0)));
    }

    #[test]
    fn test_pipeline_uses_host_line_height() {
        let engine = FakeEngine::new();
        engine.respond("RE.getClientHeight", 400);
        engine.respond("RE.getRelativeCaretYPosition", 270);
        let viewport = FakeViewport::new(Size::new(320.0, 300.0), Point::new(0.0, 50.0));
        let editor = RichEditor::new(engine.clone(), viewport.clone(), EditorConfig::new());

        // 270 + (28 - 4) fits; 270 + (40 - 4) does not.
        editor.scroll_caret_to_visible();
        assert!(viewport.offsets().is_empty());

        editor.set_line_height(40);
        editor.scroll_caret_to_visible();
        assert_eq!(viewport.offset(), Point::new(0.0, 60.0));
    }

    #[test]
    fn test_pipeline_falls_back_to_frame_height() {
        let engine = FakeEngine::new();
        engine.respond("RE.getRelativeCaretYPosition", 10);
        let viewport = FakeViewport::new(Size::new(200.0, 500.0), Point::default());
        let editor = RichEditor::new(engine.clone(), viewport.clone(), EditorConfig::new());

        editor.scroll_caret_to_visible();

        assert_eq!(viewport.content_size(), Some(Size::new(200.0, 500.0)));
        assert!(viewport.offsets().is_empty());
    }

    #[test]
    fn test_pipeline_stops_when_editor_dropped() {
        let engine = FakeEngine::new();
        engine.set_deferred(true);
        let viewport = FakeViewport::new(Size::new(320.0, 300.0), Point::default());
        let editor = RichEditor::new(engine.clone(), viewport.clone(), EditorConfig::new());

        editor.scroll_caret_to_visible();
        drop(editor);
        engine.flush();

        assert_eq!(engine.scripts(), vec!["RE.getClientHeight()"]);
        assert_eq!(viewport.content_size(), None);
    }
}
