//! Drawable primitives and the renderer capability.
//!
//! A renderer turns geometry into a [`Drawable`]; the web layer turns a
//! `Drawable` into an SVG element. Two backends implement [`Renderer`]: the
//! hand-drawn [`SketchRenderer`] and the exact [`PlainRenderer`]. Callers only
//! see `dyn Renderer`, so the fallback path is the same code path.

use log::warn;
use serde::{Deserialize, Serialize};

mod geometry;
mod plain;
mod sketch;
pub mod svg;
mod timeline;

pub use geometry::{
    is_bundle_index, Line, MarkKind, Point, Rect, TallyLayout, MARKS_PER_BUNDLE,
};
pub use plain::PlainRenderer;
pub use sketch::{SketchOptions, SketchRenderer};
pub use timeline::{plan_timeline, DotSample, TimelinePlan, TimelineStyle};

/// Stroke and fill styling for a primitive.
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
    pub fill: Option<String>,
}

impl Stroke {
    pub fn new(color: impl Into<String>, width: f64) -> Self {
        Self {
            color: color.into(),
            width,
            fill: None,
        }
    }

    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = Some(fill.into());
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Line(Line),
    Circle { center: Point, diameter: f64 },
    /// SVG path data for hand-drawn strokes.
    Path(String),
}

/// Backend-independent output of a renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct Drawable {
    pub shape: Shape,
    pub stroke: Stroke,
    pub classes: Vec<&'static str>,
}

impl Drawable {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| *c == class)
    }
}

/// Stroke used for tally marks; colour follows the surrounding text.
pub fn mark_stroke() -> Stroke {
    Stroke::new("currentColor", 4.0)
}

/// Drawing capability shared by both backends.
pub trait Renderer {
    fn line(&self, line: Line, stroke: &Stroke) -> Drawable;

    fn circle(&self, center: Point, diameter: f64, stroke: &Stroke) -> Drawable;

    fn name(&self) -> &'static str;

    fn draw_tick(&self, line: Line) -> Drawable {
        let mut d = self.line(line, &mark_stroke());
        d.classes.extend(["tally-mark", MarkKind::Tick.class()]);
        d
    }

    fn draw_bundle(&self, line: Line) -> Drawable {
        let mut d = self.line(line, &mark_stroke());
        d.classes.extend(["tally-mark", MarkKind::Bundle.class()]);
        d
    }
}

/// Draw the mark for sequence position `index`.
pub fn draw_mark(renderer: &dyn Renderer, layout: &TallyLayout, index: usize) -> Drawable {
    match layout.mark_line(index) {
        (MarkKind::Bundle, line) => renderer.draw_bundle(line),
        (MarkKind::Tick, line) => renderer.draw_tick(line),
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    #[default]
    Sketch,
    Plain,
}

/// Pick the configured backend; unusable sketch options fall back to plain.
pub fn select_renderer(kind: RendererKind, sketch: SketchOptions) -> Box<dyn Renderer> {
    match kind {
        RendererKind::Plain => Box::new(PlainRenderer),
        RendererKind::Sketch => match SketchRenderer::new(sketch) {
            Ok(r) => Box::new(r),
            Err(e) => {
                warn!("sketch renderer unavailable ({e}); using plain geometry");
                Box::new(PlainRenderer)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_mark_classes() {
        let layout = TallyLayout::default();
        let tick = draw_mark(&PlainRenderer, &layout, 0);
        assert!(tick.has_class("tally-mark") && tick.has_class("vertical"));
        let bundle = draw_mark(&PlainRenderer, &layout, 4);
        assert!(bundle.has_class("diagonal"));
        assert!(!bundle.has_class("vertical"));
    }

    #[test]
    fn test_select_renderer_falls_back() {
        let bad = SketchOptions {
            roughness: f64::NAN,
            ..SketchOptions::default()
        };
        assert_eq!(select_renderer(RendererKind::Sketch, bad).name(), "plain");
        assert_eq!(
            select_renderer(RendererKind::Sketch, SketchOptions::default()).name(),
            "sketch"
        );
        assert_eq!(
            select_renderer(RendererKind::Plain, SketchOptions::default()).name(),
            "plain"
        );
    }
}
