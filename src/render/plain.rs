//! Exact-geometry backend: straight `<line>` and `<circle>` primitives.

use super::{Drawable, Line, Point, Renderer, Shape, Stroke};

#[derive(Clone, Copy, Debug, Default)]
pub struct PlainRenderer;

impl Renderer for PlainRenderer {
    fn line(&self, line: Line, stroke: &Stroke) -> Drawable {
        Drawable {
            shape: Shape::Line(line),
            stroke: stroke.clone(),
            classes: Vec::new(),
        }
    }

    fn circle(&self, center: Point, diameter: f64, stroke: &Stroke) -> Drawable {
        Drawable {
            shape: Shape::Circle { center, diameter },
            stroke: stroke.clone(),
            classes: Vec::new(),
        }
    }

    fn name(&self) -> &'static str {
        "plain"
    }
}
