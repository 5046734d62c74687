//! Timeline spine and dots, planned from measured layout boxes.

use serde::{Deserialize, Serialize};

use super::{Drawable, Line, Point, Rect, Renderer, SketchOptions, Stroke};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimelineStyle {
    pub line_color: String,
    pub line_width: f64,
    pub active_color: String,
    pub idle_fill: String,
    pub dot_stroke_width: f64,
    pub active_diameter: f64,
    pub idle_diameter: f64,
    pub sketch: SketchOptions,
    pub initial_delay_ms: i32, // after the first animation frame
    pub resize_delay_ms: i32,
}

impl Default for TimelineStyle {
    fn default() -> Self {
        Self {
            line_color: "#bdc3c7".into(),
            line_width: 3.0,
            active_color: "#242424".into(),
            idle_fill: "white".into(),
            dot_stroke_width: 2.0,
            active_diameter: 14.0,
            idle_diameter: 12.0,
            sketch: SketchOptions {
                roughness: 0.8,
                bowing: 1.0,
                passes: 1,
                ..SketchOptions::default()
            },
            initial_delay_ms: 300,
            resize_delay_ms: 100,
        }
    }
}

/// A measured `.event-dot` and whether its event is active.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DotSample {
    pub rect: Rect,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TimelinePlan {
    pub width: f64,
    pub height: f64,
    pub spine: Line,
    pub dots: Vec<(Point, bool)>,
}

impl TimelinePlan {
    pub fn view_box(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }

    pub fn draw(&self, renderer: &dyn Renderer, style: &TimelineStyle) -> Vec<Drawable> {
        let mut out = Vec::with_capacity(self.dots.len() + 1);
        out.push(renderer.line(
            self.spine,
            &Stroke::new(style.line_color.as_str(), style.line_width),
        ));
        for &(center, active) in &self.dots {
            let (diameter, stroke) = if active {
                (
                    style.active_diameter,
                    Stroke::new(style.active_color.as_str(), style.dot_stroke_width)
                        .with_fill(style.active_color.as_str()),
                )
            } else {
                (
                    style.idle_diameter,
                    Stroke::new(style.line_color.as_str(), style.dot_stroke_width)
                        .with_fill(style.idle_fill.as_str()),
                )
            };
            out.push(renderer.circle(center, diameter, &stroke));
        }
        out
    }
}

/// Lay out the spine from the first dot's centre to the last dot's centre,
/// all relative to the container. `None` when there are no dots.
pub fn plan_timeline(
    container: Rect,
    scroll_height: f64,
    dots: &[DotSample],
) -> Option<TimelinePlan> {
    let first = dots.first()?;
    let last = dots.last()?;
    let rel = |r: &Rect| {
        let c = r.center();
        Point::new(c.x - container.left, c.y - container.top)
    };
    let top = rel(&first.rect);
    let bottom = rel(&last.rect);
    Some(TimelinePlan {
        width: container.width,
        height: scroll_height,
        spine: Line::new(top.x, top.y, top.x, bottom.y),
        dots: dots.iter().map(|d| (rel(&d.rect), d.active)).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{PlainRenderer, Shape};

    fn dot(top: f64, active: bool) -> DotSample {
        DotSample {
            rect: Rect::new(110.0, top, 20.0, 20.0),
            active,
        }
    }

    #[test]
    fn test_plan_relative_to_container() {
        let container = Rect::new(100.0, 50.0, 400.0, 900.0);
        let plan = plan_timeline(container, 1200.0, &[dot(60.0, false), dot(560.0, true)]).unwrap();
        assert_eq!(plan.spine, Line::new(20.0, 20.0, 20.0, 520.0));
        assert_eq!(plan.view_box(), "0 0 400 1200");
        assert_eq!(plan.dots[1], (Point::new(20.0, 520.0), true));
    }

    #[test]
    fn test_no_dots_no_plan() {
        assert!(plan_timeline(Rect::default(), 0.0, &[]).is_none());
    }

    #[test]
    fn test_active_dot_is_larger_and_filled() {
        let plan = plan_timeline(
            Rect::new(0.0, 0.0, 100.0, 100.0),
            100.0,
            &[dot(0.0, true), dot(40.0, false)],
        )
        .unwrap();
        let style = TimelineStyle::default();
        let drawn = plan.draw(&PlainRenderer, &style);
        assert_eq!(drawn.len(), 3);
        match (&drawn[1].shape, &drawn[2].shape) {
            (Shape::Circle { diameter: a, .. }, Shape::Circle { diameter: b, .. }) => {
                assert_eq!((*a, *b), (14.0, 12.0));
            }
            other => panic!("unexpected shapes {other:?}"),
        }
        assert_eq!(drawn[1].stroke.fill.as_deref(), Some("#242424"));
        assert_eq!(drawn[2].stroke.fill.as_deref(), Some("white"));
    }
}
