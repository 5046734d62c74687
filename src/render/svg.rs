//! Mapping from [`Drawable`] to SVG element tag and attributes.

use super::{Drawable, Shape};

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Tag name plus attributes for one SVG element.
#[derive(Clone, Debug, PartialEq)]
pub struct SvgNode {
    pub tag: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub classes: Vec<&'static str>,
}

impl SvgNode {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }
}

pub fn to_svg(d: &Drawable) -> SvgNode {
    let mut attrs: Vec<(&'static str, String)> = Vec::with_capacity(8);
    let tag = match &d.shape {
        Shape::Line(l) => {
            attrs.push(("x1", num(l.from.x)));
            attrs.push(("y1", num(l.from.y)));
            attrs.push(("x2", num(l.to.x)));
            attrs.push(("y2", num(l.to.y)));
            "line"
        }
        Shape::Circle { center, diameter } => {
            attrs.push(("cx", num(center.x)));
            attrs.push(("cy", num(center.y)));
            attrs.push(("r", num(diameter / 2.0)));
            "circle"
        }
        Shape::Path(data) => {
            attrs.push(("d", data.clone()));
            "path"
        }
    };
    attrs.push(("stroke", d.stroke.color.clone()));
    attrs.push(("stroke-width", num(d.stroke.width)));
    attrs.push(("stroke-linecap", "round".to_string()));
    // Lines ignore fill, open sketch paths must not be filled.
    attrs.push((
        "fill",
        d.stroke.fill.clone().unwrap_or_else(|| "none".to_string()),
    ));
    SvgNode {
        tag,
        attrs,
        classes: d.classes.clone(),
    }
}

fn num(v: f64) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}
