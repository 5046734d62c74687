//! Hand-drawn backend.
//!
//! Lines become one or more slightly bowed quadratic strokes with jittered
//! endpoints; circles become a wobbly closed outline. Jitter is seeded from
//! the primitive's own coordinates, so redrawing the same mark yields the same
//! path and removal/re-add during scrolling does not make marks shimmer.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use super::{Drawable, Line, Point, Renderer, Shape, Stroke};
use crate::error::{NarrativeError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SketchOptions {
    pub roughness: f64,
    pub bowing: f64,
    pub max_offset: f64, // endpoint jitter in px at roughness 1.0
    pub passes: u8,      // strokes per line
    pub seed: u32,
}

impl Default for SketchOptions {
    fn default() -> Self {
        Self {
            roughness: 1.2,
            bowing: 1.5,
            max_offset: 2.0,
            passes: 2,
            seed: 1,
        }
    }
}

impl SketchOptions {
    pub fn validate(&self) -> Result<()> {
        if !self.roughness.is_finite() || self.roughness < 0.0 {
            return Err(NarrativeError::Config(format!(
                "sketch roughness must be finite and >= 0, got {}",
                self.roughness
            )));
        }
        if !self.bowing.is_finite() || !self.max_offset.is_finite() || self.max_offset < 0.0 {
            return Err(NarrativeError::Config(
                "sketch bowing/maxOffset must be finite".into(),
            ));
        }
        if !(1..=4).contains(&self.passes) {
            return Err(NarrativeError::Config(format!(
                "sketch passes must be 1..=4, got {}",
                self.passes
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct SketchRenderer {
    opts: SketchOptions,
}

impl SketchRenderer {
    pub fn new(opts: SketchOptions) -> Result<Self> {
        opts.validate()?;
        Ok(Self { opts })
    }

    fn rng_for(&self, points: &[f64]) -> Jitter {
        let mut seed = self.opts.seed as u64 ^ 0x9E37_79B9_7F4A_7C15;
        for p in points {
            seed = seed.rotate_left(13) ^ (p * 100.0).round() as i64 as u64;
        }
        Jitter::new(seed)
    }

    fn stroke_path(&self, line: Line, rng: &mut Jitter, out: &mut String) {
        let offset = self.opts.max_offset * self.opts.roughness;
        let len = line.length();
        let (dx, dy) = (line.to.x - line.from.x, line.to.y - line.from.y);
        // Unit normal for the bow.
        let (nx, ny) = if len > 0.0 { (-dy / len, dx / len) } else { (0.0, 0.0) };
        let bow = self.opts.bowing * self.opts.roughness * len / 200.0;

        let x1 = line.from.x + rng.spread(offset);
        let y1 = line.from.y + rng.spread(offset);
        let x2 = line.to.x + rng.spread(offset);
        let y2 = line.to.y + rng.spread(offset);
        let mid_shift = bow * (0.5 + rng.unit());
        let cx = (line.from.x + line.to.x) / 2.0 + nx * mid_shift + rng.spread(offset * 0.5);
        let cy = (line.from.y + line.to.y) / 2.0 + ny * mid_shift + rng.spread(offset * 0.5);

        let _ = write!(
            out,
            "{}M{:.2} {:.2} Q{:.2} {:.2} {:.2} {:.2}",
            if out.is_empty() { "" } else { " " },
            x1,
            y1,
            cx,
            cy,
            x2,
            y2
        );
    }
}

impl Renderer for SketchRenderer {
    fn line(&self, line: Line, stroke: &Stroke) -> Drawable {
        let mut rng = self.rng_for(&[line.from.x, line.from.y, line.to.x, line.to.y]);
        let mut d = String::new();
        for _ in 0..self.opts.passes {
            self.stroke_path(line, &mut rng, &mut d);
        }
        Drawable {
            shape: Shape::Path(d),
            stroke: stroke.clone(),
            classes: Vec::new(),
        }
    }

    fn circle(&self, center: Point, diameter: f64, stroke: &Stroke) -> Drawable {
        const SEGMENTS: usize = 12;
        let mut rng = self.rng_for(&[center.x, center.y, diameter]);
        let r = diameter / 2.0;
        let wobble = r * 0.06 * self.opts.roughness;
        let start = rng.unit() * std::f64::consts::TAU;
        let mut d = String::new();
        for i in 0..SEGMENTS {
            let a = start + i as f64 / SEGMENTS as f64 * std::f64::consts::TAU;
            let rr = r + rng.spread(wobble);
            let cmd = if i == 0 { 'M' } else { 'L' };
            let _ = write!(
                d,
                "{}{:.2} {:.2} ",
                cmd,
                center.x + rr * a.cos(),
                center.y + rr * a.sin()
            );
        }
        d.push('Z');
        Drawable {
            shape: Shape::Path(d),
            stroke: stroke.clone(),
            classes: Vec::new(),
        }
    }

    fn name(&self) -> &'static str {
        "sketch"
    }
}

/// Small deterministic LCG (Knuth MMIX constants).
struct Jitter {
    state: u64,
}

impl Jitter {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn unit(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.state >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in `[-max, max)`.
    fn spread(&mut self, max: f64) -> f64 {
        (self.unit() * 2.0 - 1.0) * max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{mark_stroke, TallyLayout};

    fn endpoints(d: &str) -> Vec<f64> {
        d.split(|c: char| c == ' ' || c.is_ascii_alphabetic())
            .filter(|s| !s.is_empty())
            .map(|s| s.parse().unwrap())
            .collect()
    }

    #[test]
    fn test_same_line_same_path() {
        let r = SketchRenderer::new(SketchOptions::default()).unwrap();
        let line = Line::new(20.0, 15.0, 20.0, 46.25);
        assert_eq!(r.line(line, &mark_stroke()), r.line(line, &mark_stroke()));
    }

    #[test]
    fn test_jitter_stays_near_geometry() {
        let opts = SketchOptions::default();
        let r = SketchRenderer::new(opts).unwrap();
        let layout = TallyLayout::default();
        for i in 0..12 {
            let (_, line) = layout.mark_line(i);
            let Shape::Path(d) = r.line(line, &mark_stroke()).shape else {
                panic!("sketch lines are paths");
            };
            let v = endpoints(&d);
            assert_eq!(v.len(), 6 * opts.passes as usize);
            let tol = opts.max_offset * opts.roughness + 1e-2;
            for pass in v.chunks(6) {
                assert!((pass[0] - line.from.x).abs() <= tol);
                assert!((pass[1] - line.from.y).abs() <= tol);
                assert!((pass[4] - line.to.x).abs() <= tol);
                assert!((pass[5] - line.to.y).abs() <= tol);
            }
        }
    }

    #[test]
    fn test_zero_roughness_is_exact() {
        let r = SketchRenderer::new(SketchOptions {
            roughness: 0.0,
            passes: 1,
            ..SketchOptions::default()
        })
        .unwrap();
        let Shape::Path(d) = r.line(Line::new(1.0, 2.0, 3.0, 4.0), &mark_stroke()).shape else {
            panic!("sketch lines are paths");
        };
        assert_eq!(d, "M1.00 2.00 Q2.00 3.00 3.00 4.00");
    }

    #[test]
    fn test_circle_is_closed() {
        let r = SketchRenderer::new(SketchOptions::default()).unwrap();
        let d = r.circle(Point::new(10.0, 10.0), 12.0, &Stroke::new("#bdc3c7", 2.0));
        match d.shape {
            Shape::Path(p) => assert!(p.starts_with('M') && p.ends_with('Z')),
            other => panic!("unexpected shape {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_bad_passes() {
        let opts = SketchOptions {
            passes: 0,
            ..SketchOptions::default()
        };
        assert!(SketchRenderer::new(opts).is_err());
    }
}
