//! Tally mark grid geometry.
//!
//! Marks sit on a five-column grid, one row per bundle of five. The fifth
//! slot of each row is the diagonal bundle stroke crossing the four ticks.

use serde::{Deserialize, Serialize};

pub const MARKS_PER_BUNDLE: usize = 5;

/// True for the 5th, 10th, 15th... mark (zero-based index 4, 9, 14...).
pub fn is_bundle_index(index: usize) -> bool {
    (index + 1) % MARKS_PER_BUNDLE == 0
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub from: Point,
    pub to: Point,
}

impl Line {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            from: Point::new(x1, y1),
            to: Point::new(x2, y2),
        }
    }

    pub fn length(&self) -> f64 {
        (self.to.x - self.from.x).hypot(self.to.y - self.from.y)
    }
}

/// Axis-aligned box in page or container coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkKind {
    Tick,
    Bundle,
}

impl MarkKind {
    pub fn for_index(index: usize) -> Self {
        if is_bundle_index(index) {
            MarkKind::Bundle
        } else {
            MarkKind::Tick
        }
    }

    /// CSS class carried by the rendered mark.
    pub fn class(self) -> &'static str {
        match self {
            MarkKind::Tick => "vertical",
            MarkKind::Bundle => "diagonal",
        }
    }
}

/// Grid constants for tally marks. Defaults reproduce the published page.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TallyLayout {
    pub scale: f64,
    pub base_x: f64,
    pub spacing: f64,
    pub row_pitch: f64,
    pub tick_length: f64,
    pub tick_top: f64,    // y offset of a tick's top end within its row
    pub bundle_top: f64,  // y offset of the bundle stroke's start within its row
    pub overhang: f64,    // how far the bundle stroke reaches past the outer ticks
}

impl Default for TallyLayout {
    fn default() -> Self {
        Self {
            scale: 1.25,
            base_x: 20.0,
            spacing: 18.0,
            row_pitch: 30.0,
            tick_length: 25.0,
            tick_top: 15.0,
            bundle_top: 12.0,
            overhang: 5.0,
        }
    }
}

impl TallyLayout {
    pub fn column(index: usize) -> usize {
        index % MARKS_PER_BUNDLE
    }

    pub fn row(index: usize) -> usize {
        index / MARKS_PER_BUNDLE
    }

    /// Endpoints of the mark at `index`: a vertical tick, or for bundle slots
    /// a diagonal spanning the whole row.
    pub fn mark_line(&self, index: usize) -> (MarkKind, Line) {
        let row_y = Self::row(index) as f64 * self.row_pitch * self.scale;
        let len = self.tick_length * self.scale;
        match MarkKind::for_index(index) {
            MarkKind::Bundle => {
                let x1 = self.base_x - self.overhang;
                let x2 = self.base_x
                    + (MARKS_PER_BUNDLE - 1) as f64 * self.spacing * self.scale
                    + self.overhang;
                let y1 = row_y + self.bundle_top;
                (MarkKind::Bundle, Line::new(x1, y1, x2, y1 + len))
            }
            MarkKind::Tick => {
                let x = self.base_x + Self::column(index) as f64 * self.spacing * self.scale;
                let y1 = row_y + self.tick_top;
                (MarkKind::Tick, Line::new(x, y1, x, y1 + len))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_predicate() {
        let bundles: Vec<usize> = (0..15).filter(|&i| is_bundle_index(i)).collect();
        assert_eq!(bundles, vec![4, 9, 14]);
        assert!(!is_bundle_index(0));
        assert!(!is_bundle_index(3));
    }

    #[test]
    fn test_tick_positions_match_page() {
        let l = TallyLayout::default();
        let (kind, line) = l.mark_line(0);
        assert_eq!(kind, MarkKind::Tick);
        assert_eq!(line, Line::new(20.0, 15.0, 20.0, 46.25));

        // Second row, third column.
        let (_, line) = l.mark_line(7);
        assert!((line.from.x - (20.0 + 2.0 * 18.0 * 1.25)).abs() < 1e-9);
        assert!((line.from.y - (37.5 + 15.0)).abs() < 1e-9);
    }

    #[test]
    fn test_bundle_spans_row() {
        let l = TallyLayout::default();
        let (kind, line) = l.mark_line(9);
        assert_eq!(kind, MarkKind::Bundle);
        assert_eq!(line.from.x, 15.0);
        assert!((line.to.x - (20.0 + 90.0 + 5.0)).abs() < 1e-9);
        assert!((line.from.y - (37.5 + 12.0)).abs() < 1e-9);
        assert!((line.to.y - line.from.y - 31.25).abs() < 1e-9);
    }
}
