//! Scoring core: timeline steps, the step tracker, and the score store.
//!
//! Everything under this module is DOM-free. The web layer feeds it scroll
//! events and applies the resulting mark changes to SVG; tests drive it
//! directly.

use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use crate::error::NarrativeError;

mod narrative;
mod store;
mod timeline;
mod tracker;

pub use narrative::Narrative;
pub use store::{Mark, ScoreStore, TallyBoard};
pub use timeline::{Timeline, TimelineStep};
pub use tracker::{StepEvent, StepTracker, TallyChange, TallyState};

// --- Contestants -------------------------------------------------------------

/// The two sides of the narrative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Contestant {
    Rats,
    NewYorkers,
}

impl Contestant {
    pub const ALL: [Contestant; 2] = [Contestant::Rats, Contestant::NewYorkers];

    /// Tag used in `data-winner` attributes and element ids.
    pub fn tag(self) -> &'static str {
        match self {
            Contestant::Rats => "rats",
            Contestant::NewYorkers => "newyorkers",
        }
    }

    fn slot(self) -> usize {
        match self {
            Contestant::Rats => 0,
            Contestant::NewYorkers => 1,
        }
    }
}

impl fmt::Display for Contestant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Contestant {
    type Err = NarrativeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "rats" => Ok(Contestant::Rats),
            "newyorkers" => Ok(Contestant::NewYorkers),
            other => Err(NarrativeError::UnknownWinner(other.to_string())),
        }
    }
}

/// One value per contestant, indexable by [`Contestant`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PerContestant<T> {
    values: [T; 2],
}

impl<T> PerContestant<T> {
    pub fn new(rats: T, new_yorkers: T) -> Self {
        Self {
            values: [rats, new_yorkers],
        }
    }
}

impl<T> Index<Contestant> for PerContestant<T> {
    type Output = T;
    fn index(&self, c: Contestant) -> &T {
        &self.values[c.slot()]
    }
}

impl<T> IndexMut<Contestant> for PerContestant<T> {
    fn index_mut(&mut self, c: Contestant) -> &mut T {
        &mut self.values[c.slot()]
    }
}

// --- Scroll direction --------------------------------------------------------

/// Direction reported by the scroll driver when a step boundary is crossed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl FromStr for Direction {
    type Err = NarrativeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            other => Err(NarrativeError::UnknownDirection(other.to_string())),
        }
    }
}
