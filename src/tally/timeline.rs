//! Immutable step declarations read once from page markup.

use std::collections::BTreeMap;

use super::Contestant;
use crate::error::{NarrativeError, Result};

/// A single declared step: `data-step` + `data-winner` on a `.timeline-event`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimelineStep {
    pub step_index: u32,
    pub winner: Contestant,
}

impl TimelineStep {
    pub fn new(step_index: u32, winner: Contestant) -> Self {
        Self { step_index, winner }
    }

    /// Build a step from raw attribute values as found in the DOM.
    pub fn from_attributes(step: &str, winner: &str) -> Result<Self> {
        let step_index = step
            .trim()
            .parse::<u32>()
            .map_err(|_| NarrativeError::InvalidStep {
                value: step.to_string(),
            })?;
        Ok(Self {
            step_index,
            winner: winner.parse()?,
        })
    }
}

/// All declared steps, keyed and iterated in ascending index order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Timeline {
    steps: BTreeMap<u32, Contestant>,
}

impl Timeline {
    pub fn new(steps: impl IntoIterator<Item = TimelineStep>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for s in steps {
            if map.insert(s.step_index, s.winner).is_some() {
                return Err(NarrativeError::DuplicateStep(s.step_index));
            }
        }
        Ok(Self { steps: map })
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn winner(&self, step_index: u32) -> Option<Contestant> {
        self.steps.get(&step_index).copied()
    }

    /// Steps with `step_index <= current`, lowest index first.
    pub fn up_to(&self, current: u32) -> impl Iterator<Item = TimelineStep> + '_ {
        self.steps
            .range(..=current)
            .map(|(&step_index, &winner)| TimelineStep { step_index, winner })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_attributes() {
        let s = TimelineStep::from_attributes(" 7 ", "newyorkers").unwrap();
        assert_eq!(s, TimelineStep::new(7, Contestant::NewYorkers));
        assert!(matches!(
            TimelineStep::from_attributes("seven", "rats"),
            Err(NarrativeError::InvalidStep { .. })
        ));
        assert!(matches!(
            TimelineStep::from_attributes("-1", "rats"),
            Err(NarrativeError::InvalidStep { .. })
        ));
        assert!(matches!(
            TimelineStep::from_attributes("1", "pigeons"),
            Err(NarrativeError::UnknownWinner(_))
        ));
    }

    #[test]
    fn test_duplicate_rejected() {
        let err = Timeline::new([
            TimelineStep::new(0, Contestant::Rats),
            TimelineStep::new(0, Contestant::NewYorkers),
        ])
        .unwrap_err();
        assert!(matches!(err, NarrativeError::DuplicateStep(0)));
    }

    #[test]
    fn test_up_to_is_ascending_regardless_of_declaration_order() {
        let t = Timeline::new([
            TimelineStep::new(3, Contestant::Rats),
            TimelineStep::new(1, Contestant::NewYorkers),
            TimelineStep::new(2, Contestant::Rats),
            TimelineStep::new(9, Contestant::Rats),
        ])
        .unwrap();
        let idx: Vec<u32> = t.up_to(3).map(|s| s.step_index).collect();
        assert_eq!(idx, vec![1, 2, 3]);
        assert_eq!(t.winner(1), Some(Contestant::NewYorkers));
        assert_eq!(t.winner(4), None);
    }
}
