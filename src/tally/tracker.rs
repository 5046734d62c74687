//! Step tracker: reconciles the processed-step set against the reader's
//! scroll position.
//!
//! The state is a plain value (`TallyState`) reduced by scroll events, so the
//! ordering and idempotence guarantees can be checked without a DOM. Each
//! reduction reports the mark changes it made as `TallyChange`s, which the
//! score store turns into rendered marks.
//!
//! Invariant after every event, for both contestants:
//! `score(c) == sequence(c).len() == |{ s in processed : winner(s) == c }|`.

use std::collections::BTreeSet;

use log::debug;

use super::{Contestant, Direction, PerContestant, Timeline};

/// Boundary crossing reported by the scroll driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepEvent {
    Enter { step: u32, direction: Direction },
    Exit { step: u32, direction: Direction },
}

/// One mark added to or removed from a contestant's sequence.
///
/// `slot` is the zero-based position in that contestant's mark sequence:
/// the new mark's position on add, the vacated last position on remove.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TallyChange {
    Added {
        contestant: Contestant,
        step_index: u32,
        slot: usize,
    },
    Removed {
        contestant: Contestant,
        step_index: u32,
        slot: usize,
    },
}

/// Processed steps plus, per contestant, the steps whose marks are shown in
/// the order they were added.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TallyState {
    processed: BTreeSet<u32>,
    sequences: PerContestant<Vec<u32>>,
}

impl TallyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self, contestant: Contestant) -> u32 {
        self.sequences[contestant].len() as u32
    }

    /// Step indices behind a contestant's marks, oldest mark first.
    pub fn sequence(&self, contestant: Contestant) -> &[u32] {
        &self.sequences[contestant]
    }

    pub fn is_processed(&self, step_index: u32) -> bool {
        self.processed.contains(&step_index)
    }

    pub fn processed(&self) -> impl Iterator<Item = u32> + '_ {
        self.processed.iter().copied()
    }

    /// Pure reduction: the state after `event`, plus the changes that lead there.
    pub fn reduce(&self, timeline: &Timeline, event: StepEvent) -> (TallyState, Vec<TallyChange>) {
        let mut next = self.clone();
        let changes = next.apply(timeline, event);
        (next, changes)
    }

    pub(crate) fn apply(&mut self, timeline: &Timeline, event: StepEvent) -> Vec<TallyChange> {
        match event {
            StepEvent::Enter { step, .. } => self.reconcile_up_to(timeline, step),
            StepEvent::Exit {
                step,
                direction: Direction::Up,
            } => self.unapply(timeline, step).into_iter().collect(),
            // Scores stay put once the reader has scrolled past going down.
            StepEvent::Exit {
                direction: Direction::Down,
                ..
            } => Vec::new(),
        }
    }

    fn reconcile_up_to(&mut self, timeline: &Timeline, current: u32) -> Vec<TallyChange> {
        let mut changes = Vec::new();
        for step in timeline.up_to(current) {
            if !self.processed.insert(step.step_index) {
                continue;
            }
            let seq = &mut self.sequences[step.winner];
            seq.push(step.step_index);
            changes.push(TallyChange::Added {
                contestant: step.winner,
                step_index: step.step_index,
                slot: seq.len() - 1,
            });
        }
        changes
    }

    fn unapply(&mut self, timeline: &Timeline, step_index: u32) -> Option<TallyChange> {
        if !self.processed.contains(&step_index) {
            return None;
        }
        let contestant = timeline.winner(step_index)?;
        let seq = &mut self.sequences[contestant];
        let pos = seq.iter().rposition(|&s| s == step_index)?;
        seq.remove(pos);
        self.processed.remove(&step_index);
        Some(TallyChange::Removed {
            contestant,
            step_index,
            slot: seq.len(),
        })
    }
}

/// Owns the declared timeline, the tally state, and the active step.
#[derive(Clone, Debug)]
pub struct StepTracker {
    timeline: Timeline,
    state: TallyState,
    active: Option<u32>,
}

impl StepTracker {
    pub fn new(timeline: Timeline) -> Self {
        Self {
            timeline,
            state: TallyState::new(),
            active: None,
        }
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn state(&self) -> &TallyState {
        &self.state
    }

    pub fn score(&self, contestant: Contestant) -> u32 {
        self.state.score(contestant)
    }

    /// Step most recently entered; drives the timeline dot highlight.
    pub fn active_step(&self) -> Option<u32> {
        self.active
    }

    pub fn on_step_enter(&mut self, step: u32, direction: Direction) -> Vec<TallyChange> {
        self.handle(StepEvent::Enter { step, direction })
    }

    pub fn on_step_exit(&mut self, step: u32, direction: Direction) -> Vec<TallyChange> {
        self.handle(StepEvent::Exit { step, direction })
    }

    /// Apply every unprocessed step up to and including `current`.
    pub fn reconcile_up_to(&mut self, current: u32) -> Vec<TallyChange> {
        self.state.reconcile_up_to(&self.timeline, current)
    }

    pub fn handle(&mut self, event: StepEvent) -> Vec<TallyChange> {
        if let StepEvent::Enter { step, .. } = event {
            self.active = Some(step);
        }
        let changes = self.state.apply(&self.timeline, event);
        if !changes.is_empty() {
            debug!(
                "{:?} -> {} change(s); rats={} newyorkers={}",
                event,
                changes.len(),
                self.state.score(Contestant::Rats),
                self.state.score(Contestant::NewYorkers)
            );
        }
        changes
    }

    pub fn reset(&mut self) {
        self.state = TallyState::new();
        self.active = None;
    }
}
