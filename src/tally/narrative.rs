//! A narrative session: the step tracker driving a score store.

use super::{
    Contestant, Direction, ScoreStore, StepEvent, StepTracker, TallyBoard, TallyChange, Timeline,
};
use crate::render::{Renderer, TallyLayout};

pub struct Narrative<B: TallyBoard> {
    tracker: StepTracker,
    store: ScoreStore<B>,
}

impl<B: TallyBoard> Narrative<B> {
    pub fn new(timeline: Timeline, board: B, renderer: Box<dyn Renderer>, layout: TallyLayout) -> Self {
        Self {
            tracker: StepTracker::new(timeline),
            store: ScoreStore::new(board, renderer, layout),
        }
    }

    pub fn tracker(&self) -> &StepTracker {
        &self.tracker
    }

    pub fn store(&self) -> &ScoreStore<B> {
        &self.store
    }

    pub fn score(&self, contestant: Contestant) -> u32 {
        self.tracker.score(contestant)
    }

    pub fn step_enter(&mut self, step: u32, direction: Direction) -> Vec<TallyChange> {
        self.handle(StepEvent::Enter { step, direction })
    }

    pub fn step_exit(&mut self, step: u32, direction: Direction) -> Vec<TallyChange> {
        self.handle(StepEvent::Exit { step, direction })
    }

    /// Reduce the tracker, then mirror each change onto the store. Runs to
    /// completion before returning, so readers never see partial counts.
    pub fn handle(&mut self, event: StepEvent) -> Vec<TallyChange> {
        let changes = self.tracker.handle(event);
        for change in &changes {
            self.store.apply(change);
        }
        changes
    }

    pub fn reset(&mut self) {
        self.tracker.reset();
        self.store.reset();
    }
}
