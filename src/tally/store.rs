//! Score store: per-contestant mark sequences and their rendered output.

use log::{debug, warn};

use super::{Contestant, PerContestant, TallyChange};
use crate::render::{draw_mark, Drawable, MarkKind, Renderer, TallyLayout};

/// Output surface for marks and score readouts.
///
/// `append` returns `None` when the surface is unavailable (missing container);
/// the mark is still counted so the store stays in step with the tracker.
pub trait TallyBoard {
    type Handle;

    fn append(&mut self, contestant: Contestant, mark: &Drawable) -> Option<Self::Handle>;
    fn remove(&mut self, contestant: Contestant, handle: Self::Handle);
    fn show_score(&mut self, contestant: Contestant, score: u32);
    fn clear(&mut self, contestant: Contestant);
}

/// One rendered tally mark.
#[derive(Debug)]
pub struct Mark<H> {
    pub slot: usize,
    pub kind: MarkKind,
    pub drawable: Drawable,
    pub handle: Option<H>,
}

pub struct ScoreStore<B: TallyBoard> {
    board: B,
    renderer: Box<dyn Renderer>,
    layout: TallyLayout,
    marks: PerContestant<Vec<Mark<B::Handle>>>,
}

impl<B: TallyBoard> ScoreStore<B> {
    pub fn new(board: B, renderer: Box<dyn Renderer>, layout: TallyLayout) -> Self {
        Self {
            board,
            renderer,
            layout,
            marks: PerContestant::new(Vec::new(), Vec::new()),
        }
    }

    pub fn score(&self, contestant: Contestant) -> u32 {
        self.marks[contestant].len() as u32
    }

    pub fn marks(&self, contestant: Contestant) -> &[Mark<B::Handle>] {
        &self.marks[contestant]
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }

    /// Render and append the contestant's next mark.
    pub fn add_mark(&mut self, contestant: Contestant) -> &Mark<B::Handle> {
        let slot = self.marks[contestant].len();
        let drawable = draw_mark(self.renderer.as_ref(), &self.layout, slot);
        let handle = self.board.append(contestant, &drawable);
        if handle.is_none() {
            debug!("{contestant} mark {slot} counted without a rendered element");
        }
        let seq = &mut self.marks[contestant];
        seq.push(Mark {
            slot,
            kind: MarkKind::for_index(slot),
            drawable,
            handle,
        });
        self.board.show_score(contestant, seq.len() as u32);
        &self.marks[contestant][slot]
    }

    /// Drop the contestant's most recent mark. Empty sequences are left alone.
    pub fn remove_mark(&mut self, contestant: Contestant) -> bool {
        let Some(mark) = self.marks[contestant].pop() else {
            debug!("remove_mark({contestant}) on an empty tally");
            return false;
        };
        if let Some(h) = mark.handle {
            self.board.remove(contestant, h);
        }
        let score = self.score(contestant);
        self.board.show_score(contestant, score);
        true
    }

    pub fn apply(&mut self, change: &TallyChange) {
        match *change {
            TallyChange::Added {
                contestant, slot, ..
            } => {
                let added = self.add_mark(contestant).slot;
                if added != slot {
                    warn!("{contestant} mark landed in slot {added}, tracker expected {slot}");
                }
            }
            TallyChange::Removed { contestant, .. } => {
                self.remove_mark(contestant);
            }
        }
    }

    pub fn reset(&mut self) {
        for c in Contestant::ALL {
            self.marks[c].clear();
            self.board.clear(c);
            self.board.show_score(c, 0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::PlainRenderer;

    #[derive(Default)]
    struct CountingBoard {
        next: u32,
        live: Vec<(Contestant, u32)>,
        shown: PerContestant<u32>,
        offline: bool,
    }

    impl TallyBoard for CountingBoard {
        type Handle = u32;

        fn append(&mut self, c: Contestant, _mark: &Drawable) -> Option<u32> {
            if self.offline {
                return None;
            }
            self.next += 1;
            self.live.push((c, self.next));
            Some(self.next)
        }

        fn remove(&mut self, c: Contestant, h: u32) {
            self.live.retain(|&(lc, lh)| !(lc == c && lh == h));
        }

        fn show_score(&mut self, c: Contestant, score: u32) {
            self.shown[c] = score;
        }

        fn clear(&mut self, c: Contestant) {
            self.live.retain(|&(lc, _)| lc != c);
        }
    }

    fn store() -> ScoreStore<CountingBoard> {
        ScoreStore::new(
            CountingBoard::default(),
            Box::new(PlainRenderer),
            TallyLayout::default(),
        )
    }

    #[test]
    fn test_fifth_mark_is_bundle() {
        let mut s = store();
        let kinds: Vec<MarkKind> = (0..6)
            .map(|_| s.add_mark(Contestant::Rats).kind)
            .collect();
        assert_eq!(kinds[3], MarkKind::Tick);
        assert_eq!(kinds[4], MarkKind::Bundle);
        assert_eq!(kinds[5], MarkKind::Tick);
        assert_eq!(s.board().shown[Contestant::Rats], 6);
    }

    #[test]
    fn test_remove_on_empty_is_noop() {
        let mut s = store();
        assert!(!s.remove_mark(Contestant::NewYorkers));
        assert_eq!(s.score(Contestant::NewYorkers), 0);
    }

    #[test]
    fn test_remove_takes_own_last_mark() {
        let mut s = store();
        s.add_mark(Contestant::NewYorkers);
        s.add_mark(Contestant::Rats);
        assert!(s.remove_mark(Contestant::NewYorkers));
        assert_eq!(s.board().live, vec![(Contestant::Rats, 2)]);
        assert_eq!(s.score(Contestant::Rats), 1);
    }

    #[test]
    fn test_missing_surface_still_counts() {
        let mut s = store();
        s.board_mut().offline = true;
        assert!(s.add_mark(Contestant::Rats).handle.is_none());
        assert_eq!(s.score(Contestant::Rats), 1);
        assert!(s.remove_mark(Contestant::Rats));
        assert_eq!(s.score(Contestant::Rats), 0);
    }

    #[test]
    fn test_reset_clears_board() {
        let mut s = store();
        s.add_mark(Contestant::Rats);
        s.add_mark(Contestant::NewYorkers);
        s.reset();
        assert!(s.board().live.is_empty());
        assert_eq!(s.board().shown, PerContestant::new(0, 0));
        assert!(s.marks(Contestant::Rats).is_empty());
    }
}
