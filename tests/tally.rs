// Integration tests (native) for the scoring core.
// These avoid wasm/browser APIs: a recording board stands in for the SVG page.

use rat_tally::render::{
    Drawable, MarkKind, PlainRenderer, SketchOptions, SketchRenderer, TallyLayout,
};
use rat_tally::{
    is_bundle_index, Contestant, Direction, Narrative, StepEvent, TallyBoard, Timeline,
    TimelineStep,
};

use Contestant::{NewYorkers as B, Rats as A};

#[derive(Default)]
struct RecordingBoard {
    next_id: u32,
    rats: Vec<u32>,
    new_yorkers: Vec<u32>,
    rats_shown: u32,
    new_yorkers_shown: u32,
}

impl RecordingBoard {
    fn column(&mut self, c: Contestant) -> &mut Vec<u32> {
        match c {
            Contestant::Rats => &mut self.rats,
            Contestant::NewYorkers => &mut self.new_yorkers,
        }
    }
}

impl TallyBoard for RecordingBoard {
    type Handle = u32;

    fn append(&mut self, c: Contestant, _mark: &Drawable) -> Option<u32> {
        self.next_id += 1;
        let id = self.next_id;
        self.column(c).push(id);
        Some(id)
    }

    fn remove(&mut self, c: Contestant, handle: u32) {
        self.column(c).retain(|&h| h != handle);
    }

    fn show_score(&mut self, c: Contestant, score: u32) {
        match c {
            Contestant::Rats => self.rats_shown = score,
            Contestant::NewYorkers => self.new_yorkers_shown = score,
        }
    }

    fn clear(&mut self, c: Contestant) {
        self.column(c).clear();
    }
}

fn narrative(winners: &[Contestant]) -> Narrative<RecordingBoard> {
    let steps = winners
        .iter()
        .enumerate()
        .map(|(i, &w)| TimelineStep::new(i as u32, w));
    Narrative::new(
        Timeline::new(steps).unwrap(),
        RecordingBoard::default(),
        Box::new(PlainRenderer),
        TallyLayout::default(),
    )
}

fn assert_invariant(n: &Narrative<RecordingBoard>) {
    let state = n.tracker().state();
    for c in Contestant::ALL {
        let in_set = state
            .processed()
            .filter(|&s| n.tracker().timeline().winner(s) == Some(c))
            .count() as u32;
        let board = n.store().board();
        let (drawn, shown) = match c {
            Contestant::Rats => (board.rats.len() as u32, board.rats_shown),
            Contestant::NewYorkers => (board.new_yorkers.len() as u32, board.new_yorkers_shown),
        };
        assert_eq!(n.score(c), in_set, "tracker vs processed set for {c}");
        assert_eq!(n.store().score(c), in_set, "store vs processed set for {c}");
        assert_eq!(drawn, in_set, "rendered marks for {c}");
        assert_eq!(shown, in_set, "displayed score for {c}");
    }
}

const WINNERS: [Contestant; 12] = [A, A, B, A, A, B, B, A, A, A, B, A];

#[test]
fn entering_last_step_in_one_call_matches_scenario() {
    let mut n = narrative(&[A, A, B, A, A]);
    n.step_enter(4, Direction::Down);
    assert_eq!(n.score(A), 4);
    assert_eq!(n.score(B), 1);
    let processed: Vec<u32> = n.tracker().state().processed().collect();
    assert_eq!(processed, vec![0, 1, 2, 3, 4]);

    // A's 4th mark has zero-based index 3: (3 + 1) % 5 != 0, so it is a tick.
    let a_marks = n.store().marks(A);
    assert_eq!(a_marks[3].kind, MarkKind::Tick);
    assert!(a_marks.iter().all(|m| m.kind == MarkKind::Tick));
    assert_invariant(&n);
}

#[test]
fn exit_up_from_single_step_returns_to_zero() {
    let mut n = narrative(&[A, A, B, A, A]);
    // Reader jumps straight to step 2 then backs out of it.
    n.handle(StepEvent::Enter {
        step: 2,
        direction: Direction::Down,
    });
    assert_eq!(n.score(B), 1);
    n.step_exit(2, Direction::Up);
    assert_eq!(n.score(B), 0);
    assert!(!n.tracker().state().is_processed(2));
    assert_invariant(&n);
}

#[test]
fn duplicate_enter_counts_once() {
    let mut n = narrative(&[A, A, B]);
    n.step_enter(2, Direction::Down);
    n.step_enter(2, Direction::Down);
    assert_eq!(n.score(B), 1);
    assert_eq!(n.store().board().new_yorkers.len(), 1);
}

#[test]
fn repeated_non_decreasing_enters_equal_single_max_enter() {
    let mut stepped = narrative(&WINNERS);
    for idx in [0, 0, 2, 3, 3, 7, 7, 9] {
        stepped.step_enter(idx, Direction::Down);
    }
    let mut jumped = narrative(&WINNERS);
    jumped.step_enter(9, Direction::Down);

    assert_eq!(stepped.tracker().state(), jumped.tracker().state());
    for c in Contestant::ALL {
        let a: Vec<MarkKind> = stepped.store().marks(c).iter().map(|m| m.kind).collect();
        let b: Vec<MarkKind> = jumped.store().marks(c).iter().map(|m| m.kind).collect();
        assert_eq!(a, b);
    }
}

#[test]
fn forward_then_reverse_returns_to_empty() {
    let mut n = narrative(&WINNERS);
    let last = WINNERS.len() as u32 - 1;
    for i in 0..=last {
        n.step_enter(i, Direction::Down);
        n.step_exit(i, Direction::Down);
        assert_invariant(&n);
    }
    assert_eq!(n.score(A) + n.score(B), WINNERS.len() as u32);
    for i in (0..=last).rev() {
        n.step_enter(i, Direction::Up);
        n.step_exit(i, Direction::Up);
        assert_invariant(&n);
    }
    assert_eq!(n.tracker().state().processed().count(), 0);
    assert_eq!(n.score(A), 0);
    assert_eq!(n.score(B), 0);
}

#[test]
fn removing_one_side_leaves_the_other_untouched() {
    let mut n = narrative(&[B, A, A, B, A]);
    n.step_enter(4, Direction::Down);
    let rats_before = n.store().board().rats.clone();
    // Step 3 is a New Yorkers step; rats marks were added after it.
    n.step_exit(3, Direction::Up);
    assert_eq!(n.store().board().rats, rats_before);
    assert_eq!(n.score(A), 3);
    assert_eq!(n.score(B), 1);
    assert_invariant(&n);
}

#[test]
fn diagonal_placement_follows_bundle_rule() {
    let winners = [A; 23];
    let mut n = narrative(&winners);
    n.step_enter(22, Direction::Down);
    for (k, m) in n.store().marks(A).iter().enumerate() {
        assert_eq!(m.slot, k);
        assert_eq!(m.kind == MarkKind::Bundle, (k + 1) % 5 == 0, "mark {k}");
        assert_eq!(m.kind == MarkKind::Bundle, is_bundle_index(k));
        assert_eq!(m.drawable.has_class("diagonal"), is_bundle_index(k));
    }
}

#[test]
fn random_scrolling_keeps_invariant() {
    let mut n = narrative(&WINNERS);
    let mut seed: u64 = 0x5EED;
    let mut next = |m: u64| {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        (seed >> 33) % m
    };
    for _ in 0..500 {
        let step = next(WINNERS.len() as u64 + 2) as u32; // includes undeclared steps
        let direction = if next(2) == 0 { Direction::Up } else { Direction::Down };
        if next(2) == 0 {
            n.step_enter(step, direction);
        } else {
            n.step_exit(step, direction);
        }
        assert_invariant(&n);
    }
}

#[test]
fn reset_allows_replay() {
    let mut n = narrative(&WINNERS);
    n.step_enter(11, Direction::Down);
    n.reset();
    assert_invariant(&n);
    assert_eq!(n.tracker().active_step(), None);
    n.step_enter(3, Direction::Down);
    assert_eq!(n.score(A), 3);
    assert_eq!(n.score(B), 1);
    assert_invariant(&n);
}

#[test]
fn sketch_and_plain_backends_agree_on_mark_kinds() {
    let timeline = || {
        Timeline::new(WINNERS.iter().enumerate().map(|(i, &w)| TimelineStep::new(i as u32, w)))
            .unwrap()
    };
    let mut plain = Narrative::new(
        timeline(),
        RecordingBoard::default(),
        Box::new(PlainRenderer),
        TallyLayout::default(),
    );
    let mut sketch = Narrative::new(
        timeline(),
        RecordingBoard::default(),
        Box::new(SketchRenderer::new(SketchOptions::default()).unwrap()),
        TallyLayout::default(),
    );
    plain.step_enter(11, Direction::Down);
    sketch.step_enter(11, Direction::Down);
    for c in Contestant::ALL {
        let p: Vec<_> = plain.store().marks(c).iter().map(|m| (m.slot, m.kind)).collect();
        let s: Vec<_> = sketch.store().marks(c).iter().map(|m| (m.slot, m.kind)).collect();
        assert_eq!(p, s);
    }
}
