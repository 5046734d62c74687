//! Browser glue: reads the timeline from markup, wires the scroll driver to a
//! [`Narrative`], and installs the decorative effects.
//!
//! Scroll callbacks run one at a time on the browser's event loop, so the
//! session lives in a `thread_local!` `RefCell` and every handler borrows it
//! for exactly one event.

use std::cell::RefCell;
use std::rc::Rc;

use log::{error, info, warn};
use web_sys::Document;

mod board;
mod dom;
mod effects;
mod entropy;
mod scroller;
mod timeline;

pub use board::{create_svg_element, SvgBoard};

use crate::config::NarrativeConfig;
use crate::error::{NarrativeError, Result};
use crate::render::select_renderer;
use crate::tally::{Contestant, Narrative, StepEvent, Timeline, TimelineStep};

struct Page {
    narrative: Narrative<SvgBoard>,
    config: Rc<NarrativeConfig>,
}

thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
}

/// Read `data-step` / `data-winner` from every timeline event. Malformed or
/// repeated declarations are skipped with a warning.
fn read_timeline(doc: &Document, selector: &str) -> Result<Timeline> {
    let mut steps: Vec<TimelineStep> = Vec::new();
    for el in dom::query_all(doc, selector) {
        let step = el.get_attribute("data-step").unwrap_or_default();
        let winner = el.get_attribute("data-winner").unwrap_or_default();
        match TimelineStep::from_attributes(&step, &winner) {
            Ok(s) if steps.iter().any(|p| p.step_index == s.step_index) => {
                warn!("{}", NarrativeError::DuplicateStep(s.step_index));
            }
            Ok(s) => steps.push(s),
            Err(e) => warn!("skipping timeline event: {e}"),
        }
    }
    Timeline::new(steps)
}

/// Mark the step with `data-step == active` active and every other step inactive.
fn highlight_step(step_selector: &str, active: u32) {
    let Ok(doc) = dom::document() else { return };
    for el in dom::query_all(&doc, step_selector) {
        let is_active = el
            .get_attribute("data-step")
            .and_then(|v| v.trim().parse::<u32>().ok())
            == Some(active);
        if is_active {
            dom::add_class(&el, "is-active");
        } else {
            dom::remove_class(&el, "is-active");
        }
    }
}

fn dispatch(event: StepEvent) {
    let entered = PAGE.with(|cell| {
        let mut page = cell.borrow_mut();
        let page = page.as_mut()?;
        page.narrative.handle(event);
        if !matches!(event, StepEvent::Enter { .. }) {
            return None;
        }
        let active = page.narrative.tracker().active_step()?;
        Some((active, page.config.clone()))
    });
    // Outside the borrow: highlight and timeline only touch DOM classes.
    if let Some((active, cfg)) = entered {
        highlight_step(&cfg.scroll.step_selector, active);
        timeline::redraw_after(cfg, 0);
    }
}

pub fn start(config: NarrativeConfig) -> Result<()> {
    if is_started() {
        warn!("narrative already started; ignoring repeated start");
        return Ok(());
    }
    let doc = dom::document()?;
    let config = Rc::new(config);

    // Decorative effects first so they work even if the tally cannot start.
    if let Err(e) = effects::install(&doc, config.clone()) {
        warn!("effects partially installed: {e}");
    }
    if let Err(e) = timeline::install(config.clone()) {
        warn!("timeline drawing disabled: {e}");
    }

    let steps = read_timeline(&doc, &config.scroll.event_selector)?;
    info!("narrative has {} timeline steps", steps.len());
    let renderer = select_renderer(config.renderer, config.sketch);
    let narrative = Narrative::new(steps, SvgBoard::attach(&doc), renderer, config.tally);
    PAGE.with(|cell| {
        cell.replace(Some(Page {
            narrative,
            config: config.clone(),
        }))
    });

    scroller::install(&config.scroll, dispatch)
}

fn is_started() -> bool {
    PAGE.with(|cell| cell.borrow().is_some())
}

/// Drive the session directly, for hosts that run their own scroll driver.
pub fn handle(event: StepEvent) -> Result<()> {
    if !is_started() {
        return Err(NarrativeError::Js("narrative not started".into()));
    }
    dispatch(event);
    Ok(())
}

pub fn reset() {
    PAGE.with(|cell| {
        if let Some(page) = cell.borrow_mut().as_mut() {
            page.narrative.reset();
        } else {
            error!("reset requested before start");
        }
    });
}

pub fn score(contestant: Contestant) -> u32 {
    PAGE.with(|cell| {
        cell.borrow()
            .as_ref()
            .map(|p| p.narrative.score(contestant))
            .unwrap_or(0)
    })
}
