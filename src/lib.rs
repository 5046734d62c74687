//! Rat Tally core crate.
//!
//! A scroll-driven narrative: as the reader scrolls through the timeline of
//! Rats vs. New Yorkers, hand-drawn tally marks are added and removed so the
//! score always matches the furthest step reached. The scoring core
//! (`tally`, `render`, `effects`) is DOM-free; `web` wires it to the page.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod effects;
pub mod error;
mod logger;
pub mod render;
pub mod tally;
pub mod web;

pub use config::NarrativeConfig;
pub use error::NarrativeError;
pub use render::is_bundle_index;
pub use tally::{
    Contestant, Direction, Narrative, ScoreStore, StepEvent, StepTracker, TallyBoard,
    TallyChange, TallyState, Timeline, TimelineStep,
};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);
}

// -----------------------------------------------------------------------------
// JS entrypoints
// -----------------------------------------------------------------------------

/// Start the page. `config_json` is an optional JSON `NarrativeConfig`.
#[wasm_bindgen]
pub fn start_narrative(config_json: Option<String>) -> std::result::Result<(), JsValue> {
    let config = NarrativeConfig::from_json(config_json.as_deref().unwrap_or(""))?;
    logger::init(config.level_filter());
    web::start(config)?;
    Ok(())
}

/// Clear both tallies and the processed steps (replay from the top).
#[wasm_bindgen]
pub fn reset_tallies() {
    web::reset();
}

/// Current score for `"rats"` or `"newyorkers"`.
#[wasm_bindgen]
pub fn tally_score(contestant: &str) -> std::result::Result<u32, JsValue> {
    Ok(web::score(contestant.parse()?))
}

/// Feed a step-enter from a host-side scroll driver.
#[wasm_bindgen]
pub fn handle_step_enter(step: u32, direction: &str) -> std::result::Result<(), JsValue> {
    web::handle(StepEvent::Enter {
        step,
        direction: direction.parse()?,
    })?;
    Ok(())
}

/// Feed a step-exit from a host-side scroll driver.
#[wasm_bindgen]
pub fn handle_step_exit(step: u32, direction: &str) -> std::result::Result<(), JsValue> {
    web::handle(StepEvent::Exit {
        step,
        direction: direction.parse()?,
    })?;
    Ok(())
}
