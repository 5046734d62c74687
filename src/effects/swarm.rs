//! Rat swarm planning.
//!
//! When the reader reaches the bottom of the page a one-shot swarm of rats
//! scurries across. This module decides when and what to spawn; the web layer
//! creates the `<img>` elements and schedules their removal.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SwarmConfig {
    pub min_rats: u32,
    pub rat_spread: u32,         // extra rats drawn from 0..rat_spread
    pub spawn_interval_ms: i32,
    pub band_vh: f64,            // rats run within the bottom band_vh of the viewport
    pub max_delay_s: f64,
    pub min_duration_s: f64,
    pub duration_spread_s: f64,
    pub cleanup_slack_ms: f64,
    pub trigger_distance_px: f64,
    pub image_src: String,
    pub class_name: String,
    pub keyframes: String,
    pub easing: String,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            min_rats: 15,
            rat_spread: 6,
            spawn_interval_ms: 50,
            band_vh: 5.0,
            max_delay_s: 0.5,
            min_duration_s: 0.8,
            duration_spread_s: 0.7,
            cleanup_slack_ms: 100.0,
            trigger_distance_px: 100.0,
            image_src: "assets/running-rat.png".into(),
            class_name: "rat-swarm-rat".into(),
            keyframes: "ratScurry".into(),
            easing: "cubic-bezier(0.4, 0, 0.6, 1)".into(),
        }
    }
}

/// One rat of the swarm.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RatSpawn {
    pub spawn_at_ms: i32,
    pub bottom_vh: f64,
    pub delay_s: f64,
    pub duration_s: f64,
}

impl RatSpawn {
    pub fn animation(&self, cfg: &SwarmConfig) -> String {
        format!(
            "{} {}s {} {}s forwards",
            cfg.keyframes, self.duration_s, cfg.easing, self.delay_s
        )
    }

    /// Time after spawning at which the element can be dropped.
    pub fn remove_after_ms(&self, cfg: &SwarmConfig) -> i32 {
        ((self.delay_s + self.duration_s) * 1000.0 + cfg.cleanup_slack_ms) as i32
    }
}

/// `rng` yields uniform values in `[0, 1)`.
pub fn plan_swarm(cfg: &SwarmConfig, rng: &mut impl FnMut() -> f64) -> Vec<RatSpawn> {
    let extra = (rng() * cfg.rat_spread as f64).floor() as u32;
    let count = cfg.min_rats + extra.min(cfg.rat_spread.saturating_sub(1));
    (0..count)
        .map(|i| RatSpawn {
            spawn_at_ms: i as i32 * cfg.spawn_interval_ms,
            bottom_vh: rng() * cfg.band_vh,
            delay_s: rng() * cfg.max_delay_s,
            duration_s: cfg.min_duration_s + rng() * cfg.duration_spread_s,
        })
        .collect()
}

pub fn near_bottom(scroll_top: f64, client_height: f64, scroll_height: f64, distance: f64) -> bool {
    scroll_top + client_height >= scroll_height - distance
}

/// One-shot trigger plus the per-frame "ticking" latch for scroll sampling.
#[derive(Clone, Copy, Debug, Default)]
pub struct SwarmTrigger {
    fired: bool,
    ticking: bool,
}

impl SwarmTrigger {
    /// Claim the next animation frame for a scroll check; false if one is pending.
    pub fn begin_tick(&mut self) -> bool {
        if self.ticking {
            return false;
        }
        self.ticking = true;
        true
    }

    pub fn end_tick(&mut self) {
        self.ticking = false;
    }

    /// True exactly once.
    pub fn fire(&mut self) -> bool {
        !std::mem::replace(&mut self.fired, true)
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}
