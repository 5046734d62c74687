//! Page configuration, passed from JS as an optional JSON string.
//!
//! Every field has a default matching the published page, so `{}` (or no
//! config at all) reproduces it exactly.

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::effects::{AudioConfig, SwarmConfig};
use crate::error::{NarrativeError, Result};
use crate::render::{RendererKind, SketchOptions, TallyLayout, TimelineStyle};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrollConfig {
    pub step_selector: String,
    pub event_selector: String,
    pub offset: f64, // trigger line as a fraction of viewport height
    pub debug: bool,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            step_selector: ".step".into(),
            event_selector: ".timeline-event".into(),
            offset: 0.5,
            debug: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NarrativeConfig {
    pub tally: TallyLayout,
    pub renderer: RendererKind,
    pub sketch: SketchOptions,
    pub timeline: TimelineStyle,
    pub scroll: ScrollConfig,
    pub audio: AudioConfig,
    pub swarm: SwarmConfig,
    pub log_level: String,
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            tally: TallyLayout::default(),
            renderer: RendererKind::default(),
            sketch: SketchOptions::default(),
            timeline: TimelineStyle::default(),
            scroll: ScrollConfig::default(),
            audio: AudioConfig::default(),
            swarm: SwarmConfig::default(),
            log_level: "info".into(),
        }
    }
}

impl NarrativeConfig {
    /// Parse and validate. Blank input yields the defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }

    /// Sketch options are not checked here: bad ones fall back to plain
    /// rendering at startup instead of rejecting the whole config.
    pub fn validate(&self) -> Result<()> {
        let t = &self.tally;
        for (name, v) in [
            ("tally.scale", t.scale),
            ("tally.spacing", t.spacing),
            ("tally.rowPitch", t.row_pitch),
            ("tally.tickLength", t.tick_length),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(NarrativeError::Config(format!(
                    "{name} must be a positive number, got {v}"
                )));
            }
        }
        if self.scroll.step_selector.trim().is_empty()
            || self.scroll.event_selector.trim().is_empty()
        {
            return Err(NarrativeError::Config("scroll selectors must not be empty".into()));
        }
        if !(0.0..=1.0).contains(&self.scroll.offset) {
            return Err(NarrativeError::Config(format!(
                "scroll.offset must be within 0..=1, got {}",
                self.scroll.offset
            )));
        }
        for (name, v) in [
            ("audio.squeakVolume", self.audio.squeak_volume),
            ("audio.bellsVolume", self.audio.bells_volume),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(NarrativeError::Config(format!(
                    "{name} must be within 0..=1, got {v}"
                )));
            }
        }
        let s = &self.swarm;
        if s.min_rats == 0 || s.rat_spread == 0 {
            return Err(NarrativeError::Config(
                "swarm.minRats and swarm.ratSpread must be at least 1".into(),
            ));
        }
        if s.spawn_interval_ms < 0 || s.band_vh < 0.0 || s.min_duration_s <= 0.0 {
            return Err(NarrativeError::Config("swarm timings must be positive".into()));
        }
        if self.timeline.resize_delay_ms < 0 || self.timeline.initial_delay_ms < 0 {
            return Err(NarrativeError::Config("timeline delays must not be negative".into()));
        }
        Ok(())
    }
}
