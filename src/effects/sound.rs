//! Mute state and sound gating.
//!
//! Browsers refuse autoplay, so nothing plays until the reader has clicked
//! the unmute rat. After that the mute toggle decides.

use serde::{Deserialize, Serialize};

/// Delays of the unmute-rat sequence, measured from the click.
pub const UNMUTE_FALL_DELAY_MS: i32 = 50;
/// Measured from the fall starting: the rat lands and starts scurrying.
pub const UNMUTE_SQUEAK_DELAY_MS: i32 = 350;
/// Measured from the fall starting: the button is gone and the toggle shows.
pub const UNMUTE_SWAP_DELAY_MS: i32 = 1000;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AudioConfig {
    pub squeak_src: String,
    pub squeak_volume: f64,
    pub bells_src: String,
    pub bells_volume: f64,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            squeak_src: "assets/squeak.wav".into(),
            squeak_volume: 0.5,
            bells_src: "assets/bells.wav".into(),
            bells_volume: 0.6,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Squeak,
    Bells,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SoundState {
    muted: bool,
    has_interacted: bool,
    bells_played: bool,
}

impl SoundState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interact(&mut self) {
        self.has_interacted = true;
    }

    /// Flip mute; returns the new muted flag.
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    pub fn can_play(&self) -> bool {
        self.has_interacted && !self.muted
    }

    /// Whether `cue` should play now. Bells play at most once per session and
    /// are only consumed when they actually play.
    pub fn request(&mut self, cue: Cue) -> bool {
        if !self.can_play() {
            return false;
        }
        match cue {
            Cue::Squeak => true,
            Cue::Bells if self.bells_played => false,
            Cue::Bells => {
                self.bells_played = true;
                true
            }
        }
    }
}

impl AudioConfig {
    pub fn source(&self, cue: Cue) -> (&str, f64) {
        match cue {
            Cue::Squeak => (&self.squeak_src, self.squeak_volume),
            Cue::Bells => (&self.bells_src, self.bells_volume),
        }
    }
}
