//! Decorative effects around the tally: sound cues, the rat swarm, and the
//! contestant images moving from the intro into the tally columns.
//!
//! None of these read or write tally state.

pub mod sound;
pub mod swarm;

pub use sound::{AudioConfig, Cue, SoundState};
pub use swarm::{near_bottom, plan_swarm, RatSpawn, SwarmConfig, SwarmTrigger};

/// Class toggled on the intro and both tally columns while the scrolly
/// section is on screen.
pub const IMAGES_MOVED_CLASS: &str = "images-moved";

/// What to do when the scrolly section's visibility changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Migration {
    pub moved: bool,
    pub bells: bool,
}

/// Images follow the scrolly section's visibility; the first time they move
/// in, the bells ring (if sound is allowed).
pub fn migrate_images(scrolly_visible: bool, sound: &mut SoundState) -> Migration {
    Migration {
        moved: scrolly_visible,
        bells: scrolly_visible && sound.request(Cue::Bells),
    }
}
