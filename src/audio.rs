//! Audio collaborator
//!
//! A looping background track plus a penalty clip, driven by discrete
//! [`GameEvent`]s from the sim. Playback failures are logged and ignored:
//! browsers refuse autoplay before the first user gesture and there is
//! nothing useful to do about it.

use web_sys::HtmlAudioElement;

use crate::sim::GameEvent;

const BACKGROUND_SRC: &str = "assets/beach-loop.mp3";
const PENALTY_SRC: &str = "assets/penalty.mp3";

/// Owns the audio elements and the mute flag
pub struct AudioManager {
    background: Option<HtmlAudioElement>,
    penalty: Option<HtmlAudioElement>,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(true)
    }
}

impl AudioManager {
    /// Preferences say whether we start muted; browsers block playback
    /// until a user gesture either way
    pub fn new(muted: bool) -> Self {
        let background = HtmlAudioElement::new_with_src(BACKGROUND_SRC).ok();
        if let Some(bg) = &background {
            bg.set_loop(true);
        } else {
            log::warn!("Failed to create background audio element - audio disabled");
        }
        let penalty = HtmlAudioElement::new_with_src(PENALTY_SRC).ok();

        Self {
            background,
            penalty,
            muted,
        }
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    /// Mute/unmute; unmuting (re)starts the background loop
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        let Some(bg) = &self.background else { return };
        if muted {
            let _ = bg.pause();
        } else if let Err(err) = bg.play() {
            log::warn!("Audio playback failed: {err:?}");
        }
    }

    /// Toggle and return the new mute state
    pub fn toggle_muted(&mut self) -> bool {
        let muted = !self.muted;
        self.set_muted(muted);
        muted
    }

    /// Play the clip for a sim event
    pub fn handle_event(&self, event: GameEvent) {
        if self.muted {
            return;
        }
        match event {
            GameEvent::PilePenalty => {
                if let Some(clip) = &self.penalty {
                    clip.set_current_time(0.0);
                    if let Err(err) = clip.play() {
                        log::warn!("Penalty clip playback failed: {err:?}");
                    }
                }
            }
            // Can hits and ground misses have no clip yet
            GameEvent::CanHit | GameEvent::GroundMiss => {}
        }
    }
}
