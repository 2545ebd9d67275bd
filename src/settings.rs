//! Runtime preferences
//!
//! Held in memory for the session; nothing is persisted.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Audio starts muted until the first user gesture
    pub muted: bool,
    /// Show the FPS counter when a `#fps` element exists
    pub show_fps: bool,
    /// Scrolling-camera variant: camera re-centers on the player instead
    /// of pinning to the world origin
    pub follow_camera: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            muted: true,
            show_fps: false,
            follow_camera: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_start_muted() {
        let settings = Settings::default();
        assert!(settings.muted);
        assert!(!settings.show_fps);
        assert!(!settings.follow_camera);
    }
}
