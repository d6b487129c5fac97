//! Configuration for a game session.

use crate::playback::DEFAULT_VOLUME;
use crate::tab::TabId;

/// Configuration for a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// RNG seed for reproducible spins and rolls. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Initial volume (0.0-1.0).
    pub volume: f32,
    /// Start muted.
    pub muted: bool,
    /// Tab shown first.
    pub start_tab: TabId,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            volume: DEFAULT_VOLUME,
            muted: false,
            start_tab: TabId::Roulette,
        }
    }
}

impl SessionConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the initial volume (clamped to 0.0-1.0).
    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume.clamp(0.0, 1.0);
        self
    }

    /// Start muted or not.
    pub fn with_muted(mut self, muted: bool) -> Self {
        self.muted = muted;
        self
    }

    /// Set the first tab.
    pub fn with_tab(mut self, tab: TabId) -> Self {
        self.start_tab = tab;
        self
    }
}
