//! Host player seen by the scrubber

use serde::{Deserialize, Serialize};
use timeline_shared::Timestamp;

/// Playback state owned by the host application
pub trait PlayerHost {
    fn playback_position(&self) -> Timestamp;

    fn is_live(&self) -> bool;

    /// Jump to `position`; leaves live mode
    fn seek(&mut self, position: Timestamp);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerState {
    pub live_mode: bool,
    pub playback_position: Timestamp,
}

impl PlayerState {
    pub fn live(position: Timestamp) -> Self {
        Self {
            live_mode: true,
            playback_position: position,
        }
    }

    /// In live mode the position tracks the archive end
    pub fn follow(&mut self, archive_end: Timestamp) {
        if self.live_mode {
            self.playback_position = archive_end;
        }
    }
}

impl PlayerHost for PlayerState {
    fn playback_position(&self) -> Timestamp {
        self.playback_position
    }

    fn is_live(&self) -> bool {
        self.live_mode
    }

    fn seek(&mut self, position: Timestamp) {
        self.live_mode = false;
        self.playback_position = position;
    }
}
