//! Zoomable, pannable window over a growing time archive
//!
//! The visible window `[t0, tn]` lives inside archive bounds
//! `[start, end]` that advance over time. Which edge the window is attached
//! to decides how it re-anchors when the bounds move.

use serde::{Deserialize, Serialize};
use timeline_shared::{TimeWindow, Timestamp};

pub mod machine;
pub mod state;

pub use machine::ViewportStateMachine;
pub use state::{transition, ViewportEvent, ViewportLimits, ViewportPhase, ViewportState};

/// Read-only snapshot of the visible window for renderers.
///
/// The attachment flags are exclusive: in full view both are false and
/// `zoomed` is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub t0: Timestamp,
    pub tn: Timestamp,
    pub attached_to_left: bool,
    pub attached_to_right: bool,
    pub zoomed: bool,
}

impl Viewport {
    pub fn from_state(state: &ViewportState) -> Option<Self> {
        let window = state.window()?;
        Some(Self {
            t0: window.t0,
            tn: window.tn,
            attached_to_left: matches!(state, ViewportState::AttachedLeft { .. }),
            attached_to_right: matches!(state, ViewportState::AttachedRight { .. }),
            zoomed: state.is_zoomed(),
        })
    }

    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.t0, self.tn)
    }
}
