//! Owning wrapper around [`transition`]

use timeline_shared::{ArchiveBounds, InteractionConfig, Timestamp};

use crate::state::{transition, ViewportEvent, ViewportLimits, ViewportState};
use crate::Viewport;

/// Single writer of the viewport. Renderers read snapshots via
/// [`ViewportStateMachine::viewport`].
#[derive(Debug, Clone)]
pub struct ViewportStateMachine {
    state: ViewportState,
    limits: ViewportLimits,
    interaction: InteractionConfig,
}

impl Default for ViewportStateMachine {
    fn default() -> Self {
        Self::new(&InteractionConfig::default())
    }
}

impl ViewportStateMachine {
    pub fn new(interaction: &InteractionConfig) -> Self {
        Self {
            state: ViewportState::Uninitialized,
            limits: ViewportLimits::from(interaction),
            interaction: interaction.clone(),
        }
    }

    pub fn state(&self) -> ViewportState {
        self.state
    }

    pub fn viewport(&self) -> Option<Viewport> {
        Viewport::from_state(&self.state)
    }

    pub fn bounds(&self) -> Option<ArchiveBounds> {
        self.state.bounds()
    }

    pub fn interaction(&self) -> &InteractionConfig {
        &self.interaction
    }

    /// Fold one event into the state; returns whether anything changed
    pub fn apply(&mut self, event: ViewportEvent) -> bool {
        let next = transition(self.state, event, &self.limits);
        if next == self.state {
            log::trace!("[Viewport] {event:?} ignored in {:?}", self.state.phase());
            return false;
        }
        log::debug!(
            "[Viewport] {event:?}: {:?} {:?} -> {:?} {:?}",
            self.state.phase(),
            self.state.window(),
            next.phase(),
            next.window()
        );
        self.state = next;
        true
    }

    /// Archive refresh first, then the gestures queued in the same tick
    pub fn apply_tick<I>(&mut self, bounds: Option<ArchiveBounds>, gestures: I) -> bool
    where
        I: IntoIterator<Item = ViewportEvent>,
    {
        let mut changed = false;
        if let Some(bounds) = bounds {
            changed |= self.update_archive(bounds);
        }
        for gesture in gestures {
            changed |= self.apply(gesture);
        }
        changed
    }

    pub fn update_archive(&mut self, bounds: ArchiveBounds) -> bool {
        if !bounds.is_valid() {
            log::warn!("[Viewport] Ignoring archive bounds {bounds:?}: start must be before end");
            return false;
        }
        if let Some(old) = self.state.bounds() {
            if bounds.start < old.start || bounds.end < old.end {
                log::warn!("[Viewport] Archive bounds moved backwards: {old:?} -> {bounds:?}");
            }
        }
        self.apply(ViewportEvent::ArchiveUpdated(bounds))
    }

    pub fn zoom_in(&mut self, anchor: Timestamp) -> bool {
        if !self.interaction.enable_zoom {
            return false;
        }
        self.apply(ViewportEvent::ZoomIn {
            anchor,
            divider: self.interaction.zoom_divider,
        })
    }

    pub fn zoom_out(&mut self, anchor: Timestamp) -> bool {
        if !self.interaction.enable_zoom {
            return false;
        }
        self.apply(ViewportEvent::ZoomOut {
            anchor,
            divider: self.interaction.zoom_divider,
        })
    }

    pub fn pan_left(&mut self) -> bool {
        match self.jump_shift() {
            Some(shift) => self.apply(ViewportEvent::PanLeft { shift }),
            None => false,
        }
    }

    pub fn pan_right(&mut self) -> bool {
        match self.jump_shift() {
            Some(shift) => self.apply(ViewportEvent::PanRight { shift }),
            None => false,
        }
    }

    pub fn reset(&mut self) -> bool {
        self.apply(ViewportEvent::Reset)
    }

    /// Jump-pan distance: a multiple of the visible width
    fn jump_shift(&self) -> Option<i64> {
        if !self.interaction.enable_pan {
            return None;
        }
        let width = self.state.window()?.width() as f64;
        Some((width * self.interaction.pan_multiplier).round() as i64)
    }
}
