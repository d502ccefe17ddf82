//! Raw pointer and wheel input to viewport operations

use serde::{Deserialize, Serialize};
use timeline_shared::events::{PointerEvent, TrackRect, WheelEvent};
use timeline_shared::{TimeWindow, Timestamp};

/// Operation derived from a single input event. Pixel positions are
/// offsets from the left edge of the track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GestureEvent {
    ZoomIn { anchor_px: f64 },
    ZoomOut { anchor_px: f64 },
    PanLeft,
    PanRight,
    Seek { position_px: f64 },
}

#[derive(Debug, Clone)]
pub struct GestureInterpreter {
    track: TrackRect,
    pressed_at: Option<f64>,
}

impl GestureInterpreter {
    pub fn new(track: TrackRect) -> Self {
        Self {
            track,
            pressed_at: None,
        }
    }

    pub fn track(&self) -> TrackRect {
        self.track
    }

    pub fn set_track(&mut self, track: TrackRect) {
        self.track = track;
        self.pressed_at = None;
    }

    /// Timestamp under `client_x`, or `None` off the track
    pub fn timestamp_at(&self, client_x: f64, window: TimeWindow) -> Option<Timestamp> {
        let shift = self.track.offset_of(client_x)?;
        self.timestamp_at_offset(shift, window)
    }

    /// Linear interpolation of a track offset over `[t0, tn]`, rounded down
    pub fn timestamp_at_offset(&self, shift_px: f64, window: TimeWindow) -> Option<Timestamp> {
        if self.track.width <= 0.0 || !(0.0..=self.track.width).contains(&shift_px) {
            return None;
        }
        let ms = window.t0 as f64 + shift_px * window.width() as f64 / self.track.width;
        Some(ms.floor() as Timestamp)
    }

    /// Scroll up zooms in, scroll down zooms out. With Ctrl/Cmd held the
    /// wheel jump-pans instead: down moves left, up moves right. Wheel events
    /// off the track are ignored.
    pub fn interpret_wheel(&self, event: &WheelEvent) -> Option<GestureEvent> {
        if event.delta_y == 0.0 || !event.delta_y.is_finite() {
            return None;
        }
        let anchor_px = self.track.offset_of(event.client_x)?;
        let jump = event.modifiers.jump_pan();
        match (event.delta_y > 0.0, jump) {
            (true, true) => Some(GestureEvent::PanLeft),
            (true, false) => Some(GestureEvent::ZoomOut { anchor_px }),
            (false, true) => Some(GestureEvent::PanRight),
            (false, false) => Some(GestureEvent::ZoomIn { anchor_px }),
        }
    }

    /// Whether the host should cancel the page scroll for this wheel event
    pub fn suppress_default_scroll(event: &WheelEvent) -> bool {
        (event.delta_y <= 0.0 && event.scroll.at_top())
            || (event.delta_y > 0.0 && event.scroll.at_bottom())
    }

    /// A press and release at the same spot without modifiers is a seek.
    /// Moving away from the press point in between cancels it.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> Option<GestureEvent> {
        match *event {
            PointerEvent::Pressed { client_x } => {
                self.pressed_at = Some(client_x);
                None
            }
            PointerEvent::Moved { client_x } => {
                if self.pressed_at.is_some_and(|x| x != client_x) {
                    self.pressed_at = None;
                }
                None
            }
            PointerEvent::Released {
                client_x,
                modifiers,
            } => {
                let pressed_at = self.pressed_at.take()?;
                if pressed_at != client_x || modifiers.jump_pan() {
                    return None;
                }
                let position_px = self.track.offset_of(client_x)?;
                Some(GestureEvent::Seek { position_px })
            }
            PointerEvent::Left => {
                self.pressed_at = None;
                None
            }
        }
    }
}
