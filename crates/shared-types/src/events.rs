//! Raw input events delivered by the host page

use serde::{Deserialize, Serialize};

/// Horizontal geometry of the rendered track, in client pixels
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackRect {
    pub left: f64,
    pub width: f64,
}

impl TrackRect {
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    /// Offset of `client_x` from the left edge, if it falls on the track
    pub fn offset_of(&self, client_x: f64) -> Option<f64> {
        if self.width <= 0.0 || !client_x.is_finite() {
            return None;
        }
        let shift = client_x - self.left;
        (0.0..=self.width).contains(&shift).then_some(shift)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        meta: false,
    };

    /// Ctrl or Cmd turns wheel zoom into a jump pan
    pub fn jump_pan(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Scroll state of the track's scroll container at the time of a wheel event
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub client_height: f64,
    pub scroll_height: f64,
}

impl ScrollMetrics {
    pub fn at_top(&self) -> bool {
        self.scroll_top <= 0.0
    }

    pub fn at_bottom(&self) -> bool {
        self.scroll_top + self.client_height >= self.scroll_height
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Moved { client_x: f64 },
    Left,
    Pressed { client_x: f64 },
    Released { client_x: f64, modifiers: Modifiers },
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WheelEvent {
    pub client_x: f64,
    pub delta_y: f64,
    pub modifiers: Modifiers,
    pub scroll: ScrollMetrics,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    Pointer(PointerEvent),
    Wheel(WheelEvent),
}
