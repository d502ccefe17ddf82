//! Viewport states and the transition function
//!
//! Archive drift and user gestures are both events folded through
//! [`transition`]. Each state carries the archive bounds it was computed
//! against, so drift deltas need no outside bookkeeping.

use serde::{Deserialize, Serialize};
use timeline_shared::{ArchiveBounds, InteractionConfig, TimeWindow, Timestamp, MILLIS_PER_SECOND};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewportState {
    /// No archive bounds seen yet
    Uninitialized,
    /// `t0 == start`, `tn == end`
    FullView { bounds: ArchiveBounds },
    /// `t0 == start`, `tn < end`; rides the growing end
    AttachedLeft {
        bounds: ArchiveBounds,
        tn: Timestamp,
    },
    /// `t0 > start`, `tn == end`; follows the trailing start
    AttachedRight {
        bounds: ArchiveBounds,
        t0: Timestamp,
    },
    /// Touches neither edge
    FreeZoom {
        bounds: ArchiveBounds,
        t0: Timestamp,
        tn: Timestamp,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewportPhase {
    Uninitialized,
    FullView,
    AttachedLeft,
    AttachedRight,
    FreeZoom,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ViewportEvent {
    /// Fresh snapshot of the archive bounds from the host
    ArchiveUpdated(ArchiveBounds),
    /// Shrink by `1/divider` of the width, keeping `anchor` at the same
    /// relative position
    ZoomIn { anchor: Timestamp, divider: f64 },
    /// Undo one `ZoomIn` with the same anchor and divider
    ZoomOut { anchor: Timestamp, divider: f64 },
    /// Translate towards the archive start by `shift` ms
    PanLeft { shift: i64 },
    /// Translate towards the archive end by `shift` ms
    PanRight { shift: i64 },
    /// Forget everything, e.g. when the host switches streams
    Reset,
}

/// Guards applied by gestures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportLimits {
    /// Narrowest window zoom-in may produce, in ms
    pub min_width: i64,
}

impl Default for ViewportLimits {
    fn default() -> Self {
        Self {
            min_width: 10 * MILLIS_PER_SECOND,
        }
    }
}

impl From<&InteractionConfig> for ViewportLimits {
    fn from(config: &InteractionConfig) -> Self {
        Self {
            min_width: (config.min_visible_seconds * MILLIS_PER_SECOND as f64).round() as i64,
        }
    }
}

impl ViewportState {
    pub fn phase(&self) -> ViewportPhase {
        match self {
            ViewportState::Uninitialized => ViewportPhase::Uninitialized,
            ViewportState::FullView { .. } => ViewportPhase::FullView,
            ViewportState::AttachedLeft { .. } => ViewportPhase::AttachedLeft,
            ViewportState::AttachedRight { .. } => ViewportPhase::AttachedRight,
            ViewportState::FreeZoom { .. } => ViewportPhase::FreeZoom,
        }
    }

    pub fn bounds(&self) -> Option<ArchiveBounds> {
        match *self {
            ViewportState::Uninitialized => None,
            ViewportState::FullView { bounds }
            | ViewportState::AttachedLeft { bounds, .. }
            | ViewportState::AttachedRight { bounds, .. }
            | ViewportState::FreeZoom { bounds, .. } => Some(bounds),
        }
    }

    pub fn window(&self) -> Option<TimeWindow> {
        match *self {
            ViewportState::Uninitialized => None,
            ViewportState::FullView { bounds } => Some(bounds.as_window()),
            ViewportState::AttachedLeft { bounds, tn } => Some(TimeWindow::new(bounds.start, tn)),
            ViewportState::AttachedRight { bounds, t0 } => Some(TimeWindow::new(t0, bounds.end)),
            ViewportState::FreeZoom { t0, tn, .. } => Some(TimeWindow::new(t0, tn)),
        }
    }

    pub fn is_zoomed(&self) -> bool {
        !matches!(self, Self::Uninitialized | Self::FullView { .. })
    }

    /// Clamp `[t0, tn]` into `bounds` and classify by which edges it
    /// touches. `None` when nothing of the window is left.
    pub fn settle(bounds: ArchiveBounds, t0: Timestamp, tn: Timestamp) -> Option<ViewportState> {
        let t0 = t0.max(bounds.start);
        let tn = tn.min(bounds.end);
        if t0 >= tn {
            return None;
        }
        let state = match (t0 <= bounds.start, tn >= bounds.end) {
            (true, true) => ViewportState::FullView { bounds },
            (true, false) => ViewportState::AttachedLeft { bounds, tn },
            (false, true) => ViewportState::AttachedRight { bounds, t0 },
            (false, false) => ViewportState::FreeZoom { bounds, t0, tn },
        };
        Some(state)
    }
}

/// Apply one event. Never fails: invalid preconditions leave the state as
/// it was and out-of-range results are clamped.
pub fn transition(
    state: ViewportState,
    event: ViewportEvent,
    limits: &ViewportLimits,
) -> ViewportState {
    let next = match event {
        ViewportEvent::Reset => Some(ViewportState::Uninitialized),
        ViewportEvent::ArchiveUpdated(bounds) => Some(apply_archive(state, bounds)),
        ViewportEvent::ZoomIn { anchor, divider } => zoom_in(state, anchor, divider, limits),
        ViewportEvent::ZoomOut { anchor, divider } => zoom_out(state, anchor, divider),
        ViewportEvent::PanLeft { shift } => pan(state, -shift.max(0)),
        ViewportEvent::PanRight { shift } => pan(state, shift.max(0)),
    };
    next.unwrap_or(state)
}

// Left-edge drift is resolved before right-edge drift: a free window whose
// start is overtaken attaches left this tick and only begins riding the
// growing end on the next update.
fn apply_archive(state: ViewportState, new: ArchiveBounds) -> ViewportState {
    if !new.is_valid() {
        return state;
    }
    let full = ViewportState::FullView { bounds: new };
    let Some(old) = state.bounds() else {
        return full;
    };
    // A free window keeps its timestamps; settle clamps an overtaken t0
    let (t0, tn) = match state {
        ViewportState::Uninitialized | ViewportState::FullView { .. } => return full,
        ViewportState::AttachedLeft { tn, .. } => (new.start, tn + (new.end - old.end)),
        ViewportState::AttachedRight { t0, .. } => (t0 + (new.start - old.start), new.end),
        ViewportState::FreeZoom { t0, tn, .. } => (t0, tn),
    };
    ViewportState::settle(new, t0, tn).unwrap_or(full)
}

/// Anchor position relative to the window, in `[0, 1]`
fn anchor_fraction(window: TimeWindow, anchor: Timestamp) -> f64 {
    window.fraction_of(anchor).clamp(0.0, 1.0)
}

fn zoom_in(
    state: ViewportState,
    anchor: Timestamp,
    divider: f64,
    limits: &ViewportLimits,
) -> Option<ViewportState> {
    let bounds = state.bounds()?;
    let window = state.window()?;
    if !(divider.is_finite() && divider > 1.0) {
        return None;
    }
    let width = window.width() as f64;
    let removed = width / divider;
    if width - removed < limits.min_width as f64 {
        return None;
    }
    let fraction = anchor_fraction(window, anchor);
    let t0 = window.t0 as f64 + removed * fraction;
    let tn = window.tn as f64 - removed * (1.0 - fraction);
    ViewportState::settle(bounds, t0.round() as i64, tn.round() as i64)
}

fn zoom_out(state: ViewportState, anchor: Timestamp, divider: f64) -> Option<ViewportState> {
    let bounds = state.bounds()?;
    let window = state.window()?;
    if !(divider.is_finite() && divider > 1.0) {
        return None;
    }
    // The slice added is 1/divider of the resulting width, which is exactly
    // what a zoom-in with the same divider removes again.
    let width = window.width() as f64;
    let added = width / (divider - 1.0);
    let fraction = anchor_fraction(window, anchor);
    let t0 = window.t0 as f64 - added * fraction;
    let tn = window.tn as f64 + added * (1.0 - fraction);
    ViewportState::settle(bounds, t0.round() as i64, tn.round() as i64)
}

/// Translate by `shift` ms (negative is left), sliding back inside the
/// archive so the width is kept.
fn pan(state: ViewportState, shift: i64) -> Option<ViewportState> {
    let bounds = state.bounds()?;
    let window = state.window()?;
    let blocked = match state {
        ViewportState::FullView { .. } => true,
        ViewportState::AttachedLeft { .. } => shift <= 0,
        ViewportState::AttachedRight { .. } => shift >= 0,
        _ => shift == 0,
    };
    if blocked {
        return None;
    }
    let width = window.width();
    let (t0, tn) = if shift < 0 {
        let t0 = window.t0.saturating_add(shift).max(bounds.start);
        (t0, t0 + width)
    } else {
        let tn = window.tn.saturating_add(shift).min(bounds.end);
        (tn - width, tn)
    };
    ViewportState::settle(bounds, t0, tn)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: ArchiveBounds = ArchiveBounds {
        start: 1_000_000,
        end: 2_000_000,
    };

    fn limits() -> ViewportLimits {
        ViewportLimits::default()
    }

    #[test]
    fn test_settle_classifies_edges() {
        assert_eq!(
            ViewportState::settle(BOUNDS, 0, 3_000_000),
            Some(ViewportState::FullView { bounds: BOUNDS })
        );
        assert_eq!(
            ViewportState::settle(BOUNDS, 1_000_000, 1_500_000).map(|s| s.phase()),
            Some(ViewportPhase::AttachedLeft)
        );
        assert_eq!(
            ViewportState::settle(BOUNDS, 1_500_000, 2_000_000).map(|s| s.phase()),
            Some(ViewportPhase::AttachedRight)
        );
        assert_eq!(
            ViewportState::settle(BOUNDS, 1_200_000, 1_500_000).map(|s| s.phase()),
            Some(ViewportPhase::FreeZoom)
        );
        assert_eq!(ViewportState::settle(BOUNDS, 2_500_000, 3_000_000), None);
    }

    #[test]
    fn test_first_bounds_initialise_full_view() {
        let event = ViewportEvent::ArchiveUpdated(BOUNDS);
        let state = transition(ViewportState::Uninitialized, event, &limits());
        assert_eq!(state, ViewportState::FullView { bounds: BOUNDS });
    }

    #[test]
    fn test_invalid_bounds_are_ignored() {
        let state = ViewportState::FullView { bounds: BOUNDS };
        let bad = ViewportEvent::ArchiveUpdated(ArchiveBounds::new(5, 5));
        assert_eq!(transition(state, bad, &limits()), state);
    }

    #[test]
    fn test_gestures_before_init_are_ignored() {
        let state = ViewportState::Uninitialized;
        let zoom_in = ViewportEvent::ZoomIn {
            anchor: 0,
            divider: 10.0,
        };
        let zoom_out = ViewportEvent::ZoomOut {
            anchor: 0,
            divider: 10.0,
        };
        let events = [
            zoom_in,
            zoom_out,
            ViewportEvent::PanLeft { shift: 10 },
            ViewportEvent::PanRight { shift: 10 },
        ];
        for event in events {
            assert_eq!(transition(state, event, &limits()), state);
        }
    }

    #[test]
    fn test_zoom_in_keeps_anchor_fraction() {
        let state = ViewportState::FullView { bounds: BOUNDS };
        let anchor = 1_250_000;
        let event = ViewportEvent::ZoomIn {
            anchor,
            divider: 10.0,
        };
        let zoomed = transition(state, event, &limits());
        let window = zoomed.window().unwrap();
        assert_eq!(window, TimeWindow::new(1_025_000, 1_925_000));
        assert!((window.fraction_of(anchor) - 0.25).abs() < 1e-9);
        assert_eq!(zoomed.phase(), ViewportPhase::FreeZoom);
    }

    #[test]
    fn test_zoom_in_stops_at_min_width() {
        let bounds = ArchiveBounds::new(0, 10_500);
        let state = ViewportState::FullView { bounds };
        let event = ViewportEvent::ZoomIn {
            anchor: 5_000,
            divider: 10.0,
        };
        assert_eq!(transition(state, event, &limits()), state);
    }

    #[test]
    fn test_bad_divider_is_ignored() {
        let state = ViewportState::FullView { bounds: BOUNDS };
        for divider in [1.0, 0.5, -2.0, f64::NAN, f64::INFINITY] {
            let event = ViewportEvent::ZoomIn {
                anchor: 1_500_000,
                divider,
            };
            assert_eq!(transition(state, event, &limits()), state);
        }
    }

    #[test]
    fn test_zoom_out_clamps_to_archive() {
        let state = ViewportState::AttachedLeft {
            bounds: BOUNDS,
            tn: 1_950_000,
        };
        let event = ViewportEvent::ZoomOut {
            anchor: 1_000_000,
            divider: 10.0,
        };
        let out = transition(state, event, &limits());
        assert_eq!(out, ViewportState::FullView { bounds: BOUNDS });
    }

    #[test]
    fn test_pan_keeps_width_and_attaches() {
        let state = ViewportState::FreeZoom {
            bounds: BOUNDS,
            t0: 1_400_000,
            tn: 1_500_000,
        };
        let event = ViewportEvent::PanLeft { shift: 1_000_000 };
        let expected = ViewportState::AttachedLeft {
            bounds: BOUNDS,
            tn: 1_100_000,
        };
        assert_eq!(transition(state, event, &limits()), expected);

        let right = transition(state, ViewportEvent::PanRight { shift: 50_000 }, &limits());
        assert_eq!(right.window(), Some(TimeWindow::new(1_450_000, 1_550_000)));
    }

    #[test]
    fn test_pan_towards_attached_edge_is_ignored() {
        let apply = |state, event| transition(state, event, &limits());
        let left = ViewportState::AttachedLeft {
            bounds: BOUNDS,
            tn: 1_500_000,
        };
        assert_eq!(apply(left, ViewportEvent::PanLeft { shift: 10 }), left);

        let right = ViewportState::AttachedRight {
            bounds: BOUNDS,
            t0: 1_500_000,
        };
        assert_eq!(apply(right, ViewportEvent::PanRight { shift: 10 }), right);

        let full = ViewportState::FullView { bounds: BOUNDS };
        assert_eq!(apply(full, ViewportEvent::PanLeft { shift: 10 }), full);
    }

    #[test]
    fn test_free_zoom_attaches_when_start_overtakes() {
        let state = ViewportState::FreeZoom {
            bounds: BOUNDS,
            t0: 1_100_000,
            tn: 1_500_000,
        };
        let moved = ArchiveBounds::new(1_150_000, 2_150_000);
        let next = transition(state, ViewportEvent::ArchiveUpdated(moved), &limits());
        let expected = ViewportState::AttachedLeft {
            bounds: moved,
            tn: 1_500_000,
        };
        assert_eq!(next, expected);
    }

    #[test]
    fn test_window_overtaken_entirely_snaps_to_full_view() {
        let state = ViewportState::FreeZoom {
            bounds: BOUNDS,
            t0: 1_100_000,
            tn: 1_200_000,
        };
        let moved = ArchiveBounds::new(1_300_000, 2_300_000);
        let next = transition(state, ViewportEvent::ArchiveUpdated(moved), &limits());
        assert_eq!(next, ViewportState::FullView { bounds: moved });
    }

    #[test]
    fn test_reset() {
        let state = ViewportState::FullView { bounds: BOUNDS };
        let reset = transition(state, ViewportEvent::Reset, &limits());
        assert_eq!(reset, ViewportState::Uninitialized);
    }

    #[test]
    fn test_limits_from_config() {
        let config = InteractionConfig {
            min_visible_seconds: 2.5,
            ..InteractionConfig::default()
        };
        assert_eq!(ViewportLimits::from(&config).min_width, 2_500);
    }
}
