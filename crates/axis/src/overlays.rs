//! Track geometry for renderers: tick offsets, the playback pointer, the
//! hover label, and buffered/gap intervals.

use serde::{Deserialize, Serialize};
use timeline_shared::{ArchiveBounds, TimeWindow, Timestamp, MILLIS_PER_SECOND};

/// Pixel offset of `timestamp` from the left edge of a `width_px` track
pub fn tick_offset_px(timestamp: Timestamp, window: TimeWindow, width_px: f64) -> Option<f64> {
    let seconds_per_pixel = window.seconds_per_pixel(width_px)?;
    let elapsed_seconds = (timestamp - window.t0) as f64 / MILLIS_PER_SECOND as f64;
    Some(elapsed_seconds / seconds_per_pixel)
}

/// Playback pointer position in percent; hidden outside `[0, 100]`
pub fn pointer_percent(position: Timestamp, window: TimeWindow) -> Option<f64> {
    if window.width() <= 0 {
        return None;
    }
    let percent = 100.0 * window.fraction_of(position);
    (0.0..=100.0).contains(&percent).then_some(percent)
}

/// Width of the filled progress bar in percent
pub fn progress_percent(position: Timestamp, live: bool, window: TimeWindow) -> f64 {
    if live {
        return 100.0;
    }
    if window.width() <= 0 {
        return 0.0;
    }
    (100.0 * window.fraction_of(position)).clamp(0.0, 100.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HoverLabelPlacement {
    /// Pinned to the left edge of the track
    PinLeft,
    /// Pinned to the right edge of the track
    PinRight,
    /// Left edge of the label, in percent of the track width
    At(f64),
}

/// Keep a `label_width_px` wide label centred on the hover position without
/// overflowing the track.
pub fn hover_label_placement(
    hover_percent: f64,
    label_width_px: f64,
    track_width_px: f64,
) -> HoverLabelPlacement {
    if track_width_px <= 0.0 {
        return HoverLabelPlacement::PinLeft;
    }
    let px_per_percent = track_width_px / 100.0;
    let position_px = px_per_percent * hover_percent;
    let half = label_width_px / 2.0;
    if position_px < half {
        HoverLabelPlacement::PinLeft
    } else if track_width_px - position_px < half {
        HoverLabelPlacement::PinRight
    } else {
        HoverLabelPlacement::At(hover_percent - half / px_per_percent)
    }
}

/// An interval positioned relative to the archive bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntervalSpan {
    pub from: Timestamp,
    pub to: Timestamp,
    pub left_percent: f64,
    pub width_percent: f64,
}

pub fn interval_span(
    from: Timestamp,
    to: Timestamp,
    bounds: ArchiveBounds,
) -> Option<IntervalSpan> {
    let length = bounds.duration();
    if to <= from || length <= 0 {
        return None;
    }
    Some(IntervalSpan {
        from,
        to,
        left_percent: 100.0 * (from - bounds.start) as f64 / length as f64,
        width_percent: 100.0 * (to - from) as f64 / length as f64,
    })
}

/// Buffered segments or recording gaps, skipping empty intervals
pub fn interval_spans(
    intervals: &[(Timestamp, Timestamp)],
    bounds: ArchiveBounds,
) -> Vec<IntervalSpan> {
    intervals
        .iter()
        .filter_map(|&(from, to)| interval_span(from, to, bounds))
        .collect()
}
