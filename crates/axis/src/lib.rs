//! Adaptive time axis for the timeline scrubber
//!
//! Picks a tick granularity from the zoom density, lays out tick marks
//! aligned to local time, labels the major marks, and computes the track
//! geometry a renderer needs.

pub mod labels;
pub mod overlays;
pub mod tick_unit;
pub mod ticks;

pub use labels::{hover_text, tick_label, ChronoFormatter, TimeFormatter};
pub use overlays::{
    hover_label_placement, interval_span, interval_spans, pointer_percent, progress_percent,
    tick_offset_px, HoverLabelPlacement, IntervalSpan,
};
pub use tick_unit::{select_unit, TimeUnit, FALLBACK_UNIT, TICK_UNITS};
pub use ticks::{generate_ticks, TickGenerator, TickMark};
