//! Tick mark generation for the visible window

use serde::{Deserialize, Serialize};
use timeline_shared::{LabelConfig, TimeWindow, Timestamp, MILLIS_PER_SECOND};

use crate::labels::{tick_label, TimeFormatter};
use crate::tick_unit::{select_unit, TimeUnit};

/// Upper bound on marks per request; a mismatched unit/range pair beyond
/// this yields no marks.
pub const MAX_TICKS: i64 = 100_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickMark {
    pub timestamp: Timestamp,
    /// Present only on major marks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl TickMark {
    pub fn is_major(&self) -> bool {
        self.label.is_some()
    }
}

/// Marks for every minor multiple inside `window`, aligned to local time.
///
/// `offset_seconds` shifts the grid so multiples fall on local boundaries;
/// `make_label` receives `(timestamp, previous_major_timestamp)` in epoch ms for
/// each major mark. The first major mark sees local midnight of the epoch
/// as its predecessor.
pub fn generate_ticks<F>(
    window: TimeWindow,
    unit: TimeUnit,
    offset_seconds: i64,
    mut make_label: F,
) -> Vec<TickMark>
where
    F: FnMut(Timestamp, Timestamp) -> String,
{
    if unit.minor <= 0 || unit.major <= 0 || window.tn < window.t0 {
        return Vec::new();
    }
    let minor_ms = unit.minor * MILLIS_PER_SECOND;
    let offset_ms = offset_seconds * MILLIS_PER_SECOND;

    let first = ceil_div(window.t0 + offset_ms, minor_ms);
    let last = (window.tn + offset_ms).div_euclid(minor_ms);
    if last < first {
        return Vec::new();
    }
    if last - first + 1 > MAX_TICKS {
        log::warn!(
            "[Ticks] Refusing {} marks for window {:?} with unit {:?}",
            last - first + 1,
            window,
            unit
        );
        return Vec::new();
    }

    let tolerance = (unit.major / 10).max(1);
    let mut previous = -offset_ms;
    let mut marks = Vec::with_capacity((last - first + 1) as usize);
    for i in first..=last {
        let local_seconds = i * unit.minor;
        let is_major = local_seconds.rem_euclid(unit.major) < tolerance;
        let timestamp = i * minor_ms - offset_ms;
        let label = if is_major {
            let text = make_label(timestamp, previous);
            previous = timestamp;
            Some(text)
        } else {
            None
        };
        marks.push(TickMark { timestamp, label });
    }
    marks
}

fn ceil_div(value: i64, divisor: i64) -> i64 {
    -(-value).div_euclid(divisor)
}

/// Tick generation bound to a formatter and label patterns
pub struct TickGenerator<'a> {
    formatter: &'a dyn TimeFormatter,
    labels: &'a LabelConfig,
}

impl<'a> TickGenerator<'a> {
    pub fn new(formatter: &'a dyn TimeFormatter, labels: &'a LabelConfig) -> Self {
        Self { formatter, labels }
    }

    pub fn generate(&self, window: TimeWindow, unit: TimeUnit) -> Vec<TickMark> {
        let offset_seconds = i64::from(self.formatter.offset_minutes()) * 60;
        generate_ticks(window, unit, offset_seconds, |ts, prev| {
            tick_label(self.formatter, self.labels, ts, prev)
        })
    }

    /// Pick the unit from the window's density on a `width_px` track
    pub fn generate_for_width(
        &self,
        window: TimeWindow,
        width_px: f64,
    ) -> Option<(TimeUnit, Vec<TickMark>)> {
        let unit = select_unit(window.seconds_per_pixel(width_px)?);
        Some((unit, self.generate(window, unit)))
    }
}
