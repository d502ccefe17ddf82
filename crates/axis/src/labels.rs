//! Timestamp formatting for axis and hover labels
//!
//! Formatting is an injected capability so tests can pin the timezone.
//! Patterns are chrono strftime patterns.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, Local, Offset, Timelike, Utc};
use timeline_shared::{LabelConfig, Timestamp, TimelineError, TimelineResult};

pub trait TimeFormatter {
    /// Render `timestamp` (epoch ms) with a strftime `pattern`
    fn format(&self, timestamp: Timestamp, pattern: &str) -> String;

    /// Offset of the display timezone from UTC, in minutes
    fn offset_minutes(&self) -> i32;
}

/// chrono-backed formatter with a fixed UTC offset
#[derive(Debug, Clone, Copy)]
pub struct ChronoFormatter {
    offset: FixedOffset,
}

impl ChronoFormatter {
    /// Offsets outside ±24h fall back to UTC
    pub fn new(offset_minutes: i32) -> Self {
        let offset = FixedOffset::east_opt(offset_minutes * 60).unwrap_or_else(|| {
            log::warn!("[Labels] Offset {offset_minutes} min out of range, using UTC");
            Utc.fix()
        });
        Self { offset }
    }

    pub fn utc() -> Self {
        Self::new(0)
    }

    /// The machine's current local offset
    pub fn local() -> Self {
        Self {
            offset: Local::now().offset().fix(),
        }
    }

    pub fn from_config(config: &LabelConfig) -> Self {
        match config.utc_offset_minutes {
            Some(minutes) => Self::new(minutes),
            None => Self::local(),
        }
    }

    fn to_local(&self, timestamp: Timestamp) -> Option<DateTime<FixedOffset>> {
        DateTime::from_timestamp_millis(timestamp).map(|dt| dt.with_timezone(&self.offset))
    }
}

impl TimeFormatter for ChronoFormatter {
    fn format(&self, timestamp: Timestamp, pattern: &str) -> String {
        let Some(local) = self.to_local(timestamp) else {
            log::warn!("[Labels] Timestamp {timestamp} out of range");
            return String::new();
        };
        let mut out = String::new();
        if write!(out, "{}", local.format(pattern)).is_err() {
            log::warn!("[Labels] Failed to format with pattern {pattern:?}");
            return String::new();
        }
        out
    }

    fn offset_minutes(&self) -> i32 {
        self.offset.local_minus_utc() / 60
    }
}

/// Reject patterns chrono cannot render
pub fn validate_pattern(pattern: &str) -> TimelineResult<()> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(TimelineError::InvalidPattern {
            pattern: pattern.to_string(),
        });
    }
    Ok(())
}

/// Label for a major tick at `timestamp`, showing only the parts that
/// changed since the previous major tick at `previous`.
pub fn tick_label(
    formatter: &dyn TimeFormatter,
    config: &LabelConfig,
    timestamp: Timestamp,
    previous: Timestamp,
) -> String {
    let offset = FixedOffset::east_opt(formatter.offset_minutes() * 60).unwrap_or(Utc.fix());
    let local = |ts| DateTime::from_timestamp_millis(ts).map(|dt| dt.with_timezone(&offset));
    let (Some(pos), Some(prev)) = (local(timestamp), local(previous)) else {
        return String::new();
    };

    let mut pattern = String::new();
    if prev.date_naive() < pos.date_naive() {
        pattern.push_str(&config.date_format);
    }
    if prev.hour() != pos.hour() || prev.minute() != pos.minute() {
        pattern.push_str(&config.minutes_format);
    }
    if prev.second() != pos.second() {
        pattern.push_str(&config.seconds_format);
    }
    if pattern.is_empty() {
        return String::new();
    }
    formatter.format(timestamp, &pattern).trim().to_string()
}

/// Text shown above the hovered position
pub fn hover_text(
    formatter: &dyn TimeFormatter,
    config: &LabelConfig,
    timestamp: Timestamp,
) -> String {
    formatter.format(timestamp, &config.hover_format)
}
