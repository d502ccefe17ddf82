//! Shared types for the timeline scrubber
//!
//! This crate contains the types passed between the axis, viewport and
//! controls crates: archive bounds supplied by the host, the visible time
//! window, raw input events and the interaction/label settings.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod errors;
pub mod events;
pub mod timeline_config;

pub use errors::{TimelineError, TimelineResult};
pub use timeline_config::{InteractionConfig, LabelConfig};

/// Unix epoch milliseconds
pub type Timestamp = i64;

pub const MILLIS_PER_SECOND: i64 = 1000;

/// Full range of recorded (or recordable) time, owned by the host
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ArchiveBounds {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl ArchiveBounds {
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }

    /// Checked constructor for bounds coming from an untrusted host
    pub fn try_new(start: Timestamp, end: Timestamp) -> TimelineResult<Self> {
        if start >= end {
            return Err(TimelineError::InvalidBounds { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn duration(&self) -> i64 {
        self.end - self.start
    }

    pub fn contains(&self, timestamp: Timestamp) -> bool {
        timestamp >= self.start && timestamp <= self.end
    }

    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }

    pub fn as_window(&self) -> TimeWindow {
        TimeWindow::new(self.start, self.end)
    }
}

/// Identity of the archive being scrubbed. A new id means a different
/// stream, which resets the viewport.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ArchiveId(pub Uuid);

impl ArchiveId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ArchiveId {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot pushed by the host on every refresh
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArchiveInfo {
    pub id: ArchiveId,
    pub bounds: ArchiveBounds,
}

impl ArchiveInfo {
    pub fn new(id: ArchiveId, bounds: ArchiveBounds) -> Self {
        Self { id, bounds }
    }
}

/// Visible time window `[t0, tn]`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    pub t0: Timestamp,
    pub tn: Timestamp,
}

impl TimeWindow {
    pub fn new(t0: Timestamp, tn: Timestamp) -> Self {
        Self { t0, tn }
    }

    pub fn width(&self) -> i64 {
        self.tn - self.t0
    }

    pub fn width_seconds(&self) -> f64 {
        self.width() as f64 / MILLIS_PER_SECOND as f64
    }

    /// Zoom density for a track of `width_px` pixels
    pub fn seconds_per_pixel(&self, width_px: f64) -> Option<f64> {
        if width_px <= 0.0 || !width_px.is_finite() || self.width() <= 0 {
            return None;
        }
        Some(self.width_seconds() / width_px)
    }

    /// Relative position of `timestamp` within the window, 0.0 at `t0` and
    /// 1.0 at `tn`. Not clamped.
    pub fn fraction_of(&self, timestamp: Timestamp) -> f64 {
        if self.width() <= 0 {
            return 0.0;
        }
        (timestamp - self.t0) as f64 / self.width() as f64
    }
}
