//! Error types for the host-facing edges of the scrubber
//!
//! Viewport transitions, tick generation and gesture mapping never fail;
//! they saturate or ignore. These errors only come from checked
//! constructors that validate host-supplied values.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Timestamp;

#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum TimelineError {
    #[error("Invalid archive bounds: start {start} must be before end {end}")]
    InvalidBounds { start: Timestamp, end: Timestamp },

    #[error("Invalid track geometry: width {width} must be positive")]
    InvalidTrack { width: f64 },

    #[error("Invalid time format pattern: {pattern}")]
    InvalidPattern { pattern: String },
}

pub type TimelineResult<T> = Result<T, TimelineError>;

impl TimelineError {
    /// Convert to JSON string for host-side reporting
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"type":"Internal","details":{"message":"Failed to serialize error"}}"#.to_string()
        })
    }
}
