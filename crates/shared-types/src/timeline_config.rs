//! Interaction and label settings shared by the axis, viewport and controls

use serde::{Deserialize, Serialize};

/// Gesture tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    pub enable_zoom: bool,
    pub enable_pan: bool,
    /// One wheel step removes `1/zoom_divider` of the visible width
    pub zoom_divider: f64,
    /// Jump-pan distance in multiples of the visible width
    pub pan_multiplier: f64,
    /// Narrowest window zoom-in may produce
    pub min_visible_seconds: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            enable_zoom: true,
            enable_pan: true,
            zoom_divider: 10.0,
            pan_multiplier: 10.0,
            min_visible_seconds: 10.0,
        }
    }
}

/// chrono strftime patterns used for axis and hover labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    pub hover_format: String,
    /// Prefix used when the calendar day changed since the previous label
    pub date_format: String,
    /// Used when the hour or minute changed
    pub minutes_format: String,
    /// Used when the seconds changed
    pub seconds_format: String,
    /// Fixed UTC offset; the machine's local offset when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utc_offset_minutes: Option<i32>,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            hover_format: "%-d %B %H:%M:%S".to_string(),
            date_format: "%d %b".to_string(),
            minutes_format: " %H:%M".to_string(),
            seconds_format: ":%S".to_string(),
            utc_offset_minutes: None,
        }
    }
}
