//! Configuration validation utilities

use crate::{ConfigError, RefreshConfig, Result, TimelineConfig};
use timeline_shared::{InteractionConfig, LabelConfig};

const MAX_OFFSET_MINUTES: i32 = 14 * 60;

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration
    pub fn validate(config: &TimelineConfig) -> Result<()> {
        Self::validate_interaction(&config.interaction)?;
        Self::validate_labels(&config.labels)?;
        Self::validate_refresh(&config.refresh)?;
        Ok(())
    }

    fn validate_interaction(interaction: &InteractionConfig) -> Result<()> {
        // Zoom-out divides by (divider - 1)
        if !interaction.zoom_divider.is_finite() || interaction.zoom_divider <= 1.0 {
            return Err(ConfigError::Validation(format!(
                "Invalid zoom_divider: {}. Must be greater than 1",
                interaction.zoom_divider
            )));
        }

        if !interaction.pan_multiplier.is_finite() || interaction.pan_multiplier <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "Invalid pan_multiplier: {}. Must be positive",
                interaction.pan_multiplier
            )));
        }

        if !interaction.min_visible_seconds.is_finite() || interaction.min_visible_seconds <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "Invalid min_visible_seconds: {}. Must be positive",
                interaction.min_visible_seconds
            )));
        }

        Ok(())
    }

    fn validate_labels(labels: &LabelConfig) -> Result<()> {
        let patterns = [
            ("hover_format", &labels.hover_format),
            ("date_format", &labels.date_format),
            ("minutes_format", &labels.minutes_format),
            ("seconds_format", &labels.seconds_format),
        ];
        for (field, pattern) in patterns {
            if pattern.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{field} cannot be empty")));
            }
            timeline_axis::labels::validate_pattern(pattern)
                .map_err(|e| ConfigError::Validation(format!("{field}: {e}")))?;
        }

        if let Some(offset) = labels.utc_offset_minutes {
            if offset.abs() > MAX_OFFSET_MINUTES {
                return Err(ConfigError::Validation(format!(
                    "Invalid utc_offset_minutes: {offset}. Must be within ±{MAX_OFFSET_MINUTES}"
                )));
            }
        }

        Ok(())
    }

    fn validate_refresh(refresh: &RefreshConfig) -> Result<()> {
        if refresh.archive_poll_interval_ms == 0 || refresh.archive_poll_interval_ms > 60_000 {
            return Err(ConfigError::Validation(format!(
                "Invalid archive_poll_interval_ms: {}. Must be between 1 and 60000",
                refresh.archive_poll_interval_ms
            )));
        }
        Ok(())
    }
}
