//! Tunable thresholds for the interaction engine.

use crate::error::{WallError, WallResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Interaction thresholds and floors.
///
/// Every numeric constant the gesture engine consults lives here so hosts can
/// tune them from a JSON file. Missing fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallConfig {
    /// Max pointer travel (surface units) for a photo press to count as a tap.
    pub tap_threshold: f64,
    /// Per-sample travel a drag must exceed to agitate a developing photo.
    pub shake_jitter_threshold: f64,
    /// Travel is divided by this to get shake progress.
    pub shake_divisor: f64,
    /// Erase brush radius.
    pub erase_radius: f64,
    /// Highest allowed top edge for a dragged photo.
    pub band_top: f64,
    /// A dragged photo's top edge stays this far above the viewport bottom.
    pub band_bottom_margin: f64,
    /// Floor for sticker scale.
    pub min_sticker_scale: f64,
    /// Floor for text font size.
    pub min_font_size: f64,
    /// Font size for newly placed text.
    pub default_font_size: f64,
    /// Stroke width for new doodles.
    pub default_stroke_width: f64,
    /// Width of the scrollable wall surface.
    pub surface_width: f64,
    /// Hit radius for decoration handles.
    pub handle_hit_tolerance: f64,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            tap_threshold: 5.0,
            shake_jitter_threshold: 12.0,
            shake_divisor: 6.0,
            erase_radius: 30.0,
            band_top: 20.0,
            band_bottom_margin: 300.0,
            min_sticker_scale: 0.2,
            min_font_size: 12.0,
            default_font_size: 48.0,
            default_stroke_width: 4.0,
            surface_width: 5000.0,
            handle_hit_tolerance: 20.0,
        }
    }
}

impl WallConfig {
    /// Parse and validate a config from JSON.
    pub fn from_json(json: &str) -> WallResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> WallResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded wall config from {}", path.display());
        Ok(config)
    }

    /// Serialize the config to pretty JSON.
    pub fn to_json(&self) -> WallResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would break the clamps and thresholds.
    pub fn validate(&self) -> WallResult<()> {
        let positive = [
            ("shake_divisor", self.shake_divisor),
            ("min_sticker_scale", self.min_sticker_scale),
            ("min_font_size", self.min_font_size),
            ("default_font_size", self.default_font_size),
            ("default_stroke_width", self.default_stroke_width),
            ("surface_width", self.surface_width),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(WallError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        let non_negative = [
            ("tap_threshold", self.tap_threshold),
            ("shake_jitter_threshold", self.shake_jitter_threshold),
            ("erase_radius", self.erase_radius),
            ("band_top", self.band_top),
            ("band_bottom_margin", self.band_bottom_margin),
            ("handle_hit_tolerance", self.handle_hit_tolerance),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(WallError::InvalidConfig(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }

        if self.default_font_size < self.min_font_size {
            return Err(WallError::InvalidConfig(
                "default_font_size is below min_font_size".to_string(),
            ));
        }

        Ok(())
    }
}
