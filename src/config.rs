// SPDX-License-Identifier: GPL-3.0-only

//! Runtime configuration for geometry and the default keycap style.
//!
//! Every field has a default taken from [`crate::app_settings`], so a config
//! file only needs the values it overrides:
//!
//! ```json
//! { "unitSize": 48, "keycap": { "mainColor": "#1E1E1E" } }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::app_settings;
use crate::error::{DesignError, DesignResult};
use crate::keyboard::{BaseStyle, KeyboardLayout, SwitchHeight};

/// Appearance applied to every freshly generated keycap.
///
/// Font size is not included; it comes from the layout table row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KeycapDefaults {
    pub main_color: String,
    pub text_color: String,
    pub font_family: String,
    pub font_weight: String,
    pub text_align: String,
}

impl Default for KeycapDefaults {
    fn default() -> Self {
        Self {
            main_color: app_settings::DEFAULT_MAIN_COLOR.to_string(),
            text_color: app_settings::DEFAULT_TEXT_COLOR.to_string(),
            font_family: app_settings::DEFAULT_FONT_FAMILY.to_string(),
            font_weight: app_settings::DEFAULT_FONT_WEIGHT.to_string(),
            text_align: app_settings::DEFAULT_TEXT_ALIGN.to_string(),
        }
    }
}

/// Studio configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StudioConfig {
    /// Pixels per layout unit.
    pub unit_size: f32,
    /// Pixels between adjacent keys.
    pub gap: f32,
    /// Pixels of padding around the canvas.
    pub canvas_padding: f32,
    /// Keycap depth for the 3D preview.
    pub keycap_depth: f32,
    /// Default keycap appearance.
    pub keycap: KeycapDefaults,
    /// Layout selected when a session starts.
    pub layout: KeyboardLayout,
    pub base_style: BaseStyle,
    pub switch_height: SwitchHeight,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            unit_size: app_settings::UNIT_SIZE,
            gap: app_settings::GAP,
            canvas_padding: app_settings::CANVAS_PADDING,
            keycap_depth: app_settings::KEYCAP_DEPTH,
            keycap: KeycapDefaults::default(),
            layout: KeyboardLayout::default(),
            base_style: BaseStyle::default(),
            switch_height: SwitchHeight::default(),
        }
    }
}

impl StudioConfig {
    /// Parses a configuration from JSON; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> DesignResult<Self> {
        let config: StudioConfig = serde_json::from_str(json)?;
        config.sanitized()
    }

    /// Loads a configuration file.
    pub fn load(path: impl AsRef<Path>) -> DesignResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| DesignError::io_with_path(e, path.display().to_string()))?;
        let config = Self::from_json_str(&json)?;
        tracing::info!("Loaded studio config from {}", path.display());
        Ok(config)
    }

    /// Rejects unusable geometry and malformed default colors.
    fn sanitized(self) -> DesignResult<Self> {
        crate::color::hex_to_rgb(&self.keycap.main_color)?;
        crate::color::hex_to_rgb(&self.keycap.text_color)?;

        // NaN and infinities fail both checks
        let positive = |v: f32| v.is_finite() && v > 0.0;
        let non_negative = |v: f32| v.is_finite() && v >= 0.0;

        if !(positive(self.unit_size)
            && non_negative(self.gap)
            && non_negative(self.canvas_padding)
            && non_negative(self.keycap_depth))
        {
            tracing::warn!(
                "Ignoring invalid geometry (unit {}, gap {}, padding {}, depth {}); using defaults",
                self.unit_size,
                self.gap,
                self.canvas_padding,
                self.keycap_depth
            );
            let defaults = Self::default();
            return Ok(Self {
                unit_size: defaults.unit_size,
                gap: defaults.gap,
                canvas_padding: defaults.canvas_padding,
                keycap_depth: defaults.keycap_depth,
                ..self
            });
        }

        Ok(self)
    }
}
