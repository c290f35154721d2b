// SPDX-License-Identifier: GPL-3.0-only

//! Surface shading for beveled keycaps.
//!
//! A keycap is drawn as a top surface surrounded by four sloped faces, a thin
//! edge and a bottom. Every surface color is derived from the keycap's single
//! main color by shifting HSL lightness, with an implied light source at the
//! upper left:
//!
//! | Surface | Lightness shift |
//! |---|---|
//! | top | +2 → base → −16 |
//! | left face, top side | −8 → −12 |
//! | right face, bottom side | −23 → −28 |
//! | edge | −28 → −35 |
//! | bottom | −35 → −42 |
//!
//! Shifts are absolute lightness points, and lightness conversion is
//! monotonic for a fixed hue and saturation, so the face ordering holds for
//! every input color, including pure black and white where the shifts clamp.

use serde::{Deserialize, Serialize};

use crate::app_settings;
use crate::color::{self, Hsl, Rgb};
use crate::config::StudioConfig;
use crate::error::DesignResult;

const TOP_HIGHLIGHT: f64 = 2.0;
const TOP_SHADOW: f64 = -16.0;
const LIT_FACE: (f64, f64) = (-8.0, -12.0);
const SHADED_FACE: (f64, f64) = (-23.0, -28.0);
const EDGE: (f64, f64) = (-28.0, -35.0);
const BOTTOM: (f64, f64) = (-35.0, -42.0);

// ============================================================================
// Types
// ============================================================================

/// Two-stop gradient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gradient2 {
    pub start: String,
    pub end: String,
}

/// Three-stop gradient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gradient3 {
    pub start: String,
    pub middle: String,
    pub end: String,
}

/// Every surface color needed to paint one keycap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadePalette {
    /// Top surface. `middle` is the main color itself.
    pub top: Gradient3,
    pub left_face: Gradient2,
    pub top_side: Gradient2,
    pub right_face: Gradient2,
    pub bottom_side: Gradient2,
    pub edge: Gradient2,
    pub bottom: Gradient2,
}

/// Light direction and drop shadow used by the preview renderers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightingConfig {
    /// Degrees; -135 places the light at the upper left.
    pub light_angle: f32,
    pub shadow_offset_x: f32,
    pub shadow_offset_y: f32,
    /// Keycap depth in pixels.
    pub depth: f32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            light_angle: app_settings::LIGHT_ANGLE,
            shadow_offset_x: app_settings::SHADOW_OFFSET_X,
            shadow_offset_y: app_settings::SHADOW_OFFSET_Y,
            depth: app_settings::KEYCAP_DEPTH,
        }
    }
}

impl LightingConfig {
    pub fn from_config(config: &StudioConfig) -> Self {
        Self {
            depth: config.keycap_depth,
            ..Self::default()
        }
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Derives the full surface palette from a main color.
///
/// Fails with [`crate::DesignError::InvalidFormat`] if `main_color` is not a
/// 6-digit hex color.
pub fn palette(main_color: &str) -> DesignResult<ShadePalette> {
    Ok(shade_from(color::hex_to_rgb(main_color)?))
}

/// Like [`palette`], but shades from the default main color when `main_color`
/// is malformed, so a bad value never aborts rendering.
pub fn palette_or_default(main_color: &str) -> ShadePalette {
    match palette(main_color) {
        Ok(palette) => palette,
        Err(err) => {
            tracing::warn!(
                "{}; shading from {}",
                err,
                app_settings::DEFAULT_MAIN_COLOR
            );
            shade_from(color::parse_or_default(
                app_settings::DEFAULT_MAIN_COLOR,
                Rgb::WHITE,
            ))
        }
    }
}

fn shade_from(rgb: Rgb) -> ShadePalette {
    let hsl = color::rgb_to_hsl(rgb);
    let shade = |delta: f64| {
        color::hsl_to_hex(Hsl {
            l: (hsl.l + delta).clamp(0.0, 100.0),
            ..hsl
        })
    };
    let gradient = |(start, end): (f64, f64)| Gradient2 {
        start: shade(start),
        end: shade(end),
    };

    ShadePalette {
        top: Gradient3 {
            start: shade(TOP_HIGHLIGHT),
            middle: rgb.to_hex(),
            end: shade(TOP_SHADOW),
        },
        left_face: gradient(LIT_FACE),
        top_side: gradient(LIT_FACE),
        right_face: gradient(SHADED_FACE),
        bottom_side: gradient(SHADED_FACE),
        edge: gradient(EDGE),
        bottom: gradient(BOTTOM),
    }
}

// ============================================================================
// Tests
// ============================================================================
