// SPDX-License-Identifier: GPL-3.0-only

//! Color model: hex, RGB and HSL conversions plus lightness adjustments.
//!
//! All functions are pure. Hex strings are accepted with or without a leading
//! `#` and in either case; output is always uppercase `#RRGGBB`.
//!
//! # Lightness adjustments
//!
//! [`darken`] and [`brighten`] shift HSL lightness by an absolute number of
//! percentage points, matching SASS `darken($c, 16%)`. `darken("#808080", 10.0)`
//! lowers lightness from ~50 to ~40; it does not scale lightness by 10%.
//!
//! ```rust,ignore
//! use keycap_studio::color;
//!
//! let mid = color::darken("#E8E8E8", 16.0)?;
//! let text = color::contrast_text_color(&mid)?;
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{DesignError, DesignResult};

/// Luminance below which a color counts as dark (0-255 scale).
const DARK_LUMINANCE_THRESHOLD: f64 = 127.5;

/// An RGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    /// Creates a color from 8-bit channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Creates a color from floating point channels, rounding and saturating
    /// each to 0-255.
    pub fn from_channels(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
        }
    }

    /// Returns the uppercase `#RRGGBB` form.
    pub fn to_hex(self) -> String {
        rgb_to_hex(self.r, self.g, self.b)
    }

    /// Perceived luminance on a 0-255 scale.
    pub fn luminance(self) -> f64 {
        0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b)
    }
}

/// An HSL color. Hue is in `[0, 360)`, saturation and lightness in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

fn clamp_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Parses a 6-digit hex color, with optional leading `#`.
///
/// Returns [`DesignError::InvalidFormat`] for any other length or for
/// non-hex characters (3-digit shorthand is rejected).
pub fn hex_to_rgb(hex: &str) -> DesignResult<Rgb> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(DesignError::invalid_format(hex));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).map_err(|_| DesignError::invalid_format(hex))
    };

    Ok(Rgb {
        r: channel(0..2)?,
        g: channel(2..4)?,
        b: channel(4..6)?,
    })
}

/// Formats channels as uppercase `#RRGGBB`.
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}

/// Converts RGB to HSL.
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = f64::from(rgb.r) / 255.0;
    let g = f64::from(rgb.g) / 255.0;
    let b = f64::from(rgb.b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl {
            h: 0.0,
            s: 0.0,
            l: l * 100.0,
        };
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    } / 6.0;

    Hsl {
        h: (h * 360.0) % 360.0,
        s: s * 100.0,
        l: l * 100.0,
    }
}

/// Converts HSL to RGB. Out-of-range saturation and lightness are clamped.
pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let h = hsl.h.rem_euclid(360.0) / 360.0;
    let s = hsl.s.clamp(0.0, 100.0) / 100.0;
    let l = hsl.l.clamp(0.0, 100.0) / 100.0;

    if s == 0.0 {
        let v = l * 255.0;
        return Rgb::from_channels(v, v, v);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    Rgb::from_channels(
        hue_to_channel(p, q, h + 1.0 / 3.0) * 255.0,
        hue_to_channel(p, q, h) * 255.0,
        hue_to_channel(p, q, h - 1.0 / 3.0) * 255.0,
    )
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Parses a hex color straight to HSL.
pub fn hex_to_hsl(hex: &str) -> DesignResult<Hsl> {
    hex_to_rgb(hex).map(rgb_to_hsl)
}

/// Formats an HSL color as `#RRGGBB`.
pub fn hsl_to_hex(hsl: Hsl) -> String {
    hsl_to_rgb(hsl).to_hex()
}

/// Parses `hex`, falling back to `default` when it is malformed.
///
/// Render paths use this so that one bad color never aborts a frame.
pub fn parse_or_default(hex: &str, default: Rgb) -> Rgb {
    match hex_to_rgb(hex) {
        Ok(rgb) => rgb,
        Err(err) => {
            tracing::warn!("{}; falling back to {}", err, default.to_hex());
            default
        }
    }
}

/// Lowers lightness by `amount` percentage points, saturating at 0.
pub fn darken(hex: &str, amount: f64) -> DesignResult<String> {
    adjust_lightness(hex, -amount)
}

/// Raises lightness by `amount` percentage points, saturating at 100.
pub fn brighten(hex: &str, amount: f64) -> DesignResult<String> {
    adjust_lightness(hex, amount)
}

/// Shifts lightness by a signed delta, clamped to `[0, 100]`.
pub fn adjust_lightness(hex: &str, delta: f64) -> DesignResult<String> {
    let mut hsl = hex_to_hsl(hex)?;
    hsl.l = (hsl.l + delta).clamp(0.0, 100.0);
    Ok(hsl_to_hex(hsl))
}

/// Shifts saturation by a signed delta, clamped to `[0, 100]`.
pub fn adjust_saturation(hex: &str, delta: f64) -> DesignResult<String> {
    let mut hsl = hex_to_hsl(hex)?;
    hsl.s = (hsl.s + delta).clamp(0.0, 100.0);
    Ok(hsl_to_hex(hsl))
}

/// Linear per-channel interpolation. `ratio` 0 yields `a`, 1 yields `b`.
pub fn mix(a: &str, b: &str, ratio: f64) -> DesignResult<String> {
    let from = hex_to_rgb(a)?;
    let to = hex_to_rgb(b)?;
    let ratio = ratio.clamp(0.0, 1.0);
    let lerp = |x: u8, y: u8| f64::from(x) * (1.0 - ratio) + f64::from(y) * ratio;

    Ok(Rgb::from_channels(lerp(from.r, to.r), lerp(from.g, to.g), lerp(from.b, to.b)).to_hex())
}

/// Returns `true` when perceived luminance is below the midpoint.
pub fn is_dark(hex: &str) -> DesignResult<bool> {
    Ok(hex_to_rgb(hex)?.luminance() < DARK_LUMINANCE_THRESHOLD)
}

/// Black text on light backgrounds, white text on dark ones.
pub fn contrast_text_color(hex: &str) -> DesignResult<&'static str> {
    Ok(if is_dark(hex)? { "#FFFFFF" } else { "#000000" })
}

/// Lightness (0-100) of a hex color, used to compare shading stops.
pub fn lightness(hex: &str) -> DesignResult<f64> {
    Ok(hex_to_hsl(hex)?.l)
}
