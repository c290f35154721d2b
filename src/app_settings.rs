// SPDX-License-Identifier: GPL-3.0-only

//! Centralized constants for geometry, default keycap style and lighting.

/// Pixel size of one layout unit (1u).
pub const UNIT_SIZE: f32 = 54.0;

/// Gap between adjacent keys in pixels.
pub const GAP: f32 = 4.0;

/// Padding around the keyboard canvas in pixels.
pub const CANVAS_PADDING: f32 = 20.0;

/// Visual depth of a keycap in pixels (3D preview).
pub const KEYCAP_DEPTH: f32 = 12.0;

/// Angle of the implied light source in degrees (upper-left).
pub const LIGHT_ANGLE: f32 = -135.0;

/// Horizontal shadow offset in pixels.
pub const SHADOW_OFFSET_X: f32 = 4.0;

/// Vertical shadow offset in pixels.
pub const SHADOW_OFFSET_Y: f32 = 4.0;

/// Default keycap base color.
pub const DEFAULT_MAIN_COLOR: &str = "#E8E8E8";

/// Default legend color.
pub const DEFAULT_TEXT_COLOR: &str = "#2C2C2C";

/// Default legend font size in pixels.
pub const DEFAULT_FONT_SIZE: f32 = 14.0;

/// Default legend font family.
pub const DEFAULT_FONT_FAMILY: &str = "Inter";

/// Default legend font weight.
pub const DEFAULT_FONT_WEIGHT: &str = "500";

/// Default legend alignment.
pub const DEFAULT_TEXT_ALIGN: &str = "center";

/// Font families offered by the property panel.
pub const AVAILABLE_FONTS: &[&str] = &[
    "Inter",
    "Roboto",
    "Arial",
    "Helvetica",
    "Georgia",
    "Times New Roman",
    "Courier New",
    "Verdana",
    "Comic Sans MS",
    "Impact",
    "Lucida Console",
    "Tahoma",
    "Trebuchet MS",
    "Monospace",
    "Cursive",
    "Fantasy",
    "System-ui",
    "Serif",
    "Sans-serif",
];

/// Font weights as `(css value, label)` pairs.
pub const FONT_WEIGHTS: &[(&str, &str)] = &[
    ("100", "Thin"),
    ("200", "Extra Light"),
    ("300", "Light"),
    ("400", "Regular"),
    ("500", "Medium"),
    ("600", "Semi Bold"),
    ("700", "Bold"),
    ("800", "Extra Bold"),
    ("900", "Black"),
];

/// Version string written into exported design files.
pub const EXPORT_FORMAT_VERSION: &str = "1.0.0";
