// SPDX-License-Identifier: GPL-3.0-only

//! Mapping from layout units to pixel space.
//!
//! Positions and sizes in a [`Keycap`] are expressed in layout units, where one
//! unit is the footprint of a standard 1×1 key. A [`GeometryMapper`] turns
//! them into pixel rectangles for a given unit size, inter-key gap and canvas
//! padding.
//!
//! # Formulas
//!
//! With unit size `u`, gap `g` and padding `p`:
//!
//! - `x(col) = col*u + col*g + p`
//! - `y(row) = (row + off)*u + (row + off)*g + p`, where `off` is 1 when the
//!   layout has a function row at row -1 and 0 otherwise
//! - `width(w) = w*u + (w - 1)*g`
//! - `canvas = W*u + W*g + 2p` for a layout spanning `W` units
//!
//! Canvas extents are computed from the layout tables, so widening a table
//! automatically widens its canvas.

use serde::{Deserialize, Serialize};

use crate::app_settings;
use crate::config::StudioConfig;
use crate::keyboard::tables;
use crate::keyboard::{Keycap, KeyboardLayout};

/// Distance (in pixels) below which touching rectangles are not counted as
/// intersecting.
const CONTACT_TOLERANCE: f32 = 0.01;

// ============================================================================
// Types
// ============================================================================

/// A pixel-space rectangle for one key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl KeyRect {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Hit test. The left and top edges are inclusive, the right and bottom
    /// edges exclusive, so a point on a shared border belongs to one key.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Returns `true` if the two rectangles share a non-trivial area.
    pub fn intersects(&self, other: &KeyRect) -> bool {
        self.x < other.right() - CONTACT_TOLERANCE
            && other.x < self.right() - CONTACT_TOLERANCE
            && self.y < other.bottom() - CONTACT_TOLERANCE
            && other.y < self.bottom() - CONTACT_TOLERANCE
    }
}

/// Pixel size of the rendering surface for a layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDimensions {
    pub width: f32,
    pub height: f32,
    pub unit_size: f32,
    pub gap: f32,
}

/// Bounding box of a layout table, in layout units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutExtent {
    /// Rightmost key edge.
    pub columns: f32,
    /// Distance from the top of the first row to the bottom of the last.
    pub rows: f32,
}

// ============================================================================
// Mapper
// ============================================================================

/// Converts layout-unit coordinates into pixel rectangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryMapper {
    pub unit_size: f32,
    pub gap: f32,
    pub padding: f32,
}

impl Default for GeometryMapper {
    fn default() -> Self {
        Self::new(
            app_settings::UNIT_SIZE,
            app_settings::GAP,
            app_settings::CANVAS_PADDING,
        )
    }
}

impl GeometryMapper {
    pub fn new(unit_size: f32, gap: f32, padding: f32) -> Self {
        Self {
            unit_size,
            gap,
            padding,
        }
    }

    pub fn from_config(config: &StudioConfig) -> Self {
        Self::new(config.unit_size, config.gap, config.canvas_padding)
    }

    /// Left edge of a key at `col`.
    pub fn x(&self, col: f32) -> f32 {
        col * self.unit_size + col * self.gap + self.padding
    }

    /// Top edge of a key at `row`.
    pub fn y(&self, row: f32, has_function_row: bool) -> f32 {
        let offset = if has_function_row { 1.0 } else { 0.0 };
        let row = row + offset;
        row * self.unit_size + row * self.gap + self.padding
    }

    /// Width of a key spanning `units` columns, including the gaps it covers.
    pub fn pixel_width(&self, units: f32) -> f32 {
        units * self.unit_size + (units - 1.0) * self.gap
    }

    /// Height of a key spanning `units` rows.
    pub fn pixel_height(&self, units: f32) -> f32 {
        units * self.unit_size + (units - 1.0) * self.gap
    }

    /// Pixel rectangle of a keycap within `layout`.
    pub fn key_rect(&self, keycap: &Keycap, layout: KeyboardLayout) -> KeyRect {
        KeyRect {
            x: self.x(keycap.col),
            y: self.y(keycap.row, layout.has_function_row()),
            width: self.pixel_width(keycap.width),
            height: self.pixel_height(keycap.height),
        }
    }

    /// Canvas size for `layout`, covering every key plus padding on both sides.
    pub fn canvas_size(&self, layout: KeyboardLayout) -> LayoutDimensions {
        let extent = layout_extent(layout);
        LayoutDimensions {
            width: self.span(extent.columns),
            height: self.span(extent.rows),
            unit_size: self.unit_size,
            gap: self.gap,
        }
    }

    /// Finds the keycap under a pixel position, if any.
    pub fn hit_test<'a>(
        &self,
        keycaps: &'a [Keycap],
        layout: KeyboardLayout,
        px: f32,
        py: f32,
    ) -> Option<&'a Keycap> {
        keycaps
            .iter()
            .find(|keycap| self.key_rect(keycap, layout).contains(px, py))
    }

    fn span(&self, units: f32) -> f32 {
        units * self.unit_size + units * self.gap + 2.0 * self.padding
    }
}

/// Computes the unit bounding box of a layout from its table.
pub fn layout_extent(layout: KeyboardLayout) -> LayoutExtent {
    let mut columns = 0.0_f32;
    let mut top = f32::MAX;
    let mut bottom = f32::MIN;

    for spec in tables::rows_for(layout) {
        let mut offset = 0.0_f32;
        for key in spec.keys {
            let col = match key.col {
                Some(col) => col,
                None => {
                    let col = offset;
                    offset += key.width;
                    col
                }
            };
            columns = columns.max(col + key.width);
            top = top.min(spec.row);
            bottom = bottom.max(spec.row + key.height);
        }
    }

    if top > bottom {
        return LayoutExtent {
            columns: 0.0,
            rows: 0.0,
        };
    }

    LayoutExtent {
        columns,
        rows: bottom - top,
    }
}

// ============================================================================
// Tests
// ============================================================================
