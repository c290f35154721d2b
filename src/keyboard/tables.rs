// SPDX-License-Identifier: GPL-3.0-only

//! Declarative key tables for each supported layout.
//!
//! A layout is a list of [`RowSpec`] segments. Within a segment, keys without
//! an explicit column are placed left to right at a running offset that grows
//! by each key's width. Keys with an explicit column (navigation cluster,
//! arrows, numpad, function row) are placed there and do not move the offset.
//!
//! Several segments may share a row index when a row mixes the main block
//! with a separated cluster. Segments are emitted in table order, which fixes
//! the order of generated key ids.

use crate::app_settings;
use crate::keyboard::types::KeyboardLayout;

/// Font size for the main block, in pixels.
const MAIN: f32 = app_settings::DEFAULT_FONT_SIZE;
/// Font size for the function row.
const FN_ROW: f32 = 10.0;
/// Font size for the TKL navigation cluster.
const NAV_TKL: f32 = 12.0;
/// Font size for the full-size navigation cluster.
const NAV_FULL: f32 = 11.0;

/// One key in a table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeySpec {
    pub label: &'static str,
    pub width: f32,
    pub height: f32,
    /// Explicit column; `None` means "at the running offset".
    pub col: Option<f32>,
}

/// A contiguous run of keys on one row, sharing a font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowSpec {
    pub row: f32,
    pub font_size: f32,
    pub keys: &'static [KeySpec],
}

/// Accumulated key of the given width.
const fn key(label: &'static str, width: f32) -> KeySpec {
    KeySpec {
        label,
        width,
        height: 1.0,
        col: None,
    }
}

/// 1u key at an explicit column.
const fn at(label: &'static str, col: f32) -> KeySpec {
    KeySpec {
        label,
        width: 1.0,
        height: 1.0,
        col: Some(col),
    }
}

/// Key at an explicit column with a custom footprint.
const fn sized_at(label: &'static str, col: f32, width: f32, height: f32) -> KeySpec {
    KeySpec {
        label,
        width,
        height,
        col: Some(col),
    }
}

const fn row(row: f32, font_size: f32, keys: &'static [KeySpec]) -> RowSpec {
    RowSpec {
        row,
        font_size,
        keys,
    }
}

// ============================================================================
// Shared rows
// ============================================================================

const FUNCTION_ROW: &[KeySpec] = &[
    at("Esc", 0.0),
    at("F1", 2.0),
    at("F2", 3.0),
    at("F3", 4.0),
    at("F4", 5.0),
    at("F5", 6.5),
    at("F6", 7.5),
    at("F7", 8.5),
    at("F8", 9.5),
    at("F9", 11.0),
    at("F10", 12.0),
    at("F11", 13.0),
    at("F12", 14.0),
    at("PrtSc", 15.25),
    at("Scroll\nLock", 16.25),
    at("Pause\nBreak", 17.25),
];

const NUMBER_ROW_ESC: &[KeySpec] = &[
    key("Esc", 1.0),
    key("1", 1.0),
    key("2", 1.0),
    key("3", 1.0),
    key("4", 1.0),
    key("5", 1.0),
    key("6", 1.0),
    key("7", 1.0),
    key("8", 1.0),
    key("9", 1.0),
    key("0", 1.0),
    key("-", 1.0),
    key("=", 1.0),
    key("Backspace", 2.0),
];

const NUMBER_ROW_GRAVE: &[KeySpec] = &[
    key("`", 1.0),
    key("1", 1.0),
    key("2", 1.0),
    key("3", 1.0),
    key("4", 1.0),
    key("5", 1.0),
    key("6", 1.0),
    key("7", 1.0),
    key("8", 1.0),
    key("9", 1.0),
    key("0", 1.0),
    key("-", 1.0),
    key("=", 1.0),
    key("Backspace", 2.0),
];

const QWERTY_ROW: &[KeySpec] = &[
    key("Tab", 1.5),
    key("Q", 1.0),
    key("W", 1.0),
    key("E", 1.0),
    key("R", 1.0),
    key("T", 1.0),
    key("Y", 1.0),
    key("U", 1.0),
    key("I", 1.0),
    key("O", 1.0),
    key("P", 1.0),
    key("[", 1.0),
    key("]", 1.0),
    key("\\", 1.5),
];

const HOME_ROW: &[KeySpec] = &[
    key("Caps Lock", 1.75),
    key("A", 1.0),
    key("S", 1.0),
    key("D", 1.0),
    key("F", 1.0),
    key("G", 1.0),
    key("H", 1.0),
    key("J", 1.0),
    key("K", 1.0),
    key("L", 1.0),
    key(";", 1.0),
    key("'", 1.0),
    key("Enter", 2.25),
];

const SHIFT_ROW: &[KeySpec] = &[
    key("Shift", 2.25),
    key("Z", 1.0),
    key("X", 1.0),
    key("C", 1.0),
    key("V", 1.0),
    key("B", 1.0),
    key("N", 1.0),
    key("M", 1.0),
    key(",", 1.0),
    key(".", 1.0),
    key("/", 1.0),
    key("Shift", 2.75),
];

const BOTTOM_ROW_60: &[KeySpec] = &[
    key("Ctrl", 1.25),
    key("Win", 1.25),
    key("Alt", 1.25),
    key("Space", 6.25),
    key("Alt", 1.25),
    key("Win", 1.25),
    key("ScrLk", 1.25),
    key("Ctrl", 1.25),
];

const BOTTOM_ROW_FN: &[KeySpec] = &[
    key("Ctrl", 1.25),
    key("Win", 1.25),
    key("Alt", 1.25),
    key("Space", 6.25),
    key("Alt", 1.25),
    key("Win", 1.25),
    key("Fn", 1.25),
    key("Ctrl", 1.25),
];

const NAV_UPPER: &[KeySpec] = &[at("Insert", 15.25), at("Home", 16.25), at("PgUp", 17.25)];
const NAV_LOWER: &[KeySpec] = &[at("Delete", 15.25), at("End", 16.25), at("PgDn", 17.25)];
const ARROW_UP: &[KeySpec] = &[at("↑", 16.25)];
const ARROWS: &[KeySpec] = &[at("←", 15.25), at("↓", 16.25), at("→", 17.25)];

// ============================================================================
// Numeric keypad (104-key only)
// ============================================================================

const NUMPAD_ROW_0: &[KeySpec] = &[
    at("Num\nLock", 18.5),
    at("/", 19.5),
    at("*", 20.5),
    at("-", 21.5),
];
const NUMPAD_ROW_1: &[KeySpec] = &[
    at("7", 18.5),
    at("8", 19.5),
    at("9", 20.5),
    // Spans rows 1 and 2; row 2 leaves column 21.5 empty.
    sized_at("+", 21.5, 1.0, 2.0),
];
const NUMPAD_ROW_2: &[KeySpec] = &[at("4", 18.5), at("5", 19.5), at("6", 20.5)];
const NUMPAD_ROW_3: &[KeySpec] = &[
    at("1", 18.5),
    at("2", 19.5),
    at("3", 20.5),
    // Spans rows 3 and 4; row 4 leaves column 21.5 empty.
    sized_at("Enter", 21.5, 1.0, 2.0),
];
const NUMPAD_ROW_4: &[KeySpec] = &[sized_at("0", 18.5, 2.0, 1.0), at(".", 20.5)];

// ============================================================================
// Layouts
// ============================================================================

/// 61-key (60%) layout: rows 0 to 4.
pub const LAYOUT_61: &[RowSpec] = &[
    row(0.0, MAIN, NUMBER_ROW_ESC),
    row(1.0, MAIN, QWERTY_ROW),
    row(2.0, MAIN, HOME_ROW),
    row(3.0, MAIN, SHIFT_ROW),
    row(4.0, MAIN, BOTTOM_ROW_60),
];

/// 87-key (tenkeyless) layout: function row at -1, then rows 0 to 4.
pub const LAYOUT_87: &[RowSpec] = &[
    row(-1.0, FN_ROW, FUNCTION_ROW),
    row(0.0, MAIN, NUMBER_ROW_GRAVE),
    row(0.0, NAV_TKL, NAV_UPPER),
    row(1.0, MAIN, QWERTY_ROW),
    row(1.0, NAV_TKL, NAV_LOWER),
    row(2.0, MAIN, HOME_ROW),
    row(3.0, MAIN, SHIFT_ROW),
    row(3.0, MAIN, ARROW_UP),
    row(4.0, MAIN, BOTTOM_ROW_FN),
    row(4.0, MAIN, ARROWS),
];

/// 104-key (full size) layout: TKL plus numeric keypad.
pub const LAYOUT_104: &[RowSpec] = &[
    row(-1.0, FN_ROW, FUNCTION_ROW),
    row(0.0, MAIN, NUMBER_ROW_GRAVE),
    row(0.0, NAV_FULL, NAV_UPPER),
    row(0.0, MAIN, NUMPAD_ROW_0),
    row(1.0, MAIN, QWERTY_ROW),
    row(1.0, NAV_FULL, NAV_LOWER),
    row(1.0, MAIN, NUMPAD_ROW_1),
    row(2.0, MAIN, HOME_ROW),
    row(2.0, MAIN, NUMPAD_ROW_2),
    row(3.0, MAIN, SHIFT_ROW),
    row(3.0, MAIN, ARROW_UP),
    row(3.0, MAIN, NUMPAD_ROW_3),
    row(4.0, MAIN, BOTTOM_ROW_FN),
    row(4.0, MAIN, ARROWS),
    row(4.0, MAIN, NUMPAD_ROW_4),
];

/// Returns the table for a layout.
pub fn rows_for(layout: KeyboardLayout) -> &'static [RowSpec] {
    match layout {
        KeyboardLayout::SixtyOne => LAYOUT_61,
        KeyboardLayout::EightySeven => LAYOUT_87,
        KeyboardLayout::FullSize => LAYOUT_104,
    }
}
