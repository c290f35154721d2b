// SPDX-License-Identifier: GPL-3.0-only

//! Key type classification from legend text.
//!
//! Classification normalizes the legend (line breaks become spaces, then trim
//! and upper-case) and looks it up in a fixed label table. If the whole label
//! is unknown, the first whitespace-delimited token is tried, so a two-line
//! `"Caps\nLock"` resolves through `CAPS`. Anything else is `Special`.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::keyboard::types::{KeyType, Keycap};

/// Label table, keyed by upper-cased label.
const LABELS: &[(&str, KeyType)] = &[
    ("A", KeyType::Letter),
    ("B", KeyType::Letter),
    ("C", KeyType::Letter),
    ("D", KeyType::Letter),
    ("E", KeyType::Letter),
    ("F", KeyType::Letter),
    ("G", KeyType::Letter),
    ("H", KeyType::Letter),
    ("I", KeyType::Letter),
    ("J", KeyType::Letter),
    ("K", KeyType::Letter),
    ("L", KeyType::Letter),
    ("M", KeyType::Letter),
    ("N", KeyType::Letter),
    ("O", KeyType::Letter),
    ("P", KeyType::Letter),
    ("Q", KeyType::Letter),
    ("R", KeyType::Letter),
    ("S", KeyType::Letter),
    ("T", KeyType::Letter),
    ("U", KeyType::Letter),
    ("V", KeyType::Letter),
    ("W", KeyType::Letter),
    ("X", KeyType::Letter),
    ("Y", KeyType::Letter),
    ("Z", KeyType::Letter),
    ("0", KeyType::Number),
    ("1", KeyType::Number),
    ("2", KeyType::Number),
    ("3", KeyType::Number),
    ("4", KeyType::Number),
    ("5", KeyType::Number),
    ("6", KeyType::Number),
    ("7", KeyType::Number),
    ("8", KeyType::Number),
    ("9", KeyType::Number),
    ("F1", KeyType::Function),
    ("F2", KeyType::Function),
    ("F3", KeyType::Function),
    ("F4", KeyType::Function),
    ("F5", KeyType::Function),
    ("F6", KeyType::Function),
    ("F7", KeyType::Function),
    ("F8", KeyType::Function),
    ("F9", KeyType::Function),
    ("F10", KeyType::Function),
    ("F11", KeyType::Function),
    ("F12", KeyType::Function),
    ("↑", KeyType::Arrow),
    ("↓", KeyType::Arrow),
    ("←", KeyType::Arrow),
    ("→", KeyType::Arrow),
    ("SHIFT", KeyType::Modifier),
    ("CTRL", KeyType::Modifier),
    ("ALT", KeyType::Modifier),
    ("WIN", KeyType::Modifier),
    ("CAPS", KeyType::Modifier),
    ("TAB", KeyType::Modifier),
    ("ENTER", KeyType::Modifier),
    ("BACKSPACE", KeyType::Modifier),
    ("SPACE", KeyType::Modifier),
    ("ESC", KeyType::Special),
    ("`", KeyType::Special),
    ("-", KeyType::Special),
    ("=", KeyType::Special),
    ("[", KeyType::Special),
    ("]", KeyType::Special),
    ("\\", KeyType::Special),
    (";", KeyType::Special),
    ("'", KeyType::Special),
    (",", KeyType::Special),
    (".", KeyType::Special),
    ("/", KeyType::Special),
    ("DELETE", KeyType::Special),
    ("INSERT", KeyType::Special),
    ("HOME", KeyType::Special),
    ("END", KeyType::Special),
    ("PGUP", KeyType::Special),
    ("PGDN", KeyType::Special),
    ("PRTSC", KeyType::Special),
    ("SCRLK", KeyType::Special),
    ("PAUSE", KeyType::Special),
    ("NUMLOCK", KeyType::Special),
];

static LABEL_TABLE: LazyLock<HashMap<&'static str, KeyType>> =
    LazyLock::new(|| LABELS.iter().copied().collect());

/// Normalizes a legend for lookup: line breaks to spaces, trimmed, upper-cased.
fn normalize(text: &str) -> String {
    text.replace(['\r', '\n'], " ").trim().to_uppercase()
}

/// Classifies a legend.
pub fn classify(text: &str) -> KeyType {
    let normalized = normalize(text);

    if let Some(key_type) = LABEL_TABLE.get(normalized.as_str()) {
        return *key_type;
    }

    normalized
        .split_whitespace()
        .next()
        .and_then(|first| LABEL_TABLE.get(first))
        .copied()
        .unwrap_or(KeyType::Special)
}

/// Classifies a keycap by its current legend.
pub fn keycap_type(keycap: &Keycap) -> KeyType {
    classify(&keycap.text)
}

/// Keycaps whose legend classifies as `key_type`.
pub fn filter_by_type(keycaps: &[Keycap], key_type: KeyType) -> Vec<&Keycap> {
    keycaps
        .iter()
        .filter(|keycap| keycap_type(keycap) == key_type)
        .collect()
}

/// Splits a legend into its display lines.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

/// Returns `true` if the legend spans more than one line.
pub fn is_multiline(text: &str) -> bool {
    text.contains('\n')
}
