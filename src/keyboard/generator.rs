// SPDX-License-Identifier: GPL-3.0-only

//! Layout generation: turns a layout table into positioned keycaps.
//!
//! Generation is pure. Calling it twice for the same layout yields identical
//! key sets, including ids, which are minted as `key-<n>` in table order.

use crate::config::KeycapDefaults;
use crate::error::DesignResult;
use crate::keyboard::tables::{self, RowSpec};
use crate::keyboard::types::{KeyboardLayout, Keycap, TextTransform};

/// Generates the default key set for a layout.
pub fn generate(layout: KeyboardLayout) -> Vec<Keycap> {
    generate_with_defaults(layout, &KeycapDefaults::default())
}

/// Generates a key set, styling every key with `defaults`.
pub fn generate_with_defaults(layout: KeyboardLayout, defaults: &KeycapDefaults) -> Vec<Keycap> {
    let rows = tables::rows_for(layout);
    let mut keycaps = Vec::with_capacity(rows.iter().map(|r| r.keys.len()).sum());

    for spec in rows {
        place_row(spec, defaults, &mut keycaps);
    }

    tracing::debug!("Generated {} keycaps for {}", keycaps.len(), layout);
    keycaps
}

/// Generates a key set from a layout identifier such as `"87-key"`.
pub fn generate_by_id(layout_id: &str) -> DesignResult<Vec<Keycap>> {
    Ok(generate(layout_id.parse()?))
}

fn place_row(spec: &RowSpec, defaults: &KeycapDefaults, out: &mut Vec<Keycap>) {
    let mut col_offset = 0.0_f32;

    for key in spec.keys {
        let col = match key.col {
            Some(col) => col,
            None => {
                let col = col_offset;
                col_offset += key.width;
                col
            }
        };

        out.push(Keycap {
            id: format!("key-{}", out.len()),
            row: spec.row,
            col,
            width: key.width,
            height: key.height,
            main_color: defaults.main_color.clone(),
            text_color: defaults.text_color.clone(),
            text: key.label.to_string(),
            font_size: spec.font_size,
            font_family: defaults.font_family.clone(),
            font_weight: defaults.font_weight.clone(),
            text_align: defaults.text_align.clone(),
            text_transform: TextTransform::None,
            pattern: None,
        });
    }
}
