// SPDX-License-Identifier: GPL-3.0-only

//! Selection transitions.
//!
//! A selection is a plain set of keycap ids. The state (none, one or many
//! selected) is its cardinality; these functions are the only transitions.

use std::collections::HashSet;

/// Toggles `id` in `selection`.
///
/// Non-additive toggles select exactly `id`. Additive toggles remove `id` if
/// it is selected and add it otherwise, leaving every other id untouched.
pub fn toggled(selection: &HashSet<String>, id: &str, additive: bool) -> HashSet<String> {
    if !additive {
        return HashSet::from([id.to_string()]);
    }

    let mut next = selection.clone();
    if !next.remove(id) {
        next.insert(id.to_string());
    }
    next
}

/// The empty selection.
pub fn cleared() -> HashSet<String> {
    HashSet::new()
}
