// SPDX-License-Identifier: GPL-3.0-only

//! Keyboard model: layouts, keycaps and key classification.
//!
//! This module owns everything that describes a keyboard independently of how
//! it is drawn:
//!
//! - **Types**: [`Keycap`], [`KeycapUpdate`], [`KeycapStyle`] and the layout,
//!   base and switch enums stored in a design
//! - **Tables**: declarative key tables for the 61, 87 and 104 key layouts
//! - **Generation**: positioned keycaps built from a table
//! - **Classification**: mapping a legend to a [`KeyType`]
//! - **Validation**: permissive checks that collect [`ValidationIssue`]s
//!
//! # Example
//!
//! ```rust,ignore
//! use keycap_studio::keyboard::{generate, filter_by_type, KeyType, KeyboardLayout};
//!
//! let keycaps = generate(KeyboardLayout::EightySeven);
//! let letters = filter_by_type(&keycaps, KeyType::Letter);
//! assert_eq!(letters.len(), 26);
//! ```

// Sub-modules
pub mod classify;
pub mod generator;
pub mod tables;
pub mod types;
pub mod validation;

// Re-export public API - Data structures
pub use types::{
    AppPhase, BaseStyle, KeyType, Keycap, KeycapPattern, KeycapStyle, KeycapUpdate,
    KeyboardLayout, PatternOffset, SwitchHeight, TextTransform, ViewConfig, ViewConfigUpdate,
};

// Re-export public API - Operations
pub use classify::{classify, filter_by_type, is_multiline, keycap_type, split_lines};
pub use generator::{generate, generate_by_id, generate_with_defaults};
pub use validation::{has_errors, validate_keycaps, Severity, ValidationIssue};

// ============================================================================
// Public API Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Test 1: Type counts for a generated 61-key board
    ///
    /// Every letter and digit appears exactly once on a 60% board, and all
    /// remaining keys fall into the modifier or special buckets.
    #[test]
    fn test_61_key_type_counts() {
        let keycaps = generate(KeyboardLayout::SixtyOne);

        assert_eq!(filter_by_type(&keycaps, KeyType::Letter).len(), 26);
        assert_eq!(filter_by_type(&keycaps, KeyType::Number).len(), 10);
        assert_eq!(filter_by_type(&keycaps, KeyType::Function).len(), 0);
        assert_eq!(filter_by_type(&keycaps, KeyType::Arrow).len(), 0);

        let total: usize = KeyType::ALL
            .iter()
            .map(|t| filter_by_type(&keycaps, *t).len())
            .sum();
        assert_eq!(total, keycaps.len(), "Every key must fall in exactly one type");
    }

    /// Test 2: TKL has function keys and arrows
    #[test]
    fn test_87_key_type_counts() {
        let keycaps = generate(KeyboardLayout::EightySeven);

        assert_eq!(filter_by_type(&keycaps, KeyType::Function).len(), 12);
        assert_eq!(filter_by_type(&keycaps, KeyType::Arrow).len(), 4);
        assert_eq!(filter_by_type(&keycaps, KeyType::Letter).len(), 26);
    }

    /// Test 3: Numpad digits classify as numbers
    #[test]
    fn test_104_key_numpad_digits_are_numbers() {
        let keycaps = generate(KeyboardLayout::FullSize);
        assert_eq!(filter_by_type(&keycaps, KeyType::Number).len(), 20);
    }

    /// Test 4: Classification follows legend edits
    #[test]
    fn test_classification_follows_text() {
        let mut keycaps = generate(KeyboardLayout::SixtyOne);
        let idx = keycaps.iter().position(|k| k.text == "Q").unwrap();

        keycaps[idx].apply(&KeycapUpdate::new().with_text("F5"));
        assert_eq!(keycap_type(&keycaps[idx]), KeyType::Function);
    }
}
