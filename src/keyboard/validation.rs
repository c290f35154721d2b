// SPDX-License-Identifier: GPL-3.0-only

//! Validation rules for keycap sets.
//!
//! Validation is permissive: it never rejects a set, it reports issues.
//! Duplicate ids and overlapping footprints are errors because they break
//! selection and rendering. Non-positive sizes, malformed colors and fonts
//! outside the offered lists are warnings; the render path copes with them.

use std::collections::HashSet;
use std::fmt;

use crate::app_settings;
use crate::color;
use crate::keyboard::types::Keycap;

/// Footprints closer than this (in layout units) are not treated as overlapping.
const OVERLAP_EPSILON: f32 = 1e-4;

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The set is structurally broken
    Error,
    /// The set is usable but contains questionable data
    Warning,
}

/// A problem found in a keycap set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub message: String,
    /// Path to the offending field, e.g. `keycaps[3].width`
    pub field_path: String,
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    pub fn new(severity: Severity, message: impl Into<String>, field_path: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            field_path: field_path.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
        };
        write!(f, "[{}] {}: {}", severity, self.field_path, self.message)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (Suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

/// A keycap's occupied rectangle in layout units: `(left, top, right, bottom)`.
pub fn footprint(keycap: &Keycap) -> (f32, f32, f32, f32) {
    (
        keycap.col,
        keycap.row,
        keycap.col + keycap.width,
        keycap.row + keycap.height,
    )
}

/// Returns `true` if two keycaps' footprints share any area.
pub fn overlaps(a: &Keycap, b: &Keycap) -> bool {
    let (al, at, ar, ab) = footprint(a);
    let (bl, bt, br, bb) = footprint(b);
    al < br - OVERLAP_EPSILON
        && bl < ar - OVERLAP_EPSILON
        && at < bb - OVERLAP_EPSILON
        && bt < ab - OVERLAP_EPSILON
}

/// Validates a keycap set and returns every issue found.
pub fn validate_keycaps(keycaps: &[Keycap]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    validate_unique_ids(keycaps, &mut issues);

    for (idx, keycap) in keycaps.iter().enumerate() {
        validate_keycap_fields(keycap, &format!("keycaps[{}]", idx), &mut issues);
    }

    validate_no_overlap(keycaps, &mut issues);

    issues
}

/// Returns `true` if any issue is an error.
pub fn has_errors(issues: &[ValidationIssue]) -> bool {
    issues.iter().any(|issue| issue.severity == Severity::Error)
}

fn validate_unique_ids(keycaps: &[Keycap], issues: &mut Vec<ValidationIssue>) {
    let mut seen = HashSet::new();
    for (idx, keycap) in keycaps.iter().enumerate() {
        if !seen.insert(keycap.id.as_str()) {
            issues.push(ValidationIssue::new(
                Severity::Error,
                format!("Duplicate keycap id '{}'", keycap.id),
                format!("keycaps[{}].id", idx),
            )
            .with_suggestion("Regenerate the layout or give the key a unique id"));
        }
    }
}

fn validate_keycap_fields(keycap: &Keycap, path: &str, issues: &mut Vec<ValidationIssue>) {
    let positive = [
        ("width", keycap.width),
        ("height", keycap.height),
        ("fontSize", keycap.font_size),
    ];
    for (field, value) in positive {
        if !(value > 0.0) {
            issues.push(ValidationIssue::new(
                Severity::Warning,
                format!("{} must be positive, got {}", field, value),
                format!("{}.{}", path, field),
            ));
        }
    }

    if keycap.col < 0.0 {
        issues.push(ValidationIssue::new(
            Severity::Warning,
            format!("Column must not be negative, got {}", keycap.col),
            format!("{}.col", path),
        ));
    }

    let known_font = app_settings::AVAILABLE_FONTS
        .iter()
        .any(|font| font.eq_ignore_ascii_case(&keycap.font_family));
    if !known_font {
        issues.push(
            ValidationIssue::new(
                Severity::Warning,
                format!("Unknown font family '{}'", keycap.font_family),
                format!("{}.fontFamily", path),
            )
            .with_suggestion(format!("Use one of: {}", app_settings::AVAILABLE_FONTS.join(", "))),
        );
    }

    if !app_settings::FONT_WEIGHTS
        .iter()
        .any(|(weight, _)| *weight == keycap.font_weight)
    {
        issues.push(
            ValidationIssue::new(
                Severity::Warning,
                format!("Unknown font weight '{}'", keycap.font_weight),
                format!("{}.fontWeight", path),
            )
            .with_suggestion("Use a multiple of 100 between 100 and 900"),
        );
    }

    for (field, value) in [("mainColor", &keycap.main_color), ("textColor", &keycap.text_color)] {
        if let Err(err) = color::hex_to_rgb(value) {
            issues.push(
                ValidationIssue::new(Severity::Warning, err.to_string(), format!("{}.{}", path, field))
                    .with_suggestion(format!("Use a color such as {}", app_settings::DEFAULT_MAIN_COLOR)),
            );
        }
    }
}

fn validate_no_overlap(keycaps: &[Keycap], issues: &mut Vec<ValidationIssue>) {
    for (i, a) in keycaps.iter().enumerate() {
        for (j, b) in keycaps.iter().enumerate().skip(i + 1) {
            if overlaps(a, b) {
                issues.push(ValidationIssue::new(
                    Severity::Error,
                    format!("Keycap '{}' overlaps keycap '{}' (keycaps[{}])", a.id, b.id, j),
                    format!("keycaps[{}]", i),
                )
                .with_suggestion("Move or resize one of the keys"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::generator::generate;
    use crate::keyboard::types::{KeyboardLayout, KeycapUpdate};

    fn keycaps() -> Vec<Keycap> {
        generate(KeyboardLayout::SixtyOne)
    }

    #[test]
    fn test_adjacent_keys_do_not_overlap() {
        let set = keycaps();
        let shift = set.iter().find(|k| k.text == "Shift").unwrap();
        let z = set.iter().find(|k| k.text == "Z").unwrap();
        assert_eq!(shift.col + shift.width, z.col);
        assert!(!overlaps(shift, z));
    }

    #[test]
    fn test_tall_key_overlaps_row_below() {
        let mut set = keycaps();
        set[0].apply(&KeycapUpdate::new().with_size(1.0, 2.0));
        let issues = validate_keycaps(&set);
        assert!(has_errors(&issues), "A 2u tall Esc must collide with Tab");
        assert!(issues.iter().any(|i| i.message.contains("overlaps")));
    }

    #[test]
    fn test_duplicate_ids_are_errors() {
        let mut set = keycaps();
        set[1].id = set[0].id.clone();
        let issues = validate_keycaps(&set);
        assert!(issues
            .iter()
            .any(|i| i.severity == Severity::Error && i.field_path == "keycaps[1].id"));
    }

    #[test]
    fn test_bad_fields_are_warnings() {
        let mut set = keycaps();
        set[2].width = 0.0;
        set[3].main_color = "teal".into();
        let issues = validate_keycaps(&set);
        assert!(!has_errors(&issues));
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].field_path, "keycaps[2].width");
        assert_eq!(issues[1].field_path, "keycaps[3].mainColor");
    }

    #[test]
    fn test_unknown_fonts_are_warnings() {
        let mut set = keycaps();
        set[0].apply(&KeycapUpdate::new().with_font_family("courier new").with_font_weight("450"));
        set[1].apply(&KeycapUpdate::new().with_font_family("Papyrus"));

        let paths: Vec<String> = validate_keycaps(&set).into_iter().map(|i| i.field_path).collect();
        assert_eq!(paths, vec!["keycaps[0].fontWeight", "keycaps[1].fontFamily"]);
    }

    #[test]
    fn test_issue_display() {
        let issue = ValidationIssue::new(Severity::Warning, "width must be positive", "keycaps[0].width");
        assert_eq!(
            issue.to_string(),
            "[WARNING] keycaps[0].width: width must be positive"
        );

        let issue = issue.with_suggestion("Use 1");
        assert_eq!(
            issue.to_string(),
            "[WARNING] keycaps[0].width: width must be positive (Suggestion: Use 1)"
        );
    }
}
