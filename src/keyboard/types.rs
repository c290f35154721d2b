// SPDX-License-Identifier: GPL-3.0-only

//! Core data types for keyboard designs.
//!
//! Serialized field names are camelCase so that snapshots interoperate with
//! the JSON documents produced by the web front end.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DesignError;

// ============================================================================
// Keyboard Configuration
// ============================================================================

/// Physical keyboard layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum KeyboardLayout {
    /// 60% board, no function row or navigation cluster
    #[default]
    #[serde(rename = "61-key")]
    SixtyOne,
    /// Tenkeyless: function row plus navigation and arrow clusters
    #[serde(rename = "87-key")]
    EightySeven,
    /// Full size: TKL plus numeric keypad
    #[serde(rename = "104-key")]
    FullSize,
}

impl KeyboardLayout {
    /// Every supported layout.
    pub const ALL: [KeyboardLayout; 3] = [
        KeyboardLayout::SixtyOne,
        KeyboardLayout::EightySeven,
        KeyboardLayout::FullSize,
    ];

    /// The identifier used in snapshots and by the front end.
    pub fn as_str(self) -> &'static str {
        match self {
            KeyboardLayout::SixtyOne => "61-key",
            KeyboardLayout::EightySeven => "87-key",
            KeyboardLayout::FullSize => "104-key",
        }
    }

    /// Whether the layout has a function row at row -1.
    pub fn has_function_row(self) -> bool {
        !matches!(self, KeyboardLayout::SixtyOne)
    }
}

impl fmt::Display for KeyboardLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyboardLayout {
    type Err = DesignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeyboardLayout::ALL
            .into_iter()
            .find(|layout| layout.as_str() == s)
            .ok_or_else(|| DesignError::unsupported_layout(s))
    }
}

/// Finish of the keyboard case under the keycaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BaseStyle {
    #[default]
    MatteBlack,
    MetalGray,
    AcrylicWhite,
    BrushedSilver,
    TransparentAcrylic,
}

/// Switch stem height, affecting the 3D preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SwitchHeight {
    LowProfile,
    #[default]
    HighProfile,
}

/// Whether the user is still choosing a layout or editing keycaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppPhase {
    #[default]
    Selection,
    Design,
}

/// View toggles for the design workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewConfig {
    #[serde(rename = "view3D")]
    pub view_3d: bool,
    pub show_base: bool,
    pub show_left_panel: bool,
    pub show_right_panel: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            view_3d: false,
            show_base: true,
            show_left_panel: true,
            show_right_panel: true,
        }
    }
}

/// Partial view configuration; `None` fields are left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewConfigUpdate {
    pub view_3d: Option<bool>,
    pub show_base: Option<bool>,
    pub show_left_panel: Option<bool>,
    pub show_right_panel: Option<bool>,
}

impl ViewConfig {
    /// Merges the set fields of `update` into this configuration.
    pub fn merge(&mut self, update: ViewConfigUpdate) {
        if let Some(v) = update.view_3d {
            self.view_3d = v;
        }
        if let Some(v) = update.show_base {
            self.show_base = v;
        }
        if let Some(v) = update.show_left_panel {
            self.show_left_panel = v;
        }
        if let Some(v) = update.show_right_panel {
            self.show_right_panel = v;
        }
    }
}

// ============================================================================
// Keycap Types
// ============================================================================

/// Text case transform applied to a legend when it is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTransform {
    #[default]
    None,
    Uppercase,
    Lowercase,
    Capitalize,
}

impl TextTransform {
    /// Returns the displayed form of `text`.
    ///
    /// `Capitalize` upper-cases the first letter of every whitespace-separated
    /// word and leaves the rest untouched.
    pub fn apply(self, text: &str) -> String {
        match self {
            TextTransform::None => text.to_string(),
            TextTransform::Uppercase => text.to_uppercase(),
            TextTransform::Lowercase => text.to_lowercase(),
            TextTransform::Capitalize => {
                let mut out = String::with_capacity(text.len());
                let mut at_word_start = true;
                for c in text.chars() {
                    if c.is_whitespace() {
                        at_word_start = true;
                        out.push(c);
                    } else if at_word_start {
                        at_word_start = false;
                        out.extend(c.to_uppercase());
                    } else {
                        out.push(c);
                    }
                }
                out
            }
        }
    }
}

/// 2D offset of a keycap pattern, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PatternOffset {
    pub x: f32,
    pub y: f32,
}

/// An image applied to a keycap's top surface.
///
/// The URL comes from the asset collaborator and is stored verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeycapPattern {
    pub url: String,
    pub scale: f32,
    pub rotation: f32,
    pub opacity: f32,
    pub position: PatternOffset,
}

impl KeycapPattern {
    /// A pattern at its natural size, unrotated and fully opaque.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            scale: 1.0,
            rotation: 0.0,
            opacity: 1.0,
            position: PatternOffset::default(),
        }
    }
}

fn default_unit_height() -> f32 {
    1.0
}

/// One physical key and its appearance.
///
/// `row` is -1 for the function row; `col`, `width` and `height` are in layout
/// units and may be fractional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keycap {
    pub id: String,
    pub row: f32,
    pub col: f32,
    pub width: f32,
    #[serde(default = "default_unit_height")]
    pub height: f32,
    pub main_color: String,
    pub text_color: String,
    pub text: String,
    pub font_size: f32,
    pub font_family: String,
    pub font_weight: String,
    pub text_align: String,
    #[serde(default)]
    pub text_transform: TextTransform,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<KeycapPattern>,
}

impl Keycap {
    /// Copies the appearance fields into a standalone style value.
    pub fn style(&self) -> KeycapStyle {
        KeycapStyle {
            main_color: self.main_color.clone(),
            text_color: self.text_color.clone(),
            font_size: self.font_size,
            font_family: self.font_family.clone(),
            font_weight: self.font_weight.clone(),
            text_align: self.text_align.clone(),
            text_transform: self.text_transform,
            pattern: self.pattern.clone(),
        }
    }

    /// The legend as displayed, after the text transform.
    pub fn display_text(&self) -> String {
        self.text_transform.apply(&self.text)
    }

    /// Shallow-merges every set field of `update` into this keycap.
    pub fn apply(&mut self, update: &KeycapUpdate) {
        if let Some(v) = update.row {
            self.row = v;
        }
        if let Some(v) = update.col {
            self.col = v;
        }
        if let Some(v) = update.width {
            self.width = v;
        }
        if let Some(v) = update.height {
            self.height = v;
        }
        if let Some(v) = &update.main_color {
            self.main_color.clone_from(v);
        }
        if let Some(v) = &update.text_color {
            self.text_color.clone_from(v);
        }
        if let Some(v) = &update.text {
            self.text.clone_from(v);
        }
        if let Some(v) = update.font_size {
            self.font_size = v;
        }
        if let Some(v) = &update.font_family {
            self.font_family.clone_from(v);
        }
        if let Some(v) = &update.font_weight {
            self.font_weight.clone_from(v);
        }
        if let Some(v) = &update.text_align {
            self.text_align.clone_from(v);
        }
        if let Some(v) = update.text_transform {
            self.text_transform = v;
        }
        if let Some(v) = &update.pattern {
            self.pattern.clone_from(v);
        }
    }
}

/// The appearance subset of a keycap, used as the copy/paste unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeycapStyle {
    pub main_color: String,
    pub text_color: String,
    pub font_size: f32,
    pub font_family: String,
    pub font_weight: String,
    pub text_align: String,
    #[serde(default)]
    pub text_transform: TextTransform,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<KeycapPattern>,
}

/// A partial keycap edit. `None` leaves a field untouched.
///
/// `pattern` is doubly optional: `Some(None)` removes the pattern, and
/// `Some(Some(p))` replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KeycapUpdate {
    pub row: Option<f32>,
    pub col: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub main_color: Option<String>,
    pub text_color: Option<String>,
    pub text: Option<String>,
    pub font_size: Option<f32>,
    pub font_family: Option<String>,
    pub font_weight: Option<String>,
    pub text_align: Option<String>,
    pub text_transform: Option<TextTransform>,
    pub pattern: Option<Option<KeycapPattern>>,
}

impl KeycapUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_main_color(mut self, color: impl Into<String>) -> Self {
        self.main_color = Some(color.into());
        self
    }

    pub fn with_text_color(mut self, color: impl Into<String>) -> Self {
        self.text_color = Some(color.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    pub fn with_font_weight(mut self, weight: impl Into<String>) -> Self {
        self.font_weight = Some(weight.into());
        self
    }

    pub fn with_text_align(mut self, align: impl Into<String>) -> Self {
        self.text_align = Some(align.into());
        self
    }

    pub fn with_text_transform(mut self, transform: TextTransform) -> Self {
        self.text_transform = Some(transform);
        self
    }

    pub fn with_pattern(mut self, pattern: KeycapPattern) -> Self {
        self.pattern = Some(Some(pattern));
        self
    }

    pub fn without_pattern(mut self) -> Self {
        self.pattern = Some(None);
        self
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_position(mut self, row: f32, col: f32) -> Self {
        self.row = Some(row);
        self.col = Some(col);
        self
    }

    /// Returns `true` if no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl From<KeycapStyle> for KeycapUpdate {
    /// Every style field is set, including an absent pattern, so pasting a
    /// style without a pattern clears the target's pattern.
    fn from(style: KeycapStyle) -> Self {
        Self {
            main_color: Some(style.main_color),
            text_color: Some(style.text_color),
            font_size: Some(style.font_size),
            font_family: Some(style.font_family),
            font_weight: Some(style.font_weight),
            text_align: Some(style.text_align),
            text_transform: Some(style.text_transform),
            pattern: Some(style.pattern),
            ..Self::default()
        }
    }
}

// ============================================================================
// Key Classification
// ============================================================================

/// Coarse semantic category of a key, derived from its legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    Letter,
    Number,
    Modifier,
    Function,
    Arrow,
    Special,
}

impl KeyType {
    pub const ALL: [KeyType; 6] = [
        KeyType::Letter,
        KeyType::Number,
        KeyType::Modifier,
        KeyType::Function,
        KeyType::Arrow,
        KeyType::Special,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            KeyType::Letter => "letter",
            KeyType::Number => "number",
            KeyType::Modifier => "modifier",
            KeyType::Function => "function",
            KeyType::Arrow => "arrow",
            KeyType::Special => "special",
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Tests
// ============================================================================
