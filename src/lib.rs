// SPDX-License-Identifier: GPL-3.0-only

//! Keycap Studio - keyboard layout generation and keycap compositing
//!
//! This crate is the engine behind a virtual keycap designer. It turns a
//! physical layout choice into positioned keycaps, derives the shaded surface
//! colors that make each key look beveled, and owns the selection, bulk-edit
//! and style clipboard state that a front end drives.
//!
//! # Architecture
//!
//! Data flows one way:
//!
//! 1. **Generation** (`keyboard`): a layout table becomes an ordered set of
//!    keycaps in layout units.
//! 2. **Geometry** (`geometry`): layout units become pixel rectangles and a
//!    canvas size.
//! 3. **Shading** (`shading`, `color`): each key's main color becomes a palette
//!    of surface colors at render time.
//!
//! All edits go through `design::DesignState`, which is the only owner of the
//! key set. Async front ends share it through `design::SharedDesign`.
//!
//! # Modules
//!
//! - `app_settings`: Geometry, lighting and default style constants
//! - `color`: Hex, RGB and HSL conversions and lightness adjustments
//! - `config`: Runtime configuration loaded from JSON
//! - `design`: Selection and edit state machine, plus the shared session
//! - `error`: Crate error type
//! - `geometry`: Layout-unit to pixel mapping
//! - `keyboard`: Layout tables, generation, classification and validation
//! - `shading`: Beveled keycap palettes
//! - `snapshot`: Serializable designs and the export format
//! - `storage`: File-backed design library
//!
//! The library logs through `tracing` and never installs a subscriber.

pub mod app_settings;
pub mod color;
pub mod config;
pub mod design;
pub mod error;
pub mod geometry;
pub mod keyboard;
pub mod shading;
pub mod snapshot;
pub mod storage;

pub use config::{KeycapDefaults, StudioConfig};
pub use design::{DesignEvent, DesignState, SharedDesign};
pub use error::{DesignError, DesignResult};
pub use geometry::{GeometryMapper, KeyRect, LayoutDimensions};
pub use keyboard::{KeyType, Keycap, KeycapStyle, KeycapUpdate, KeyboardLayout};
pub use shading::{LightingConfig, ShadePalette};
pub use snapshot::DesignSnapshot;
pub use storage::DesignLibrary;

// ============================================================================
// Integration Tests
// ============================================================================
