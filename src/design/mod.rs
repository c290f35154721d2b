// SPDX-License-Identifier: GPL-3.0-only

//! Design state: the active key set, selection, style clipboard and view
//! toggles, plus every mutation that may touch them.
//!
//! [`DesignState`] is the only owner of keycap records. Edits are shallow
//! whole-field merges through [`KeycapUpdate`]; a new `pattern` replaces the
//! old one rather than merging into it.
//!
//! # Missing keys and an empty clipboard
//!
//! Single-key edits, `copy_style` and `paste_style` are silent no-ops when
//! their target does not exist or nothing has been copied. The `try_*`
//! variants return [`DesignError::NotFound`] or [`DesignError::EmptyClipboard`]
//! for callers that want to surface the condition.
//!
//! # Change notification
//!
//! Every mutation that changes something queues a [`DesignEvent`]. A renderer
//! drains them with [`DesignState::take_events`], or subscribes through a
//! [`SharedDesign`] session which forwards them over channels.
//!
//! Pending events are coalesced, so the queue stays small even when nobody
//! drains it: a replaced key set drops everything queued before it, keycap
//! edits merge into one `KeycapsChanged`, and each flag event is pending at
//! most once.
//!
//! # Design identity
//!
//! A design loaded with [`DesignState::load_snapshot`] or recorded with
//! [`DesignState::mark_saved`] keeps its id, thumbnail and creation time, so
//! later snapshots save back over the same library entry. Selecting a layout
//! starts a new, unsaved design.
//!
//! ```rust,ignore
//! use keycap_studio::design::DesignState;
//! use keycap_studio::keyboard::{KeyboardLayout, KeyType, KeycapUpdate};
//!
//! let mut state = DesignState::new();
//! state.select_layout(KeyboardLayout::EightySeven);
//! state.apply_to_type(KeyType::Letter, &KeycapUpdate::new().with_main_color("#112233"));
//! ```

pub mod selection;
pub mod session;

pub use session::SharedDesign;

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::config::{KeycapDefaults, StudioConfig};
use crate::error::{DesignError, DesignResult};
use crate::keyboard::{
    self, AppPhase, BaseStyle, KeyType, Keycap, KeycapStyle, KeycapUpdate, KeyboardLayout,
    SwitchHeight, ViewConfig, ViewConfigUpdate,
};
use crate::snapshot::DesignSnapshot;

// ============================================================================
// Events
// ============================================================================

/// A change to the design state, queued for the rendering layer.
#[derive(Debug, Clone, PartialEq)]
pub enum DesignEvent {
    /// The whole key set was replaced (layout selection or snapshot load)
    LayoutReplaced(KeyboardLayout),
    /// These keycaps were edited
    KeycapsChanged(Vec<String>),
    SelectionChanged,
    ClipboardChanged,
    ViewChanged,
    /// Base style, switch height or phase changed
    ConfigurationChanged,
}

// ============================================================================
// State
// ============================================================================

/// Identity of a design that exists in storage.
#[derive(Debug, Clone, PartialEq)]
struct StoredIdentity {
    id: String,
    name: String,
    thumbnail: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<&DesignSnapshot> for StoredIdentity {
    fn from(snapshot: &DesignSnapshot) -> Self {
        Self {
            id: snapshot.id.clone(),
            name: snapshot.name.clone(),
            thumbnail: snapshot.thumbnail.clone(),
            created_at: snapshot.created_at,
        }
    }
}

/// The in-memory design being edited.
#[derive(Debug, Clone)]
pub struct DesignState {
    layout: KeyboardLayout,
    base_style: BaseStyle,
    switch_height: SwitchHeight,
    phase: AppPhase,
    keycaps: Vec<Keycap>,
    selected: HashSet<String>,
    clipboard: Option<KeycapStyle>,
    view: ViewConfig,
    defaults: KeycapDefaults,
    stored: Option<StoredIdentity>,
    events: Vec<DesignEvent>,
}

impl Default for DesignState {
    fn default() -> Self {
        Self::new()
    }
}

impl DesignState {
    /// Creates an empty state in the layout selection phase.
    pub fn new() -> Self {
        Self::with_config(&StudioConfig::default())
    }

    /// Creates an empty state using the configured defaults.
    ///
    /// No keys exist until a layout is selected.
    pub fn with_config(config: &StudioConfig) -> Self {
        Self {
            layout: config.layout,
            base_style: config.base_style,
            switch_height: config.switch_height,
            phase: AppPhase::Selection,
            keycaps: Vec::new(),
            selected: HashSet::new(),
            clipboard: None,
            view: ViewConfig::default(),
            defaults: config.keycap.clone(),
            stored: None,
            events: Vec::new(),
        }
    }

    // ------------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------------

    /// Replaces the key set with a freshly generated one for `layout`.
    ///
    /// Prior per-key edits are discarded and the selection is cleared. The
    /// clipboard survives, since it holds a standalone style value. The result
    /// is a new design with no stored identity.
    pub fn select_layout(&mut self, layout: KeyboardLayout) {
        self.keycaps = keyboard::generate_with_defaults(layout, &self.defaults);
        self.layout = layout;
        self.selected.clear();
        self.stored = None;
        self.phase = AppPhase::Design;

        tracing::info!("Selected layout {} ({} keycaps)", layout, self.keycaps.len());
        self.emit(DesignEvent::LayoutReplaced(layout));
    }

    /// Selects a layout by identifier, e.g. `"104-key"`.
    ///
    /// Fails with [`DesignError::UnsupportedLayout`] and leaves the state
    /// untouched if the identifier is unknown.
    pub fn select_layout_id(&mut self, layout_id: &str) -> DesignResult<()> {
        let layout: KeyboardLayout = layout_id.parse()?;
        self.select_layout(layout);
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------------

    pub fn toggle_selection(&mut self, id: &str, additive: bool) {
        self.selected = selection::toggled(&self.selected, id, additive);
        self.emit(DesignEvent::SelectionChanged);
    }

    pub fn clear_selection(&mut self) {
        if self.selected.is_empty() {
            return;
        }
        self.selected = selection::cleared();
        self.emit(DesignEvent::SelectionChanged);
    }

    /// Replaces the selection wholesale, e.g. after a marquee drag.
    pub fn set_selection<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected = ids.into_iter().map(Into::into).collect();
        self.emit(DesignEvent::SelectionChanged);
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn selection(&self) -> &HashSet<String> {
        &self.selected
    }

    /// Selected ids, in key-set order.
    pub fn selected_ids(&self) -> Vec<String> {
        self.selected_keycaps()
            .into_iter()
            .map(|keycap| keycap.id.clone())
            .collect()
    }

    /// Selected keycaps, in key-set order.
    pub fn selected_keycaps(&self) -> Vec<&Keycap> {
        self.keycaps
            .iter()
            .filter(|keycap| self.selected.contains(&keycap.id))
            .collect()
    }

    // ------------------------------------------------------------------------
    // Edits
    // ------------------------------------------------------------------------

    /// Merges `update` into one keycap; a missing id is a no-op.
    pub fn update_one(&mut self, id: &str, update: &KeycapUpdate) {
        if let Err(err) = self.try_update_one(id, update) {
            tracing::debug!("update_one ignored: {}", err);
        }
    }

    pub fn try_update_one(&mut self, id: &str, update: &KeycapUpdate) -> DesignResult<()> {
        let keycap = self
            .keycaps
            .iter_mut()
            .find(|keycap| keycap.id == id)
            .ok_or_else(|| DesignError::not_found(id))?;

        keycap.apply(update);
        tracing::debug!("Updated keycap {}", id);
        self.emit(DesignEvent::KeycapsChanged(vec![id.to_string()]));
        Ok(())
    }

    /// Merges `update` into every keycap whose id is in `ids`.
    ///
    /// Unknown ids are ignored. Returns the number of keycaps changed.
    pub fn update_many<S: AsRef<str>>(&mut self, ids: &[S], update: &KeycapUpdate) -> usize {
        let targets: HashSet<&str> = ids.iter().map(|id| id.as_ref()).collect();
        let mut changed = Vec::new();

        for keycap in self
            .keycaps
            .iter_mut()
            .filter(|keycap| targets.contains(keycap.id.as_str()))
        {
            keycap.apply(update);
            changed.push(keycap.id.clone());
        }

        let count = changed.len();
        tracing::debug!("Updated {} of {} requested keycaps", count, targets.len());
        if count > 0 {
            self.emit(DesignEvent::KeycapsChanged(changed));
        }
        count
    }

    /// Applies `update` to the current selection.
    pub fn update_selected(&mut self, update: &KeycapUpdate) -> usize {
        let ids = self.selected_ids();
        self.update_many(&ids, update)
    }

    /// Ids of every keycap whose legend classifies as `key_type`.
    pub fn ids_of_type(&self, key_type: KeyType) -> Vec<String> {
        keyboard::filter_by_type(&self.keycaps, key_type)
            .into_iter()
            .map(|keycap| keycap.id.clone())
            .collect()
    }

    /// Bulk edit of every keycap of one type.
    pub fn apply_to_type(&mut self, key_type: KeyType, update: &KeycapUpdate) -> usize {
        let ids = self.ids_of_type(key_type);
        tracing::debug!("Applying update to {} {} keycaps", ids.len(), key_type);
        self.update_many(&ids, update)
    }

    // ------------------------------------------------------------------------
    // Style clipboard
    // ------------------------------------------------------------------------

    /// Copies the style of one keycap; a missing id leaves the clipboard as is.
    pub fn copy_style(&mut self, id: &str) {
        if let Err(err) = self.try_copy_style(id) {
            tracing::debug!("copy_style ignored: {}", err);
        }
    }

    pub fn try_copy_style(&mut self, id: &str) -> DesignResult<()> {
        let style = self
            .keycap(id)
            .map(Keycap::style)
            .ok_or_else(|| DesignError::not_found(id))?;

        self.clipboard = Some(style);
        tracing::debug!("Copied style of {}", id);
        self.emit(DesignEvent::ClipboardChanged);
        Ok(())
    }

    /// Pastes the copied style onto `ids`; nothing happens if nothing was copied.
    pub fn paste_style<S: AsRef<str>>(&mut self, ids: &[S]) {
        if let Err(err) = self.try_paste_style(ids) {
            tracing::debug!("paste_style ignored: {}", err);
        }
    }

    /// Returns the number of keycaps styled.
    pub fn try_paste_style<S: AsRef<str>>(&mut self, ids: &[S]) -> DesignResult<usize> {
        let style = self.clipboard.clone().ok_or(DesignError::EmptyClipboard)?;
        Ok(self.update_many(ids, &KeycapUpdate::from(style)))
    }

    pub fn clipboard(&self) -> Option<&KeycapStyle> {
        self.clipboard.as_ref()
    }

    // ------------------------------------------------------------------------
    // Configuration and view
    // ------------------------------------------------------------------------

    pub fn set_base_style(&mut self, base_style: BaseStyle) {
        if self.base_style != base_style {
            self.base_style = base_style;
            self.emit(DesignEvent::ConfigurationChanged);
        }
    }

    pub fn set_switch_height(&mut self, switch_height: SwitchHeight) {
        if self.switch_height != switch_height {
            self.switch_height = switch_height;
            self.emit(DesignEvent::ConfigurationChanged);
        }
    }

    pub fn set_phase(&mut self, phase: AppPhase) {
        if self.phase != phase {
            self.phase = phase;
            self.emit(DesignEvent::ConfigurationChanged);
        }
    }

    pub fn toggle_view_3d(&mut self) {
        self.view.view_3d = !self.view.view_3d;
        self.emit(DesignEvent::ViewChanged);
    }

    pub fn toggle_show_base(&mut self) {
        self.view.show_base = !self.view.show_base;
        self.emit(DesignEvent::ViewChanged);
    }

    pub fn toggle_left_panel(&mut self) {
        self.view.show_left_panel = !self.view.show_left_panel;
        self.emit(DesignEvent::ViewChanged);
    }

    pub fn toggle_right_panel(&mut self) {
        self.view.show_right_panel = !self.view.show_right_panel;
        self.emit(DesignEvent::ViewChanged);
    }

    pub fn set_view_config(&mut self, update: ViewConfigUpdate) {
        let before = self.view;
        self.view.merge(update);
        if self.view != before {
            self.emit(DesignEvent::ViewChanged);
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn layout(&self) -> KeyboardLayout {
        self.layout
    }

    pub fn base_style(&self) -> BaseStyle {
        self.base_style
    }

    pub fn switch_height(&self) -> SwitchHeight {
        self.switch_height
    }

    pub fn phase(&self) -> AppPhase {
        self.phase
    }

    pub fn view(&self) -> ViewConfig {
        self.view
    }

    pub fn keycaps(&self) -> &[Keycap] {
        &self.keycaps
    }

    pub fn keycap(&self, id: &str) -> Option<&Keycap> {
        self.keycaps.iter().find(|keycap| keycap.id == id)
    }

    /// Drains queued change events, oldest first.
    pub fn take_events(&mut self) -> Vec<DesignEvent> {
        std::mem::take(&mut self.events)
    }

    /// Queues `event`, folding it into what is already pending.
    fn emit(&mut self, event: DesignEvent) {
        if let DesignEvent::KeycapsChanged(ids) = &event {
            let pending = self
                .events
                .iter_mut()
                .find_map(|queued| match queued {
                    DesignEvent::KeycapsChanged(pending) => Some(pending),
                    _ => None,
                });
            if let Some(pending) = pending {
                for id in ids {
                    if !pending.contains(id) {
                        pending.push(id.clone());
                    }
                }
                return;
            }
        } else if matches!(event, DesignEvent::LayoutReplaced(_)) {
            self.events.clear();
        } else if self.events.contains(&event) {
            return;
        }
        self.events.push(event);
    }

    // ------------------------------------------------------------------------
    // Snapshots
    // ------------------------------------------------------------------------

    /// Captures the current design.
    ///
    /// A design with a stored identity keeps its id, thumbnail and creation
    /// time; otherwise the snapshot gets a fresh id.
    pub fn snapshot(&self, name: impl Into<String>) -> DesignSnapshot {
        let mut snapshot = DesignSnapshot::new(
            name,
            self.layout,
            self.base_style,
            self.switch_height,
            self.keycaps.clone(),
        );
        if let Some(stored) = &self.stored {
            snapshot.id = stored.id.clone();
            snapshot.thumbnail = stored.thumbnail.clone();
            snapshot.created_at = stored.created_at;
        }
        snapshot
    }

    /// Records that `saved` is now the stored version of this design.
    pub fn mark_saved(&mut self, saved: &DesignSnapshot) {
        tracing::debug!("Design is stored as {}", saved.id);
        self.stored = Some(StoredIdentity::from(saved));
    }

    /// Id of the stored design being edited, if any.
    pub fn design_id(&self) -> Option<&str> {
        self.stored.as_ref().map(|stored| stored.id.as_str())
    }

    /// Name of the stored design being edited, if any.
    pub fn design_name(&self) -> Option<&str> {
        self.stored.as_ref().map(|stored| stored.name.as_str())
    }

    /// Replaces the design with a stored snapshot.
    ///
    /// Rejects snapshots without keycaps. Validation problems in the key set
    /// are logged but do not block loading.
    pub fn load_snapshot(&mut self, snapshot: DesignSnapshot) -> DesignResult<()> {
        if snapshot.keycaps.is_empty() {
            return Err(DesignError::invalid_snapshot("design has no keycaps"));
        }

        for issue in keyboard::validate_keycaps(&snapshot.keycaps) {
            tracing::warn!("Snapshot '{}': {}", snapshot.name, issue);
        }

        self.stored = Some(StoredIdentity::from(&snapshot));
        self.layout = snapshot.layout;
        self.base_style = snapshot.base_style;
        self.switch_height = snapshot.switch_height;
        self.keycaps = snapshot.keycaps;
        self.selected.clear();
        self.phase = AppPhase::Design;

        tracing::info!(
            "Loaded design '{}' ({} keycaps)",
            snapshot.name,
            self.keycaps.len()
        );
        self.emit(DesignEvent::LayoutReplaced(self.layout));
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::{classify, KeycapPattern, TextTransform};

    fn design(layout: KeyboardLayout) -> DesignState {
        let mut state = DesignState::new();
        state.select_layout(layout);
        state.take_events();
        state
    }

    fn id_of(state: &DesignState, text: &str) -> String {
        state
            .keycaps()
            .iter()
            .find(|k| k.text == text)
            .map(|k| k.id.clone())
            .unwrap_or_else(|| panic!("no keycap labelled {:?}", text))
    }

    /// Test 1: A new state waits for a layout
    #[test]
    fn test_new_state_is_in_selection_phase() {
        let state = DesignState::new();
        assert_eq!(state.phase(), AppPhase::Selection);
        assert!(state.keycaps().is_empty());
        assert!(state.clipboard().is_none());
        assert_eq!(state.view(), ViewConfig::default());
    }

    /// Test 2: Selecting a layout replaces edits and clears the selection
    #[test]
    fn test_select_layout_replaces_key_set() {
        let mut state = design(KeyboardLayout::SixtyOne);
        let q = id_of(&state, "Q");
        state.update_one(&q, &KeycapUpdate::new().with_main_color("#FF0000"));
        state.toggle_selection(&q, false);

        state.select_layout(KeyboardLayout::SixtyOne);

        assert_eq!(state.phase(), AppPhase::Design);
        assert!(state.selection().is_empty(), "Selection must be cleared");
        assert_eq!(state.keycap(&q).unwrap().main_color, "#E8E8E8", "Edits are discarded");
        assert_eq!(
            state.take_events().last(),
            Some(&DesignEvent::LayoutReplaced(KeyboardLayout::SixtyOne))
        );
    }

    /// Test 3: Unknown layout ids are surfaced and change nothing
    #[test]
    fn test_select_unknown_layout_id() {
        let mut state = design(KeyboardLayout::SixtyOne);
        let err = state.select_layout_id("65-key").unwrap_err();

        assert!(matches!(err, DesignError::UnsupportedLayout { .. }));
        assert_eq!(state.layout(), KeyboardLayout::SixtyOne);
        assert_eq!(state.keycaps().len(), 61);
        assert!(state.take_events().is_empty());

        state.select_layout_id("104-key").unwrap();
        assert_eq!(state.keycaps().len(), 104);
    }

    /// Test 4: Selection toggling
    #[test]
    fn test_selection_transitions() {
        let mut state = design(KeyboardLayout::SixtyOne);
        state.toggle_selection("key-1", true);
        state.toggle_selection("key-2", true);
        assert_eq!(state.selected_ids(), vec!["key-1", "key-2"]);

        state.toggle_selection("key-3", false);
        assert_eq!(state.selected_ids(), vec!["key-3"]);

        state.clear_selection();
        assert!(state.selection().is_empty());

        state.set_selection(["key-5", "key-4"]);
        assert_eq!(state.selected_ids(), vec!["key-4", "key-5"], "Ids follow key order");
        assert!(state.is_selected("key-4"));
    }

    /// Test 5: update_one merges only the given fields
    #[test]
    fn test_update_one_is_shallow_merge() {
        let mut state = design(KeyboardLayout::SixtyOne);
        let a = id_of(&state, "A");

        state.update_one(&a, &KeycapUpdate::new().with_text("Å").with_font_size(18.0));
        let keycap = state.keycap(&a).unwrap();
        assert_eq!(keycap.text, "Å");
        assert_eq!(keycap.font_size, 18.0);
        assert_eq!(keycap.main_color, "#E8E8E8", "Unset fields are untouched");
        assert_eq!(state.take_events(), vec![DesignEvent::KeycapsChanged(vec![a])]);
    }

    /// Test 6: Missing ids are silent for update_one and surfaced by try_update_one
    #[test]
    fn test_update_missing_key() {
        let mut state = design(KeyboardLayout::SixtyOne);
        let before = state.keycaps().to_vec();

        state.update_one("key-999", &KeycapUpdate::new().with_text("X"));
        assert_eq!(state.keycaps(), before.as_slice());
        assert!(state.take_events().is_empty());

        let err = state
            .try_update_one("key-999", &KeycapUpdate::new().with_text("X"))
            .unwrap_err();
        assert!(matches!(err, DesignError::NotFound { .. }));
    }

    /// Test 7: Pattern assignment replaces the whole pattern
    #[test]
    fn test_pattern_is_replaced_not_merged() {
        let mut state = design(KeyboardLayout::SixtyOne);
        let a = id_of(&state, "A");

        let mut first = KeycapPattern::new("https://example.com/a.png");
        first.scale = 2.0;
        first.rotation = 45.0;
        state.update_one(&a, &KeycapUpdate::new().with_pattern(first));

        let second = KeycapPattern::new("https://example.com/b.png");
        state.update_one(&a, &KeycapUpdate::new().with_pattern(second.clone()));
        assert_eq!(state.keycap(&a).unwrap().pattern, Some(second));

        state.update_one(&a, &KeycapUpdate::new().without_pattern());
        assert_eq!(state.keycap(&a).unwrap().pattern, None);
    }

    /// Test 8: update_many ignores unknown ids and reports the count
    #[test]
    fn test_update_many_counts_matches() {
        let mut state = design(KeyboardLayout::SixtyOne);
        let ids = vec!["key-0".to_string(), "key-1".to_string(), "nope".to_string()];

        let changed = state.update_many(&ids, &KeycapUpdate::new().with_text_color("#FFFFFF"));
        assert_eq!(changed, 2);
        assert_eq!(state.keycap("key-1").unwrap().text_color, "#FFFFFF");
        assert_eq!(state.keycap("key-2").unwrap().text_color, "#2C2C2C");

        assert_eq!(state.update_many(&["nope"], &KeycapUpdate::new().with_text("x")), 0);
    }

    /// Test 9: Bulk edit by key type touches only that type
    #[test]
    fn test_apply_to_type() {
        let mut state = design(KeyboardLayout::EightySeven);
        let changed = state.apply_to_type(
            KeyType::Function,
            &KeycapUpdate::new().with_main_color("#334455"),
        );
        assert_eq!(changed, 12);

        for keycap in state.keycaps() {
            let expected = if classify::keycap_type(keycap) == KeyType::Function {
                "#334455"
            } else {
                "#E8E8E8"
            };
            assert_eq!(keycap.main_color, expected, "key {:?}", keycap.text);
        }
    }

    /// Test 10: Copy/paste uses the style at copy time
    #[test]
    fn test_copy_then_mutate_source_then_paste() {
        let mut state = design(KeyboardLayout::SixtyOne);
        let a = id_of(&state, "A");
        let b = id_of(&state, "B");
        let c = id_of(&state, "C");

        state.update_one(
            &a,
            &KeycapUpdate::new()
                .with_main_color("#123456")
                .with_text_transform(TextTransform::Lowercase),
        );
        state.copy_style(&a);
        let copied = state.keycap(&a).unwrap().style();

        state.update_one(&a, &KeycapUpdate::new().with_main_color("#654321"));
        state.paste_style(&[b.clone(), c.clone()]);

        assert_eq!(state.keycap(&b).unwrap().style(), copied);
        assert_eq!(state.keycap(&c).unwrap().style(), copied);
        assert_eq!(state.keycap(&b).unwrap().text, "B", "Paste never touches the legend");
        assert_eq!(state.clipboard(), Some(&copied));
    }

    /// Test 11: Copying a missing key leaves the clipboard alone
    #[test]
    fn test_copy_missing_key() {
        let mut state = design(KeyboardLayout::SixtyOne);
        state.copy_style("key-0");
        let before = state.clipboard().cloned();

        state.copy_style("missing");
        assert_eq!(state.clipboard().cloned(), before);
        assert!(matches!(
            state.try_copy_style("missing"),
            Err(DesignError::NotFound { .. })
        ));
    }

    /// Test 12: Pasting with an empty clipboard is a no-op
    #[test]
    fn test_paste_with_empty_clipboard() {
        let mut state = design(KeyboardLayout::SixtyOne);
        let before = state.keycaps().to_vec();

        state.paste_style(&["key-0"]);
        assert_eq!(state.keycaps(), before.as_slice());
        assert!(matches!(
            state.try_paste_style(&["key-0"]),
            Err(DesignError::EmptyClipboard)
        ));
    }

    /// Test 13: Editing the selection
    #[test]
    fn test_update_selected() {
        let mut state = design(KeyboardLayout::SixtyOne);
        state.set_selection(["key-3", "key-4"]);
        let changed = state.update_selected(&KeycapUpdate::new().with_font_weight("700"));

        assert_eq!(changed, 2);
        assert_eq!(state.keycap("key-3").unwrap().font_weight, "700");
        assert_eq!(state.keycap("key-5").unwrap().font_weight, "500");
    }

    /// Test 14: View toggles and partial view updates
    #[test]
    fn test_view_toggles() {
        let mut state = DesignState::new();
        state.toggle_view_3d();
        state.toggle_show_base();
        state.toggle_left_panel();
        state.toggle_right_panel();

        let view = state.view();
        assert!(view.view_3d);
        assert!(!view.show_base && !view.show_left_panel && !view.show_right_panel);

        state.take_events();
        state.set_view_config(ViewConfigUpdate {
            show_base: Some(true),
            ..ViewConfigUpdate::default()
        });
        assert!(state.view().show_base);
        assert!(state.view().view_3d, "Unset fields are kept");
        assert_eq!(state.take_events(), vec![DesignEvent::ViewChanged]);

        state.set_view_config(ViewConfigUpdate::default());
        assert!(state.take_events().is_empty(), "No-op updates emit nothing");
    }

    /// Test 15: Configuration setters only emit on change
    #[test]
    fn test_configuration_setters() {
        let mut state = DesignState::new();
        state.set_base_style(BaseStyle::MetalGray);
        state.set_base_style(BaseStyle::MetalGray);
        state.set_switch_height(SwitchHeight::LowProfile);

        assert_eq!(state.base_style(), BaseStyle::MetalGray);
        assert_eq!(state.switch_height(), SwitchHeight::LowProfile);
        assert_eq!(state.take_events(), vec![DesignEvent::ConfigurationChanged]);

        state.set_phase(AppPhase::Design);
        assert_eq!(state.phase(), AppPhase::Design);
    }

    /// Test 16: Configured defaults style generated keys
    #[test]
    fn test_with_config_defaults() {
        let mut config = StudioConfig::default();
        config.keycap.main_color = "#202020".into();
        config.layout = KeyboardLayout::FullSize;

        let mut state = DesignState::with_config(&config);
        assert_eq!(state.layout(), KeyboardLayout::FullSize);

        state.select_layout(state.layout());
        assert!(state.keycaps().iter().all(|k| k.main_color == "#202020"));
    }

    /// Test 17: Snapshot and reload
    #[test]
    fn test_snapshot_round_trip() {
        let mut state = design(KeyboardLayout::EightySeven);
        state.set_base_style(BaseStyle::AcrylicWhite);
        state.update_one("key-0", &KeycapUpdate::new().with_main_color("#FF8800"));
        let snapshot = state.snapshot("Sunset");

        assert_eq!(snapshot.name, "Sunset");
        assert_eq!(snapshot.keycaps.len(), 87);

        let mut other = design(KeyboardLayout::SixtyOne);
        other.toggle_selection("key-1", false);
        other.load_snapshot(snapshot).unwrap();

        assert_eq!(other.layout(), KeyboardLayout::EightySeven);
        assert_eq!(other.base_style(), BaseStyle::AcrylicWhite);
        assert_eq!(other.keycap("key-0").unwrap().main_color, "#FF8800");
        assert!(other.selection().is_empty());
    }

    /// Test 18: Empty snapshots are rejected
    #[test]
    fn test_load_empty_snapshot() {
        let mut state = design(KeyboardLayout::SixtyOne);
        let mut snapshot = state.snapshot("Empty");
        snapshot.keycaps.clear();

        let err = state.load_snapshot(snapshot).unwrap_err();
        assert!(matches!(err, DesignError::InvalidSnapshot { .. }));
        assert_eq!(state.keycaps().len(), 61);
    }

    /// Test 19: A loaded design snapshots under its stored identity
    #[test]
    fn test_loaded_design_keeps_identity() {
        let mut source = design(KeyboardLayout::SixtyOne);
        let mut stored = source.snapshot("Mine");
        stored.thumbnail = Some("data:image/png;base64,AAAA".into());
        let id = stored.id.clone();
        let created_at = stored.created_at;

        let mut editor = DesignState::new();
        assert_eq!(editor.design_id(), None);
        editor.load_snapshot(stored).unwrap();
        editor.update_one("key-0", &KeycapUpdate::new().with_main_color("#00FF00"));

        let resaved = editor.snapshot("Mine, edited");
        assert_eq!(resaved.id, id);
        assert_eq!(resaved.created_at, created_at);
        assert_eq!(resaved.thumbnail.as_deref(), Some("data:image/png;base64,AAAA"));
        assert_eq!(resaved.keycaps[0].main_color, "#00FF00");
        assert_eq!(editor.design_name(), Some("Mine"));

        editor.select_layout(KeyboardLayout::FullSize);
        assert_eq!(editor.design_id(), None, "A new layout is a new design");
        assert_ne!(editor.snapshot("Fresh").id, id);

        let saved = source.snapshot("Mine");
        source.mark_saved(&saved);
        assert_eq!(source.design_id(), Some(saved.id.as_str()));
        assert_eq!(source.snapshot("Mine").id, saved.id);
    }

    /// Test 20: Undrained events stay bounded
    #[test]
    fn test_event_queue_coalesces() {
        let mut state = design(KeyboardLayout::SixtyOne);
        for _ in 0..10_000 {
            state.toggle_selection("key-1", true);
            state.toggle_view_3d();
            state.update_one("key-2", &KeycapUpdate::new().with_main_color("#123456"));
        }
        state.update_one("key-3", &KeycapUpdate::new().with_main_color("#123456"));

        assert_eq!(
            state.take_events(),
            vec![
                DesignEvent::SelectionChanged,
                DesignEvent::ViewChanged,
                DesignEvent::KeycapsChanged(vec!["key-2".into(), "key-3".into()]),
            ]
        );

        state.toggle_view_3d();
        state.select_layout(KeyboardLayout::SixtyOne);
        assert_eq!(
            state.take_events(),
            vec![DesignEvent::LayoutReplaced(KeyboardLayout::SixtyOne)],
            "A replaced key set supersedes earlier events"
        );
    }
}
