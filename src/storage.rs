// SPDX-License-Identifier: GPL-3.0-only

//! File-backed design library.
//!
//! Designs live under a root directory:
//!
//! ```text
//! <root>/index.json          metadata for every design, newest first
//! <root>/designs/<id>.json   one snapshot per design
//! <root>/current             id of the design last opened for editing
//! ```
//!
//! Every file is written to a temporary sibling and renamed into place, so a
//! crash mid-write leaves the previous version intact. Design ids are limited
//! to ASCII alphanumerics, `-` and `_`; snapshots carrying any other id are
//! given a fresh one when saved.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{DesignError, DesignResult};
use crate::keyboard::{BaseStyle, KeyboardLayout};
use crate::snapshot::{self, new_design_id, DesignSnapshot};

const INDEX_FILE: &str = "index.json";
const CURRENT_FILE: &str = "current";
const DESIGNS_DIR: &str = "designs";
const COPY_SUFFIX: &str = " (copy)";

/// Summary of a stored design, as shown in a design browser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignMetadata {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub layout: KeyboardLayout,
    pub base_style: BaseStyle,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&DesignSnapshot> for DesignMetadata {
    fn from(snapshot: &DesignSnapshot) -> Self {
        Self {
            id: snapshot.id.clone(),
            name: snapshot.name.clone(),
            thumbnail: snapshot.thumbnail.clone(),
            layout: snapshot.layout,
            base_style: snapshot.base_style,
            created_at: snapshot.created_at,
            updated_at: snapshot.updated_at,
        }
    }
}

fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Writes `contents` to a temporary file next to `path`, then renames it.
fn write_atomic(path: &Path, contents: &str) -> DesignResult<()> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, contents).map_err(|e| DesignError::io_with_path(e, tmp.display().to_string()))?;
    fs::rename(&tmp, path).map_err(|e| DesignError::io_with_path(e, path.display().to_string()))
}

/// A directory of saved designs.
#[derive(Debug, Clone)]
pub struct DesignLibrary {
    root: PathBuf,
}

impl DesignLibrary {
    /// Opens (creating if needed) a library rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> DesignResult<Self> {
        let root = root.into();
        let designs = root.join(DESIGNS_DIR);
        fs::create_dir_all(&designs)
            .map_err(|e| DesignError::io_with_path(e, designs.display().to_string()))?;

        tracing::debug!("Opened design library at {}", root.display());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn index_path(&self) -> PathBuf {
        self.root.join(INDEX_FILE)
    }

    fn design_path(&self, id: &str) -> PathBuf {
        self.root.join(DESIGNS_DIR).join(format!("{}.json", id))
    }

    fn current_path(&self) -> PathBuf {
        self.root.join(CURRENT_FILE)
    }

    fn write_index(&self, index: &[DesignMetadata]) -> DesignResult<()> {
        write_atomic(&self.index_path(), &serde_json::to_string_pretty(index)?)
    }

    /// Metadata for every stored design, most recently saved first.
    pub fn list(&self) -> DesignResult<Vec<DesignMetadata>> {
        let path = self.index_path();
        match fs::read_to_string(&path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(DesignError::io_with_path(e, path.display().to_string())),
        }
    }

    /// Loads one design.
    pub fn get(&self, id: &str) -> DesignResult<DesignSnapshot> {
        if !is_valid_id(id) {
            return Err(DesignError::not_found(id));
        }

        let path = self.design_path(id);
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(DesignError::not_found(id)),
            Err(e) => return Err(DesignError::io_with_path(e, path.display().to_string())),
        };
        Ok(serde_json::from_str(&json)?)
    }

    /// Stores a design, replacing any previous version with the same id.
    ///
    /// Refreshes `updatedAt` and moves the design to the front of the index.
    /// Returns the snapshot as stored.
    pub fn save(&self, mut snapshot: DesignSnapshot) -> DesignResult<DesignSnapshot> {
        if !is_valid_id(&snapshot.id) {
            let id = new_design_id();
            tracing::debug!("Assigning id {} to design '{}'", id, snapshot.name);
            snapshot.id = id;
        }
        snapshot.touch();

        write_atomic(
            &self.design_path(&snapshot.id),
            &serde_json::to_string_pretty(&snapshot)?,
        )?;

        let mut index = self.list()?;
        index.retain(|entry| entry.id != snapshot.id);
        index.insert(0, DesignMetadata::from(&snapshot));
        self.write_index(&index)?;

        tracing::info!("Saved design '{}' ({})", snapshot.name, snapshot.id);
        Ok(snapshot)
    }

    /// Removes a design. Returns `false` if it did not exist.
    pub fn delete(&self, id: &str) -> DesignResult<bool> {
        if !is_valid_id(id) {
            return Ok(false);
        }

        let mut index = self.list()?;
        let before = index.len();
        index.retain(|entry| entry.id != id);
        let listed = index.len() != before;
        if listed {
            self.write_index(&index)?;
        }

        let path = self.design_path(id);
        let existed = match fs::remove_file(&path) {
            Ok(()) => true,
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(e) => return Err(DesignError::io_with_path(e, path.display().to_string())),
        };

        if self.current_id()?.as_deref() == Some(id) {
            self.clear_current()?;
        }

        if listed || existed {
            tracing::info!("Deleted design {}", id);
        }
        Ok(listed || existed)
    }

    /// Remembers `id` as the design being edited.
    pub fn set_current(&self, id: &str) -> DesignResult<()> {
        if !is_valid_id(id) {
            return Err(DesignError::not_found(id));
        }
        write_atomic(&self.current_path(), id)?;
        tracing::debug!("Current design is {}", id);
        Ok(())
    }

    /// The design last passed to [`set_current`](Self::set_current), if any.
    pub fn current_id(&self) -> DesignResult<Option<String>> {
        let path = self.current_path();
        match fs::read_to_string(&path) {
            Ok(id) => {
                let id = id.trim();
                Ok(is_valid_id(id).then(|| id.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DesignError::io_with_path(e, path.display().to_string())),
        }
    }

    /// Forgets the current design.
    pub fn clear_current(&self) -> DesignResult<()> {
        let path = self.current_path();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DesignError::io_with_path(e, path.display().to_string())),
        }
    }

    /// Stores a copy of a design under a new id, with " (copy)" appended to
    /// its name.
    pub fn duplicate(&self, id: &str) -> DesignResult<DesignSnapshot> {
        let mut copy = self.get(id)?;
        copy.id = new_design_id();
        copy.name.push_str(COPY_SUFFIX);
        copy.created_at = Utc::now();
        self.save(copy)
    }

    /// Imports an exported design and stores it.
    pub fn import_json(&self, json: &str) -> DesignResult<DesignSnapshot> {
        self.save(snapshot::import_json(json)?)
    }

    /// Exports a stored design.
    pub fn export_json(&self, id: &str) -> DesignResult<String> {
        snapshot::export_json(&self.get(id)?)
    }
}
