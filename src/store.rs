// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Document store - persisted panel records keyed by panel name

use crate::error::{PanelError, Result};
use crate::record::PanelRecord;
use crate::types::ProjectGroup;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Storage for panel records; panel names are unique across the whole store
pub trait PanelStore {
    /// Read the record stored under `name`
    fn read(&self, name: &str) -> Result<PanelRecord>;

    /// Create or overwrite the record stored under `name`
    fn write(&mut self, name: &str, record: &PanelRecord) -> Result<()>;

    /// Names of every stored record, in no particular order
    fn names(&self) -> Result<Vec<String>>;

    /// Whether a record is stored under `name`
    fn contains(&self, name: &str) -> Result<bool> {
        Ok(self.names()?.iter().any(|n| n == name))
    }

    /// Every readable record of a project group, sorted by panel name
    ///
    /// Records that cannot be read are skipped with a warning so one damaged
    /// file does not hide the rest of the project.
    fn group_records(&self, group: &ProjectGroup) -> Result<Vec<(String, PanelRecord)>> {
        let mut names = self.names()?;
        names.sort();

        let mut records = Vec::new();
        for name in names {
            match self.read(&name) {
                Ok(record) if record.project_info == *group => records.push((name, record)),
                Ok(_) => {}
                Err(e) => warn!("Skipping panel {}: {}", name, e),
            }
        }
        Ok(records)
    }

    /// Panel names of a project group, sorted
    fn list_group(&self, group: &ProjectGroup) -> Result<Vec<String>> {
        Ok(self
            .group_records(group)?
            .into_iter()
            .map(|(name, _)| name)
            .collect())
    }
}

/// Reject names that cannot be used as a record key
pub fn validate_panel_name(name: &str) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty()
        || trimmed != name
        || name.contains(['/', '\\'])
        || name == "."
        || name == ".."
    {
        return Err(PanelError::InvalidName(name.to_string()));
    }
    Ok(())
}

// =============================================================================
// File Store
// =============================================================================

/// One `<name>.json` file per panel inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Use `dir` as the panels directory; it is created on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The panels directory
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }
}

impl PanelStore for FileStore {
    fn read(&self, name: &str) -> Result<PanelRecord> {
        let path = self.path_for(name);
        if !path.exists() {
            return Err(PanelError::NotFound(format!("panel {name}")));
        }
        let content = fs::read_to_string(&path).map_err(|e| PanelError::io(&path, e))?;
        serde_json::from_str(&content)
            .map_err(|e| PanelError::malformed(format!("panel {}", path.display()), e))
    }

    fn write(&mut self, name: &str, record: &PanelRecord) -> Result<()> {
        validate_panel_name(name)?;
        fs::create_dir_all(&self.dir).map_err(|e| PanelError::io(&self.dir, e))?;

        let path = self.path_for(name);
        let json = serde_json::to_string_pretty(record)
            .map_err(|e| PanelError::malformed(format!("panel {name}"), e))?;
        fs::write(&path, json).map_err(|e| PanelError::io(&path, e))?;
        debug!("Wrote {}", path.display());
        Ok(())
    }

    fn names(&self) -> Result<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in WalkDir::new(&self.dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| {
                let path = e.path().map_or_else(|| self.dir.clone(), Path::to_path_buf);
                PanelError::io(path, e.into())
            })?;
            let path = entry.path();
            if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        Ok(names)
    }
}

// =============================================================================
// Memory Store
// =============================================================================

/// In-memory store for embedding and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: BTreeMap<String, PanelRecord>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored panels
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing is stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl PanelStore for MemoryStore {
    fn read(&self, name: &str) -> Result<PanelRecord> {
        self.records
            .get(name)
            .cloned()
            .ok_or_else(|| PanelError::NotFound(format!("panel {name}")))
    }

    fn write(&mut self, name: &str, record: &PanelRecord) -> Result<()> {
        validate_panel_name(name)?;
        self.records.insert(name.to_string(), record.clone());
        Ok(())
    }

    fn names(&self) -> Result<Vec<String>> {
        Ok(self.records.keys().cloned().collect())
    }
}
