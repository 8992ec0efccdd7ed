// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Breaker/component catalog: `model -> description`, shared by every panel

use crate::error::{PanelError, Result};
use crate::types::SelectedComponent;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

const MODEL_COLUMN: &str = "Model No";
const DESCRIPTION_COLUMN: &str = "Description";

/// Process-wide component catalog, kept in import order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BreakerCatalog {
    entries: IndexMap<String, String>,
}

impl BreakerCatalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the catalog file; a missing or unreadable file yields an empty catalog
    #[must_use]
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        let parsed = fs::read_to_string(path)
            .map_err(|e| PanelError::io(path, e))
            .and_then(|content| {
                serde_json::from_str(&content)
                    .map_err(|e| PanelError::malformed(format!("catalog {}", path.display()), e))
            });
        match parsed {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!("Ignoring breaker catalog: {}", e);
                Self::default()
            }
        }
    }

    /// Write the catalog file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| PanelError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PanelError::malformed("breaker catalog", e))?;
        fs::write(path, json).map_err(|e| PanelError::io(path, e))
    }

    /// Add one entry unless the model is already known; returns whether it was added
    pub fn insert(&mut self, model: impl Into<String>, description: impl Into<String>) -> bool {
        let model = model.into();
        if model.is_empty() || self.entries.contains_key(&model) {
            return false;
        }
        self.entries.insert(model, description.into());
        true
    }

    /// Bulk import from a spreadsheet with `Model No` and `Description` columns
    ///
    /// Existing models are left untouched. Returns how many entries were added.
    pub fn import_csv<R: Read>(&mut self, reader: R) -> Result<usize> {
        let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| {
                    PanelError::InvalidInput(format!(
                        "spreadsheet must have '{MODEL_COLUMN}' and '{DESCRIPTION_COLUMN}' columns"
                    ))
                })
        };
        let model_idx = column(MODEL_COLUMN)?;
        let desc_idx = column(DESCRIPTION_COLUMN)?;

        let mut added = 0;
        for record in csv_reader.records() {
            let record = record?;
            let model = record.get(model_idx).unwrap_or_default().trim();
            let description = record.get(desc_idx).unwrap_or_default().trim();
            if self.insert(model, description) {
                added += 1;
            }
        }
        info!("Imported {} new catalog entries", added);
        Ok(added)
    }

    /// Import a spreadsheet file and persist the catalog when anything was added
    pub fn import_file(&mut self, spreadsheet: &Path, catalog_path: &Path) -> Result<usize> {
        let file = fs::File::open(spreadsheet).map_err(|e| PanelError::io(spreadsheet, e))?;
        let added = self.import_csv(file)?;
        if added > 0 {
            self.save(catalog_path)?;
        }
        Ok(added)
    }

    /// Description for a model
    #[must_use]
    pub fn description(&self, model: &str) -> Option<&str> {
        self.entries.get(model).map(String::as_str)
    }

    /// Resolve a model into a section selection
    pub fn component(&self, model: &str) -> Result<SelectedComponent> {
        self.description(model)
            .map(|desc| SelectedComponent::new(model, desc))
            .ok_or_else(|| PanelError::NotFound(format!("catalog model {model}")))
    }

    /// Case-insensitive substring search over model and description
    pub fn search<'a>(&'a self, query: &str) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        let needle = query.to_lowercase();
        self.entries
            .iter()
            .filter(move |(model, desc)| {
                model.to_lowercase().contains(&needle) || desc.to_lowercase().contains(&needle)
            })
            .map(|(m, d)| (m.as_str(), d.as_str()))
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
