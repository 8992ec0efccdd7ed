// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Command implementations

pub mod bom;
pub mod catalog;
pub mod completions;
pub mod config;
pub mod edit;
pub mod panels;
pub mod sizing;

use crate::catalog::BreakerCatalog;
use crate::config::Config;
use crate::editor::Editor;
use crate::sizing::BusbarSizingTable;
use crate::store::FileStore;
use crate::types::ProjectGroup;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::fmt::Display;

/// Everything a command needs: configuration, project group and output mode
#[derive(Debug, Clone)]
pub struct Session {
    /// Effective configuration
    pub config: Config,
    /// Project group the command works on
    pub group: ProjectGroup,
    /// Colour terminal output
    pub color: bool,
    /// Print JSON instead of text
    pub json: bool,
}

impl Session {
    /// Panel store under the data directory
    #[must_use]
    pub fn store(&self) -> FileStore {
        FileStore::new(self.config.panels_dir())
    }

    /// Breaker catalog; empty when the file is missing
    #[must_use]
    pub fn catalog(&self) -> BreakerCatalog {
        BreakerCatalog::load(&self.config.catalog_path())
    }

    /// Busbar sizing reference table
    pub fn sizing(&self) -> Result<BusbarSizingTable> {
        let path = self.config.sizing_path();
        BusbarSizingTable::load(&path)
            .with_context(|| format!("Failed to load busbar sizing table from {}", path.display()))
    }

    /// Open a stored panel for editing
    pub fn open(&self, name: &str) -> Result<(FileStore, Editor)> {
        let store = self.store();
        let mut editor = Editor::new(self.group.clone());
        editor
            .load_panel(&store, name)
            .with_context(|| format!("Failed to load panel {name}"))?;
        Ok((store, editor))
    }

    /// Save the editor's panel back to `store`
    pub fn save(&self, store: &mut FileStore, editor: &Editor) -> Result<()> {
        editor
            .save_panel(store)
            .with_context(|| format!("Failed to save panel to {}", store.dir().display()))?;
        Ok(())
    }

    /// Print a confirmation line
    pub fn success(&self, message: impl Display) {
        if self.color {
            println!("{} {}", "✓".green(), message);
        } else {
            println!("✓ {message}");
        }
    }

    /// Print a section heading
    pub fn heading(&self, text: &str) {
        if self.color {
            println!("{}", text.bold());
        } else {
            println!("{text}");
        }
    }

    /// Print `value` as pretty JSON
    pub fn print_json<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

/// Convert a 1-based command-line position to an index
pub(crate) fn index_arg(value: usize, what: &str) -> Result<usize> {
    value
        .checked_sub(1)
        .ok_or_else(|| anyhow::anyhow!("{what} numbers start at 1"))
}
