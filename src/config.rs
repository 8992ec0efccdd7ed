// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Configuration management
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `PANEL_DESIGNER_*` environment variables, then the `--data-dir` flag.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prefix of the environment variables that override settings
pub const ENV_PREFIX: &str = "PANEL_DESIGNER";

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "hyperpolymath", "panel-designer")
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory for persistent data (panels, catalog, reference data)
    pub data_dir: PathBuf,
    /// Breaker catalog file; defaults to `<data_dir>/breaker_types.json`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
    /// Busbar sizing CSV; defaults to `<data_dir>/busbar_sizing.csv`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizing_path: Option<PathBuf>,
    /// Where BOM exports go; defaults to `<data_dir>/exports`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: project_dirs()
                .map(|d| d.data_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from(".panel-designer")),
            catalog_path: None,
            sizing_path: None,
            export_dir: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Panel records live here, one JSON file per panel
    #[must_use]
    pub fn panels_dir(&self) -> PathBuf {
        self.data_dir.join("panels")
    }

    /// Effective breaker catalog path
    #[must_use]
    pub fn catalog_path(&self) -> PathBuf {
        self.catalog_path
            .clone()
            .unwrap_or_else(|| self.data_dir.join("breaker_types.json"))
    }

    /// Effective busbar sizing CSV path
    #[must_use]
    pub fn sizing_path(&self) -> PathBuf {
        self.sizing_path
            .clone()
            .unwrap_or_else(|| self.data_dir.join("busbar_sizing.csv"))
    }

    /// Effective export directory
    #[must_use]
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join("exports"))
    }

    /// Copy with every derived path written out, for display and `config init`
    #[must_use]
    pub fn resolved(&self) -> Self {
        Self {
            data_dir: self.data_dir.clone(),
            catalog_path: Some(self.catalog_path()),
            sizing_path: Some(self.sizing_path()),
            export_dir: Some(self.export_dir()),
            log_level: self.log_level.clone(),
        }
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    /// Write as TOML, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(path, self.to_toml()?)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }
}

/// Default location of the configuration file
#[must_use]
pub fn default_config_path() -> PathBuf {
    project_dirs()
        .map(|d| d.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("panel-designer.toml"))
}

/// Load configuration from defaults, `file`, the environment and `data_dir`
pub fn load(file: Option<&Path>, data_dir: Option<PathBuf>) -> Result<Config> {
    load_with_env(file, config::Environment::with_prefix(ENV_PREFIX), data_dir)
}

fn load_with_env(file: Option<&Path>, env: config::Environment, data_dir: Option<PathBuf>) -> Result<Config> {
    let defaults = Config::default();
    let mut builder = config::Config::builder()
        .set_default("data_dir", defaults.data_dir.to_string_lossy().to_string())?
        .set_default("log_level", defaults.log_level)?;

    if let Some(path) = file {
        builder = builder.add_source(config::File::from(path).format(config::FileFormat::Toml));
    }
    builder = builder.add_source(env);

    let mut cfg: Config = builder
        .build()
        .context("Failed to read configuration")?
        .try_deserialize()
        .context("Invalid configuration")?;

    if let Some(dir) = data_dir {
        cfg.data_dir = dir;
    }
    Ok(cfg)
}
