// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Error kinds raised by the panel library

use std::path::PathBuf;

/// Errors raised by the document model, editor, stores and exporters
#[derive(Debug, thiserror::Error)]
pub enum PanelError {
    /// Empty or unusable panel name
    #[error("invalid panel name: {0:?}")]
    InvalidName(String),

    /// Panel depth is not a positive integer
    #[error("panel depth must be a positive integer (mm), got {0}")]
    InvalidDepth(i64),

    /// Any other rejected user input
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A panel, catalog entry or reference file does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// An edit was attempted before a panel was created or loaded
    #[error("no panel is open; create or load a panel first")]
    NoPanel,

    /// Filesystem failure
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File or directory involved
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// A persisted JSON document could not be read or written
    #[error("malformed {what}: {source}")]
    Malformed {
        /// What was being (de)serialized
        what: String,
        /// Underlying error
        source: serde_json::Error,
    },

    /// Spreadsheet (CSV) parsing or writing failed
    #[error("spreadsheet error: {0}")]
    Csv(#[from] csv::Error),

    /// The report sink could not deliver an export
    #[error("export failed: {0}")]
    Sink(String),
}

impl PanelError {
    /// Wrap an I/O error with the path it concerns
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Wrap a JSON error with a description of the document
    pub fn malformed(what: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Malformed {
            what: what.into(),
            source,
        }
    }
}

/// Result alias for panel operations
pub type Result<T> = std::result::Result<T, PanelError>;
