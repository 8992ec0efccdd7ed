// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Breaker catalog commands - bulk import and search

use super::Session;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

/// Import models from a spreadsheet with `Model No` and `Description` columns
pub fn import(session: &Session, spreadsheet: &Path) -> Result<()> {
    let catalog_path = session.config.catalog_path();
    let mut catalog = session.catalog();
    let added = catalog
        .import_file(spreadsheet, &catalog_path)
        .with_context(|| format!("Failed to import {}", spreadsheet.display()))?;

    if session.json {
        return session.print_json(&serde_json::json!({ "added": added, "total": catalog.len() }));
    }
    session.success(format!("Added {added} new breaker types ({} in catalog)", catalog.len()));
    Ok(())
}

#[derive(Serialize)]
struct Hit<'a> {
    model: &'a str,
    description: &'a str,
}

/// Print catalog entries whose model or description contains `query`
pub fn search(session: &Session, query: &str) -> Result<()> {
    let catalog = session.catalog();
    let hits: Vec<Hit<'_>> = catalog
        .search(query)
        .map(|(model, description)| Hit { model, description })
        .collect();

    if session.json {
        return session.print_json(&hits);
    }
    if hits.is_empty() {
        println!("No breaker types match {query:?}");
        return Ok(());
    }
    let width = hits.iter().map(|h| h.model.len()).max().unwrap_or(0);
    for hit in &hits {
        println!("  {:width$}  {}", hit.model, hit.description);
    }
    Ok(())
}
