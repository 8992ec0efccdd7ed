// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! BOM command - roll up the project group and export it

use super::Session;
use crate::bom::aggregate;
use crate::report::{export_bom, FileSink};
use anyhow::{Context, Result};
use tracing::debug;

/// Aggregate every panel of `panel`'s project group and export the result
pub fn run(session: &Session, panel: &str) -> Result<()> {
    let sizing = session.sizing()?;
    let (store, editor) = session.open(panel)?;
    let Some(current) = editor.panel() else {
        anyhow::bail!("Panel {panel} did not load");
    };
    if current.cubicles().is_empty() {
        anyhow::bail!("Panel {panel} has no cubicles; add cubicles and components first");
    }

    // The panel's own group decides which panels roll up with it
    let group = current.group().clone();
    if group != session.group {
        debug!("Aggregating {panel} in its stored group {}", group.key());
    }
    let report = aggregate(&store, &sizing, &group, current)
        .context("Failed to aggregate the bill of materials")?;

    if session.json {
        return session.print_json(&report.totals);
    }

    let export_dir = session.config.export_dir();
    let mut sink = FileSink::new(&export_dir);
    let summary = export_bom(&mut sink, &group, &report)
        .with_context(|| format!("Failed to export BOM to {}", export_dir.display()))?;

    session.success(format!(
        "BOM for {} panel(s): {} parts, {} busbar materials",
        report.totals.panels.len(),
        report.totals.parts.len(),
        report.totals.busbars.len()
    ));
    println!("  workbook: {}", export_dir.join(&summary.workbook).display());
    println!("  document: {}", summary.document.display());
    Ok(())
}
