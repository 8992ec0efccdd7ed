// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Panel commands - list, create and show panels of a project group

use super::Session;
use crate::bom::panel_bom;
use crate::editor::Editor;
use crate::report::{panel_sheet, render_table};
use crate::store::PanelStore;
use anyhow::{Context, Result};
use comfy_table::ContentArrangement;

/// List the panels of the session's project group
pub fn list(session: &Session) -> Result<()> {
    let store = session.store();
    let editor = Editor::new(session.group.clone());
    let names = editor
        .list_panels(&store)
        .with_context(|| format!("Failed to read panels from {}", store.dir().display()))?;

    if session.json {
        return session.print_json(&names);
    }
    if names.is_empty() {
        println!("No panels for {}", session.group.key());
        return Ok(());
    }
    session.heading(&format!("Panels ({})", names.len()));
    for name in names {
        println!("  {name}");
    }
    Ok(())
}

/// Create an empty panel and save it
///
/// An existing panel of the same name is only replaced when `force` is set.
pub fn create(session: &Session, name: &str, depth: i64, force: bool) -> Result<()> {
    let mut store = session.store();
    let mut editor = Editor::new(session.group.clone());
    let name = editor.create_panel(name, depth)?.name().to_string();

    let exists = store
        .contains(&name)
        .with_context(|| format!("Failed to read panels from {}", store.dir().display()))?;
    if exists && !force {
        anyhow::bail!("Panel {name} already exists; use --force to replace it");
    }
    session.save(&mut store, &editor)?;

    if session.json {
        if let Some(panel) = editor.panel() {
            return session.print_json(&panel.to_record());
        }
    }
    if exists {
        session.success(format!("Replaced panel {name} with an empty one ({depth} mm deep)"));
    } else {
        session.success(format!("Created panel {name} ({depth} mm deep)"));
    }
    Ok(())
}

/// Print a panel's compartments and busbars
pub fn show(session: &Session, name: &str) -> Result<()> {
    let (_, editor) = session.open(name)?;
    let Some(panel) = editor.panel() else {
        anyhow::bail!("Panel {name} did not load");
    };

    if session.json {
        return session.print_json(&panel.to_record());
    }

    let sheet = panel_sheet(&panel_bom(panel));
    let mut blocks = sheet.rows.split(Vec::is_empty);

    session.heading(&format!("Panel {}", panel.name()));
    if let Some(label) = panel.depth_label() {
        println!("{label}");
    }
    if let Some([header, rows @ ..]) = blocks.next() {
        if rows.is_empty() {
            println!("No cubicles");
        } else {
            println!("{}", render_table(header, rows, ContentArrangement::DynamicFullWidth));
        }
    }
    if let Some([_, header, rows @ ..]) = blocks.next() {
        if !rows.is_empty() {
            println!();
            session.heading("Busbars");
            println!("{}", render_table(header, rows, ContentArrangement::DynamicFullWidth));
        }
    }
    Ok(())
}
