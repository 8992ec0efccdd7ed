// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Edit commands - each loads a panel, applies one edit and saves it

use super::{index_arg, Session};
use crate::editor::NewBusbar;
use crate::types::{section_index, BusbarId, CubicleSize, Orientation, SECTION_NAMES};
use anyhow::{Context, Result};

/// Append a cubicle split into `compartments` bands
pub fn add_cubicle(session: &Session, panel: &str, size: CubicleSize, compartments: usize) -> Result<()> {
    let (mut store, mut editor) = session.open(panel)?;
    editor
        .add_cubicle(size, compartments)
        .with_context(|| format!("Failed to add a {size} cubicle"))?;
    session.save(&mut store, &editor)?;

    let count = editor.panel().map_or(0, |p| p.cubicles().len());
    session.success(format!(
        "Added cubicle {count} ({size}, {compartments} compartments) to {panel}"
    ));
    Ok(())
}

/// Remove the last cubicle of a panel
pub fn delete_cubicle(session: &Session, panel: &str) -> Result<()> {
    let (mut store, mut editor) = session.open(panel)?;
    let removed = editor.delete_last_cubicle()?;
    session.save(&mut store, &editor)?;
    session.success(format!("Removed {} cubicle from {panel}", removed.size()));
    Ok(())
}

/// Where a component goes, in 1-based command-line terms
#[derive(Debug, Clone)]
pub struct Placement {
    /// Cubicle number, left to right
    pub cubicle: usize,
    /// Compartment number, top to bottom
    pub compartment: usize,
    /// Section name
    pub section: String,
}

/// Assign a catalog model to a section
pub fn select(session: &Session, panel: &str, at: &Placement, model: &str) -> Result<()> {
    let section = section_index(&at.section).with_context(|| {
        format!(
            "Unknown section {:?}. Valid: {}",
            at.section,
            SECTION_NAMES.join(", ")
        )
    })?;
    let cubicle = index_arg(at.cubicle, "Cubicle")?;
    let compartment = index_arg(at.compartment, "Compartment")?;

    let catalog = session.catalog();
    let (mut store, mut editor) = session.open(panel)?;
    let target = editor
        .panel()
        .and_then(|p| p.section_ref(cubicle, compartment, section))
        .with_context(|| {
            format!("{panel} has no compartment {},{}", at.cubicle, at.compartment)
        })?;

    let previous = editor.select_from_catalog(target, &catalog, model)?;
    session.save(&mut store, &editor)?;

    let name = SECTION_NAMES[section];
    match previous {
        Some(old) => session.success(format!(
            "{name} {},{}: {} replaced by {model}",
            at.cubicle, at.compartment, old.model
        )),
        None => session.success(format!("{name} {},{}: {model}", at.cubicle, at.compartment)),
    }
    Ok(())
}

/// Busbar parameters as given on the command line
#[derive(Debug, Clone)]
pub struct BusbarArgs {
    /// Run direction
    pub orientation: Orientation,
    /// Phase description
    pub phase: String,
    /// Load current in A
    pub amperage: Option<f64>,
    /// Current density in A/mm²
    pub density: Option<f64>,
    /// Catalog size
    pub size: Option<String>,
    /// Parallel runs of a catalog busbar
    pub runs: Option<u32>,
}

impl BusbarArgs {
    fn into_new_busbar(self) -> Result<NewBusbar> {
        match (self.size, self.amperage, self.density) {
            (Some(size), None, None) => Ok(NewBusbar::catalog(
                self.orientation,
                size,
                self.runs.unwrap_or(1),
                self.phase,
            )),
            (None, Some(amperage), Some(density)) => {
                if self.runs.is_some() {
                    anyhow::bail!("--runs only applies to catalog busbars (--size)");
                }
                Ok(NewBusbar::computed(self.orientation, amperage, density, self.phase))
            }
            (Some(_), _, _) => anyhow::bail!("--size cannot be combined with --amperage/--density"),
            _ => anyhow::bail!("Give either --size, or both --amperage and --density"),
        }
    }
}

/// Create a busbar at its default position
pub fn add_busbar(session: &Session, panel: &str, args: BusbarArgs) -> Result<()> {
    let request = args.into_new_busbar()?;
    let (mut store, mut editor) = session.open(panel)?;
    editor.add_busbar(request)?;
    session.save(&mut store, &editor)?;

    let count = editor.panel().map_or(0, |p| p.busbars().len());
    session.success(format!("Added busbar {count} to {panel}"));
    Ok(())
}

/// Move a busbar, or stretch it when `resize` is set
pub fn move_busbar(session: &Session, panel: &str, busbar: usize, dx: f64, dy: f64, resize: bool) -> Result<()> {
    let index = index_arg(busbar, "Busbar")?;
    let (mut store, mut editor) = session.open(panel)?;
    let id: BusbarId = editor
        .panel()
        .and_then(|p| p.busbars().get(index))
        .map(|b| b.id())
        .with_context(|| format!("{panel} has no busbar {busbar}"))?;

    if resize {
        editor.resize_busbar(id, dx, dy)?;
    } else {
        editor.move_busbar(id, dx, dy)?;
    }
    session.save(&mut store, &editor)?;

    if let Some(bar) = editor.panel().and_then(|p| p.busbar(id)) {
        let [x1, y1, x2, y2] = bar.endpoints().coords();
        session.success(format!(
            "Busbar {busbar} now ({x1}, {y1}) - ({x2}, {y2}), {} mm",
            bar.length()
        ));
    }
    Ok(())
}
