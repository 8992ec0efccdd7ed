// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! BOM aggregation across every panel of a project group
//!
//! Component quantities are counted per model, overall and per section
//! category. Busbar material is keyed by the catalog size for terminal
//! busbars, or by the nearest-fit sizing row for computed ones.

use crate::error::Result;
use crate::panel::{Busbar, Panel};
use crate::sizing::{BusbarSizingTable, SizingRow};
use crate::store::PanelStore;
use crate::types::{BusbarRating, Orientation, ProjectGroup, SECTION_NAMES, SINGLE_PHASE};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, info, warn};

// =============================================================================
// Totals
// =============================================================================

/// Quantity of one part, overall and per panel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    /// Description of the part (last one seen wins)
    pub description: String,
    /// Sum over every panel
    pub total: u64,
    /// Contribution of each panel, in first-seen order
    pub panels: IndexMap<String, u64>,
}

impl Tally {
    fn add(&mut self, description: &str, panel: &str, quantity: u64) {
        description.clone_into(&mut self.description);
        self.total += quantity;
        *self.panels.entry(panel.to_string()).or_insert(0) += quantity;
    }

    /// Quantity contributed by `panel`, zero if it contributed nothing
    #[must_use]
    pub fn for_panel(&self, panel: &str) -> u64 {
        self.panels.get(panel).copied().unwrap_or(0)
    }
}

/// Cross-panel totals for a project group
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BomTotals {
    /// Panels that were aggregated, sorted by name
    pub panels: Vec<String>,
    /// Components keyed by model
    pub parts: IndexMap<String, Tally>,
    /// Components keyed by section name, then model
    pub categories: IndexMap<String, IndexMap<String, Tally>>,
    /// Busbar material keyed by part number or catalog size
    pub busbars: IndexMap<String, Tally>,
}

impl BomTotals {
    /// Categories in [`SECTION_NAMES`] order, skipping empty ones
    pub fn ordered_categories(&self) -> impl Iterator<Item = (&'static str, &IndexMap<String, Tally>)> + '_ {
        SECTION_NAMES.iter().filter_map(|name| {
            self.categories
                .get(*name)
                .filter(|items| !items.is_empty())
                .map(|items| (*name, items))
        })
    }
}

// =============================================================================
// Busbar Material
// =============================================================================

/// Busbar quantity multiplier for a phase string
///
/// Only `"Single Phase"` is special; any other string counts as multi-phase.
#[must_use]
pub fn phase_multiplier(phase: &str) -> u64 {
    if phase == SINGLE_PHASE {
        2
    } else {
        4
    }
}

/// Material a single busbar calls for
#[derive(Debug, Clone, PartialEq)]
pub enum BusbarRequirement<'a> {
    /// Explicit catalog size: `length * runs`
    Catalog {
        /// Catalog size string, also the part key
        size: &'a str,
        /// Quantity in mm
        quantity: u64,
    },
    /// Nearest-fit sizing row: `length * row runs * phase multiplier`
    Sized {
        /// Matching reference row
        row: &'a SizingRow,
        /// Quantity in mm
        quantity: u64,
    },
    /// No sizing row is large enough
    NoMatch {
        /// Amperage / current density
        area_needed: f64,
    },
    /// Not enough data to size the busbar
    Skipped,
}

/// Work out the material for one busbar
#[must_use]
pub fn busbar_requirement<'a>(busbar: &'a Busbar, sizing: &'a BusbarSizingTable) -> BusbarRequirement<'a> {
    let length = busbar.length();
    match busbar.rating() {
        BusbarRating::Catalog { size, runs } => BusbarRequirement::Catalog {
            size,
            quantity: length * u64::from(*runs),
        },
        BusbarRating::Computed {
            amperage,
            current_density,
        } if *amperage > 0.0 && *current_density > 0.0 => {
            let area_needed = amperage / current_density;
            match sizing.nearest_fit(area_needed) {
                Some(row) => BusbarRequirement::Sized {
                    row,
                    quantity: length * u64::from(row.number_of_runs) * phase_multiplier(busbar.phase()),
                },
                None => BusbarRequirement::NoMatch { area_needed },
            }
        }
        BusbarRating::Computed { .. } => BusbarRequirement::Skipped,
    }
}

// =============================================================================
// Per-panel Rows
// =============================================================================

/// Selected models of one compartment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompartmentRow {
    /// 1-based `"<cubicle>,<compartment>"`
    pub label: String,
    /// Model per section, empty when nothing is selected
    pub models: Vec<String>,
}

/// One busbar as listed on the panel sheet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusbarLine {
    /// Run direction
    pub orientation: Orientation,
    /// Amperage of a computed busbar
    pub amperage: Option<f64>,
    /// Current density of a computed busbar
    pub current_density: Option<f64>,
    /// Endpoints truncated to whole units
    pub coords: [i64; 4],
    /// Phase description
    pub phase: String,
    /// Catalog size of a terminal busbar
    pub busbar_size: Option<String>,
    /// Runs of a terminal busbar
    pub runs: Option<u32>,
    /// Length in mm
    pub length: u64,
}

/// Rows describing the panel being edited
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelBom {
    /// Panel name
    pub panel: String,
    /// One row per (cubicle, compartment)
    pub rows: Vec<CompartmentRow>,
    /// One line per busbar
    pub busbars: Vec<BusbarLine>,
}

/// Build the per-panel rows
#[must_use]
pub fn panel_bom(panel: &Panel) -> PanelBom {
    let mut rows = Vec::new();
    for (cub_idx, cubicle) in panel.cubicles().iter().enumerate() {
        for (comp_idx, compartment) in cubicle.compartments().iter().enumerate() {
            rows.push(CompartmentRow {
                label: format!("{},{}", cub_idx + 1, comp_idx + 1),
                models: compartment
                    .sections()
                    .iter()
                    .map(|sec| sec.component().map(|c| c.model.clone()).unwrap_or_default())
                    .collect(),
            });
        }
    }

    let busbars = panel
        .busbars()
        .iter()
        .map(|bar| {
            let (amperage, current_density, busbar_size, runs) = match bar.rating() {
                BusbarRating::Computed {
                    amperage,
                    current_density,
                } => (Some(*amperage), Some(*current_density), None, None),
                BusbarRating::Catalog { size, runs } => (None, None, Some(size.clone()), Some(*runs)),
            };
            BusbarLine {
                orientation: bar.orientation(),
                amperage,
                current_density,
                coords: bar.endpoints().coords().map(|c| c.trunc() as i64),
                phase: bar.phase().to_string(),
                busbar_size,
                runs,
                length: bar.length(),
            }
        })
        .collect();

    PanelBom {
        panel: panel.name().to_string(),
        rows,
        busbars,
    }
}

// =============================================================================
// Aggregation
// =============================================================================

/// Everything the report emitter needs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BomReport {
    /// Rows of the panel being edited
    pub panel: PanelBom,
    /// Totals over the whole project group
    pub totals: BomTotals,
}

/// Running aggregation state; the no-match counter restarts for every run
#[derive(Debug, Default)]
struct Aggregator {
    totals: BomTotals,
    no_match: usize,
}

impl Aggregator {
    fn add_panel(&mut self, panel: &Panel, sizing: &BusbarSizingTable) {
        let name = panel.name();
        self.totals.panels.push(name.to_string());

        for (category, item) in panel.selected_components() {
            self.totals
                .parts
                .entry(item.model.clone())
                .or_default()
                .add(&item.description, name, 1);
            self.totals
                .categories
                .entry(category.to_string())
                .or_default()
                .entry(item.model.clone())
                .or_default()
                .add(&item.description, name, 1);
        }

        for busbar in panel.busbars() {
            let (key, description, quantity) = match busbar_requirement(busbar, sizing) {
                BusbarRequirement::Catalog { size, quantity } => (size.to_string(), size.to_string(), quantity),
                BusbarRequirement::Sized { row, quantity } => {
                    (row.part_number.clone(), row.description.clone(), quantity)
                }
                BusbarRequirement::NoMatch { area_needed } => {
                    let key = format!("NO_MATCH_{}", self.no_match);
                    self.no_match += 1;
                    let (amperage, density) = match busbar.rating() {
                        BusbarRating::Computed {
                            amperage,
                            current_density,
                        } => (*amperage, *current_density),
                        BusbarRating::Catalog { .. } => (0.0, 0.0),
                    };
                    warn!(
                        "No busbar in the sizing table fits {:.2} mm² ({}, {})",
                        area_needed,
                        name,
                        busbar.id()
                    );
                    let description = format!(
                        "No match for Phase={}, Amperage={}, CD={}, AreaNeeded={:.2}",
                        busbar.phase(),
                        amperage,
                        density,
                        area_needed
                    );
                    (key, description, 0)
                }
                BusbarRequirement::Skipped => {
                    debug!("Skipping {} of {}: no size and no load data", busbar.id(), name);
                    continue;
                }
            };
            self.totals
                .busbars
                .entry(key)
                .or_default()
                .add(&description, name, quantity);
        }
    }
}

/// Roll up every panel of `group` into one report
///
/// `current` is the panel being edited; its in-memory state takes the place
/// of any stored record with the same name, and it is included even when it
/// has not been saved yet.
pub fn aggregate(
    store: &dyn PanelStore,
    sizing: &BusbarSizingTable,
    group: &ProjectGroup,
    current: &Panel,
) -> Result<BomReport> {
    let mut panels = Vec::new();
    for (name, record) in store.group_records(group)? {
        if name == current.name() {
            continue;
        }
        match Panel::from_record(&name, &record) {
            Ok(panel) => panels.push(panel),
            Err(e) => warn!("Skipping panel {}: {}", name, e),
        }
    }
    if current.group() == group {
        panels.push(current.clone());
    }
    panels.sort_by(|a, b| a.name().cmp(b.name()));

    let mut aggregator = Aggregator::default();
    for panel in &panels {
        aggregator.add_panel(panel, sizing);
    }

    info!(
        "Aggregated {} panels: {} parts, {} busbar materials",
        panels.len(),
        aggregator.totals.parts.len(),
        aggregator.totals.busbars.len()
    );

    Ok(BomReport {
        panel: panel_bom(current),
        totals: aggregator.totals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{Editor, NewBusbar};
    use crate::store::MemoryStore;
    use crate::types::{SelectedComponent, CUBICLE_SIZES, THREE_PHASE};

    fn sizing() -> BusbarSizingTable {
        let row = |part: &str, area: f64, runs: u32| SizingRow {
            part_number: part.into(),
            description: format!("Cu busbar {area} mm²"),
            area_sqmm: area,
            number_of_runs: runs,
        };
        BusbarSizingTable::new(vec![row("BB-10", 10.0, 1), row("BB-25", 25.0, 1), row("BB-50", 50.0, 2)])
    }

    fn group() -> ProjectGroup {
        ProjectGroup::new("Acme", "Substation 4", "Q-118")
    }

    /// Vertical computed busbar stretched to 200 mm
    fn computed_bar(editor: &mut Editor, amperage: f64, density: f64, phase: &str) {
        let id = editor
            .add_busbar(NewBusbar::computed(Orientation::Vertical, amperage, density, phase))
            .unwrap();
        editor.resize_busbar(id, 0.0, -50.0).unwrap();
    }

    #[test]
    fn test_computed_busbar_quantity() {
        let mut editor = Editor::new(group());
        editor.create_panel("MDB-1", 600).unwrap();
        computed_bar(&mut editor, 100.0, 2.5, SINGLE_PHASE);

        let store = MemoryStore::new();
        let report = aggregate(&store, &sizing(), &group(), editor.panel().unwrap()).unwrap();
        let tally = &report.totals.busbars["BB-50"];
        assert_eq!(tally.total, 800);
        assert_eq!(tally.for_panel("MDB-1"), 800);
    }

    #[test]
    fn test_catalog_busbar_quantity_ignores_phase() {
        let mut editor = Editor::new(group());
        editor.create_panel("MDB-1", 600).unwrap();
        let id = editor
            .add_busbar(NewBusbar::catalog(Orientation::Horizontal, "40x10 Cu Busbar (5.5m Length) LVT", 3, THREE_PHASE))
            .unwrap();
        editor.resize_busbar(id, -50.0, 0.0).unwrap();

        let report = aggregate(&MemoryStore::new(), &sizing(), &group(), editor.panel().unwrap()).unwrap();
        let tally = &report.totals.busbars["40x10 Cu Busbar (5.5m Length) LVT"];
        assert_eq!(tally.total, 450);
        assert_eq!(tally.description, "40x10 Cu Busbar (5.5m Length) LVT");
    }

    #[test]
    fn test_unknown_phase_uses_multi_phase_multiplier() {
        assert_eq!(phase_multiplier("Single Phase"), 2);
        assert_eq!(phase_multiplier("Three Phase"), 4);
        assert_eq!(phase_multiplier("single phase"), 4);
    }

    #[test]
    fn test_no_match_and_skipped_busbars() {
        let mut editor = Editor::new(group());
        editor.create_panel("MDB-1", 600).unwrap();
        computed_bar(&mut editor, 600.0, 2.0, THREE_PHASE);
        computed_bar(&mut editor, 700.0, 2.0, THREE_PHASE);
        computed_bar(&mut editor, 0.0, 2.0, THREE_PHASE);

        let report = aggregate(&MemoryStore::new(), &sizing(), &group(), editor.panel().unwrap()).unwrap();
        let keys: Vec<&str> = report.totals.busbars.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["NO_MATCH_0", "NO_MATCH_1"]);

        let first = &report.totals.busbars["NO_MATCH_0"];
        assert_eq!(first.total, 0);
        assert_eq!(
            first.description,
            "No match for Phase=Three Phase, Amperage=600, CD=2, AreaNeeded=300.00"
        );
    }

    #[test]
    fn test_totals_span_group_and_prefer_current_panel() {
        let mut store = MemoryStore::new();
        let breaker = SelectedComponent::new("NSX100F", "MCCB 100A");

        let mut editor = Editor::new(group());
        editor.create_panel("SMDB-2", 600).unwrap();
        editor.add_cubicle(CUBICLE_SIZES[0], 2).unwrap();
        for comp in 0..2 {
            let at = editor.panel().unwrap().section_ref(0, comp, 0).unwrap();
            editor.select_component(at, breaker.clone()).unwrap();
        }
        editor.save_panel(&mut store).unwrap();

        editor.create_panel("SMDB-1", 600).unwrap();
        editor.add_cubicle(CUBICLE_SIZES[0], 1).unwrap();
        let at = editor.panel().unwrap().section_ref(0, 0, 0).unwrap();
        editor.select_component(at, breaker.clone()).unwrap();
        editor.save_panel(&mut store).unwrap();

        // Unsaved edit on the open panel is counted
        let at = editor.panel().unwrap().section_ref(0, 0, 4).unwrap();
        editor.select_component(at, SelectedComponent::new("IL-R", "Red lamp")).unwrap();

        let mut other = Editor::new(ProjectGroup::new("Globex", "Plant", "R9"));
        other.create_panel("Foreign", 600).unwrap();
        other.add_cubicle(CUBICLE_SIZES[0], 1).unwrap();
        let at = other.panel().unwrap().section_ref(0, 0, 0).unwrap();
        other.select_component(at, breaker).unwrap();
        other.save_panel(&mut store).unwrap();

        let report = aggregate(&store, &sizing(), &group(), editor.panel().unwrap()).unwrap();
        let totals = &report.totals;
        assert_eq!(totals.panels, vec!["SMDB-1", "SMDB-2"]);

        let nsx = &totals.parts["NSX100F"];
        assert_eq!(nsx.total, 3);
        assert_eq!(nsx.for_panel("SMDB-1"), 1);
        assert_eq!(nsx.for_panel("SMDB-2"), 2);
        assert_eq!(totals.parts["IL-R"].total, 1);

        let categories: Vec<&str> = totals.ordered_categories().map(|(name, _)| name).collect();
        assert_eq!(categories, vec!["Breaker", "Indicator Light"]);

        for tally in totals.parts.values() {
            assert_eq!(tally.panels.values().sum::<u64>(), tally.total);
        }
    }

    #[test]
    fn test_panel_rows_use_one_based_labels() {
        let mut editor = Editor::new(group());
        editor.create_panel("MDB-1", 600).unwrap();
        editor.add_cubicle(CUBICLE_SIZES[0], 1).unwrap();
        editor.add_cubicle(CUBICLE_SIZES[1], 2).unwrap();
        let at = editor.panel().unwrap().section_ref(1, 1, 2).unwrap();
        editor.select_component(at, SelectedComponent::new("PFR-12", "PF relay")).unwrap();

        let rows = panel_bom(editor.panel().unwrap()).rows;
        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["1,1", "2,1", "2,2"]);
        assert_eq!(rows[2].models, vec!["", "", "PFR-12", "", "", ""]);
    }
}
