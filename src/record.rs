// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Persisted panel record - the on-disk shape of one panel document
//!
//! Field names follow the stored JSON exactly; older records may omit
//! optional fields, so everything past the project info has a default.

use crate::types::{Orientation, ProjectGroup, SelectedComponent};
use serde::{Deserialize, Serialize};

/// One persisted panel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PanelRecord {
    /// Owning project group
    #[serde(default)]
    pub project_info: ProjectGroup,
    /// Panel depth in mm, unset on very old records
    #[serde(default)]
    pub panel_depth: Option<u32>,
    /// Cubicles left to right
    #[serde(default)]
    pub cubicles: Vec<CubicleRecord>,
    /// Busbars in creation order
    #[serde(default)]
    pub busbars: Vec<BusbarRecord>,
}

/// Persisted cubicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CubicleRecord {
    /// Drawn rectangle `[x1, y1, x2, y2]`
    pub coords: [f64; 4],
    /// Nominal width in mm
    pub width: u32,
    /// Nominal height in mm
    pub height: u32,
    /// Fill colour
    #[serde(default)]
    pub color: Option<String>,
    /// Compartments top to bottom
    #[serde(default)]
    pub compartments: Vec<CompartmentRecord>,
}

/// Persisted compartment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompartmentRecord {
    /// Sections left to right
    #[serde(default)]
    pub sections: Vec<SectionRecord>,
}

/// Persisted section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionRecord {
    /// Section name
    pub name: String,
    /// Selected component, `null` when empty
    #[serde(default)]
    pub item: Option<SelectedComponent>,
}

/// Persisted busbar; exactly one of the amperage/density pair or the size/runs pair is meaningful
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusbarRecord {
    /// Transient canvas id, ignored on load
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Run direction
    #[serde(rename = "type")]
    pub orientation: Orientation,
    /// Endpoints `[x1, y1, x2, y2]`
    pub coords: [f64; 4],
    /// Load current in A
    #[serde(default)]
    pub amperage: Option<f64>,
    /// Current density in A/mm²
    #[serde(default)]
    pub current_density: Option<f64>,
    /// Phase description
    #[serde(default = "default_phase")]
    pub phase: String,
    /// Catalog size; its presence marks a terminal busbar
    #[serde(default)]
    pub busbar_size: Option<String>,
    /// Parallel runs for catalog busbars
    #[serde(default)]
    pub no_of_runs: Option<u32>,
}

fn default_phase() -> String {
    crate::types::SINGLE_PHASE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_stored_document() {
        let json = r#"{
            "project_info": {"customer": "Acme", "project": "Substation 4", "ref": "Q-118"},
            "panel_depth": 600,
            "cubicles": [{
                "coords": [50.0, 50.0, 210.0, 450.0],
                "width": 800, "height": 2000, "color": "lightblue",
                "compartments": [{"sections": [
                    {"name": "Breaker", "item": {"model": "NSX100F", "desc": "MCCB"}},
                    {"name": "ELR/EFR", "item": null}
                ]}]
            }],
            "busbars": [
                {"id": 17, "type": "vertical", "coords": [150, 50, 150, 300],
                 "amperage": 100, "current_density": 2.5, "phase": "Single Phase"},
                {"id": 18, "type": "horizontal", "coords": [50, 150, 250, 150],
                 "amperage": null, "current_density": null, "phase": "Three Phase",
                 "busbar_size": "40x10 Cu Busbar (5.5m Length) LVT", "no_of_runs": 3}
            ]
        }"#;

        let record: PanelRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.project_info.reference, "Q-118");
        assert_eq!(record.panel_depth, Some(600));
        let item = record.cubicles[0].compartments[0].sections[0].item.as_ref().unwrap();
        assert_eq!(item.description, "MCCB");
        assert_eq!(record.busbars[0].orientation, Orientation::Vertical);
        assert_eq!(record.busbars[0].busbar_size, None);
        assert_eq!(record.busbars[1].no_of_runs, Some(3));
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let json = r#"{"project_info": {"customer": "A", "project": "B", "ref": "C"}}"#;
        let record: PanelRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.panel_depth, None);
        assert!(record.cubicles.is_empty());
        assert!(record.busbars.is_empty());
    }

    #[test]
    fn test_section_item_serializes_as_desc() {
        let section = SectionRecord {
            name: "PFR".into(),
            item: Some(SelectedComponent::new("PFR-12", "Power factor relay")),
        };
        let json = serde_json::to_value(&section).unwrap();
        assert_eq!(json["item"]["desc"], "Power factor relay");
        assert!(json["item"].get("description").is_none());
    }
}
