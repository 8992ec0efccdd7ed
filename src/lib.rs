// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Panel designer library - switchgear panel layouts and their bill of materials
//!
//! This crate provides the document model for switchgear panels (cubicles,
//! compartments, sections and busbars), the editing operations with their
//! undo log, and the roll-up of every panel in a project into a consolidated
//! bill of materials.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod bom;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod drag;
pub mod editor;
pub mod error;
pub mod label;
pub mod panel;
pub mod record;
pub mod report;
pub mod sizing;
pub mod store;
pub mod undo;

/// Core value types shared by the document model, the editor and the BOM roll-up
pub mod types {
    use crate::error::PanelError;
    use serde::{Deserialize, Serialize};
    use std::fmt;
    use std::str::FromStr;

    // =========================================================================
    // Drawing Geometry
    // =========================================================================

    /// Drawing units per millimetre
    pub const SCALE: f64 = 0.2;

    /// Where the first cubicle of a panel is anchored, in drawing units
    pub const ORIGIN: Point = Point { x: 50.0, y: 50.0 };

    /// A point in drawing units
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct Point {
        /// X coordinate
        pub x: f64,
        /// Y coordinate
        pub y: f64,
    }

    impl Point {
        /// Create a point
        #[must_use]
        pub const fn new(x: f64, y: f64) -> Self {
            Self { x, y }
        }
    }

    /// Axis-aligned rectangle in drawing units
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct Rect {
        /// Left edge
        pub x1: f64,
        /// Top edge
        pub y1: f64,
        /// Right edge
        pub x2: f64,
        /// Bottom edge
        pub y2: f64,
    }

    impl Rect {
        /// Create a rectangle from its corners
        #[must_use]
        pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
            Self { x1, y1, x2, y2 }
        }

        /// Horizontal extent
        #[must_use]
        pub fn width(&self) -> f64 {
            self.x2 - self.x1
        }

        /// Vertical extent
        #[must_use]
        pub fn height(&self) -> f64 {
            self.y2 - self.y1
        }

        /// Corners as `[x1, y1, x2, y2]`
        #[must_use]
        pub fn coords(&self) -> [f64; 4] {
            [self.x1, self.y1, self.x2, self.y2]
        }

        /// Whether `p` lies inside the rectangle (edges included)
        #[must_use]
        pub fn contains(&self, p: Point) -> bool {
            p.x >= self.x1 && p.x <= self.x2 && p.y >= self.y1 && p.y <= self.y2
        }
    }

    // =========================================================================
    // Project Group
    // =========================================================================

    /// The `(customer, project, reference)` triple that groups panels together
    #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct ProjectGroup {
        /// Customer name
        pub customer: String,
        /// Project name
        pub project: String,
        /// Project reference
        #[serde(rename = "ref")]
        pub reference: String,
    }

    impl ProjectGroup {
        /// Create a project group
        pub fn new(
            customer: impl Into<String>,
            project: impl Into<String>,
            reference: impl Into<String>,
        ) -> Self {
            Self {
                customer: customer.into(),
                project: project.into(),
                reference: reference.into(),
            }
        }

        /// Workbook key used for exports: `<customer>_<project>_<ref>`
        #[must_use]
        pub fn key(&self) -> String {
            format!("{}_{}_{}", self.customer, self.project, self.reference)
        }
    }

    // =========================================================================
    // Cubicles and Sections
    // =========================================================================

    /// Nominal cubicle dimensions in millimetres
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CubicleSize {
        /// Width in mm
        pub width_mm: u32,
        /// Height in mm
        pub height_mm: u32,
    }

    /// The enumerated cubicle sizes a panel can be built from
    pub const CUBICLE_SIZES: [CubicleSize; 12] = [
        CubicleSize::new(600, 1800),
        CubicleSize::new(800, 1800),
        CubicleSize::new(1000, 1800),
        CubicleSize::new(600, 2000),
        CubicleSize::new(800, 2000),
        CubicleSize::new(1000, 2000),
        CubicleSize::new(600, 400),
        CubicleSize::new(800, 400),
        CubicleSize::new(1000, 400),
        CubicleSize::new(600, 600),
        CubicleSize::new(800, 600),
        CubicleSize::new(1000, 600),
    ];

    impl CubicleSize {
        /// Create a size without checking it against [`CUBICLE_SIZES`]
        #[must_use]
        pub const fn new(width_mm: u32, height_mm: u32) -> Self {
            Self { width_mm, height_mm }
        }

        /// Whether this is one of the enumerated sizes
        #[must_use]
        pub fn is_standard(&self) -> bool {
            CUBICLE_SIZES.contains(self)
        }

        /// Width in drawing units
        #[must_use]
        pub fn drawing_width(&self) -> f64 {
            f64::from(self.width_mm) * SCALE
        }

        /// Height in drawing units
        #[must_use]
        pub fn drawing_height(&self) -> f64 {
            f64::from(self.height_mm) * SCALE
        }
    }

    impl fmt::Display for CubicleSize {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}mm x {}mm", self.width_mm, self.height_mm)
        }
    }

    impl FromStr for CubicleSize {
        type Err = PanelError;

        /// Parse `"800mm x 2000mm"` (the `mm` suffixes are optional)
        fn from_str(s: &str) -> Result<Self, Self::Err> {
            let invalid = || PanelError::InvalidInput(format!("unknown cubicle size: {s}"));
            let cleaned = s.replace("mm", "");
            let (w, h) = cleaned.split_once(['x', 'X']).ok_or_else(invalid)?;
            let size = Self::new(
                w.trim().parse().map_err(|_| invalid())?,
                h.trim().parse().map_err(|_| invalid())?,
            );
            if !size.is_standard() {
                return Err(invalid());
            }
            Ok(size)
        }
    }

    /// The six functional slots of every compartment, left to right
    pub const SECTION_NAMES: [&str; 6] = [
        "Breaker",
        "ELR/EFR",
        "PFR",
        "Power Analyzer/Energy Meter",
        "Indicator Light",
        "SPD",
    ];

    /// Position of a section name in [`SECTION_NAMES`], case-insensitive
    #[must_use]
    pub fn section_index(name: &str) -> Option<usize> {
        SECTION_NAMES
            .iter()
            .position(|s| s.eq_ignore_ascii_case(name.trim()))
    }

    /// A component model placed in a section
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct SelectedComponent {
        /// Catalog model number
        pub model: String,
        /// Human-readable description
        #[serde(rename = "desc", default)]
        pub description: String,
    }

    impl SelectedComponent {
        /// Create a component selection
        pub fn new(model: impl Into<String>, description: impl Into<String>) -> Self {
            Self {
                model: model.into(),
                description: description.into(),
            }
        }
    }

    // =========================================================================
    // Busbars
    // =========================================================================

    /// Phase string that halves the busbar multiplier
    pub const SINGLE_PHASE: &str = "Single Phase";

    /// The other phase offered when creating busbars
    pub const THREE_PHASE: &str = "Three Phase";

    /// Catalog busbar sizes offered for terminal busbars
    pub const STANDARD_BUSBAR_SIZES: [&str; 9] = [
        "20x6 Busbar (5.5m Length) LVT",
        "25x10 Busbar (5.5m Length) LVT",
        "32x10 Cu Busbar (5.5m Length) LVT",
        "40x10 Cu Busbar (5.5m Length) LVT",
        "50x10 Cu Busbar (5.5m Length) LVT",
        "63x10 Cu Busbar (5.5m Length) LVT",
        "75x10 Cu Busbar (5.5m Length) LVT",
        "80x10 Cu Busbar (5.5m Length) LVT",
        "100x10 Cu Busbar (5.5m Length) LVT",
    ];

    /// Busbar run direction
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Orientation {
        /// Runs along x
        Horizontal,
        /// Runs along y
        Vertical,
    }

    impl Orientation {
        /// Lowercase name used in records and exports
        #[must_use]
        pub fn as_str(&self) -> &'static str {
            match self {
                Self::Horizontal => "horizontal",
                Self::Vertical => "vertical",
            }
        }
    }

    impl fmt::Display for Orientation {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.as_str())
        }
    }

    impl FromStr for Orientation {
        type Err = PanelError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s.trim().to_lowercase().as_str() {
                "horizontal" | "h" => Ok(Self::Horizontal),
                "vertical" | "v" => Ok(Self::Vertical),
                _ => Err(PanelError::InvalidInput(format!("unknown busbar type: {s}"))),
            }
        }
    }

    /// How a busbar's material is determined
    #[derive(Debug, Clone, PartialEq)]
    pub enum BusbarRating {
        /// Sized from the load: needed area = amperage / current density
        Computed {
            /// Load current in A
            amperage: f64,
            /// Allowed current density in A/mm²
            current_density: f64,
        },
        /// Explicit catalog size ("busbar terminal")
        Catalog {
            /// Catalog size string, also the BOM part key
            size: String,
            /// Parallel runs
            runs: u32,
        },
    }

    // =========================================================================
    // Identifiers
    // =========================================================================

    /// Session-scoped cubicle identity; never persisted
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct CubicleId(pub u64);

    /// Session-scoped busbar identity; re-created on load
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct BusbarId(pub u64);

    impl fmt::Display for CubicleId {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "cubicle#{}", self.0)
        }
    }

    impl fmt::Display for BusbarId {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "busbar#{}", self.0)
        }
    }

    /// Address of one section inside a panel
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SectionRef {
        /// Owning cubicle
        pub cubicle: CubicleId,
        /// Compartment index, top to bottom
        pub compartment: usize,
        /// Section index into [`SECTION_NAMES`]
        pub section: usize,
    }
}

/// Prelude for common imports
pub mod prelude {
    pub use crate::error::{PanelError, Result};
    pub use crate::types::*;
}
