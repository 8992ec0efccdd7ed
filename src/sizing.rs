// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Busbar sizing reference table and nearest-fit lookup

use crate::error::{PanelError, Result};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// One catalog busbar with its cross-section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingRow {
    /// Part number used as the BOM key
    pub part_number: String,
    /// Item description
    pub description: String,
    /// Cross-sectional area in mm²
    pub area_sqmm: f64,
    /// Parallel runs per phase conductor
    pub number_of_runs: u32,
}

/// Raw CSV row; columns are matched by header name
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Part no")]
    part_number: String,
    #[serde(rename = "Item description", default)]
    description: String,
    #[serde(rename = "Area (sqmm)")]
    area: String,
    #[serde(rename = "No. of runs", default)]
    runs: Option<String>,
}

/// Read-only table of busbar sizes, in reference-file order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusbarSizingTable {
    rows: Vec<SizingRow>,
}

impl BusbarSizingTable {
    /// Build a table from rows
    #[must_use]
    pub fn new(rows: Vec<SizingRow>) -> Self {
        Self { rows }
    }

    /// Load the reference CSV (`Part no, Item description, Area (sqmm), No. of runs`)
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PanelError::NotFound(format!(
                "busbar sizing data {}",
                path.display()
            )));
        }
        let file = std::fs::File::open(path).map_err(|e| PanelError::io(path, e))?;
        let table = Self::from_reader(file)?;
        debug!("Loaded {} busbar sizes from {}", table.len(), path.display());
        Ok(table)
    }

    /// Parse sizing rows from any CSV source
    ///
    /// Rows whose area is not numeric are skipped. A blank run count means one run.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut rows = Vec::new();

        for (line, record) in csv_reader.deserialize::<CsvRow>().enumerate() {
            let raw = record?;
            let Ok(area_sqmm) = raw.area.parse::<f64>() else {
                warn!("Skipping sizing row {} ({}): area {:?} is not a number", line + 1, raw.part_number, raw.area);
                continue;
            };
            let number_of_runs = match raw.runs.as_deref().map(str::trim) {
                None | Some("") => 1,
                Some(r) => parse_runs(r).ok_or_else(|| {
                    PanelError::InvalidInput(format!(
                        "sizing row {} ({}): run count {r:?} is not a whole number",
                        line + 1,
                        raw.part_number
                    ))
                })?,
            };
            rows.push(SizingRow {
                part_number: raw.part_number,
                description: raw.description,
                area_sqmm,
                number_of_runs,
            });
        }

        Ok(Self { rows })
    }

    /// Smallest row whose area is at least `area_needed`
    ///
    /// Ties keep the earlier row. `None` when nothing is large enough.
    #[must_use]
    pub fn nearest_fit(&self, area_needed: f64) -> Option<&SizingRow> {
        self.rows
            .iter()
            .filter(|row| row.area_sqmm >= area_needed)
            .fold(None, |best: Option<&SizingRow>, row| match best {
                Some(b) if b.area_sqmm <= row.area_sqmm => Some(b),
                _ => Some(row),
            })
    }

    /// All rows
    #[must_use]
    pub fn rows(&self) -> &[SizingRow] {
        &self.rows
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Accept `"2"` as well as spreadsheet-style `"2.0"`
fn parse_runs(raw: &str) -> Option<u32> {
    raw.parse::<u32>().ok().or_else(|| {
        let value = raw.parse::<f64>().ok()?;
        (value.fract() == 0.0 && value >= 0.0 && value <= f64::from(u32::MAX))
            .then(|| value as u32)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(part: &str, area: f64, runs: u32) -> SizingRow {
        SizingRow {
            part_number: part.into(),
            description: format!("{part} copper"),
            area_sqmm: area,
            number_of_runs: runs,
        }
    }

    fn sample() -> BusbarSizingTable {
        BusbarSizingTable::new(vec![row("BB-10", 10.0, 1), row("BB-25", 25.0, 1), row("BB-50", 50.0, 2)])
    }

    #[test]
    fn test_nearest_fit_picks_smallest_sufficient() {
        let table = sample();
        assert_eq!(table.nearest_fit(30.0).unwrap().part_number, "BB-50");
        assert_eq!(table.nearest_fit(25.0).unwrap().part_number, "BB-25");
        assert_eq!(table.nearest_fit(0.5).unwrap().part_number, "BB-10");
    }

    #[test]
    fn test_nearest_fit_no_match() {
        assert!(sample().nearest_fit(60.0).is_none());
        assert!(BusbarSizingTable::default().nearest_fit(1.0).is_none());
    }

    #[test]
    fn test_nearest_fit_ignores_row_order() {
        let table = BusbarSizingTable::new(vec![row("BIG", 100.0, 1), row("SMALL", 40.0, 1), row("MID", 60.0, 1)]);
        assert_eq!(table.nearest_fit(35.0).unwrap().part_number, "SMALL");
    }

    #[test]
    fn test_nearest_fit_tie_keeps_first() {
        let table = BusbarSizingTable::new(vec![row("A", 40.0, 1), row("B", 40.0, 2)]);
        assert_eq!(table.nearest_fit(40.0).unwrap().part_number, "A");
    }

    #[test]
    fn test_from_reader_parses_columns() {
        let csv = "Part no,Item description,Area (sqmm),No. of runs\n\
                   CU-20x6,20x6 Cu,120,1\n\
                   CU-40x10,40x10 Cu,400,2.0\n\
                   HEADER,Sub-total,n/a,\n\
                   CU-63x10,63x10 Cu,630,\n";
        let table = BusbarSizingTable::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.rows()[1].number_of_runs, 2);
        assert_eq!(table.rows()[2].number_of_runs, 1);
        assert_eq!(table.nearest_fit(401.0).unwrap().part_number, "CU-63x10");
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let err = BusbarSizingTable::load(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, PanelError::NotFound(_)));
    }
}
