// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Report emitter: turns aggregated totals into sheets and a grouped document

use crate::bom::{BomReport, BomTotals, PanelBom, Tally};
use crate::error::{PanelError, Result};
use crate::types::{ProjectGroup, SECTION_NAMES};
use chrono::{DateTime, Local};
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Title of the cross-panel sheet
pub const TOTAL_SHEET: &str = "Total BOM";

/// Title of the grouped document
pub const DOCUMENT_TITLE: &str = "Total Bill of Materials (BOM)";

/// Heading of the busbar blocks
pub const BUSBAR_MATERIALS: &str = "Busbar Materials";

const BUSBAR_HEADER: [&str; 8] = [
    "Type",
    "Amperage (A)",
    "Current Density (A/mm²)",
    "Coordinates (x1, y1, x2, y2)",
    "Phase",
    "Busbar Size",
    "No. of Runs",
    "Busbar Length (mm)",
];

// =============================================================================
// Sheets
// =============================================================================

/// A named grid of cells, one spreadsheet tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    /// Worksheet title
    pub title: String,
    /// Rows of cells; an empty row is a separator
    pub rows: Vec<Vec<String>>,
}

fn strings<I, S>(cells: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    cells.into_iter().map(Into::into).collect()
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Sheet for the panel being edited: compartments, then busbars
#[must_use]
pub fn panel_sheet(bom: &PanelBom) -> Sheet {
    let mut rows = vec![strings(std::iter::once("Cubicle (X,Y)").chain(SECTION_NAMES))];
    for row in &bom.rows {
        rows.push(strings(std::iter::once(row.label.clone()).chain(row.models.iter().cloned())));
    }

    rows.push(Vec::new());
    rows.push(strings(["Busbars"]));
    rows.push(strings(BUSBAR_HEADER));
    for bar in &bom.busbars {
        let [x1, y1, x2, y2] = bar.coords;
        rows.push(vec![
            bar.orientation.to_string(),
            optional(bar.amperage),
            optional(bar.current_density),
            format!("({x1}, {y1}, {x2}, {y2})"),
            bar.phase.clone(),
            bar.busbar_size.clone().unwrap_or_default(),
            optional(bar.runs),
            bar.length.to_string(),
        ]);
    }

    Sheet {
        title: bom.panel.clone(),
        rows,
    }
}

fn totals_header(panels: &[String]) -> Vec<String> {
    strings(["Part No.", "Description", "Total Qty"].into_iter().map(String::from).chain(panels.iter().cloned()))
}

fn tally_rows(items: &IndexMap<String, Tally>, panels: &[String]) -> Vec<Vec<String>> {
    items
        .iter()
        .map(|(key, tally)| {
            let mut row = vec![key.clone(), tally.description.clone(), tally.total.to_string()];
            row.extend(panels.iter().map(|p| tally.for_panel(p).to_string()));
            row
        })
        .collect()
}

/// Cross-panel sheet: the parts block, then the busbar materials block
#[must_use]
pub fn total_sheet(totals: &BomTotals) -> Sheet {
    let header = totals_header(&totals.panels);
    let mut rows = vec![header.clone()];
    rows.extend(tally_rows(&totals.parts, &totals.panels));
    rows.push(Vec::new());
    rows.push(strings([BUSBAR_MATERIALS]));
    rows.push(header);
    rows.extend(tally_rows(&totals.busbars, &totals.panels));

    Sheet {
        title: TOTAL_SHEET.to_string(),
        rows,
    }
}

// =============================================================================
// Grouped Document
// =============================================================================

/// One headed table of the grouped document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTable {
    /// Category name or [`BUSBAR_MATERIALS`]
    pub heading: String,
    /// Column titles
    pub header: Vec<String>,
    /// Body rows
    pub rows: Vec<Vec<String>>,
}

/// Printable BOM grouped by section category
#[derive(Debug, Clone)]
pub struct GroupedReport {
    /// Project the report is for
    pub group: ProjectGroup,
    /// When the report was produced
    pub generated: DateTime<Local>,
    /// Tables in print order
    pub tables: Vec<ReportTable>,
}

impl GroupedReport {
    /// Build the document: one table per non-empty category, then busbars
    #[must_use]
    pub fn new(group: &ProjectGroup, totals: &BomTotals) -> Self {
        let header = totals_header(&totals.panels);
        let mut tables: Vec<ReportTable> = totals
            .ordered_categories()
            .map(|(name, items)| ReportTable {
                heading: name.to_string(),
                header: header.clone(),
                rows: tally_rows(items, &totals.panels),
            })
            .collect();

        if !totals.busbars.is_empty() {
            tables.push(ReportTable {
                heading: BUSBAR_MATERIALS.to_string(),
                header,
                rows: tally_rows(&totals.busbars, &totals.panels),
            });
        }

        Self {
            group: group.clone(),
            generated: Local::now(),
            tables,
        }
    }

    /// Render as plain text with box-drawn tables
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = format!(
            "Customer:  {}\nProject:   {}\nReference: {}\nGenerated: {}\n\n{DOCUMENT_TITLE}\n{}\n",
            self.group.customer,
            self.group.project,
            self.group.reference,
            self.generated.format("%Y-%m-%d %H:%M"),
            "=".repeat(DOCUMENT_TITLE.len()),
        );
        for table in &self.tables {
            let rendered = render_table(&table.header, &table.rows, ContentArrangement::Disabled);
            out.push_str(&format!("\n{}\n{rendered}\n", table.heading));
        }
        out
    }
}

/// Draw a header and rows with the box-drawing preset
#[must_use]
pub fn render_table(header: &[String], rows: &[Vec<String>], arrangement: ContentArrangement) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(arrangement);
    table.set_header(header.to_vec());
    for row in rows {
        table.add_row(row.clone());
    }
    table
}

// =============================================================================
// Sinks
// =============================================================================

/// Destination for exported sheets and documents
pub trait ReportSink {
    /// Create or replace `sheet` inside `workbook`
    fn write_sheet(&mut self, workbook: &str, sheet: &Sheet) -> Result<()>;

    /// Produce the printable document; returns where it ended up
    fn write_document(&mut self, report: &GroupedReport) -> Result<PathBuf>;
}

/// Writes workbooks as directories of CSV files and the document as text
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    /// Export below `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Export root
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File a sheet is written to
    #[must_use]
    pub fn sheet_path(&self, workbook: &str, title: &str) -> PathBuf {
        self.dir
            .join(sanitize(workbook))
            .join(format!("{}.csv", sanitize(title)))
    }

    /// File the grouped document is written to
    #[must_use]
    pub fn document_path(&self, group: &ProjectGroup) -> PathBuf {
        self.dir.join(sanitize(&group.project)).join("Total_BOM.txt")
    }
}

/// Replace characters that cannot appear in a file name
fn sanitize(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') { '_' } else { c })
        .collect();
    if cleaned.trim().is_empty() {
        "_".to_string()
    } else {
        cleaned
    }
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| PanelError::Sink(format!("cannot create {}: {e}", parent.display())))?;
    }
    Ok(())
}

fn sink_error(path: &Path, e: impl std::fmt::Display) -> PanelError {
    PanelError::Sink(format!("cannot write {}: {e}", path.display()))
}

impl ReportSink for FileSink {
    fn write_sheet(&mut self, workbook: &str, sheet: &Sheet) -> Result<()> {
        let path = self.sheet_path(workbook, &sheet.title);
        create_parent(&path)?;

        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_path(&path)
            .map_err(|e| sink_error(&path, e))?;
        for row in &sheet.rows {
            let written = if row.is_empty() {
                writer.write_record([""])
            } else {
                writer.write_record(row)
            };
            written.map_err(|e| sink_error(&path, e))?;
        }
        writer.flush().map_err(|e| sink_error(&path, e))?;
        debug!("Wrote sheet {}", path.display());
        Ok(())
    }

    fn write_document(&mut self, report: &GroupedReport) -> Result<PathBuf> {
        let path = self.document_path(&report.group);
        create_parent(&path)?;
        fs::write(&path, report.render()).map_err(|e| sink_error(&path, e))?;
        debug!("Wrote document {}", path.display());
        Ok(path)
    }
}

/// Files produced by one export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Workbook the sheets went to
    pub workbook: String,
    /// Where the grouped document was written
    pub document: PathBuf,
}

/// Push the panel sheet, the total sheet and the grouped document to `sink`
pub fn export_bom(sink: &mut dyn ReportSink, group: &ProjectGroup, report: &BomReport) -> Result<ExportSummary> {
    let workbook = group.key();
    sink.write_sheet(&workbook, &panel_sheet(&report.panel))?;
    sink.write_sheet(&workbook, &total_sheet(&report.totals))?;
    let document = sink.write_document(&GroupedReport::new(group, &report.totals))?;
    info!("Exported BOM for {} to workbook {}", report.panel.panel, workbook);
    Ok(ExportSummary { workbook, document })
}
