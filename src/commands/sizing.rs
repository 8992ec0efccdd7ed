// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Sizing command - nearest-fit busbar lookup

use super::Session;
use anyhow::Result;

/// Show the smallest busbar whose cross-section is at least `area` mm²
pub fn run(session: &Session, area: f64) -> Result<()> {
    if !area.is_finite() || area <= 0.0 {
        anyhow::bail!("Area must be a positive number of mm²");
    }
    let table = session.sizing()?;
    let row = table.nearest_fit(area);

    if session.json {
        return session.print_json(&row);
    }
    match row {
        Some(row) => session.success(format!(
            "{} - {} ({} mm², {} run(s))",
            row.part_number, row.description, row.area_sqmm, row.number_of_runs
        )),
        None => println!("No busbar in the sizing table reaches {area:.2} mm²"),
    }
    Ok(())
}
