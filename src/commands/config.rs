// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Config commands - show the effective configuration or write it to disk

use super::Session;
use anyhow::Result;
use std::path::Path;

/// Print the effective configuration as TOML
pub fn show(session: &Session) -> Result<()> {
    let resolved = session.config.resolved();
    if session.json {
        return session.print_json(&resolved);
    }
    print!("{}", resolved.to_toml()?);
    Ok(())
}

/// Write the effective configuration to `path`
pub fn init(session: &Session, path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    session.config.resolved().save(path)?;
    session.success(format!("Wrote {}", path.display()));
    Ok(())
}
