// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Panel designer CLI - switchgear panel layouts and their bill of materials

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use panel_designer::commands::{self, edit::BusbarArgs, edit::Placement, Session};
use panel_designer::config;
use panel_designer::types::{CubicleSize, Orientation, ProjectGroup, SINGLE_PHASE};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "panel-designer")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "PANEL_DESIGNER_CONFIG")]
    config: Option<PathBuf>,

    /// Data directory override
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Customer of the project group
    #[arg(long, global = true, env = "PANEL_DESIGNER_CUSTOMER", default_value = "")]
    customer: String,

    /// Project of the project group
    #[arg(long, global = true, env = "PANEL_DESIGNER_PROJECT", default_value = "")]
    project: String,

    /// Project reference
    #[arg(long = "reference", visible_alias = "ref", global = true, env = "PANEL_DESIGNER_REFERENCE", default_value = "")]
    reference: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the panels of the project group
    Panels,

    /// Create an empty panel
    Create {
        /// Panel name (unique across all projects)
        name: String,

        /// Panel depth in mm
        #[arg(long, allow_negative_numbers = true)]
        depth: i64,

        /// Replace an existing panel of the same name
        #[arg(long)]
        force: bool,
    },

    /// Show a panel's compartments and busbars
    Show {
        /// Panel name
        name: String,
    },

    /// Append a cubicle to a panel
    AddCubicle {
        /// Panel name
        panel: String,

        /// Cubicle size, e.g. "800mm x 2000mm"
        #[arg(long)]
        size: CubicleSize,

        /// Number of compartments
        #[arg(long, default_value_t = 1)]
        compartments: usize,
    },

    /// Remove the last cubicle of a panel
    DeleteCubicle {
        /// Panel name
        panel: String,
    },

    /// Assign a catalog model to a section
    Select {
        /// Panel name
        panel: String,

        /// Cubicle number (from 1, left to right)
        #[arg(long)]
        cubicle: usize,

        /// Compartment number (from 1, top to bottom)
        #[arg(long)]
        compartment: usize,

        /// Section name (Breaker, ELR/EFR, PFR, Power Analyzer/Energy Meter, Indicator Light, SPD)
        #[arg(long)]
        section: String,

        /// Catalog model number
        #[arg(long)]
        model: String,
    },

    /// Add a busbar sized from its load, or a catalog busbar terminal
    AddBusbar {
        /// Panel name
        panel: String,

        /// Run direction (horizontal, vertical)
        #[arg(long, default_value = "vertical")]
        orientation: Orientation,

        /// Phase
        #[arg(long, default_value = SINGLE_PHASE)]
        phase: String,

        /// Load current in A
        #[arg(long)]
        amperage: Option<f64>,

        /// Current density in A/mm²
        #[arg(long)]
        density: Option<f64>,

        /// Catalog busbar size
        #[arg(long)]
        size: Option<String>,

        /// Parallel runs of a catalog busbar
        #[arg(long)]
        runs: Option<u32>,
    },

    /// Move a busbar, or stretch its trailing end with --resize
    MoveBusbar {
        /// Panel name
        panel: String,

        /// Busbar number (from 1, in creation order)
        #[arg(long)]
        busbar: usize,

        /// Horizontal offset in drawing units
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        dx: f64,

        /// Vertical offset in drawing units
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        dy: f64,

        /// Stretch along the busbar's axis instead of moving it
        #[arg(long)]
        resize: bool,
    },

    /// Aggregate the project group's BOM and export it
    Bom {
        /// Panel being exported
        panel: String,
    },

    /// Manage the breaker catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },

    /// Look up the nearest-fit busbar for a cross-section
    Sizing {
        /// Needed area in mm²
        area: f64,
    },

    /// Show or write configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Import a CSV with "Model No" and "Description" columns
    Import {
        /// Spreadsheet path
        file: PathBuf,
    },
    /// Search models and descriptions
    Search {
        /// Text to look for
        query: String,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the effective configuration to a file
    Init {
        /// Target file (defaults to the user config location)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::load(cli.config.as_deref(), cli.data_dir.clone())?;

    // Initialize logging
    let filter = match cli.verbose {
        0 if cli.quiet => EnvFilter::new("error"),
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let session = Session {
        config,
        group: ProjectGroup::new(cli.customer, cli.project, cli.reference),
        color: !cli.no_color,
        json: cli.json,
    };

    // Execute command
    match cli.command {
        Commands::Panels => commands::panels::list(&session),
        Commands::Create { name, depth, force } => commands::panels::create(&session, &name, depth, force),
        Commands::Show { name } => commands::panels::show(&session, &name),
        Commands::AddCubicle { panel, size, compartments } => {
            commands::edit::add_cubicle(&session, &panel, size, compartments)
        }
        Commands::DeleteCubicle { panel } => commands::edit::delete_cubicle(&session, &panel),
        Commands::Select { panel, cubicle, compartment, section, model } => {
            let at = Placement { cubicle, compartment, section };
            commands::edit::select(&session, &panel, &at, &model)
        }
        Commands::AddBusbar { panel, orientation, phase, amperage, density, size, runs } => {
            let args = BusbarArgs { orientation, phase, amperage, density, size, runs };
            commands::edit::add_busbar(&session, &panel, args)
        }
        Commands::MoveBusbar { panel, busbar, dx, dy, resize } => {
            commands::edit::move_busbar(&session, &panel, busbar, dx, dy, resize)
        }
        Commands::Bom { panel } => commands::bom::run(&session, &panel),
        Commands::Catalog { action } => match action {
            CatalogAction::Import { file } => commands::catalog::import(&session, &file),
            CatalogAction::Search { query } => commands::catalog::search(&session, &query),
        },
        Commands::Sizing { area } => commands::sizing::run(&session, area),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&session),
            ConfigAction::Init { path, force } => {
                let path = path
                    .or_else(|| cli.config.clone())
                    .unwrap_or_else(config::default_config_path);
                commands::config::init(&session, &path, force)
            }
        },
        Commands::Completions { shell } => commands::completions::run(shell, &mut Cli::command()),
    }
}
