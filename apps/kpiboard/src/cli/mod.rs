//! # kpiboard CLI Module
//!
//! This module implements the CLI interface for kpiboard.
//!
//! ## Available Commands
//!
//! - `serve` - Serve the dashboard directory over HTTP
//! - `check` - Validate the status table and config document
//! - `evaluate` - Classify a metric value against its reference line
//! - `card` - Render a KPI card for a completion percentage
//! - `kpi` - Recent updates, trend or series from a KPI record file
//! - `responsibilities` - List responsibilities from a profile document

mod commands;

use clap::{Parser, Subcommand};
use kpiboard_core::KpiboardError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// kpiboard - local KPI dashboard server and input validator
#[derive(Parser, Debug)]
#[command(name = "kpiboard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Dashboard directory (holds index.html, config.yaml, status.csv)
    #[arg(short = 'r', long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the dashboard over HTTP
    Serve {
        /// Host to bind to (overrides kpiboard.toml)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to (overrides kpiboard.toml, default 8000)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Validate status table and config document
    Check,

    /// Classify a metric value
    Evaluate {
        /// Metric name (looked up in the config's ReferenceLines)
        #[arg(short, long, required_unless_present = "direction")]
        metric: Option<String>,

        /// Current value; omitted means no data
        #[arg(long, allow_negative_numbers = true)]
        value: Option<f64>,

        /// Explicit reference line (skips the config lookup)
        #[arg(long, allow_negative_numbers = true, requires = "direction")]
        reference_line: Option<f64>,

        /// Explicit direction: above or below
        #[arg(long)]
        direction: Option<String>,
    },

    /// Render a KPI card colored by completion percentage
    Card {
        /// Metric label
        #[arg(short, long)]
        metric: String,

        /// Displayed value
        #[arg(long, allow_negative_numbers = true)]
        value: String,

        /// Completion percentage that selects the color band
        #[arg(long, allow_negative_numbers = true)]
        percentage: f64,
    },

    /// Work with a JSON file of dated KPI records
    Kpi {
        /// Path to the records file (JSON array)
        #[arg(short, long)]
        file: PathBuf,

        #[command(subcommand)]
        op: KpiCommand,
    },

    /// List responsibilities from a profile document
    Responsibilities {
        /// Path to the profile YAML file
        #[arg(short, long)]
        file: PathBuf,
    },
}

/// Operations over KPI records.
#[derive(Subcommand, Debug)]
pub enum KpiCommand {
    /// Most recent records, newest first
    Recent {
        /// Number of records to show
        #[arg(short, long, default_value = "5")]
        count: usize,
    },

    /// Last minus first value of a metric
    Trend {
        #[arg(short, long)]
        metric: String,
    },

    /// Values of a metric in file order
    Series {
        #[arg(short, long)]
        metric: String,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), KpiboardError> {
    let root = cli.root.as_path();
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Serve { host, port }) => cmd_serve(root, host, port).await,
        Some(Commands::Check) | None => cmd_check(root, json_mode),
        Some(Commands::Evaluate {
            metric,
            value,
            reference_line,
            direction,
        }) => cmd_evaluate(
            root,
            json_mode,
            metric.as_deref(),
            value,
            reference_line,
            direction.as_deref(),
        ),
        Some(Commands::Card {
            metric,
            value,
            percentage,
        }) => cmd_card(json_mode, &metric, &value, percentage),
        Some(Commands::Kpi { file, op }) => cmd_kpi(json_mode, &file, &op),
        Some(Commands::Responsibilities { file }) => cmd_responsibilities(json_mode, &file),
    }
}
