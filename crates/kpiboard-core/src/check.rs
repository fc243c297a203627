//! # Validation Run
//!
//! Fail-fast checks over a dashboard directory.
//!
//! Checks run in a fixed order and the first failure ends the run. No
//! partial report is returned on failure.
//!
//! | Order | Target        | Check                                   |
//! |-------|---------------|-----------------------------------------|
//! | 1     | `status.csv`  | table shape ([`StatusTable::parse`])    |
//! | 2     | `config.yaml` | non-empty mapping                       |
//! | 3     | `config.yaml` | `ReferenceLines` rules ([`load_rules`]) |

use crate::KpiboardError;
use crate::config::{load_rules, validate_document};
use crate::primitives::{CONFIG_FILE, INDEX_FILE, STATUS_FILE};
use crate::source::read_document;
use crate::table::StatusTable;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Input file names for a dashboard directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardLayout {
    pub config_file: String,
    pub status_file: String,
}

impl Default for DashboardLayout {
    fn default() -> Self {
        Self {
            config_file: CONFIG_FILE.to_string(),
            status_file: STATUS_FILE.to_string(),
        }
    }
}

/// One passed check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    /// File the check ran against.
    pub target: String,
    /// What was verified.
    pub detail: String,
}

/// Outcomes of a successful validation run, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub outcomes: Vec<CheckOutcome>,
}

impl CheckReport {
    fn pass(&mut self, target: &str, detail: String) {
        self.outcomes.push(CheckOutcome {
            target: target.to_string(),
            detail,
        });
    }
}

/// Run every check against the dashboard at `root` with default file names.
pub fn run_checks(root: &Path) -> Result<CheckReport, KpiboardError> {
    run_checks_with(root, &DashboardLayout::default())
}

/// Run every check against the dashboard at `root`.
pub fn run_checks_with(root: &Path, layout: &DashboardLayout) -> Result<CheckReport, KpiboardError> {
    let mut report = CheckReport::default();

    let status_text = read_document(&root.join(&layout.status_file))?;
    let table = StatusTable::parse(&status_text)?;
    report.pass(
        &layout.status_file,
        format!(
            "{} columns, {} data rows",
            table.header.len(),
            table.row_count()
        ),
    );

    let config_text = read_document(&root.join(&layout.config_file))?;
    validate_document(&config_text)?;
    report.pass(&layout.config_file, "valid mapping".to_string());

    let rules = load_rules(&config_text)?;
    report.pass(
        &layout.config_file,
        format!("{} reference lines", rules.len()),
    );

    Ok(report)
}

/// Check that the files needed to serve the dashboard exist under `root`.
///
/// Returns the first missing path.
pub fn dashboard_files_present(root: &Path, layout: &DashboardLayout) -> Result<(), KpiboardError> {
    let required: [PathBuf; 2] = [root.join(INDEX_FILE), root.join(&layout.config_file)];
    match required.into_iter().find(|path| !path.is_file()) {
        Some(missing) => Err(KpiboardError::MissingFile(missing)),
        None => Ok(()),
    }
}

// =============================================================================
// TESTS
// =============================================================================
