//! # kpiboard-core
//!
//! The dashboard logic for kpiboard - THE LOGIC.
//!
//! This crate loads threshold rules from the dashboard's config document,
//! classifies metric values against them, validates the status table, and
//! derives simple views over dated KPI records.
//!
//! ## Architectural Constraints
//!
//! - Pure functions over in-memory values; the only I/O is scoped document
//!   reads in [`source`] and [`check`]
//! - NO async, NO network dependencies
//! - Rule sets are immutable once loaded
//! - The status evaluator never fails; see [`status`]

// =============================================================================
// MODULES
// =============================================================================

pub mod card;
pub mod check;
pub mod config;
pub mod kpi;
pub mod primitives;
pub mod source;
pub mod status;
pub mod table;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Direction, KpiRecord, KpiboardError, Status, StatusColor, ThresholdRule};

// =============================================================================
// RE-EXPORTS: Operations
// =============================================================================

pub use card::render_kpi_card;
pub use check::{
    CheckOutcome, CheckReport, DashboardLayout, dashboard_files_present, run_checks,
    run_checks_with,
};
pub use config::{RuleSet, extract_responsibilities, load_rules, parse_rule, validate_document};
pub use kpi::{metric_series, recent_updates, trend};
pub use source::read_document;
pub use status::{evaluate, evaluate_with, status_color};
pub use table::StatusTable;
