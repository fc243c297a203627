//! # Core Type Definitions
//!
//! This module contains the shared types for kpiboard:
//! - Threshold rules (`ThresholdRule`, `Direction`)
//! - Evaluation output (`Status`, `StatusColor`)
//! - Dated KPI rows (`KpiRecord`)
//! - Error types (`KpiboardError`)
//!
//! ## Determinism Guarantees
//!
//! - Metric maps use `BTreeMap` so iteration order never depends on hashing
//! - Every enum has a fixed textual form used by both the CLI and the API

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// DIRECTION
// =============================================================================

/// Which side of the reference line counts as healthy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Healthy when the value is at or above the reference line.
    Above,
    /// Healthy when the value is at or below the reference line.
    Below,
}

impl Direction {
    /// The textual form used in config documents.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Above => "above",
            Direction::Below => "below",
        }
    }
}

impl FromStr for Direction {
    type Err = KpiboardError;

    /// Only the exact lowercase words `above` and `below` are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "above" => Ok(Direction::Above),
            "below" => Ok(Direction::Below),
            other => Err(KpiboardError::MalformedDocument(format!(
                "direction must be 'above' or 'below', got '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// STATUS
// =============================================================================

/// Qualitative health label shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Excellent,
    #[serde(rename = "Needs Attention")]
    NeedsAttention,
}

impl Status {
    /// Human-readable label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Status::Excellent => "Excellent",
            Status::NeedsAttention => "Needs Attention",
        }
    }

    #[must_use]
    pub fn is_excellent(&self) -> bool {
        matches!(self, Status::Excellent)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Color band for completion percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Green,
    Amber,
    Red,
}

impl StatusColor {
    /// CSS class used by the dashboard stylesheet.
    #[must_use]
    pub fn css_class(&self) -> &'static str {
        match self {
            StatusColor::Green => "status-green",
            StatusColor::Amber => "status-amber",
            StatusColor::Red => "status-red",
        }
    }
}

impl fmt::Display for StatusColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_class())
    }
}

// =============================================================================
// THRESHOLD RULE
// =============================================================================

/// A named numeric boundary with a comparison direction.
///
/// Rules are only constructed by the config loader, which rejects entries
/// missing either field. There is no default rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRule {
    /// Metric this rule classifies.
    pub metric_name: String,
    /// The boundary value.
    pub reference_line: f64,
    /// Which side of the boundary is healthy.
    pub direction: Direction,
}

impl ThresholdRule {
    /// Create a new rule.
    #[must_use]
    pub fn new(metric_name: impl Into<String>, reference_line: f64, direction: Direction) -> Self {
        Self {
            metric_name: metric_name.into(),
            reference_line,
            direction,
        }
    }
}

// =============================================================================
// KPI RECORD
// =============================================================================

/// A dated row of named numeric metrics.
///
/// Serialized flat, e.g. `{"date": "2026-01-01", "on_time": 92.5}`.
/// Dates are ISO calendar dates and compare lexicographically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiRecord {
    pub date: String,
    #[serde(flatten)]
    pub metrics: BTreeMap<String, f64>,
}

impl KpiRecord {
    /// Create a record with no metrics.
    #[must_use]
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            metrics: BTreeMap::new(),
        }
    }

    /// Builder-style metric insertion.
    #[must_use]
    pub fn with_metric(mut self, name: impl Into<String>, value: f64) -> Self {
        self.metrics.insert(name.into(), value);
        self
    }

    /// Value of `metric`, if this record carries it.
    #[must_use]
    pub fn metric(&self, metric: &str) -> Option<f64> {
        self.metrics.get(metric).copied()
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while loading or validating dashboard inputs.
///
/// All variants are terminal for a validation run; nothing is retried.
/// The status evaluator never produces one of these.
#[derive(Debug, Error)]
pub enum KpiboardError {
    /// A required file does not exist.
    #[error("Missing file: {}", .0.display())]
    MissingFile(PathBuf),

    /// A document could not be parsed or has the wrong shape.
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// A threshold rule is incomplete or has a field of the wrong type.
    #[error("Invalid rule '{metric}': {reason}")]
    InvalidRule { metric: String, reason: String },

    /// The status table has too few rows or columns.
    #[error("Malformed table: {0}")]
    MalformedTable(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

impl KpiboardError {
    /// Shorthand for an `InvalidRule` error.
    pub fn invalid_rule(metric: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRule {
            metric: metric.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_parses_exact_words() {
        assert_eq!("above".parse::<Direction>().ok(), Some(Direction::Above));
        assert_eq!("below".parse::<Direction>().ok(), Some(Direction::Below));
        assert!("Above".parse::<Direction>().is_err());
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn status_labels() {
        assert_eq!(Status::Excellent.to_string(), "Excellent");
        assert_eq!(Status::NeedsAttention.to_string(), "Needs Attention");
    }

    #[test]
    fn record_metric_lookup() {
        let record = KpiRecord::new("2026-01-01").with_metric("kpi", 4.0);
        assert_eq!(record.metric("kpi"), Some(4.0));
        assert_eq!(record.metric("other"), None);
    }

    #[test]
    fn error_messages_carry_context() {
        let err = KpiboardError::invalid_rule("fill_rate", "missing reference_line");
        assert_eq!(
            err.to_string(),
            "Invalid rule 'fill_rate': missing reference_line"
        );

        let err = KpiboardError::MissingFile(PathBuf::from("config.yaml"));
        assert_eq!(err.to_string(), "Missing file: config.yaml");
    }
}
