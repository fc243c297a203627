//! # Config Loader
//!
//! Turns the dashboard's YAML config document into a [`RuleSet`].
//!
//! ## Document Shape
//!
//! ```yaml
//! ReferenceLines:
//!   on_time_delivery:
//!     reference_line: 95
//!     direction: above
//!   stockout_rate:
//!     reference_line: 2.5
//!     direction: below
//! ```
//!
//! Loading is all-or-nothing: the first invalid entry aborts the load and
//! no partial rule set is returned.

use crate::primitives::{REFERENCE_LINES_KEY, RESPONSIBILITIES_KEY};
use crate::source::read_document;
use crate::{Direction, KpiboardError, ThresholdRule};
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;
use std::path::Path;

// =============================================================================
// RULE SET
// =============================================================================

/// Threshold rules keyed by metric name.
///
/// Loaded once per session and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: BTreeMap<String, ThresholdRule>,
}

impl RuleSet {
    /// Create an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate the rules in the document at `path`.
    pub fn from_path(path: &Path) -> Result<Self, KpiboardError> {
        let document = read_document(path)?;
        load_rules(&document)
    }

    /// Rule for `metric`, if configured.
    #[must_use]
    pub fn get(&self, metric: &str) -> Option<&ThresholdRule> {
        self.rules.get(metric)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules in metric-name order.
    pub fn iter(&self) -> impl Iterator<Item = &ThresholdRule> {
        self.rules.values()
    }
}

impl FromIterator<ThresholdRule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = ThresholdRule>>(iter: I) -> Self {
        Self {
            rules: iter
                .into_iter()
                .map(|rule| (rule.metric_name.clone(), rule))
                .collect(),
        }
    }
}

// =============================================================================
// LOADING
// =============================================================================

/// Parse a YAML document into a mapping, rejecting any other root.
fn parse_mapping(document: &str) -> Result<Mapping, KpiboardError> {
    let root: Value = serde_yaml::from_str(document)
        .map_err(|e| KpiboardError::MalformedDocument(format!("YAML parse error: {}", e)))?;

    match root {
        Value::Mapping(mapping) => Ok(mapping),
        _ => Err(KpiboardError::MalformedDocument(
            "document root is not a mapping".to_string(),
        )),
    }
}

/// Load the threshold rules from a config document.
///
/// The rules are read from the top-level `ReferenceLines` key. A document
/// without that key has no rules. Every entry must carry a numeric
/// `reference_line` and a `direction` of `above` or `below`.
pub fn load_rules(document: &str) -> Result<RuleSet, KpiboardError> {
    let root = parse_mapping(document)?;

    let entries = match root.get(REFERENCE_LINES_KEY) {
        None => return Ok(RuleSet::new()),
        Some(Value::Mapping(entries)) => entries,
        Some(_) => {
            return Err(KpiboardError::MalformedDocument(format!(
                "{} must be a mapping of metric name to rule",
                REFERENCE_LINES_KEY
            )));
        }
    };

    let mut rules = BTreeMap::new();
    for (key, value) in entries {
        let metric = key.as_str().ok_or_else(|| {
            KpiboardError::MalformedDocument(format!(
                "{} keys must be metric names, got {:?}",
                REFERENCE_LINES_KEY, key
            ))
        })?;
        let rule = parse_rule(metric, value)?;
        rules.insert(rule.metric_name.clone(), rule);
    }

    Ok(RuleSet { rules })
}

/// Validate a single `ReferenceLines` entry.
pub fn parse_rule(metric: &str, value: &Value) -> Result<ThresholdRule, KpiboardError> {
    let fields = value
        .as_mapping()
        .ok_or_else(|| KpiboardError::invalid_rule(metric, "rule must be a mapping"))?;

    let reference_line = match fields.get("reference_line") {
        None => return Err(KpiboardError::invalid_rule(metric, "missing reference_line")),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| KpiboardError::invalid_rule(metric, "reference_line must be a number"))?,
        Some(_) => {
            return Err(KpiboardError::invalid_rule(
                metric,
                "reference_line must be a number",
            ));
        }
    };

    if !reference_line.is_finite() {
        return Err(KpiboardError::invalid_rule(
            metric,
            "reference_line must be a finite number",
        ));
    }

    let direction = match fields.get("direction") {
        None => return Err(KpiboardError::invalid_rule(metric, "missing direction")),
        Some(Value::String(s)) => s.parse::<Direction>().map_err(|_| {
            KpiboardError::invalid_rule(metric, "direction must be 'above' or 'below'")
        })?,
        Some(_) => {
            return Err(KpiboardError::invalid_rule(
                metric,
                "direction must be 'above' or 'below'",
            ));
        }
    };

    Ok(ThresholdRule::new(metric, reference_line, direction))
}

// =============================================================================
// DOCUMENT CHECKS
// =============================================================================

/// Check that a config document is a non-empty mapping.
pub fn validate_document(document: &str) -> Result<(), KpiboardError> {
    let root = parse_mapping(document)?;
    if root.is_empty() {
        return Err(KpiboardError::MalformedDocument(
            "document does not contain a valid mapping".to_string(),
        ));
    }
    Ok(())
}

/// Read the `General Responsibilities` list from a profile document.
///
/// Never fails: unparsable documents, a missing key or a non-list value all
/// yield an empty list. Non-string list items are skipped.
pub fn extract_responsibilities(document: &str) -> Vec<String> {
    let Ok(root) = parse_mapping(document) else {
        return Vec::new();
    };

    match root.get(RESPONSIBILITIES_KEY) {
        Some(Value::Sequence(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

// =============================================================================
// TESTS
// =============================================================================
