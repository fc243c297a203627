//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.

use kpiboard_core::{Direction, Status, ThresholdRule};
use serde::{Deserialize, Serialize};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// RULES RESPONSE
// =============================================================================

/// Threshold rule JSON representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleJson {
    pub metric: String,
    pub reference_line: f64,
    pub direction: Direction,
}

impl From<&ThresholdRule> for RuleJson {
    fn from(rule: &ThresholdRule) -> Self {
        Self {
            metric: rule.metric_name.clone(),
            reference_line: rule.reference_line,
            direction: rule.direction,
        }
    }
}

/// All configured rules, in metric-name order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesResponse {
    pub count: usize,
    pub rules: Vec<RuleJson>,
}

// =============================================================================
// EVALUATE REQUEST/RESPONSE
// =============================================================================

/// Evaluate a metric value against its configured rule.
///
/// `value` may be null or omitted; that evaluates to "Needs Attention".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateRequest {
    pub metric: String,
    #[serde(default)]
    pub value: Option<f64>,
}

/// Evaluation result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateResponse {
    pub success: bool,
    pub metric: String,
    pub status: Option<Status>,
    pub reference_line: Option<f64>,
    pub direction: Option<Direction>,
    pub error: Option<String>,
}

impl EvaluateResponse {
    pub fn evaluated(rule: &ThresholdRule, status: Status) -> Self {
        Self {
            success: true,
            metric: rule.metric_name.clone(),
            status: Some(status),
            reference_line: Some(rule.reference_line),
            direction: Some(rule.direction),
            error: None,
        }
    }

    pub fn error(metric: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            success: false,
            metric: metric.into(),
            status: None,
            reference_line: None,
            direction: None,
            error: Some(msg.into()),
        }
    }
}
