//! Unit tests for API types serialization/deserialization.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use kpiboard::api::{EvaluateRequest, EvaluateResponse, HealthResponse, RuleJson};
use kpiboard_core::{Direction, Status, ThresholdRule};

// =============================================================================
// HEALTH RESPONSE TESTS
// =============================================================================

#[test]
fn test_health_response_default() {
    let health = HealthResponse::default();
    assert_eq!(health.status, "ok");
    assert!(!health.version.is_empty());
}

#[test]
fn test_health_response_serialization() {
    let health = HealthResponse {
        status: "ok".to_string(),
        version: "0.3.0".to_string(),
    };

    let json = serde_json::to_string(&health).unwrap();
    assert!(json.contains("\"status\":\"ok\""));
    assert!(json.contains("\"version\":\"0.3.0\""));
}

// =============================================================================
// RULE JSON TESTS
// =============================================================================

#[test]
fn test_rule_json_from_rule() {
    let rule = ThresholdRule::new("fill_rate", 90.0, Direction::Above);
    let json = RuleJson::from(&rule);

    assert_eq!(json.metric, "fill_rate");
    assert_eq!(json.reference_line, 90.0);
    assert_eq!(json.direction, Direction::Above);
}

#[test]
fn test_rule_json_direction_lowercase() {
    let rule = ThresholdRule::new("lead_time", 12.0, Direction::Below);
    let json = serde_json::to_string(&RuleJson::from(&rule)).unwrap();
    assert!(json.contains("\"direction\":\"below\""));
}

// =============================================================================
// EVALUATE REQUEST/RESPONSE TESTS
// =============================================================================

#[test]
fn test_evaluate_request_value_optional() {
    let request: EvaluateRequest = serde_json::from_str(r#"{"metric":"fill_rate"}"#).unwrap();
    assert_eq!(request.metric, "fill_rate");
    assert_eq!(request.value, None);

    let request: EvaluateRequest =
        serde_json::from_str(r#"{"metric":"fill_rate","value":12}"#).unwrap();
    assert_eq!(request.value, Some(12.0));
}

#[test]
fn test_evaluate_request_requires_metric() {
    let result: Result<EvaluateRequest, _> = serde_json::from_str(r#"{"value":1}"#);
    assert!(result.is_err());
}

#[test]
fn test_evaluate_response_evaluated() {
    let rule = ThresholdRule::new("fill_rate", 90.0, Direction::Above);
    let response = EvaluateResponse::evaluated(&rule, Status::Excellent);

    assert!(response.success);
    assert_eq!(response.metric, "fill_rate");
    assert_eq!(response.status, Some(Status::Excellent));
    assert_eq!(response.direction, Some(Direction::Above));
    assert!(response.error.is_none());
}

#[test]
fn test_evaluate_response_error() {
    let response = EvaluateResponse::error("carbon", "No reference line configured");

    assert!(!response.success);
    assert!(response.status.is_none());
    assert_eq!(response.error.as_deref(), Some("No reference line configured"));
}

#[test]
fn test_evaluate_response_roundtrip_labels() {
    let rule = ThresholdRule::new("lead_time", 12.0, Direction::Below);
    let response = EvaluateResponse::evaluated(&rule, Status::NeedsAttention);

    let json = serde_json::to_string(&response).unwrap();
    assert!(json.contains("\"status\":\"Needs Attention\""));

    let parsed: EvaluateResponse = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.status, Some(Status::NeedsAttention));
}
