//! # API Endpoint Handlers
//!
//! This module implements the JSON endpoint handlers. Static dashboard files
//! are served by the router's fallback service, not here.

use super::{
    AppState,
    types::{EvaluateRequest, EvaluateResponse, HealthResponse, RuleJson, RulesResponse},
};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// RULES HANDLER
// =============================================================================

/// List the loaded threshold rules.
pub async fn rules_handler(State(state): State<AppState>) -> impl IntoResponse {
    let rules: Vec<RuleJson> = state.rules.iter().map(RuleJson::from).collect();

    let response = RulesResponse {
        count: rules.len(),
        rules,
    };

    (StatusCode::OK, Json(response))
}

// =============================================================================
// EVALUATE HANDLER
// =============================================================================

/// Classify a metric value against its rule.
///
/// Unknown metrics are a 404; a missing value is still a 200 with
/// "Needs Attention".
pub async fn evaluate_handler(
    State(state): State<AppState>,
    Json(request): Json<EvaluateRequest>,
) -> impl IntoResponse {
    let Some(rule) = state.rules.get(&request.metric) else {
        tracing::debug!("Evaluate: no rule for metric '{}'", request.metric);
        return (
            StatusCode::NOT_FOUND,
            Json(EvaluateResponse::error(
                &request.metric,
                format!("No reference line configured for '{}'", request.metric),
            )),
        );
    };

    let status = state.rules.evaluate(&request.metric, request.value);
    (StatusCode::OK, Json(EvaluateResponse::evaluated(rule, status)))
}
