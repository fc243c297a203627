//! # API Throttling
//!
//! A per-second request quota for the JSON endpoints nested under `/api`.
//!
//! The quota is attached with `route_layer` to the API sub-router only, so
//! dashboard assets and `/health` are served however often a page asks.
//!
//! ## Configuration
//!
//! - `KPIBOARD_API_RATE_LIMIT`: API requests per second (default: 50, 0 to disable)

use axum::{
    Json,
    body::Body,
    extract::State,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use serde_json::json;
use std::num::NonZeroU32;
use std::sync::Arc;

/// Environment variable holding the API quota.
pub const API_RATE_LIMIT_ENV: &str = "KPIBOARD_API_RATE_LIMIT";

/// Default API quota in requests per second.
pub const DEFAULT_API_RATE_LIMIT: u32 = 50;

// =============================================================================
// API QUOTA
// =============================================================================

/// Shared quota for the `/api` routes.
#[derive(Clone)]
pub struct ApiQuota {
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
    per_second: NonZeroU32,
}

impl ApiQuota {
    /// Quota admitting `requests_per_second` API calls; `None` when zero.
    #[must_use]
    pub fn per_second(requests_per_second: u32) -> Option<Self> {
        let per_second = NonZeroU32::new(requests_per_second)?;
        Some(Self {
            limiter: Arc::new(RateLimiter::direct(Quota::per_second(per_second))),
            per_second,
        })
    }

    /// Configured requests per second.
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.per_second.get()
    }

    /// Take one cell from the quota.
    fn admit(&self) -> bool {
        self.limiter.check().is_ok()
    }
}

/// Parse a quota value; unset or unparsable input yields the default.
fn parse_rate_limit(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse().ok())
        .unwrap_or(DEFAULT_API_RATE_LIMIT)
}

/// API quota from `KPIBOARD_API_RATE_LIMIT`.
pub fn api_rate_limit_from_env() -> u32 {
    parse_rate_limit(std::env::var(API_RATE_LIMIT_ENV).ok().as_deref())
}

// =============================================================================
// MIDDLEWARE
// =============================================================================

/// Reject API calls beyond the quota with 429 and the API's error shape.
pub async fn throttle_api(
    State(quota): State<ApiQuota>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if quota.admit() {
        return next.run(request).await;
    }

    tracing::warn!(
        path = %request.uri().path(),
        limit = quota.limit(),
        "API rate limit exceeded"
    );
    (
        StatusCode::TOO_MANY_REQUESTS,
        [(header::RETRY_AFTER, "1")],
        Json(json!({
            "success": false,
            "error": format!("API limited to {} requests per second", quota.limit()),
        })),
    )
        .into_response()
}

// =============================================================================
// TESTS
// =============================================================================
