//! # kpiboard HTTP Module
//!
//! Serves the static dashboard directory and a small JSON API using axum.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/rules` - Loaded threshold rules
//! - `POST /api/evaluate` - Classify a metric value
//! - anything else - Static file from the dashboard root (`index.html` for directories)
//!
//! ## Configuration (Environment Variables)
//!
//! - `KPIBOARD_CORS_ORIGINS`: Comma-separated list of allowed origins, or "*" for all
//!   (default: the dashboard's own origin on the configured port)
//! - `KPIBOARD_API_RATE_LIMIT`: Requests per second on `/api/*` (default: 50, 0 to disable)

mod handlers;
mod middleware;
mod types;

pub use middleware::{
    API_RATE_LIMIT_ENV, ApiQuota, DEFAULT_API_RATE_LIMIT, api_rate_limit_from_env,
};
// Re-export handlers and types for integration tests (via `kpiboard::api::*`)
#[allow(unused_imports)]
pub use handlers::{evaluate_handler, health_handler, rules_handler};
#[allow(unused_imports)]
pub use types::{EvaluateRequest, EvaluateResponse, HealthResponse, RuleJson, RulesResponse};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, post},
};
use crate::settings::Settings;
use kpiboard_core::{KpiboardError, RuleSet};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state.
///
/// Rules are loaded once at startup and only ever read afterwards.
#[derive(Clone)]
pub struct AppState {
    /// Threshold rules from the dashboard config.
    pub rules: Arc<RuleSet>,
    /// Directory served as the dashboard.
    pub root: PathBuf,
}

impl AppState {
    /// Create new app state.
    #[must_use]
    pub fn new(rules: RuleSet, root: impl Into<PathBuf>) -> Self {
        Self {
            rules: Arc::new(rules),
            root: root.into(),
        }
    }
}

// =============================================================================
// SERVER OPTIONS
// =============================================================================

/// Environment variable holding explicit CORS origins.
pub const CORS_ORIGINS_ENV: &str = "KPIBOARD_CORS_ORIGINS";

/// Listener address plus the knobs that shape the middleware stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerOptions {
    pub host: String,
    pub port: u16,
    /// Requests per second allowed on `/api/*`; zero disables the quota.
    pub api_rate_limit: u32,
    /// Explicit origin list; `None` allows only the dashboard's own origins.
    pub cors_origins: Option<String>,
}

impl ServerOptions {
    /// Options for the resolved settings with default quota and CORS.
    #[must_use]
    pub fn new(settings: &Settings) -> Self {
        Self {
            host: settings.host.clone(),
            port: settings.port,
            api_rate_limit: DEFAULT_API_RATE_LIMIT,
            cors_origins: None,
        }
    }

    /// Options for the resolved settings, with quota and CORS read from the environment.
    #[must_use]
    pub fn from_env(settings: &Settings) -> Self {
        Self {
            api_rate_limit: api_rate_limit_from_env(),
            cors_origins: std::env::var(CORS_ORIGINS_ENV).ok(),
            ..Self::new(settings)
        }
    }

    /// `host:port` for the listener.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build the CORS layer.
///
/// - `*`: allows all origins
/// - unset: the dashboard's own origins on the configured port
/// - otherwise: comma-separated list of allowed origins
fn build_cors_layer(options: &ServerOptions) -> CorsLayer {
    match options.cors_origins.as_deref() {
        Some("*") => {
            tracing::warn!("CORS: Allowing ALL origins ({}=*)", CORS_ORIGINS_ENV);
            CorsLayer::permissive()
        }
        Some(origins) => {
            let allowed_origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| {
                    let trimmed = s.trim();
                    match trimmed.parse::<HeaderValue>() {
                        Ok(hv) => {
                            tracing::info!("CORS: Allowing origin: {}", trimmed);
                            Some(hv)
                        }
                        Err(e) => {
                            tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                            None
                        }
                    }
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::warn!(
                    "CORS: No valid origins in {}, defaulting to the dashboard origin",
                    CORS_ORIGINS_ENV
                );
                build_dashboard_cors(&options.host, options.port)
            } else {
                cors_for(allowed_origins)
            }
        }
        None => build_dashboard_cors(&options.host, options.port),
    }
}

/// Origins a browser uses to reach a dashboard bound to `host:port`.
///
/// Loopback names are always included; any other concrete host adds its own
/// origin. Wildcard binds contribute nothing beyond loopback.
pub fn dashboard_origins(host: &str, port: u16) -> Vec<String> {
    let mut origins = vec![
        format!("http://localhost:{}", port),
        format!("http://127.0.0.1:{}", port),
    ];
    match host {
        "" | "localhost" | "127.0.0.1" | "0.0.0.0" | "::" => {}
        h if h.contains(':') => origins.push(format!("http://[{}]:{}", h, port)),
        h => origins.push(format!("http://{}:{}", h, port)),
    }
    origins
}

/// CORS layer restricted to the dashboard's own origins.
fn build_dashboard_cors(host: &str, port: u16) -> CorsLayer {
    let origins = dashboard_origins(host, port);
    tracing::debug!("CORS: Allowing dashboard origins {:?}", origins);
    cors_for(
        origins
            .iter()
            .filter_map(|o| o.parse::<HeaderValue>().ok())
            .collect(),
    )
}

fn cors_for(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the router for the default settings, reading quota and CORS from the environment.
pub fn create_router(state: AppState) -> Router {
    create_router_with(state, &ServerOptions::from_env(&Settings::default()))
}

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. API quota - `/api/*` only (if enabled)
pub fn create_router_with(state: AppState, options: &ServerOptions) -> Router {
    let cors = build_cors_layer(options);

    let mut api_routes = Router::new()
        .route("/rules", get(handlers::rules_handler))
        .route("/evaluate", post(handlers::evaluate_handler));

    match ApiQuota::per_second(options.api_rate_limit) {
        Some(quota) => {
            tracing::info!("API rate limit: {} requests/second", quota.limit());
            api_routes = api_routes.route_layer(axum_middleware::from_fn_with_state(
                quota,
                middleware::throttle_api,
            ));
        }
        None => tracing::info!("API rate limit disabled"),
    }

    let static_files = ServeDir::new(&state.root);

    Router::new()
        .route("/health", get(handlers::health_handler))
        .nest("/api", api_routes)
        .fallback_service(static_files)
        .layer(axum::extract::DefaultBodyLimit::max(64 * 1024))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server and block until Ctrl+C.
pub async fn run_server(state: AppState, options: ServerOptions) -> Result<(), KpiboardError> {
    let addr = options.bind_addr();
    let router = create_router_with(state, &options);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| KpiboardError::IoError(format!("Bind failed: {}", e)))?;

    tracing::info!("kpiboard HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| KpiboardError::IoError(format!("Server error: {}", e)))?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolve when the process receives Ctrl+C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
