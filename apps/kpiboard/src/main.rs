//! # kpiboard - Local KPI Dashboard
//!
//! The main binary for kpiboard.
//!
//! This application provides:
//! - HTTP server for a static dashboard directory (axum-based)
//! - CLI checks for the dashboard's config document and status table
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                apps/kpiboard (THE BINARY)           │
//! │                                                     │
//! │   ┌─────────────┐            ┌─────────────────┐    │
//! │   │    CLI      │            │    HTTP server  │    │
//! │   │   (clap)    │            │ (axum+ServeDir) │    │
//! │   └──────┬──────┘            └────────┬────────┘    │
//! │          └──────────────┬─────────────┘             │
//! │                         ▼                           │
//! │                ┌────────────────┐                   │
//! │                │ kpiboard-core  │                   │
//! │                │  (THE LOGIC)   │                   │
//! │                └────────────────┘                   │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Serve the dashboard in the current directory on port 8000
//! kpiboard serve
//!
//! # Validate config.yaml and status.csv (exit 1 on failure)
//! kpiboard check --root ./Supply-Chain-Report
//!
//! # Classify a value
//! kpiboard evaluate -m on_time_delivery --value 93.5
//! ```

use clap::Parser;
use kpiboard::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Initialize tracing. KPIBOARD_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("KPIBOARD_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if cli.verbose {
        "kpiboard=debug,kpiboard_core=debug,tower_http=debug"
    } else {
        "kpiboard=info,tower_http=debug"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    // Display startup banner
    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the kpiboard startup banner.
fn print_banner() {
    println!(
        r#"
  kpiboard v{}
  ========================================
"#,
        env!("CARGO_PKG_VERSION")
    );
}
