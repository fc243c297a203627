//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use super::KpiCommand;
use crate::api::{self, AppState, ServerOptions};
use crate::settings::Settings;
use kpiboard_core::{
    KpiRecord, KpiboardError, RuleSet, Status, dashboard_files_present, evaluate,
    extract_responsibilities, metric_series,
    primitives::{INDEX_FILE, MAX_RECORD_COUNT},
    read_document, recent_updates, render_kpi_card, run_checks_with, status_color, trend,
};
use std::path::Path;

/// Print a JSON value in pretty form.
fn print_json(value: &serde_json::Value) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

// =============================================================================
// SERVE COMMAND
// =============================================================================

/// Serve the dashboard directory.
///
/// Refuses to start unless `index.html` and the config document exist, and
/// the config's rules load cleanly.
pub async fn cmd_serve(
    root: &Path,
    host: Option<String>,
    port: Option<u16>,
) -> Result<(), KpiboardError> {
    let settings = Settings::load(root)?.with_overrides(host, port);
    let layout = settings.layout();

    if let Err(e) = dashboard_files_present(root, &layout) {
        println!("Error: Please run kpiboard from the dashboard directory (or pass --root)");
        println!("Required files: {}, {}", INDEX_FILE, layout.config_file);
        return Err(e);
    }

    let rules = RuleSet::from_path(&root.join(&layout.config_file))?;
    let addr = settings.bind_addr();

    println!("kpiboard Dashboard Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Root:   {}", root.display());
    println!("  Host:   {}", settings.host);
    println!("  Port:   {}", settings.port);
    println!("  Rules:  {}", rules.len());
    println!();
    println!("Dashboard: http://{}", addr);
    println!();
    println!("Endpoints:");
    println!("  GET  /              - Dashboard (static files)");
    println!("  GET  /api/rules     - Reference lines");
    println!("  POST /api/evaluate  - Classify a metric value");
    println!("  GET  /health        - Health check");
    println!();
    println!("Press Ctrl+C to stop the server");
    println!();

    let state = AppState::new(rules, root);
    api::run_server(state, ServerOptions::from_env(&settings)).await
}

// =============================================================================
// CHECK COMMAND
// =============================================================================

/// Validate the dashboard's input files.
pub fn cmd_check(root: &Path, json_mode: bool) -> Result<(), KpiboardError> {
    let settings = Settings::load(root)?;
    tracing::info!("Checking dashboard inputs in {:?}", root);

    let report = run_checks_with(root, &settings.layout())?;

    if json_mode {
        print_json(&serde_json::json!({
            "root": root.to_string_lossy(),
            "passed": true,
            "checks": report.outcomes,
        }));
        return Ok(());
    }

    for outcome in &report.outcomes {
        println!("{}: OK ({})", outcome.target, outcome.detail);
    }
    println!("All data checks passed.");

    Ok(())
}

// =============================================================================
// EVALUATE COMMAND
// =============================================================================

/// Classify a value.
///
/// With `--reference-line` and `--direction` the config is not consulted.
/// Otherwise the metric's rule is loaded from the config document; a metric
/// without a rule evaluates to "Needs Attention".
pub fn cmd_evaluate(
    root: &Path,
    json_mode: bool,
    metric: Option<&str>,
    value: Option<f64>,
    reference_line: Option<f64>,
    direction: Option<&str>,
) -> Result<(), KpiboardError> {
    let (status, reference_line, direction) = match (direction, metric) {
        (Some(direction), _) => (
            evaluate(value, reference_line, direction),
            reference_line,
            Some(direction.to_string()),
        ),
        (None, Some(metric)) => {
            let settings = Settings::load(root)?;
            let rules = RuleSet::from_path(&root.join(&settings.config_file))?;
            let rule = rules.get(metric);
            if rule.is_none() {
                tracing::warn!("No reference line configured for '{}'", metric);
            }
            (
                rules.evaluate(metric, value),
                rule.map(|r| r.reference_line),
                rule.map(|r| r.direction.to_string()),
            )
        }
        (None, None) => (Status::NeedsAttention, None, None),
    };

    if json_mode {
        print_json(&serde_json::json!({
            "metric": metric,
            "value": value,
            "reference_line": reference_line,
            "direction": direction,
            "status": status,
        }));
        return Ok(());
    }

    let label = metric.unwrap_or("value");
    match (value, reference_line, direction) {
        (Some(v), Some(r), Some(d)) => println!("{} = {} ({} {}): {}", label, v, d, r, status),
        _ => println!("{}: {}", label, status),
    }

    Ok(())
}

// =============================================================================
// CARD COMMAND
// =============================================================================

/// Render a KPI card whose color follows the completion percentage.
pub fn cmd_card(
    json_mode: bool,
    metric: &str,
    value: &str,
    percentage: f64,
) -> Result<(), KpiboardError> {
    let color = status_color(percentage);
    let html = render_kpi_card(metric, value, color.css_class());

    if json_mode {
        print_json(&serde_json::json!({
            "metric": metric,
            "value": value,
            "percentage": percentage,
            "color": color,
            "html": html,
        }));
    } else {
        println!("{}", html);
    }

    Ok(())
}

// =============================================================================
// KPI COMMAND
// =============================================================================

/// Load a JSON array of KPI records.
pub fn load_records(path: &Path) -> Result<Vec<KpiRecord>, KpiboardError> {
    let text = read_document(path)?;
    let records: Vec<KpiRecord> = serde_json::from_str(&text).map_err(|e| {
        KpiboardError::MalformedDocument(format!("{}: {}", path.display(), e))
    })?;

    if records.len() > MAX_RECORD_COUNT {
        return Err(KpiboardError::MalformedDocument(format!(
            "Record count {} exceeds maximum allowed {}",
            records.len(),
            MAX_RECORD_COUNT
        )));
    }

    tracing::debug!("Loaded {} KPI records from {:?}", records.len(), path);
    Ok(records)
}

/// Run a KPI series operation over a records file.
pub fn cmd_kpi(json_mode: bool, file: &Path, op: &KpiCommand) -> Result<(), KpiboardError> {
    let records = load_records(file)?;

    match op {
        KpiCommand::Recent { count } => {
            let recent = recent_updates(&records, *count);
            if json_mode {
                print_json(&serde_json::json!({ "count": recent.len(), "records": recent }));
                return Ok(());
            }
            println!("Most recent {} of {} records:", recent.len(), records.len());
            for record in &recent {
                let metrics: Vec<String> = record
                    .metrics
                    .iter()
                    .map(|(name, value)| format!("{}={}", name, value))
                    .collect();
                println!("  {}  {}", record.date, metrics.join(" "));
            }
        }

        KpiCommand::Trend { metric } => {
            let change = trend(&records, metric);
            if json_mode {
                print_json(&serde_json::json!({ "metric": metric, "trend": change }));
                return Ok(());
            }
            match change {
                Some(change) => println!("Trend for {}: {:+}", metric, change),
                None => println!("Trend for {}: no value", metric),
            }
        }

        KpiCommand::Series { metric } => {
            let series: Vec<f64> = metric_series(&records, metric).collect();
            if json_mode {
                print_json(&serde_json::json!({ "metric": metric, "series": series }));
                return Ok(());
            }
            let values: Vec<String> = series.iter().map(|v| v.to_string()).collect();
            println!("{}: [{}]", metric, values.join(", "));
        }
    }

    Ok(())
}

// =============================================================================
// RESPONSIBILITIES COMMAND
// =============================================================================

/// List the responsibilities in a profile document.
pub fn cmd_responsibilities(json_mode: bool, file: &Path) -> Result<(), KpiboardError> {
    let text = read_document(file)?;
    let items = extract_responsibilities(&text);

    if json_mode {
        print_json(&serde_json::json!({ "responsibilities": items }));
        return Ok(());
    }

    if items.is_empty() {
        println!("No responsibilities listed");
    }
    for item in &items {
        println!("- {}", item);
    }

    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_records_parses_array() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("kpis.json");
        std::fs::write(
            &path,
            r#"[{"date":"2026-01-01","kpi":1},{"date":"2026-01-02","kpi":2}]"#,
        )
        .expect("write");

        let records = load_records(&path).expect("load");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].metric("kpi"), Some(2.0));
    }

    #[test]
    fn load_records_rejects_non_array() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("kpis.json");
        std::fs::write(&path, r#"{"date":"2026-01-01"}"#).expect("write");

        assert!(matches!(
            load_records(&path),
            Err(KpiboardError::MalformedDocument(_))
        ));
    }

    #[test]
    fn evaluate_without_config_uses_explicit_rule() {
        let dir = tempfile::tempdir().expect("tempdir");
        // No config.yaml in root: explicit rule must not touch it.
        let result = cmd_evaluate(dir.path(), true, None, Some(5.0), Some(10.0), Some("below"));
        assert!(result.is_ok());
    }

    #[test]
    fn evaluate_by_metric_requires_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = cmd_evaluate(dir.path(), true, Some("fill_rate"), Some(5.0), None, None);
        assert!(matches!(result, Err(KpiboardError::MissingFile(_))));
    }

    #[test]
    fn check_fails_on_empty_root() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(cmd_check(dir.path(), true).is_err());
    }
}
