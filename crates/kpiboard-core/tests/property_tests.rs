//! # Property-Based Tests
//!
//! Invariants of the status evaluator and the KPI series helpers.

use kpiboard_core::{
    Direction, KpiRecord, Status, ThresholdRule, evaluate, metric_series, recent_updates, trend,
};
use proptest::collection::vec;
use proptest::prelude::*;

/// Finite values in a range where subtraction stays exact enough to compare.
fn finite() -> impl Strategy<Value = f64> {
    -1.0e6f64..1.0e6f64
}

fn records(metric: &'static str) -> impl Strategy<Value = Vec<KpiRecord>> {
    vec((1u32..=28, finite()), 0..30).prop_map(move |rows| {
        rows.into_iter()
            .map(|(day, value)| {
                KpiRecord::new(format!("2026-02-{:02}", day)).with_metric(metric, value)
            })
            .collect()
    })
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// A value on the reference line is Excellent for both directions.
    #[test]
    fn boundary_is_excellent(v in finite()) {
        prop_assert_eq!(evaluate(Some(v), Some(v), "above"), Status::Excellent);
        prop_assert_eq!(evaluate(Some(v), Some(v), "below"), Status::Excellent);
    }

    /// Below the line never satisfies "above".
    #[test]
    fn under_the_line_fails_above(r in finite(), delta in 0.001f64..1.0e3) {
        let v = r - delta;
        prop_assume!(v < r);
        prop_assert_eq!(evaluate(Some(v), Some(r), "above"), Status::NeedsAttention);
    }

    /// Above the line never satisfies "below".
    #[test]
    fn over_the_line_fails_below(r in finite(), delta in 0.001f64..1.0e3) {
        let v = r + delta;
        prop_assume!(v > r);
        prop_assert_eq!(evaluate(Some(v), Some(r), "below"), Status::NeedsAttention);
    }

    /// Unrecognised directions never raise and never report Excellent.
    #[test]
    fn unknown_direction_needs_attention(v in finite(), r in finite(), word in "[a-z]{1,12}") {
        prop_assume!(word != "above" && word != "below");
        prop_assert_eq!(evaluate(Some(v), Some(r), &word), Status::NeedsAttention);
    }

    /// The typed rule agrees with the loose evaluator.
    #[test]
    fn rule_matches_loose_evaluate(v in finite(), r in finite(), above in any::<bool>()) {
        let direction = if above { Direction::Above } else { Direction::Below };
        let rule = ThresholdRule::new("m", r, direction);
        prop_assert_eq!(rule.evaluate(v), evaluate(Some(v), Some(r), direction.as_str()));
    }

    /// recent_updates returns min(count, len) records in non-increasing date order.
    #[test]
    fn recent_updates_sorted_and_bounded(data in records("kpi"), count in 0usize..40) {
        let result = recent_updates(&data, count);
        prop_assert_eq!(result.len(), count.min(data.len()));
        for pair in result.windows(2) {
            prop_assert!(pair[0].date >= pair[1].date);
        }
    }

    /// The series is exactly the metric values in input order.
    #[test]
    fn series_preserves_input_order(data in records("kpi")) {
        let series: Vec<f64> = metric_series(&data, "kpi").collect();
        let expected: Vec<f64> = data.iter().filter_map(|r| r.metric("kpi")).collect();
        prop_assert_eq!(series, expected);
        prop_assert_eq!(metric_series(&data, "missing").count(), 0);
    }

    /// Trend exists iff there is at least one record carrying the metric.
    #[test]
    fn trend_defined_for_non_empty(data in records("kpi")) {
        prop_assert_eq!(trend(&data, "kpi").is_some(), !data.is_empty());
        prop_assert_eq!(trend(&data, "missing"), None);
    }
}
