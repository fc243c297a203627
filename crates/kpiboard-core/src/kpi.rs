//! # KPI Series Utilities
//!
//! Derived views over a time-ordered collection of [`KpiRecord`]s.
//!
//! All sorts are stable, so records sharing a date keep their input order.
//! Records lacking a queried metric are skipped, never an error.

use crate::KpiRecord;

/// The `count` most recent records, newest first.
///
/// A `count` larger than the collection returns every record.
pub fn recent_updates(records: &[KpiRecord], count: usize) -> Vec<KpiRecord> {
    let mut sorted: Vec<&KpiRecord> = records.iter().collect();
    // Stable sort: equal dates keep their relative input order.
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.into_iter().take(count).cloned().collect()
}

/// Change in `metric` between the earliest and the latest record.
///
/// Both endpoints are taken after ordering by date, so the input position of
/// a record never matters. Returns `None` when there are no records or when
/// the earliest or latest record lacks the metric.
pub fn trend(records: &[KpiRecord], metric: &str) -> Option<f64> {
    let mut sorted: Vec<&KpiRecord> = records.iter().collect();
    sorted.sort_by(|a, b| a.date.cmp(&b.date));

    let first = sorted.first()?.metric(metric)?;
    let last = sorted.last()?.metric(metric)?;
    Some(last - first)
}

/// Values of `metric` in input order, skipping records without it.
///
/// The iterator is lazy and `Clone`, so a series can be walked more than once.
pub fn metric_series<'a>(
    records: &'a [KpiRecord],
    metric: &'a str,
) -> impl Iterator<Item = f64> + Clone + 'a {
    records.iter().filter_map(move |record| record.metric(metric))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, kpi: f64) -> KpiRecord {
        KpiRecord::new(date).with_metric("kpi", kpi)
    }

    #[test]
    fn recent_updates_newest_first() {
        let sample = vec![
            record("2026-01-01", 1.0),
            record("2026-01-03", 3.0),
            record("2026-01-02", 2.0),
        ];

        let result = recent_updates(&sample, 2);
        assert_eq!(result, vec![record("2026-01-03", 3.0), record("2026-01-02", 2.0)]);
    }

    #[test]
    fn recent_updates_count_exceeds_len() {
        let sample = vec![record("2026-01-01", 1.0), record("2026-01-02", 2.0)];
        assert_eq!(recent_updates(&sample, 10).len(), 2);
        assert!(recent_updates(&[], 3).is_empty());
    }

    #[test]
    fn recent_updates_ties_keep_input_order() {
        let sample = vec![
            record("2026-01-02", 1.0),
            record("2026-01-02", 2.0),
            record("2026-01-01", 3.0),
        ];

        let result = recent_updates(&sample, 3);
        let values: Vec<_> = result.iter().filter_map(|r| r.metric("kpi")).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn trend_is_last_minus_first() {
        let sample = vec![
            record("2026-01-01", 10.0),
            record("2026-01-02", 15.0),
            record("2026-01-03", 20.0),
        ];
        assert_eq!(trend(&sample, "kpi"), Some(10.0));
    }

    #[test]
    fn trend_sorts_by_date() {
        let sample = vec![
            record("2026-01-03", 20.0),
            record("2026-01-01", 30.0),
            record("2026-01-02", 25.0),
        ];
        assert_eq!(trend(&sample, "kpi"), Some(-10.0));
    }

    #[test]
    fn trend_endpoints_ignore_input_position() {
        let sample = vec![
            KpiRecord::new("2026-01-02").with_metric("other", 1.0),
            record("2026-01-01", 1.0),
            record("2026-01-03", 5.0),
        ];
        assert_eq!(trend(&sample, "kpi"), Some(4.0));
    }

    #[test]
    fn trend_of_single_record_is_zero() {
        assert_eq!(trend(&[record("2026-01-01", 7.0)], "kpi"), Some(0.0));
    }

    #[test]
    fn trend_has_no_value_when_empty_or_missing() {
        assert_eq!(trend(&[], "kpi"), None);

        let sample = vec![
            KpiRecord::new("2026-01-01").with_metric("other", 1.0),
            record("2026-01-02", 5.0),
        ];
        assert_eq!(trend(&sample, "kpi"), None);
        assert_eq!(trend(&sample, "absent"), None);
    }

    #[test]
    fn metric_series_in_input_order() {
        let sample = vec![
            KpiRecord::new("2026-01-03").with_metric("a", 1.0),
            KpiRecord::new("2026-01-01").with_metric("a", 2.0),
            KpiRecord::new("2026-01-02").with_metric("a", 3.0),
        ];
        let series: Vec<_> = metric_series(&sample, "a").collect();
        assert_eq!(series, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn metric_series_skips_and_restarts() {
        let sample = vec![
            KpiRecord::new("2026-01-01").with_metric("a", 1.0),
            KpiRecord::new("2026-01-02").with_metric("b", 9.0),
            KpiRecord::new("2026-01-03").with_metric("a", 3.0),
        ];

        let series = metric_series(&sample, "a");
        let first_pass: Vec<_> = series.clone().collect();
        let second_pass: Vec<_> = series.collect();
        assert_eq!(first_pass, vec![1.0, 3.0]);
        assert_eq!(first_pass, second_pass);
    }
}
