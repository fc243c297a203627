//! # Status Evaluator
//!
//! Classifies a metric value against its reference line.
//!
//! ## Fail-safe contract
//!
//! Evaluation never errors and never panics. Whenever an input is absent,
//! not a number, or the direction is not recognised, the result is
//! [`Status::NeedsAttention`]. An unclassifiable metric never reads as
//! healthy.
//!
//! ## Boundary
//!
//! Both comparisons are inclusive: a value sitting exactly on the reference
//! line is `Excellent` for `above` and for `below`.

use crate::config::RuleSet;
use crate::primitives::{AMBER_BAND, GREEN_BAND};
use crate::{Direction, Status, StatusColor, ThresholdRule};

/// Evaluate a value against a reference line given as loose inputs.
///
/// `direction` is matched against the exact words `above` and `below`.
pub fn evaluate(value: Option<f64>, reference_line: Option<f64>, direction: &str) -> Status {
    match direction.parse::<Direction>() {
        Ok(direction) => evaluate_with(value, reference_line, direction),
        Err(_) => Status::NeedsAttention,
    }
}

/// Evaluate with an already-parsed direction.
pub fn evaluate_with(value: Option<f64>, reference_line: Option<f64>, direction: Direction) -> Status {
    let (Some(value), Some(reference_line)) = (value, reference_line) else {
        return Status::NeedsAttention;
    };

    // NaN compares false both ways and falls through to NeedsAttention.
    let healthy = match direction {
        Direction::Above => value >= reference_line,
        Direction::Below => value <= reference_line,
    };

    if healthy {
        Status::Excellent
    } else {
        Status::NeedsAttention
    }
}

impl ThresholdRule {
    /// Classify `value` against this rule.
    #[must_use]
    pub fn evaluate(&self, value: f64) -> Status {
        evaluate_with(Some(value), Some(self.reference_line), self.direction)
    }
}

impl RuleSet {
    /// Classify `value` for `metric`.
    ///
    /// A metric without a configured rule, or an absent value, is
    /// `NeedsAttention`.
    #[must_use]
    pub fn evaluate(&self, metric: &str, value: Option<f64>) -> Status {
        match self.get(metric) {
            Some(rule) => evaluate_with(value, Some(rule.reference_line), rule.direction),
            None => Status::NeedsAttention,
        }
    }
}

/// Color band for a completion percentage.
///
/// `>= 90` is green, `>= 75` amber, anything else (NaN included) red.
pub fn status_color(percentage: f64) -> StatusColor {
    if percentage >= GREEN_BAND {
        StatusColor::Green
    } else if percentage >= AMBER_BAND {
        StatusColor::Amber
    } else {
        StatusColor::Red
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn above_direction() {
        assert_eq!(evaluate(Some(15.0), Some(10.0), "above"), Status::Excellent);
        assert_eq!(
            evaluate(Some(5.0), Some(10.0), "above"),
            Status::NeedsAttention
        );
    }

    #[test]
    fn below_direction() {
        assert_eq!(evaluate(Some(5.0), Some(10.0), "below"), Status::Excellent);
        assert_eq!(
            evaluate(Some(15.0), Some(10.0), "below"),
            Status::NeedsAttention
        );
    }

    #[test]
    fn boundary_is_inclusive_both_ways() {
        assert_eq!(evaluate(Some(10.0), Some(10.0), "above"), Status::Excellent);
        assert_eq!(evaluate(Some(10.0), Some(10.0), "below"), Status::Excellent);
    }

    #[test]
    fn missing_inputs_need_attention() {
        assert_eq!(evaluate(None, Some(10.0), "above"), Status::NeedsAttention);
        assert_eq!(evaluate(Some(10.0), None, "below"), Status::NeedsAttention);
        assert_eq!(evaluate(None, None, "above"), Status::NeedsAttention);
    }

    #[test]
    fn nan_needs_attention() {
        assert_eq!(
            evaluate(Some(f64::NAN), Some(10.0), "above"),
            Status::NeedsAttention
        );
        assert_eq!(
            evaluate(Some(1.0), Some(f64::NAN), "below"),
            Status::NeedsAttention
        );
    }

    #[test]
    fn unknown_direction_needs_attention() {
        assert_eq!(
            evaluate(Some(15.0), Some(10.0), "sideways"),
            Status::NeedsAttention
        );
        assert_eq!(evaluate(Some(10.0), Some(10.0), ""), Status::NeedsAttention);
    }

    #[test]
    fn rule_set_unknown_metric_needs_attention() {
        let rules: RuleSet = [ThresholdRule::new("fill_rate", 90.0, Direction::Above)]
            .into_iter()
            .collect();

        assert_eq!(rules.evaluate("fill_rate", Some(95.0)), Status::Excellent);
        assert_eq!(rules.evaluate("fill_rate", None), Status::NeedsAttention);
        assert_eq!(rules.evaluate("unknown", Some(95.0)), Status::NeedsAttention);
    }

    #[test]
    fn color_bands() {
        assert_eq!(status_color(95.0), StatusColor::Green);
        assert_eq!(status_color(90.0), StatusColor::Green);
        assert_eq!(status_color(80.0), StatusColor::Amber);
        assert_eq!(status_color(75.0), StatusColor::Amber);
        assert_eq!(status_color(60.0), StatusColor::Red);
        assert_eq!(status_color(f64::NAN), StatusColor::Red);
    }
}
