//! Progress deltas between two assessments
//!
//! Direction is decided by rating ordinal alone, never by the sign of the
//! numeric delta: a raw value can slip a little while staying in the same
//! tier, and that is "unchanged". The raw delta is still reported so the
//! caller can render both.

use std::collections::HashMap;

use crate::models::{Direction, MetricResult, ProgressDelta};
use crate::rating::Rating;

/// Ordinal rank of a rating label for comparison.
///
/// Labels outside the fixed five (possible in historical snapshots) sort
/// below every known tier rather than erroring.
fn rating_ordinal(label: &str) -> i32 {
    Rating::from_label(label).map_or(-1, |r| r.ordinal())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compare two assessment result sets and return per-test deltas.
///
/// Results are aligned by test name. Tests in `current` with no counterpart
/// in `previous` are skipped silently; a newly added test has no history to
/// compare against, which is not an error.
pub fn compute_progress(
    current: &[MetricResult],
    previous: &[MetricResult],
) -> Vec<ProgressDelta> {
    let prev_map: HashMap<&str, &MetricResult> = previous
        .iter()
        .map(|r| (r.test_name.as_str(), r))
        .collect();

    let mut deltas = Vec::new();
    for curr in current {
        let Some(prev) = prev_map.get(curr.test_name.as_str()) else {
            continue;
        };

        let curr_idx = rating_ordinal(&curr.rating);
        let prev_idx = rating_ordinal(&prev.rating);
        let direction = if curr_idx > prev_idx {
            Direction::Improved
        } else if curr_idx < prev_idx {
            Direction::Declined
        } else {
            Direction::Unchanged
        };

        deltas.push(ProgressDelta {
            test_name: curr.test_name.clone(),
            previous_value: prev.raw_value,
            current_value: curr.raw_value,
            previous_rating: prev.rating.clone(),
            current_rating: curr.rating.clone(),
            direction,
            delta: round2(curr.raw_value - prev.raw_value),
            unit: curr.unit.clone(),
        });
    }
    deltas
}
