//! Dashboard aggregation.
//!
//! Pure derivations over record collections: observation totals and average
//! rating, assessment pass rates, and pending feedback follow-ups. No
//! storage access and no side effects; callers fetch the collections and
//! hand them in.

use serde::Serialize;

use crate::record::{AssessmentRecord, FeedbackRecord, FeedbackStatus, ObservationRecord};

/// Summary of the observation collection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObservationStats {
    /// Number of observation records.
    pub total: usize,
    /// Mean rating rounded to one decimal place; 0 when there are no
    /// records.
    pub avg_rating: f64,
}

/// Derive the observation summary shown on the dashboard.
///
/// The average is the mean of each record's rating rounded to one decimal
/// place. An empty collection yields `{ total: 0, avg_rating: 0.0 }` without
/// dividing.
#[must_use]
pub fn observation_stats(records: &[ObservationRecord]) -> ObservationStats {
    if records.is_empty() {
        return ObservationStats {
            total: 0,
            avg_rating: 0.0,
        };
    }

    let total = records.len();
    let sum: u32 = records.iter().map(|r| u32::from(r.rating)).sum();
    #[allow(clippy::cast_precision_loss)]
    let avg = f64::from(sum) / total as f64;

    ObservationStats {
        total,
        avg_rating: (avg * 10.0).round() / 10.0,
    }
}

/// Integer pass percentage: `round(passed / total * 100)`.
///
/// Returns 0 when `total` is 0, regardless of `passed`.
#[must_use]
pub fn pass_rate(total: u32, passed: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let rate = (f64::from(passed) / f64::from(total) * 100.0).round() as u32;
    rate
}

/// Overall pass percentage across a set of assessments.
///
/// Sums students over all records before computing the rate, so large and
/// small assessments weigh by size rather than per-record averages.
#[must_use]
pub fn overall_pass_rate(records: &[AssessmentRecord]) -> u32 {
    let total: u32 = records.iter().map(|r| r.total_students).sum();
    let passed: u32 = records.iter().map(|r| r.passed_students).sum();
    pass_rate(total, passed)
}

/// Count feedback records whose follow-up is still pending.
#[must_use]
pub fn pending_follow_ups(records: &[FeedbackRecord]) -> usize {
    records
        .iter()
        .filter(|r| r.status == FeedbackStatus::Pending)
        .count()
}
