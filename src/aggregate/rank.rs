// Publication filter and output ordering.
//
// Separated from the aggregator map so the policy is testable on its
// own: emit when corroborated (report_count >= min_reports) or when a
// single report is already critical; order by descending confidence
// with ties keeping first-created-first order.

use crate::model::{DisasterAlert, UrgencyLevel};

/// The default corroboration threshold.
pub const DEFAULT_MIN_REPORTS: u32 = 2;

/// Whether an alert clears the publication filter.
pub fn publishable(alert: &DisasterAlert, min_reports: u32) -> bool {
    alert.report_count >= min_reports || alert.urgency_level == UrgencyLevel::Critical
}

/// Filter and rank a batch's alerts. Input order is creation order;
/// the sort is stable, so confidence ties preserve it.
pub fn rank_alerts(alerts: Vec<DisasterAlert>, min_reports: u32) -> Vec<DisasterAlert> {
    let mut published: Vec<DisasterAlert> = alerts
        .into_iter()
        .filter(|a| publishable(a, min_reports))
        .collect();
    published.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    published
}
