// The alert aggregator — a keyed merge/escalation state machine.
//
// Per (disaster type, normalized location) key: the first qualifying
// signal creates an OPEN alert, every later signal for the same key
// merges in place. There is no CLOSED state inside a batch; expiry and
// verification belong to the downstream persistence collaborator.
//
// The aggregator is scoped to exactly one batch: construct, ingest,
// finish. Merges are inherently sequential — the map is a single
// mutable structure — so the pipeline serializes this phase after
// parallel classification.

use std::collections::HashMap;

use crate::error::AggregateError;
use crate::model::{DisasterAlert, DisasterSignal, DisasterType};

use super::rank::rank_alerts;

/// Aggregation key: disaster type plus lowercased, trimmed location.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AlertKey {
    pub disaster_type: DisasterType,
    pub location: String,
}

impl AlertKey {
    /// Build a key from a signal. `None`-typed signals never reach this
    /// point; an empty normalized location is a batch-fatal error.
    pub fn from_signal(signal: &DisasterSignal) -> Result<Self, AggregateError> {
        let location = signal.location_name.trim().to_lowercase();
        if signal.disaster_type == DisasterType::None || location.is_empty() {
            return Err(AggregateError::InvalidKey {
                disaster_type: signal.disaster_type.to_string(),
                location: signal.location_name.clone(),
            });
        }
        Ok(Self {
            disaster_type: signal.disaster_type,
            location,
        })
    }
}

struct OpenAlert {
    alert: DisasterAlert,
    /// Max initial severity across contributing signals; the count and
    /// sentiment bumps apply on top of this.
    base_severity: u8,
}

/// One batch's worth of alert state.
#[derive(Default)]
pub struct AlertAggregator {
    index: HashMap<AlertKey, usize>,
    open: Vec<OpenAlert>,
}

impl AlertAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live alerts (published or not).
    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    /// Consume one signal. `None`-typed / severity-0 signals are ignored
    /// (they are not errors — they just never qualify). A key that
    /// cannot be constructed poisons the whole batch.
    pub fn ingest(&mut self, signal: DisasterSignal) -> Result<(), AggregateError> {
        if signal.disaster_type == DisasterType::None || signal.severity == 0 {
            return Ok(());
        }

        let key = AlertKey::from_signal(&signal)?;
        match self.index.get(&key) {
            Some(&slot) => self.merge(slot, signal),
            None => {
                let slot = self.open.len();
                self.open.push(open_alert(&key, signal));
                self.index.insert(key, slot);
            }
        }
        Ok(())
    }

    /// Merge an incoming signal into an existing alert.
    fn merge(&mut self, slot: usize, signal: DisasterSignal) {
        let entry = &mut self.open[slot];
        let alert = &mut entry.alert;

        alert.report_count += 1;
        alert.sources.push(signal.source);
        alert.confidence = (alert.confidence + 0.05).min(1.0);
        // Two-point running average, not a true mean — preserved
        // intentionally for behavioral compatibility.
        alert.sentiment_score = (alert.sentiment_score + signal.sentiment_score) / 2.0;
        alert.urgency_level = alert.urgency_level.max(signal.urgency_level);
        if signal.timestamp > alert.timestamp {
            alert.timestamp = signal.timestamp;
        }
        for kw in signal.keywords {
            if !alert.keywords.contains(&kw) {
                alert.keywords.push(kw);
            }
        }

        entry.base_severity = entry.base_severity.max(signal.severity);
        alert.severity = escalate_severity(
            entry.base_severity,
            alert.report_count,
            alert.sentiment_score,
        );
        alert.affected_population = estimate_population(alert.severity, alert.report_count);
    }

    /// Apply the publication filter and ranking, consuming the batch.
    ///
    /// An alert is emitted iff report_count >= min_reports or its
    /// urgency is critical; output is descending confidence, ties in
    /// creation order.
    pub fn finish(self, min_reports: u32) -> Vec<DisasterAlert> {
        let alerts = self.open.into_iter().map(|o| o.alert).collect();
        rank_alerts(alerts, min_reports)
    }
}

fn open_alert(key: &AlertKey, signal: DisasterSignal) -> OpenAlert {
    let id = format!(
        "{}-{}",
        signal.disaster_type,
        key.location.replace(' ', "-")
    );
    let base_severity = signal.severity;
    OpenAlert {
        alert: DisasterAlert {
            id,
            disaster_type: signal.disaster_type,
            location_name: signal.location_name,
            coordinates: signal.coordinates,
            confidence: signal.confidence,
            severity: signal.severity,
            affected_population: estimate_population(signal.severity, 1),
            report_count: 1,
            sentiment_score: signal.sentiment_score,
            urgency_level: signal.urgency_level,
            keywords: signal.keywords,
            timestamp: signal.timestamp,
            sources: vec![signal.source],
        },
        base_severity,
    }
}

/// Recompute severity from the base plus escalation bumps:
/// +1 at 10 reports (else +0.5 at 5), +1 when the running sentiment has
/// sunk below -10; ceil, capped at 5.
fn escalate_severity(base: u8, report_count: u32, sentiment: f64) -> u8 {
    let mut severity = base as f64;
    if report_count >= 10 {
        severity += 1.0;
    } else if report_count >= 5 {
        severity += 0.5;
    }
    if sentiment < -10.0 {
        severity += 1.0;
    }
    (severity.ceil() as i64).clamp(1, 5) as u8
}

/// Rough population estimate: grows with both severity and corroboration.
fn estimate_population(severity: u8, report_count: u32) -> u64 {
    severity as u64 * 1000 * report_count as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Coordinates, UrgencyLevel};
    use chrono::Utc;

    fn signal(disaster_type: DisasterType, location: &str, source: &str) -> DisasterSignal {
        DisasterSignal {
            disaster_type,
            confidence: 0.5,
            severity: 3,
            location_name: location.into(),
            coordinates: Coordinates { lat: 19.0, lng: 72.8 },
            keywords: vec!["flood".into()],
            sentiment_score: -2.0,
            urgency_level: UrgencyLevel::Medium,
            source: source.into(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn same_key_merges_into_one_alert() {
        let mut agg = AlertAggregator::new();
        agg.ingest(signal(DisasterType::Flood, "Mumbai", "a")).unwrap();
        agg.ingest(signal(DisasterType::Flood, "  MUMBAI ", "b")).unwrap();
        assert_eq!(agg.len(), 1);

        let alerts = agg.finish(2);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].report_count, 2);
        assert_eq!(alerts[0].sources, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn different_types_same_location_stay_separate() {
        let mut agg = AlertAggregator::new();
        agg.ingest(signal(DisasterType::Flood, "Mumbai", "a")).unwrap();
        agg.ingest(signal(DisasterType::Fire, "Mumbai", "b")).unwrap();
        assert_eq!(agg.len(), 2);
    }

    #[test]
    fn confidence_grows_by_exactly_five_points_per_merge_capped() {
        let mut agg = AlertAggregator::new();
        let mut s = signal(DisasterType::Flood, "Pune", "a");
        s.confidence = 0.93;
        agg.ingest(s).unwrap();
        for i in 0..3 {
            agg.ingest(signal(DisasterType::Flood, "Pune", &format!("s{i}"))).unwrap();
        }
        let alerts = agg.finish(2);
        // 0.93 -> 0.98 -> 1.0 (capped) -> 1.0
        assert!((alerts[0].confidence - 1.0).abs() < 1e-9);
    }

    #[test]
    fn none_signals_are_ignored_not_errors() {
        let mut agg = AlertAggregator::new();
        let mut s = signal(DisasterType::None, "Mumbai", "a");
        s.severity = 0;
        agg.ingest(s).unwrap();
        assert!(agg.is_empty());
    }

    #[test]
    fn empty_location_is_batch_fatal() {
        let mut agg = AlertAggregator::new();
        let err = agg.ingest(signal(DisasterType::Flood, "   ", "a")).unwrap_err();
        assert!(matches!(err, AggregateError::InvalidKey { .. }));
    }

    #[test]
    fn ten_reports_and_deep_negative_sentiment_reach_severity_five_exactly() {
        let mut agg = AlertAggregator::new();
        for i in 0..10 {
            let mut s = signal(DisasterType::Earthquake, "Delhi", &format!("s{i}"));
            s.sentiment_score = -14.0; // running average stays below -10
            agg.ingest(s).unwrap();
        }
        let alerts = agg.finish(2);
        assert_eq!(alerts[0].report_count, 10);
        assert!(alerts[0].sentiment_score < -10.0);
        assert_eq!(alerts[0].severity, 5);
    }

    #[test]
    fn five_reports_adds_half_step_via_ceil() {
        let mut agg = AlertAggregator::new();
        for i in 0..5 {
            agg.ingest(signal(DisasterType::Flood, "Jaipur", &format!("s{i}"))).unwrap();
        }
        let alerts = agg.finish(2);
        // base 3 + 0.5 -> ceil 4
        assert_eq!(alerts[0].severity, 4);
    }

    #[test]
    fn urgency_escalates_to_the_most_urgent_contribution() {
        let mut agg = AlertAggregator::new();
        agg.ingest(signal(DisasterType::Flood, "Mumbai", "a")).unwrap();
        let mut s = signal(DisasterType::Flood, "Mumbai", "b");
        s.urgency_level = UrgencyLevel::Critical;
        agg.ingest(s).unwrap();
        let mut t = signal(DisasterType::Flood, "Mumbai", "c");
        t.urgency_level = UrgencyLevel::Low;
        agg.ingest(t).unwrap();
        let alerts = agg.finish(2);
        assert_eq!(alerts[0].urgency_level, UrgencyLevel::Critical);
    }

    #[test]
    fn keywords_union_preserves_first_appearance() {
        let mut agg = AlertAggregator::new();
        agg.ingest(signal(DisasterType::Flood, "Mumbai", "a")).unwrap();
        let mut s = signal(DisasterType::Flood, "Mumbai", "b");
        s.keywords = vec!["flood".into(), "submerged".into()];
        agg.ingest(s).unwrap();
        let alerts = agg.finish(2);
        assert_eq!(alerts[0].keywords, vec!["flood".to_string(), "submerged".to_string()]);
    }

    #[test]
    fn population_estimate_tracks_severity_and_reports() {
        let mut agg = AlertAggregator::new();
        agg.ingest(signal(DisasterType::Flood, "Mumbai", "a")).unwrap();
        agg.ingest(signal(DisasterType::Flood, "Mumbai", "b")).unwrap();
        let alerts = agg.finish(2);
        let a = &alerts[0];
        assert_eq!(a.affected_population, a.severity as u64 * 1000 * a.report_count as u64);
    }
}
