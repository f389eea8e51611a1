// Text signal classification — confidence and severity arithmetic.
//
// Confidence is additive with per-term caps:
//   0.1 * min(4, keyword matches)          (max 0.4)
// + 0.1 * min(3, distinct urgency hits)    (max 0.3)
// + min(0.2, |sentiment| * 0.02)           (only when sentiment < 0)
// + 0.1                                    (when 10 <= tokens <= 100)
// clamped to [0, 1].
//
// Severity starts from the urgency base {critical:5, high:4, medium:3,
// low:2}, +1 when sentiment < -5, +1 when keyword matches >= 3, cap 5.

use rand::rngs::StdRng;

use crate::error::SignalError;
use crate::lexicon::Lexicons;
use crate::model::{DisasterSignal, DisasterType, RawPost, UrgencyLevel};

use super::features::{extract_features, TextFeatures};

/// Classifies raw posts into disaster signals. Owns its lexicon tables;
/// construct one per batch or per long-lived service.
#[derive(Debug, Clone, Default)]
pub struct TextClassifier {
    lexicons: Lexicons,
}

impl TextClassifier {
    pub fn new(lexicons: Lexicons) -> Self {
        Self { lexicons }
    }

    pub fn lexicons(&self) -> &Lexicons {
        &self.lexicons
    }

    /// Classify one post. Empty or whitespace-only text is an input
    /// error; the caller skips the item and continues the batch.
    pub fn classify(&self, post: &RawPost, rng: &mut StdRng) -> Result<DisasterSignal, SignalError> {
        if post.text.trim().is_empty() {
            return Err(SignalError::EmptyPost {
                id: post.id.clone(),
            });
        }

        let features = extract_features(post, &self.lexicons, rng);
        let urgency_level = UrgencyLevel::from_hits(features.urgency_hits);

        let (disaster_type, match_count, keywords) = match &features.category {
            Some(c) => (
                c.disaster_type,
                c.match_count,
                c.matched_keywords.clone(),
            ),
            None => (DisasterType::None, 0, Vec::new()),
        };

        let confidence = compute_confidence(
            match_count,
            features.urgency_hits,
            features.sentiment_score,
            features.token_count,
        );

        let severity = if disaster_type == DisasterType::None {
            0
        } else {
            compute_severity(urgency_level, features.sentiment_score, match_count)
        };

        Ok(DisasterSignal {
            disaster_type,
            confidence,
            severity,
            location_name: features.location_name,
            coordinates: features.coordinates,
            keywords,
            sentiment_score: features.sentiment_score,
            urgency_level,
            source: post.id.clone(),
            timestamp: post.timestamp,
        })
    }

    /// Whether a post mentions any disaster category at all.
    pub fn is_disaster_related(&self, text: &str) -> bool {
        self.lexicons.categories.best_match(&text.to_lowercase()).is_some()
    }

    /// Expose raw features for diagnostics and tests.
    pub fn features(&self, post: &RawPost, rng: &mut StdRng) -> TextFeatures {
        extract_features(post, &self.lexicons, rng)
    }
}

/// The additive confidence formula. Pure so it can be boundary-tested.
pub fn compute_confidence(
    keyword_matches: usize,
    urgency_hits: usize,
    sentiment: f64,
    token_count: usize,
) -> f64 {
    let mut confidence = 0.1 * keyword_matches.min(4) as f64;
    confidence += 0.1 * urgency_hits.min(3) as f64;
    if sentiment < 0.0 {
        confidence += (sentiment.abs() * 0.02).min(0.2);
    }
    if (10..=100).contains(&token_count) {
        confidence += 0.1;
    }
    confidence.clamp(0.0, 1.0)
}

/// Initial severity for a classified signal.
pub fn compute_severity(urgency: UrgencyLevel, sentiment: f64, keyword_matches: usize) -> u8 {
    let mut severity = urgency.base_severity();
    if sentiment < -5.0 {
        severity = (severity + 1).min(5);
    }
    if keyword_matches >= 3 {
        severity = (severity + 1).min(5);
    }
    severity
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_terms_cap_individually() {
        // 4+ matches cap at 0.4, 3+ urgency hits cap at 0.3
        assert!((compute_confidence(9, 9, 0.0, 0) - 0.7).abs() < 1e-9);
        // deep negative sentiment caps at 0.2
        assert!((compute_confidence(0, 0, -100.0, 0) - 0.2).abs() < 1e-9);
    }

    #[test]
    fn confidence_length_bonus_window() {
        assert!((compute_confidence(0, 0, 0.0, 10) - 0.1).abs() < 1e-9);
        assert!((compute_confidence(0, 0, 0.0, 100) - 0.1).abs() < 1e-9);
        assert!(compute_confidence(0, 0, 0.0, 9).abs() < 1e-9);
        assert!(compute_confidence(0, 0, 0.0, 101).abs() < 1e-9);
    }

    #[test]
    fn confidence_never_leaves_unit_interval() {
        let c = compute_confidence(100, 100, -1000.0, 50);
        assert!((0.0..=1.0).contains(&c));
        assert!((c - 1.0).abs() < 1e-9);
    }

    #[test]
    fn positive_sentiment_contributes_nothing() {
        assert!(compute_confidence(0, 0, 8.0, 0).abs() < 1e-9);
    }

    #[test]
    fn severity_bumps_cap_at_five() {
        // critical base 5, both bumps apply, still 5
        assert_eq!(compute_severity(UrgencyLevel::Critical, -9.0, 5), 5);
        // low base 2, sentiment bump only
        assert_eq!(compute_severity(UrgencyLevel::Low, -6.0, 0), 3);
        // medium base 3, keyword bump only
        assert_eq!(compute_severity(UrgencyLevel::Medium, 0.0, 3), 4);
        // boundary: sentiment exactly -5 does not bump
        assert_eq!(compute_severity(UrgencyLevel::Low, -5.0, 0), 2);
    }
}
