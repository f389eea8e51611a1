// Text feature extraction — tokens, category hits, urgency, sentiment,
// and location resolution.
//
// Category and urgency matching run against the lowercased full text
// (substring, not token-bounded); sentiment runs against tokens.

use rand::rngs::StdRng;
use regex_lite::Regex;

use crate::lexicon::categories::CategoryMatch;
use crate::lexicon::Lexicons;
use crate::model::{Coordinates, RawPost};

/// Everything the classifier needs to score one post.
#[derive(Debug, Clone)]
pub struct TextFeatures {
    pub token_count: usize,
    pub category: Option<CategoryMatch>,
    pub urgency_hits: usize,
    pub sentiment_score: f64,
    pub location_name: String,
    pub coordinates: Coordinates,
}

/// Lowercase, strip punctuation, split on whitespace, drop empties.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(|w| {
            w.chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
        })
        .filter(|w| !w.is_empty())
        .collect()
}

/// Extract all text features from a post.
///
/// The rng is only consulted when the resolved location has no gazetteer
/// coordinate and the post carries none of its own.
pub fn extract_features(post: &RawPost, lexicons: &Lexicons, rng: &mut StdRng) -> TextFeatures {
    let lowered = post.text.to_lowercase();
    let tokens = tokenize(&post.text);

    let category = lexicons.categories.best_match(&lowered);

    let urgency_hits = lexicons.urgency.distinct_hits(&lowered);
    let sentiment_score = lexicons.sentiment.score(&tokens);

    let location_name = resolve_location(post, &lowered, lexicons);
    let coordinates = resolve_coordinates(post, &location_name, lexicons, rng);

    TextFeatures {
        token_count: tokens.len(),
        category,
        urgency_hits,
        sentiment_score,
        location_name,
        coordinates,
    }
}

/// Location resolution, in priority order:
/// 1. the post's explicit location field
/// 2. gazetteer substring hit, table order, first wins
/// 3. "in X" / "at X" / "from X" / "near X" patterns, in that order
/// 4. "Unknown Location"
fn resolve_location(post: &RawPost, lowered: &str, lexicons: &Lexicons) -> String {
    if let Some(loc) = &post.location {
        let trimmed = loc.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    if let Some((name, _)) = lexicons.gazetteer.find_in_text(lowered) {
        return name.to_string();
    }

    for prep in ["in", "at", "from", "near"] {
        // First word following the preposition, captured from the
        // lowercased text and re-capitalized.
        let pattern = format!(r"\b{prep}\s+([a-z]+)");
        if let Ok(re) = Regex::new(&pattern) {
            if let Some(caps) = re.captures(lowered) {
                if let Some(word) = caps.get(1) {
                    return capitalize(word.as_str());
                }
            }
        }
    }

    "Unknown Location".to_string()
}

fn resolve_coordinates(
    post: &RawPost,
    location_name: &str,
    lexicons: &Lexicons,
    rng: &mut StdRng,
) -> Coordinates {
    if let Some(coords) = post.coordinates {
        return coords;
    }
    if let Some(coords) = lexicons.gazetteer.lookup(location_name) {
        return coords;
    }
    lexicons.gazetteer.random_in_bounds(rng)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Platform;
    use chrono::Utc;
    use rand::SeedableRng;

    fn post(text: &str) -> RawPost {
        RawPost {
            id: "p1".into(),
            text: text.into(),
            author: "tester".into(),
            location: None,
            coordinates: None,
            timestamp: Utc::now(),
            platform: Platform::Twitter,
        }
    }

    #[test]
    fn tokenize_strips_punctuation_and_empties() {
        assert_eq!(
            tokenize("Flood!! in   Mumbai, NOW..."),
            vec!["flood", "in", "mumbai", "now"]
        );
        assert!(tokenize("... !! ..").is_empty());
    }

    #[test]
    fn explicit_location_field_wins() {
        let lexicons = Lexicons::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut p = post("flooding in Chennai");
        p.location = Some("Pune".into());
        let f = extract_features(&p, &lexicons, &mut rng);
        assert_eq!(f.location_name, "Pune");
    }

    #[test]
    fn gazetteer_beats_preposition_pattern() {
        let lexicons = Lexicons::default();
        let mut rng = StdRng::seed_from_u64(1);
        let f = extract_features(&post("water rising near the station in Kolkata"), &lexicons, &mut rng);
        assert_eq!(f.location_name, "Kolkata");
    }

    #[test]
    fn preposition_pattern_capitalizes_captured_word() {
        let lexicons = Lexicons::default();
        let mut rng = StdRng::seed_from_u64(1);
        let f = extract_features(&post("fire spreading in riverdale tonight"), &lexicons, &mut rng);
        assert_eq!(f.location_name, "Riverdale");
    }

    #[test]
    fn unknown_location_fallback() {
        let lexicons = Lexicons::default();
        let mut rng = StdRng::seed_from_u64(1);
        let f = extract_features(&post("everything is fine"), &lexicons, &mut rng);
        assert_eq!(f.location_name, "Unknown Location");
    }

    #[test]
    fn fallback_coordinates_are_seed_deterministic() {
        let lexicons = Lexicons::default();
        let mut rng_a = StdRng::seed_from_u64(9);
        let mut rng_b = StdRng::seed_from_u64(9);
        let a = extract_features(&post("smoke in nowhereville"), &lexicons, &mut rng_a);
        let b = extract_features(&post("smoke in nowhereville"), &lexicons, &mut rng_b);
        assert_eq!(a.coordinates, b.coordinates);
    }

    #[test]
    fn post_supplied_coordinates_pass_through() {
        let lexicons = Lexicons::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut p = post("flood in Mumbai");
        p.coordinates = Some(Coordinates { lat: 1.0, lng: 2.0 });
        let f = extract_features(&p, &lexicons, &mut rng);
        assert_eq!(f.coordinates, Coordinates { lat: 1.0, lng: 2.0 });
    }
}
