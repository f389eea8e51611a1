// Disaster category keyword table.
//
// Matching counts substring occurrences of each keyword against the
// lowercased full text (not token-bounded), so "flooding" counts a hit
// for both "flood" and "flooding". The category with the strictly
// greatest total wins; ties resolve to the earlier table entry. The
// table order (flood, fire, earthquake, hurricane, landslide, cyclone,
// tsunami) is fixed — see `DisasterType`.

use crate::model::DisasterType;

/// Result of matching a text against the category table.
#[derive(Debug, Clone)]
pub struct CategoryMatch {
    pub disaster_type: DisasterType,
    /// Total substring occurrences across the winning category's keywords
    pub match_count: usize,
    /// The winning category's keywords that actually occurred in the text
    pub matched_keywords: Vec<String>,
}

/// Fixed keyword lists, one per disaster category, in classification order.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    entries: Vec<(DisasterType, Vec<String>)>,
}

impl CategoryTable {
    /// Build a table from custom entries. Order is significant: earlier
    /// entries win ties.
    pub fn new(entries: Vec<(DisasterType, Vec<String>)>) -> Self {
        Self { entries }
    }

    /// The reference English keyword table.
    pub fn reference() -> Self {
        let list = |words: &[&str]| words.iter().map(|w| w.to_string()).collect();
        Self {
            entries: vec![
                (
                    DisasterType::Flood,
                    list(&[
                        "flood", "flooding", "flooded", "submerged", "inundated",
                        "waterlogged", "deluge", "overflowing",
                    ]),
                ),
                (
                    DisasterType::Fire,
                    list(&[
                        "fire", "wildfire", "blaze", "burning", "flames", "smoke",
                        "inferno",
                    ]),
                ),
                (
                    DisasterType::Earthquake,
                    list(&[
                        "earthquake", "quake", "tremor", "seismic", "aftershock",
                        "richter",
                    ]),
                ),
                (
                    DisasterType::Hurricane,
                    list(&["hurricane", "storm surge", "gale", "squall", "gusts"]),
                ),
                (
                    DisasterType::Landslide,
                    list(&["landslide", "mudslide", "rockfall", "debris flow", "slope failure"]),
                ),
                (
                    DisasterType::Cyclone,
                    list(&["cyclone", "typhoon", "windstorm", "twister"]),
                ),
                (
                    DisasterType::Tsunami,
                    list(&["tsunami", "tidal wave", "sea surge", "giant wave"]),
                ),
            ],
        }
    }

    /// Match a lowercased text against every category.
    ///
    /// Returns None when no category scores a single hit — the post is
    /// not disaster-related.
    pub fn best_match(&self, lowered: &str) -> Option<CategoryMatch> {
        let mut best: Option<CategoryMatch> = None;

        for (disaster_type, keywords) in &self.entries {
            let mut count = 0;
            let mut matched = Vec::new();
            for kw in keywords {
                let hits = lowered.matches(kw.as_str()).count();
                if hits > 0 {
                    count += hits;
                    matched.push(kw.clone());
                }
            }

            // Strictly greater: an equal count keeps the earlier category
            let beats = best.as_ref().map_or(true, |b| count > b.match_count);
            if beats {
                best = Some(CategoryMatch {
                    disaster_type: *disaster_type,
                    match_count: count,
                    matched_keywords: matched,
                });
            }
        }

        best.filter(|b| b.match_count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_keywords_means_no_match() {
        let table = CategoryTable::reference();
        assert!(table.best_match("lovely weather in the park today").is_none());
    }

    #[test]
    fn flooding_counts_flood_and_flooding() {
        let table = CategoryTable::reference();
        let m = table.best_match("severe flooding downtown").unwrap();
        assert_eq!(m.disaster_type, DisasterType::Flood);
        // "flood" matches inside "flooding", plus "flooding" itself
        assert_eq!(m.match_count, 2);
        assert!(m.matched_keywords.contains(&"flood".to_string()));
        assert!(m.matched_keywords.contains(&"flooding".to_string()));
    }

    #[test]
    fn tie_goes_to_earlier_table_entry() {
        let table = CategoryTable::reference();
        // One flood hit, one fire hit — flood is checked first
        let m = table.best_match("flood and fire reported").unwrap();
        assert_eq!(m.disaster_type, DisasterType::Flood);
    }

    #[test]
    fn higher_count_beats_table_order() {
        let table = CategoryTable::reference();
        let m = table
            .best_match("fire fire everywhere, also a flood")
            .unwrap();
        assert_eq!(m.disaster_type, DisasterType::Fire);
    }
}
