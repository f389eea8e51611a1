// Urgency lexicon — fixed word list for estimating response urgency.
//
// Distinct entries present in the text (substring, case already lowered
// by the caller) are counted; the count maps to an UrgencyLevel via
// fixed thresholds (>=3 critical, >=2 high, >=1 medium, else low).

#[derive(Debug, Clone)]
pub struct UrgencyLexicon {
    terms: Vec<String>,
}

impl UrgencyLexicon {
    pub fn new(terms: Vec<String>) -> Self {
        Self { terms }
    }

    pub fn reference() -> Self {
        Self {
            terms: [
                "urgent",
                "sos",
                "emergency",
                "help",
                "trapped",
                "rescue",
                "dying",
                "critical",
                "asap",
                "immediately",
                "stranded",
                "evacuate",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }

    /// Count distinct lexicon entries occurring in the lowercased text.
    /// Repeats of the same term count once.
    pub fn distinct_hits(&self, lowered: &str) -> usize {
        self.terms.iter().filter(|t| lowered.contains(t.as_str())).count()
    }
}
