// Lexical sentiment scoring.
//
// Not an NLP model: a weighted positive/negative term list summed over
// the post's tokens. The score is an opaque real number; more negative
// means more urgent/severe text. Downstream thresholds care about -5
// (severity bump) and -10 (aggregated alert bump), so individual term
// weights sit in the 1-5 range.

use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct SentimentLexicon {
    weights: HashMap<String, f64>,
}

impl SentimentLexicon {
    pub fn new(weights: HashMap<String, f64>) -> Self {
        Self { weights }
    }

    pub fn reference() -> Self {
        let entries: [(&str, f64); 31] = [
            // negative
            ("dead", -5.0),
            ("death", -5.0),
            ("killed", -5.0),
            ("catastrophic", -5.0),
            ("dying", -4.0),
            ("destroyed", -4.0),
            ("devastating", -4.0),
            ("devastated", -4.0),
            ("trapped", -3.0),
            ("injured", -3.0),
            ("missing", -3.0),
            ("collapsed", -3.0),
            ("stranded", -3.0),
            ("panic", -3.0),
            ("horrible", -3.0),
            ("helpless", -3.0),
            ("terrible", -2.0),
            ("scared", -2.0),
            ("fear", -2.0),
            ("crying", -2.0),
            ("emergency", -2.0),
            // positive
            ("safe", 3.0),
            ("rescued", 3.0),
            ("saved", 3.0),
            ("relief", 2.0),
            ("recovering", 2.0),
            ("stable", 2.0),
            ("calm", 2.0),
            ("thankful", 2.0),
            ("grateful", 2.0),
            ("hope", 1.0),
        ];
        Self {
            weights: entries
                .iter()
                .map(|(w, s)| (w.to_string(), *s))
                .collect(),
        }
    }

    /// Sum of term weights over the given tokens.
    pub fn score(&self, tokens: &[String]) -> f64 {
        tokens
            .iter()
            .filter_map(|t| self.weights.get(t))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(s: &str) -> Vec<String> {
        s.split_whitespace().map(|t| t.to_string()).collect()
    }

    #[test]
    fn negative_terms_sum() {
        let lex = SentimentLexicon::reference();
        // -3 (trapped) + -5 (dead) + -3 (missing) = -11
        assert_eq!(lex.score(&toks("trapped dead missing")), -11.0);
    }

    #[test]
    fn positive_terms_offset_negative() {
        let lex = SentimentLexicon::reference();
        // -3 (trapped) + 3 (rescued) = 0
        assert_eq!(lex.score(&toks("trapped rescued")), 0.0);
    }

    #[test]
    fn unknown_tokens_score_zero() {
        let lex = SentimentLexicon::reference();
        assert_eq!(lex.score(&toks("ordinary weekday commute")), 0.0);
    }
}
