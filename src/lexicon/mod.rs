// Fixed classification tables — keywords, gazetteer, urgency, sentiment.
//
// These were module-level constants in earlier designs. Here they are
// immutable configuration objects owned by (or injected into) each
// classifier instance, so multiple classifiers with different locales
// can run concurrently without interference.

pub mod categories;
pub mod gazetteer;
pub mod sentiment;
pub mod urgency;

pub use categories::CategoryTable;
pub use gazetteer::{Gazetteer, Region};
pub use sentiment::SentimentLexicon;
pub use urgency::UrgencyLexicon;

/// The full table bundle a text classifier needs.
#[derive(Debug, Clone)]
pub struct Lexicons {
    pub categories: CategoryTable,
    pub gazetteer: Gazetteer,
    pub urgency: UrgencyLexicon,
    pub sentiment: SentimentLexicon,
}

impl Default for Lexicons {
    fn default() -> Self {
        Self {
            categories: CategoryTable::reference(),
            gazetteer: Gazetteer::reference(),
            urgency: UrgencyLexicon::reference(),
            sentiment: SentimentLexicon::reference(),
        }
    }
}
