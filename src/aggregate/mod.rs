// Alert aggregation — keyed merge/escalation of signals into alerts,
// plus the publication filter and ranking.

pub mod alerts;
pub mod rank;

pub use alerts::{AlertAggregator, AlertKey};
pub use rank::{publishable, rank_alerts};
