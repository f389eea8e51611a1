// Watchfire: heuristic multi-source disaster-signal classification and
// alert aggregation.
//
// This is the library root. Each module corresponds to a stage of the
// pipeline: raw inputs -> feature extraction -> classification ->
// signals -> aggregation -> ranked alerts.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod image;
pub mod lexicon;
pub mod mock;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod text;
