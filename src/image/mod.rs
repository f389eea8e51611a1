// Image analysis — decode to channel statistics, then a fixed rule cascade.
//
// Deliberately not a vision model: classification runs on grid-sampled
// channel averages only.

pub mod classifier;
pub mod decode;

pub use classifier::ImageClassifier;
pub use decode::{decode_stats, PixelStats};
