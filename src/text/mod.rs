// Text analysis — feature extraction and signal classification for raw posts.

pub mod classifier;
pub mod features;

pub use classifier::TextClassifier;
pub use features::{extract_features, tokenize, TextFeatures};
