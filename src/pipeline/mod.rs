// Batch orchestration — parallel classification, sequential aggregation.

pub mod batch;

pub use batch::{run_images, run_posts, ImageBatch, PostBatch};
