// Error taxonomy for the core pipeline.
//
// Per-item failures (SignalError) skip that one input and the batch
// continues. AggregateError is fatal to the batch: the alert map's key
// space is a batch-wide invariant and must not be silently corrupted.
// The core performs no retries; callers wrap the I/O boundary if they
// need retry policy.

use thiserror::Error;

/// A per-item classification failure. Skippable: the batch continues.
#[derive(Debug, Error)]
pub enum SignalError {
    /// Malformed input: post text is empty or whitespace-only.
    #[error("post {id} has empty text")]
    EmptyPost { id: String },

    /// The image buffer could not be decoded.
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),

    /// The decode did not finish within the configured bound.
    #[error("image decode timed out after {millis}ms")]
    DecodeTimeout { millis: u64 },
}

/// A batch-fatal aggregation failure.
#[derive(Debug, Error)]
pub enum AggregateError {
    /// A merge key could not be constructed from the signal.
    #[error("invalid alert key: type={disaster_type}, location={location:?}")]
    InvalidKey {
        disaster_type: String,
        location: String,
    },
}
