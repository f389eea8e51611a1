// Batch pipeline: classify items in parallel, merge alerts sequentially.
//
// Per-item work has no cross-item dependency, so classification fans
// out over blocking worker tasks with bounded concurrency. The
// aggregator mutates a single shared map, so the merge phase runs
// strictly after all classification results are in, in input order —
// completion order must never leak into alert insertion order.
//
// A failed item (empty post, undecodable image, decode timeout) is
// logged and recorded, never aborting the batch. An aggregation error
// is batch-fatal. No retries happen here; retry policy belongs to the
// caller's I/O boundary.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::aggregate::AlertAggregator;
use crate::error::SignalError;
use crate::image::ImageClassifier;
use crate::model::{DisasterAlert, ImageDetection, RawPost};
use crate::text::TextClassifier;

/// Outcome of one post batch.
#[derive(Debug)]
pub struct PostBatch {
    pub alerts: Vec<DisasterAlert>,
    /// Items that produced a signal (including non-disaster ones)
    pub processed: usize,
    /// (item id, error) for every skipped item
    pub skipped: Vec<(String, SignalError)>,
}

/// Outcome of one image batch.
#[derive(Debug)]
pub struct ImageBatch {
    /// (image label, detection record), in input order
    pub detections: Vec<(String, ImageDetection)>,
    pub skipped: Vec<(String, SignalError)>,
}

/// Classify a batch of posts and aggregate the resulting signals.
///
/// Each item derives its own rng from the batch seed and its input
/// index, so fallback coordinates are reproducible regardless of which
/// worker finishes first.
pub async fn run_posts(
    classifier: Arc<TextClassifier>,
    posts: Vec<RawPost>,
    seed: u64,
    concurrency: usize,
    min_reports: u32,
) -> Result<PostBatch> {
    let total = posts.len();

    let mut results: Vec<_> = stream::iter(posts.into_iter().enumerate().map(|(idx, post)| {
        let classifier = Arc::clone(&classifier);
        async move {
            let outcome = tokio::task::spawn_blocking(move || {
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(idx as u64));
                let id = post.id.clone();
                (id, classifier.classify(&post, &mut rng))
            })
            .await;
            (idx, outcome)
        }
    }))
    .buffer_unordered(concurrency.max(1))
    .collect()
    .await;

    // Restore input order before the sequential merge phase
    results.sort_by_key(|(idx, _)| *idx);

    let mut aggregator = AlertAggregator::new();
    let mut processed = 0;
    let mut skipped = Vec::new();

    for (_, outcome) in results {
        let (id, classified) = outcome.context("classification worker failed")?;
        match classified {
            Ok(signal) => {
                processed += 1;
                aggregator.ingest(signal).context("alert aggregation failed")?;
            }
            Err(e) => {
                warn!(post = %id, error = %e, "Skipping post");
                skipped.push((id, e));
            }
        }
    }

    let alerts = aggregator.finish(min_reports);
    info!(
        total,
        processed,
        skipped = skipped.len(),
        alerts = alerts.len(),
        "Post batch complete"
    );

    Ok(PostBatch {
        alerts,
        processed,
        skipped,
    })
}

/// Decode and classify a batch of images.
///
/// Each decode is a bounded, cancellable unit of work: it runs on a
/// blocking worker under a timeout, and a failure or timeout drops
/// that one image only.
pub async fn run_images(
    classifier: Arc<ImageClassifier>,
    images: Vec<(String, Vec<u8>)>,
    seed: u64,
    concurrency: usize,
    decode_timeout: Duration,
) -> Result<ImageBatch> {
    let timeout_millis = decode_timeout.as_millis() as u64;

    let mut results: Vec<_> = stream::iter(images.into_iter().enumerate().map(
        |(idx, (label, buffer))| {
            let classifier = Arc::clone(&classifier);
            async move {
                let work = tokio::task::spawn_blocking(move || {
                    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(idx as u64));
                    classifier.detect(&buffer, &mut rng)
                });
                // Outer Result: worker panic, batch-fatal.
                // Inner Result: per-item decode outcome.
                let detected: Result<Result<_, SignalError>> =
                    match tokio::time::timeout(decode_timeout, work).await {
                        Ok(joined) => joined.context("decode worker failed"),
                        Err(_) => Ok(Err(SignalError::DecodeTimeout {
                            millis: timeout_millis,
                        })),
                    };
                (idx, label, detected)
            }
        },
    ))
    .buffer_unordered(concurrency.max(1))
    .collect()
    .await;

    results.sort_by_key(|(idx, _, _)| *idx);

    let mut detections = Vec::new();
    let mut skipped = Vec::new();

    for (_, label, detected) in results {
        match detected? {
            Ok(detection) => detections.push((label, detection)),
            Err(e) => {
                warn!(image = %label, error = %e, "Skipping image");
                skipped.push((label, e));
            }
        }
    }

    info!(
        detections = detections.len(),
        skipped = skipped.len(),
        "Image batch complete"
    );

    Ok(ImageBatch {
        detections,
        skipped,
    })
}
