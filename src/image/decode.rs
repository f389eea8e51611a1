// Synchronous image decode: buffer in, channel statistics out.
//
// A pure function with no event-loop semantics — callers run it on any
// worker/task abstraction (the batch pipeline uses spawn_blocking with
// a timeout). Cost is bounded by sampling a fixed grid rather than
// walking every pixel of large images.

use crate::error::SignalError;

/// Sampling grid edge. 100x100 = at most 10,000 pixels read per image.
pub const SAMPLE_GRID: u32 = 100;

/// Per-channel mean over the sampled grid, normalized to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelStats {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Decode an image buffer and compute normalized channel means.
///
/// Unreadable or corrupt data yields `SignalError::Decode`; the caller
/// treats that as a per-item failure, not a batch failure.
pub fn decode_stats(buffer: &[u8]) -> Result<PixelStats, SignalError> {
    let decoded = image::load_from_memory(buffer)?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();

    let cols = SAMPLE_GRID.min(width);
    let rows = SAMPLE_GRID.min(height);

    let mut sum_r = 0u64;
    let mut sum_g = 0u64;
    let mut sum_b = 0u64;

    for gy in 0..rows {
        let y = gy * height / rows;
        for gx in 0..cols {
            let x = gx * width / cols;
            let px = rgb.get_pixel(x, y);
            sum_r += px[0] as u64;
            sum_g += px[1] as u64;
            sum_b += px[2] as u64;
        }
    }

    let samples = (rows as f64) * (cols as f64);
    Ok(PixelStats {
        r: sum_r as f64 / samples / 255.0,
        g: sum_g as f64 / samples / 255.0,
        b: sum_b as f64 / samples / 255.0,
    })
}
