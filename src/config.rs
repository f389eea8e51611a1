use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::aggregate::rank::DEFAULT_MIN_REPORTS;

/// Central configuration loaded from environment variables.
///
/// All values have defaults; the .env file is loaded automatically at
/// startup via dotenvy.
pub struct Config {
    /// Batch seed for all injected randomness (WATCHFIRE_SEED)
    pub seed: u64,
    /// Parallel classification width (WATCHFIRE_CONCURRENCY)
    pub concurrency: usize,
    /// Per-image decode bound (WATCHFIRE_DECODE_TIMEOUT_MS)
    pub decode_timeout: Duration,
    /// Publication threshold: minimum corroborating reports
    /// (WATCHFIRE_MIN_REPORTS)
    pub min_reports: u32,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Ok(Self {
            seed: parse_var("WATCHFIRE_SEED", 7)?,
            concurrency: parse_var("WATCHFIRE_CONCURRENCY", 8)?,
            decode_timeout: Duration::from_millis(parse_var("WATCHFIRE_DECODE_TIMEOUT_MS", 5000)?),
            min_reports: parse_var("WATCHFIRE_MIN_REPORTS", DEFAULT_MIN_REPORTS)?,
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{name} is set but not a valid value: {raw:?}")),
        Err(_) => Ok(default),
    }
}
