use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use watchfire::config::Config;
use watchfire::image::ImageClassifier;
use watchfire::mock::MockFeed;
use watchfire::model::RawPost;
use watchfire::output::terminal;
use watchfire::pipeline::{run_images, run_posts};
use watchfire::text::TextClassifier;

/// Watchfire: heuristic disaster-signal classification and alert aggregation.
///
/// Converts raw social posts and raw images into typed, confidence-scored
/// disaster signals, then deduplicates and escalates them into alerts.
#[derive(Parser)]
#[command(name = "watchfire", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a synthetic feed through the full pipeline
    Demo {
        /// Number of mock posts to generate
        #[arg(long, default_value = "40")]
        count: usize,

        /// Override the configured batch seed
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Classify and aggregate a JSON file of raw posts
    Posts {
        /// Path to a JSON array of posts
        file: PathBuf,
    },

    /// Classify one or more image files
    Image {
        /// Image paths (png or jpeg)
        paths: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("watchfire=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Demo { count, seed } => {
            let seed = seed.unwrap_or(config.seed);
            println!("Generating {count} mock posts (seed {seed})...");
            let posts = MockFeed::new(seed).generate(count);
            run_post_batch(&config, posts, seed).await?;
        }

        Commands::Posts { file } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let posts: Vec<RawPost> = serde_json::from_str(&raw)
                .with_context(|| format!("{} is not a JSON array of posts", file.display()))?;
            info!(count = posts.len(), "Loaded posts");
            let seed = config.seed;
            run_post_batch(&config, posts, seed).await?;
        }

        Commands::Image { paths } => {
            if paths.is_empty() {
                anyhow::bail!("no image paths given");
            }

            let pb = ProgressBar::new(paths.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("  Reading [{bar:30}] {pos}/{len}")
                    .unwrap(),
            );

            let mut images = Vec::new();
            for path in &paths {
                let bytes = std::fs::read(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                images.push((path.display().to_string(), bytes));
                pb.inc(1);
            }
            pb.finish_and_clear();

            let classifier = Arc::new(ImageClassifier::default());
            let batch = run_images(
                classifier,
                images,
                config.seed,
                config.concurrency,
                config.decode_timeout,
            )
            .await?;

            terminal::display_detections(&batch.detections);
            report_skipped(&batch.skipped);
        }
    }

    Ok(())
}

async fn run_post_batch(config: &Config, posts: Vec<RawPost>, seed: u64) -> Result<()> {
    let classifier = Arc::new(TextClassifier::default());
    let batch = run_posts(
        classifier,
        posts,
        seed,
        config.concurrency,
        config.min_reports,
    )
    .await?;

    terminal::display_alerts(&batch.alerts);
    println!(
        "Processed {} post(s), {} published alert(s).",
        batch.processed,
        batch.alerts.len()
    );
    report_skipped(&batch.skipped);
    Ok(())
}

fn report_skipped<E: std::fmt::Display>(skipped: &[(String, E)]) {
    if skipped.is_empty() {
        return;
    }
    println!("\n{}", format!("Skipped {} item(s):", skipped.len()).yellow());
    for (id, err) in skipped {
        println!("  {id}: {err}");
    }
}
