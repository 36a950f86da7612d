mod analyze;
mod error;
mod fetcher;
mod listing;
mod normalize;
mod output;
mod parser;
mod pipeline;
mod record;
mod settings;
mod stopwords;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use fetcher::{HttpFetcher, Paced};
use pipeline::{Pipeline, RunOutcome};
use settings::Settings;

/// Scrape drug pages, clean them, print frequency stats and save a CSV.
///
/// Every flag is optional; without any the reference run is performed.
#[derive(Parser)]
#[command(name = "drug_scraper", about = "Drug information scraper and text statistics")]
struct Cli {
    /// Settings file (TOML). Defaults to ./drug_scraper.toml if present
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output CSV path
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Max drug pages to take from the listing
    #[arg(short = 'n', long)]
    limit: Option<usize>,
    /// Delay between requests in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,
    /// Retries for rate-limited or failing requests
    #[arg(long)]
    retries: Option<u32>,
    /// Abort on the first page that fails to download
    #[arg(long)]
    fail_fast: bool,
    /// Also write a JSON run report here
    #[arg(long)]
    report: Option<PathBuf>,
}

impl Cli {
    fn apply(self, settings: &mut Settings) {
        if let Some(output) = self.output {
            settings.output_path = output;
        }
        if let Some(limit) = self.limit {
            settings.link_limit = limit;
        }
        if let Some(delay) = self.delay_ms {
            settings.request_delay_ms = delay;
        }
        if let Some(retries) = self.retries {
            settings.max_retries = retries;
        }
        if self.fail_fast {
            settings.skip_failed_pages = false;
        }
        if let Some(report) = self.report {
            settings.report_path = Some(report);
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .try_init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;
    cli.apply(&mut settings);
    settings.validate()?;
    info!(settings = ?settings, "Starting drug scraper");

    let http = HttpFetcher::new(&settings).context("Failed to create HTTP client")?;
    let fetcher = Paced::new(http, settings.request_delay());

    let outcome = Pipeline::new(fetcher, settings).run().await?;
    match outcome {
        RunOutcome::NoData { stats } => {
            info!("No data ({} listed, {} failed)", stats.listed, stats.errors);
        }
        RunOutcome::Completed {
            stats,
            records,
            report,
            output_path,
        } => {
            println!(
                "{} pages scraped ({} ok, {} errors), {} unique records.",
                stats.listed,
                stats.ok,
                stats.errors,
                records.len()
            );
            info!(
                output = %output_path.display(),
                unique_names = report.unique_names,
                "Run complete"
            );
        }
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_elapsed(elapsed));
    }
    Ok(())
}

fn format_elapsed(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    match (secs / 3600, secs / 60 % 60, secs % 60) {
        (0, 0, _) => format!("{:.1}s", d.as_secs_f64()),
        (0, m, s) => format!("{m}m {s}s"),
        (h, m, s) => format!("{h}h {m}m {s}s"),
    }
}

// ── Tests ──
