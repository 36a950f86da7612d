use std::path::PathBuf;

use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use scraper::Selector;
use tracing::{info, warn};

use crate::analyze::{analyze, AnalysisReport, TopK};
use crate::error::ScrapeError;
use crate::fetcher::Fetch;
use crate::listing;
use crate::normalize::normalize;
use crate::output::{self, RunReport};
use crate::parser::{self, ExtractRules};
use crate::record::DrugRecord;
use crate::settings::Settings;
use crate::stopwords::Stopwords;

/// Result of the scrape stage.
#[derive(Debug, Default)]
pub struct ScrapeStats {
    pub listed: usize,
    pub ok: usize,
    pub errors: usize,
}

#[derive(Debug)]
pub enum RunOutcome {
    /// Listing missing or nothing scraped; no file was written.
    NoData { stats: ScrapeStats },
    Completed {
        stats: ScrapeStats,
        records: Vec<DrugRecord>,
        report: AnalysisReport,
        output_path: PathBuf,
    },
}

pub struct Pipeline<F> {
    fetcher: F,
    settings: Settings,
    rules: ExtractRules,
    stopwords: Stopwords,
}

impl<F: Fetch> Pipeline<F> {
    pub fn new(fetcher: F, settings: Settings) -> Self {
        let rules = ExtractRules::from_settings(&settings);
        let stopwords = Stopwords::with_extra(&settings.extra_stopwords);
        Self {
            fetcher,
            settings,
            rules,
            stopwords,
        }
    }

    /// listing → pages → normalize → analyze → CSV (+ optional JSON report).
    pub async fn run(&self) -> Result<RunOutcome, ScrapeError> {
        let (records, stats) = self.scrape().await?;
        if records.is_empty() {
            println!("No drug data was scraped.");
            return Ok(RunOutcome::NoData { stats });
        }

        let records = normalize(records);
        let report = analyze(
            &records,
            &self.stopwords,
            TopK {
                bigrams: self.settings.top_bigrams,
                side_effects: self.settings.top_side_effects,
            },
        );
        report.print();

        let output_path = self.settings.output_path.clone();
        output::save_csv(&output_path, &records)?;

        if let Some(report_path) = &self.settings.report_path {
            output::save_report(
                report_path,
                &RunReport {
                    generated_at: Utc::now(),
                    pages_listed: stats.listed,
                    pages_scraped: stats.ok,
                    pages_failed: stats.errors,
                    records_written: records.len(),
                    output_path: &output_path,
                    analysis: &report,
                },
            )?;
        }

        println!(
            "Data scraping, cleaning, and analysis complete. Cleaned data saved to '{}'.",
            output_path.display()
        );
        Ok(RunOutcome::Completed {
            stats,
            records,
            report,
            output_path,
        })
    }

    /// Fetch the listing and every linked page, in listing order.
    pub async fn scrape(&self) -> Result<(Vec<DrugRecord>, ScrapeStats), ScrapeError> {
        let index_url = self.settings.index_url()?;
        let container = Selector::parse(&self.settings.listing_selector).map_err(|e| {
            ScrapeError::InvalidSetting {
                key: "listing_selector",
                reason: e.to_string(),
            }
        })?;

        info!("Fetching listing: {}", index_url);
        let markup = self.fetcher.fetch(index_url.as_str()).await?;

        let Some(hrefs) = listing::extract_links(&markup, &container, self.settings.link_limit)
        else {
            warn!("Listing container `{}` not found", self.settings.listing_selector);
            println!("Drug list section not found.");
            return Ok((Vec::new(), ScrapeStats::default()));
        };
        let urls = listing::resolve_links(&self.settings.base()?, &hrefs);

        let mut stats = ScrapeStats {
            listed: urls.len(),
            ..ScrapeStats::default()
        };
        let mut records = Vec::with_capacity(urls.len());

        let pb = ProgressBar::new(urls.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        );

        for url in urls {
            match self.fetcher.fetch(url.as_str()).await {
                Ok(page) => {
                    records.push(parser::parse_page(&page, &self.rules));
                    stats.ok += 1;
                }
                Err(e) if self.settings.skip_failed_pages => {
                    warn!("Skipping {}: {}", url, e);
                    stats.errors += 1;
                }
                Err(e) => {
                    pb.finish_and_clear();
                    return Err(e.into());
                }
            }
            pb.inc(1);
        }

        pb.finish_and_clear();
        info!(
            "Scraped {} pages ({} ok, {} errors)",
            stats.listed, stats.ok, stats.errors
        );
        Ok((records, stats))
    }
}

// ── Tests ──
