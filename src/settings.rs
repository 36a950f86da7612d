use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use reqwest::Url;
use serde::Deserialize;

use crate::error::ScrapeError;

const ENV_PREFIX: &str = "DRUGSCRAPE";
const DEFAULT_CONFIG_FILE: &str = "drug_scraper";

/// Run settings. Every field has a default so an empty environment yields
/// the reference run against drugs.com.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    pub index_path: String,
    pub listing_selector: String,
    pub link_limit: usize,
    pub request_delay_ms: u64,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
    pub user_agent: String,
    pub skip_failed_pages: bool,
    pub output_path: PathBuf,
    pub report_path: Option<PathBuf>,
    pub top_bigrams: usize,
    pub top_side_effects: usize,
    pub extra_stopwords: Vec<String>,
    pub uses_heading: String,
    pub side_effects_id: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            base_url: "https://www.drugs.com".to_string(),
            index_path: "/drug_information.html".to_string(),
            listing_selector: "ul.ddc-list-column-4".to_string(),
            link_limit: 50,
            request_delay_ms: 1000,
            request_timeout_secs: 30,
            max_retries: 0,
            retry_backoff_ms: 2000,
            user_agent: concat!("drug_scraper/", env!("CARGO_PKG_VERSION")).to_string(),
            skip_failed_pages: true,
            output_path: PathBuf::from("cleaned_drug_data.csv"),
            report_path: None,
            top_bigrams: 5,
            top_side_effects: 1,
            extra_stopwords: Vec::new(),
            uses_heading: "What is".to_string(),
            side_effects_id: "side-effects".to_string(),
        }
    }
}

impl Settings {
    /// Layer defaults, an optional TOML file and `DRUGSCRAPE_*` env vars.
    /// Call [`Settings::validate`] once CLI overrides are applied.
    ///
    /// With no explicit path, `drug_scraper.toml` in the working directory is
    /// read if present. An explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ScrapeError> {
        let file = match path {
            Some(p) => File::from(p).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };
        let settings = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("extra_stopwords"),
            )
            .build()?
            .try_deserialize::<Settings>()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ScrapeError> {
        self.base()?;
        if self.link_limit == 0 {
            return Err(ScrapeError::InvalidSetting {
                key: "link_limit",
                reason: "must be at least 1".into(),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ScrapeError::InvalidSetting {
                key: "request_timeout_secs",
                reason: "must be at least 1".into(),
            });
        }
        if scraper::Selector::parse(&self.listing_selector).is_err() {
            return Err(ScrapeError::InvalidSetting {
                key: "listing_selector",
                reason: format!("`{}` is not a valid CSS selector", self.listing_selector),
            });
        }
        Ok(())
    }

    pub fn base(&self) -> Result<Url, ScrapeError> {
        Url::parse(&self.base_url).map_err(|e| ScrapeError::InvalidSetting {
            key: "base_url",
            reason: e.to_string(),
        })
    }

    pub fn index_url(&self) -> Result<Url, ScrapeError> {
        self.base()?
            .join(&self.index_path)
            .map_err(|e| ScrapeError::InvalidSetting {
                key: "index_path",
                reason: e.to_string(),
            })
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}

// ── Tests ──
