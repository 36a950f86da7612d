use std::path::PathBuf;

use reqwest::StatusCode;

/// Failure to retrieve markup for a single URL.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("http error for {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("unexpected status {status} for {url}")]
    Status { url: String, status: StatusCode },
}

impl FetchError {
    /// Rate limiting, server-side errors, timeouts and refused connections
    /// are worth another attempt; anything else is final.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Status { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            FetchError::Http { source, .. } => source.is_timeout() || source.is_connect(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ScrapeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("invalid setting `{key}`: {reason}")]
    InvalidSetting { key: &'static str, reason: String },
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("failed to write {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
