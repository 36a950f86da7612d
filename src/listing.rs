use std::sync::LazyLock;

use reqwest::Url;
use scraper::{Html, Selector};
use tracing::{info, warn};

static ANCHORS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());

/// Return the `href` of every anchor inside the first element matching
/// `container`, in document order, truncated to `cap`.
///
/// `None` means the container is not on the page.
pub fn extract_links(markup: &str, container: &Selector, cap: usize) -> Option<Vec<String>> {
    let document = Html::parse_document(markup);
    let list = document.select(container).next()?;

    let links: Vec<String> = list
        .select(&ANCHORS)
        .filter_map(|a| a.value().attr("href"))
        .map(str::to_string)
        .take(cap)
        .collect();

    info!("Listing links: {} (cap {})", links.len(), cap);
    Some(links)
}

/// Resolve listing hrefs against the site base, dropping any that don't parse.
pub fn resolve_links(base: &Url, hrefs: &[String]) -> Vec<Url> {
    hrefs
        .iter()
        .filter_map(|href| match base.join(href) {
            Ok(url) => Some(url),
            Err(e) => {
                warn!("Skipping unresolvable link {:?}: {}", href, e);
                None
            }
        })
        .collect()
}

// ── Tests ──
