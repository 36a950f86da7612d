use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::parser::sections::element_text;

static H1: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").unwrap());

/// Page title from the first `h1`.
pub fn extract(document: &Html) -> Option<String> {
    document
        .select(&H1)
        .next()
        .map(element_text)
        .filter(|t| !t.is_empty())
}
