use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::parser::sections::{element_text, find_heading, next_in_document};

static H2: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h2").unwrap());

/// First paragraph after the "What is …" heading.
pub fn extract(document: &Html, heading: &str) -> Option<String> {
    let anchor = find_heading(document, &H2, heading)?;
    next_in_document(document, anchor, "p")
        .map(element_text)
        .filter(|t| !t.is_empty())
}
