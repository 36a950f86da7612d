use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::parser::sections::section_blocks;

static H2: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h2").unwrap());

/// Everything between the `h2#<id>` heading and the next `h2`.
///
/// A present heading with nothing after it gives `Some("")`.
pub fn extract(document: &Html, id: &str) -> Option<String> {
    let heading = document
        .select(&H2)
        .find(|el| el.value().id() == Some(id))?;
    Some(section_blocks(heading).join(" ").replace('\n', " "))
}
