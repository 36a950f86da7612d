use scraper::{ElementRef, Html, Selector};

/// First element matching `selector` whose text contains `needle`.
pub fn find_heading<'a>(
    document: &'a Html,
    selector: &Selector,
    needle: &str,
) -> Option<ElementRef<'a>> {
    document
        .select(selector)
        .find(|el| el.text().collect::<String>().contains(needle))
}

/// First `tag` element that follows `anchor` in document order.
///
/// Not limited to siblings: the match may sit inside a later container, or
/// inside `anchor` itself.
pub fn next_in_document<'a>(
    document: &'a Html,
    anchor: ElementRef<'a>,
    tag: &str,
) -> Option<ElementRef<'a>> {
    let anchor_id = anchor.id();
    document
        .root_element()
        .descendants()
        .skip_while(|node| node.id() != anchor_id)
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == tag)
}

/// Text of every element sibling after `heading`, up to (not including) the
/// next element with the heading's own tag name.
///
/// Deeper headings are part of the section; only the same level ends it.
pub fn section_blocks(heading: ElementRef<'_>) -> Vec<String> {
    let boundary = heading.value().name();
    heading
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .take_while(|el| el.value().name() != boundary)
        .map(element_text)
        .collect()
}

pub fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn h2() -> Selector {
        Selector::parse("h2").unwrap()
    }

    #[test]
    fn heading_match_is_substring() {
        let doc = Html::parse_document("<h2>Overview</h2><h2>So, What is aspirin?</h2>");
        let h = find_heading(&doc, &h2(), "What is").unwrap();
        assert_eq!(element_text(h), "So, What is aspirin?");
    }

    #[test]
    fn heading_match_is_case_sensitive() {
        let doc = Html::parse_document("<h2>what is aspirin?</h2>");
        assert!(find_heading(&doc, &h2(), "What is").is_none());
    }

    #[test]
    fn next_paragraph_crosses_containers() {
        let doc = Html::parse_document(
            "<div><h2>What is it?</h2></div><div><span>x</span><p>The answer.</p></div>",
        );
        let h = find_heading(&doc, &h2(), "What is").unwrap();
        let p = next_in_document(&doc, h, "p").unwrap();
        assert_eq!(element_text(p), "The answer.");
    }

    #[test]
    fn next_paragraph_ignores_earlier_ones() {
        let doc = Html::parse_document("<p>Before.</p><h2>What is it?</h2><p>After.</p>");
        let h = find_heading(&doc, &h2(), "What is").unwrap();
        let p = next_in_document(&doc, h, "p").unwrap();
        assert_eq!(element_text(p), "After.");
    }

    #[test]
    fn no_following_paragraph() {
        let doc = Html::parse_document("<p>Before.</p><h2>What is it?</h2>");
        let h = find_heading(&doc, &h2(), "What is").unwrap();
        assert!(next_in_document(&doc, h, "p").is_none());
    }

    #[test]
    fn section_stops_at_same_level() {
        let doc = Html::parse_document(
            "<div><h2 id=\"s\">S</h2><p>one</p><ul><li>two</li></ul><h3>sub</h3><p>three</p>\
             <h2>Next</h2><p>outside</p></div>",
        );
        let h = doc.select(&h2()).next().unwrap();
        assert_eq!(section_blocks(h), vec!["one", "two", "sub", "three"]);
    }

    #[test]
    fn section_runs_to_end_of_siblings() {
        let doc = Html::parse_document("<div><h2>S</h2><p>one</p></div><p>not a sibling</p>");
        let h = doc.select(&h2()).next().unwrap();
        assert_eq!(section_blocks(h), vec!["one"]);
    }

    #[test]
    fn text_nodes_between_siblings_are_skipped() {
        let doc = Html::parse_document("<div><h2>S</h2>loose text<p>one</p></div>");
        let h = doc.select(&h2()).next().unwrap();
        assert_eq!(section_blocks(h), vec!["one"]);
    }
}
