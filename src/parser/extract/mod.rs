pub mod name;
pub mod side_effects;
pub mod uses;

use scraper::Html;

use super::ExtractRules;
use crate::record::DrugRecord;

pub fn extract_all(document: &Html, rules: &ExtractRules) -> DrugRecord {
    DrugRecord {
        name: name::extract(document),
        uses: uses::extract(document, &rules.uses_heading),
        side_effects: side_effects::extract(document, &rules.side_effects_id),
    }
}

// ── Tests ──
