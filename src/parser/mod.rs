pub mod extract;
pub mod sections;

use scraper::Html;

use crate::record::DrugRecord;
use crate::settings::Settings;

/// Anchors used to find the fields on a drug page.
#[derive(Debug, Clone)]
pub struct ExtractRules {
    /// Substring of the `h2` that introduces the uses paragraph.
    pub uses_heading: String,
    /// `id` of the `h2` that opens the side-effects section.
    pub side_effects_id: String,
}

impl ExtractRules {
    pub fn from_settings(settings: &Settings) -> Self {
        ExtractRules {
            uses_heading: settings.uses_heading.clone(),
            side_effects_id: settings.side_effects_id.clone(),
        }
    }
}

impl Default for ExtractRules {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Markup → document → record. Missing structure yields absent fields,
/// never an error.
pub fn parse_page(markup: &str, rules: &ExtractRules) -> DrugRecord {
    let document = Html::parse_document(markup);
    extract::extract_all(&document, rules)
}
