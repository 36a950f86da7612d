use serde::Serialize;

/// Rendered in the CSV for fields that were not found on the page.
pub const MISSING: &str = "N/A";

/// One scraped drug page. `None` means the field was not found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrugRecord {
    pub name: Option<String>,
    pub uses: Option<String>,
    pub side_effects: Option<String>,
}

/// Output row. Absent fields become the `N/A` sentinel only here.
#[derive(Debug, Serialize)]
pub struct CsvRow<'a> {
    #[serde(rename = "Drug Name")]
    pub name: &'a str,
    #[serde(rename = "Uses")]
    pub uses: &'a str,
    #[serde(rename = "Side Effects")]
    pub side_effects: &'a str,
}

impl DrugRecord {
    pub fn csv_row(&self) -> CsvRow<'_> {
        CsvRow {
            name: self.name.as_deref().unwrap_or(MISSING),
            uses: self.uses.as_deref().unwrap_or(MISSING),
            side_effects: self.side_effects.as_deref().unwrap_or(MISSING),
        }
    }
}
