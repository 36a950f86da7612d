use std::collections::HashSet;

use tracing::info;

use crate::record::DrugRecord;

/// Keep ASCII letters, digits and whitespace, then trim. Empty → absent.
pub fn clean_name(name: &str) -> Option<String> {
    let cleaned: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Clean names, lowercase the free-text fields and drop repeated names.
///
/// First occurrence wins and survivors keep their relative order. Nameless
/// records share a single key.
pub fn normalize(records: Vec<DrugRecord>) -> Vec<DrugRecord> {
    let total = records.len();
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(total);

    for record in records {
        let record = DrugRecord {
            name: record.name.as_deref().and_then(clean_name),
            uses: record.uses.map(|u| u.to_lowercase()),
            side_effects: record.side_effects.map(|s| s.to_lowercase()),
        };
        if seen.insert(record.name.clone()) {
            unique.push(record);
        }
    }

    info!(
        "Normalized {} records ({} duplicates removed)",
        unique.len(),
        total - unique.len()
    );
    unique
}

// ── Tests ──
