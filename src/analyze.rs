use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::LazyLock;

use itertools::Itertools;
use regex::Regex;
use serde::Serialize;

use crate::record::DrugRecord;
use crate::stopwords::Stopwords;

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+(?:-\w+)*").unwrap());

/// Word tokens in order. Hyphenated compounds stay whole; apostrophes split.
pub fn tokenize(text: &str) -> Vec<&str> {
    WORD_RE.find_iter(text).map(|m| m.as_str()).collect()
}

/// Tokens that are purely alphabetic and not stopwords.
pub fn content_words<'a>(text: &'a str, stopwords: &Stopwords) -> Vec<&'a str> {
    tokenize(text)
        .into_iter()
        .filter(|t| t.chars().all(char::is_alphabetic) && !stopwords.contains(t))
        .collect()
}

/// Occurrence counts that remember first-seen order for tie breaking.
#[derive(Debug, Default)]
pub struct FrequencyTable {
    index: HashMap<String, usize>,
    entries: Vec<(String, usize)>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: &str) {
        match self.index.get(key) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), 1));
            }
        }
    }

    /// Highest counts first; equal counts keep first-seen order.
    pub fn top(&self, k: usize) -> Vec<TermCount> {
        let mut ranked: Vec<&(String, usize)> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
            .into_iter()
            .take(k)
            .map(|(term, count)| TermCount {
                term: term.clone(),
                count: *count,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermCount {
    pub term: String,
    pub count: usize,
}

impl fmt::Display for TermCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {})", self.term, self.count)
    }
}

/// How many entries each ranking reports.
#[derive(Debug, Clone, Copy)]
pub struct TopK {
    pub bigrams: usize,
    pub side_effects: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub unique_names: usize,
    pub top_uses: Vec<TermCount>,
    pub top_side_effects: Vec<TermCount>,
}

impl AnalysisReport {
    pub fn print(&self) {
        println!("Number of Unique Drug Names: {}", self.unique_names);
        println!(
            "Top {} Most Common Uses: [{}]",
            self.top_uses.len(),
            self.top_uses.iter().join(", ")
        );
        println!(
            "Most Common Side Effect: [{}]",
            self.top_side_effects.iter().join(", ")
        );
    }
}

/// Bigram counts over uses, word counts over side effects. Absent and empty
/// fields are skipped.
pub fn analyze(records: &[DrugRecord], stopwords: &Stopwords, top: TopK) -> AnalysisReport {
    let unique_names = records
        .iter()
        .filter_map(|r| r.name.as_deref())
        .collect::<HashSet<_>>()
        .len();

    let mut uses = FrequencyTable::new();
    for text in present(records, |r| &r.uses) {
        for (a, b) in content_words(text, stopwords).into_iter().tuple_windows() {
            uses.add(&format!("{} {}", a, b));
        }
    }

    let mut side_effects = FrequencyTable::new();
    for text in present(records, |r| &r.side_effects) {
        for word in content_words(text, stopwords) {
            side_effects.add(word);
        }
    }

    AnalysisReport {
        unique_names,
        top_uses: uses.top(top.bigrams),
        top_side_effects: side_effects.top(top.side_effects),
    }
}

fn present<'a>(
    records: &'a [DrugRecord],
    field: impl Fn(&'a DrugRecord) -> &'a Option<String> + 'a,
) -> impl Iterator<Item = &'a str> + 'a {
    records
        .iter()
        .filter_map(move |r| field(r).as_deref())
        .filter(|t| !t.trim().is_empty())
}

// ── Tests ──
