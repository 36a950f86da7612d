use std::collections::HashSet;

/// Standard English stopword list (NLTK corpus).
const ENGLISH: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't",
    "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn",
    "wouldn't",
];

/// Boilerplate that shows up in nearly every medication description.
const MEDICAL: &[&str] = &[
    "used", "use", "treat", "treatment", "including", "common", "drugs", "may", "cause",
    "causes", "help", "also", "works", "side", "effects", "effect",
];

/// Immutable set of words excluded from frequency counts.
#[derive(Debug, Clone)]
pub struct Stopwords {
    words: HashSet<String>,
}

impl Stopwords {
    /// English stopwords plus the medical boilerplate terms.
    pub fn medical() -> Self {
        Self::from_words(ENGLISH.iter().chain(MEDICAL).copied())
    }

    /// [`Stopwords::medical`] plus caller-supplied words (lowercased).
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::medical();
        set.words
            .extend(extra.into_iter().map(|w| w.as_ref().trim().to_lowercase()));
        set
    }

    pub fn from_words<'a>(words: impl IntoIterator<Item = &'a str>) -> Self {
        Stopwords {
            words: words.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn medical_set_covers_both_lists() {
        let s = Stopwords::medical();
        assert!(s.contains("the"));
        assert!(s.contains("treat"));
        assert!(s.contains("effects"));
        assert!(!s.contains("pain"));
        assert!(ENGLISH.iter().chain(MEDICAL).all(|w| s.contains(w)));
    }

    #[test]
    fn extras_are_lowercased() {
        let s = Stopwords::with_extra(["Tablet", " oral "]);
        assert!(s.contains("tablet"));
        assert!(s.contains("oral"));
        assert!(s.contains("used"));
    }
}
