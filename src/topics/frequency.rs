// Term frequency counting over titles and abstracts.
//
// Tokenization is naive: lowercase the text, take runs of three or more ASCII
// letters bounded by Unicode word boundaries, drop stop-words, count. A run
// that touches a non-ASCII letter (the "schr" in "schrödinger") is not a token. Ranking is by count with
// ties kept in first-seen order.

use std::collections::HashMap;

use regex::Regex;
use tracing::info;

use super::stopwords::StopWords;
use super::traits::TermExtractor;
use crate::models::PaperRecord;

/// Shortest token that is counted.
pub const MIN_TERM_LEN: usize = 3;

/// Term counts for a fixed set of records. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermFrequencyTable {
    /// (term, count) sorted by count descending, then first appearance
    ranked: Vec<(String, usize)>,
    token_count: usize,
}

impl TermFrequencyTable {
    /// Count an already-filtered token stream.
    pub fn from_tokens<I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        // term -> (count, index of first appearance)
        let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
        let mut token_count = 0;

        for token in tokens {
            let next_index = counts.len();
            counts.entry(token).or_insert((0, next_index)).0 += 1;
            token_count += 1;
        }

        let mut entries: Vec<(String, usize, usize)> = counts
            .into_iter()
            .map(|(term, (count, first))| (term, count, first))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

        Self {
            ranked: entries
                .into_iter()
                .map(|(term, count, _)| (term, count))
                .collect(),
            token_count,
        }
    }

    /// The `n` most frequent terms.
    pub fn top(&self, n: usize) -> Vec<(String, usize)> {
        self.ranked.iter().take(n).cloned().collect()
    }

    pub fn count(&self, term: &str) -> usize {
        self.ranked
            .iter()
            .find(|(t, _)| t == term)
            .map_or(0, |(_, c)| *c)
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    /// Total tokens counted, duplicates included.
    pub fn token_count(&self) -> usize {
        self.token_count
    }
}

/// Stop-word filtered frequency extractor.
pub struct FrequencyExtractor {
    stop_words: StopWords,
    token_pattern: Regex,
}

impl FrequencyExtractor {
    pub fn new(stop_words: StopWords) -> Self {
        Self {
            stop_words,
            token_pattern: Regex::new(r"\b[a-zA-Z]{3,}\b").expect("valid token pattern"),
        }
    }

    /// Lowercased, stop-word filtered tokens from all titles and abstracts, in order.
    pub fn tokens(&self, records: &[PaperRecord]) -> Vec<String> {
        let text = records
            .iter()
            .map(PaperRecord::searchable_text)
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        self.token_pattern
            .find_iter(&text)
            .map(|m| m.as_str())
            .filter(|word| word.len() >= MIN_TERM_LEN && !self.stop_words.contains(word))
            .map(str::to_string)
            .collect()
    }
}

impl Default for FrequencyExtractor {
    fn default() -> Self {
        Self::new(StopWords::default())
    }
}

impl TermExtractor for FrequencyExtractor {
    fn table(&self, records: &[PaperRecord]) -> TermFrequencyTable {
        let table = TermFrequencyTable::from_tokens(self.tokens(records));
        info!(
            papers = records.len(),
            distinct_terms = table.len(),
            tokens = table.token_count(),
            "Counted term frequencies"
        );
        table
    }
}
