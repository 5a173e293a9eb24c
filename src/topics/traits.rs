// Term extractor trait.
//
// The keyword summary and the word cloud only need a ranked term table, so
// the counting strategy can change without touching either.

use super::frequency::TermFrequencyTable;
use crate::models::PaperRecord;

/// Trait for turning a set of papers into term statistics.
pub trait TermExtractor {
    /// Count terms across the titles and abstracts of `records`.
    fn table(&self, records: &[PaperRecord]) -> TermFrequencyTable;

    /// The `top_n` most frequent terms, count descending, ties in first-seen order.
    fn extract(&self, records: &[PaperRecord], top_n: usize) -> Vec<(String, usize)> {
        self.table(records).top(top_n)
    }
}
