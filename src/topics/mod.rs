// Term statistics: stop-word filtering and frequency ranking.

pub mod frequency;
pub mod stopwords;
pub mod traits;
