// Stop-word sets for term statistics.
//
// A StopWords value is built once and handed to the extractor; nothing here
// is process-wide state.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use stop_words::{get, LANGUAGE};

/// Function words dropped from keyword statistics.
const BASIC: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "up", "about", "into", "through", "during", "before", "after", "above", "below",
    "between", "among", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "do", "does", "did", "will", "would", "could", "should", "may", "might", "must", "can",
    "this", "that", "these", "those", "i", "you", "he", "she", "it", "we", "they", "me", "him",
    "her", "us", "them", "my", "your", "his", "its", "our", "their",
];

/// Pronouns, determiners, and the boilerplate vocabulary of abstracts.
/// Layered on top of BASIC for word clouds, where these words would swamp the picture.
const EXTENDED_EXTRA: &[&str] = &[
    "ours", "ourselves", "yours", "yourself", "yourselves", "himself", "hers", "herself",
    "itself", "theirs", "themselves", "what", "which", "who", "whom", "whose", "where", "when",
    "why", "how", "all", "any", "both", "each", "few", "more", "most", "other", "some", "such",
    "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "just",
    "don", "now", "using", "used", "use", "based", "approach", "method", "methods", "paper",
    "study", "research", "work", "works", "propose", "proposed", "proposes", "present",
    "presents", "presented", "show", "shows", "showed", "demonstrate", "demonstrates",
    "demonstrated", "result", "results", "experiment", "experiments", "experimental",
    "evaluation", "evaluate", "evaluated", "performance", "model", "models", "algorithm",
    "algorithms", "data", "dataset", "datasets", "learning", "learn", "learned", "training",
    "train", "test", "testing", "tested", "validation", "validate", "validated",
];

/// Which built-in stop-word list to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopWordPreset {
    #[default]
    Basic,
    Extended,
    /// Basic plus the full English list from the stop-words crate
    English,
}

impl FromStr for StopWordPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "extended" => Ok(Self::Extended),
            "english" => Ok(Self::English),
            other => Err(format!(
                "unknown stop-word preset {other:?} (expected basic, extended, or english)"
            )),
        }
    }
}

impl fmt::Display for StopWordPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Basic => "basic",
            Self::Extended => "extended",
            Self::English => "english",
        };
        f.write_str(name)
    }
}

/// An immutable set of lowercase stop-words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    pub fn from_preset(preset: StopWordPreset) -> Self {
        match preset {
            StopWordPreset::Basic => Self::basic(),
            StopWordPreset::Extended => Self::extended(),
            StopWordPreset::English => Self::english(),
        }
    }

    pub fn basic() -> Self {
        Self::from_words(BASIC.iter().copied())
    }

    pub fn extended() -> Self {
        Self::from_words(BASIC.iter().chain(EXTENDED_EXTRA).copied())
    }

    pub fn english() -> Self {
        let english: Vec<String> = get(LANGUAGE::English);
        let mut words = Self::basic().words;
        words.extend(english.into_iter().map(|w| w.to_lowercase()));
        Self { words }
    }

    /// Build a custom set. Words are lowercased on the way in.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// `word` must already be lowercase.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopWords {
    fn default() -> Self {
        Self::basic()
    }
}
