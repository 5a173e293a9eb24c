// Listing page parser.
//
// An arXiv "recent" listing is one or more <dl> blocks. Each entry is a
// <dt> carrying the identifier links followed by a <dd> carrying the
// metadata block. Entries are paired by position within each <dl>; if the
// counts differ, the extras on the longer side are dropped.
//
// Extraction is best-effort per entry. An entry without an identifier is
// skipped; any other missing field just comes back empty.

use regex_lite::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::arxiv::urls;
use crate::models::PaperRecord;

const ID_LABEL: &str = "arXiv:";
const TITLE_LABEL: &str = "Title:";

/// Why a term/description pair produced no record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No anchor pointing at an abstract page
    NoAbstractLink,
    /// The abstract link was there but its text was empty after stripping the label
    EmptyIdentifier,
}

/// The result of extracting one term/description pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairOutcome {
    Record(PaperRecord),
    Skipped(SkipReason),
}

impl PairOutcome {
    pub fn into_record(self) -> Option<PaperRecord> {
        match self {
            PairOutcome::Record(record) => Some(record),
            PairOutcome::Skipped(_) => None,
        }
    }
}

struct Selectors {
    definition_list: Selector,
    term: Selector,
    description: Selector,
    abstract_link: Selector,
    meta: Selector,
    title: Selector,
    author_block: Selector,
    author_link: Selector,
    abstract_paragraph: Selector,
    dateline: Selector,
}

impl Selectors {
    fn new() -> Self {
        // All selectors are constants, so a parse failure is a programming error.
        let parse = |css: &str| Selector::parse(css).expect("valid listing selector");
        Self {
            definition_list: parse("dl"),
            term: parse("dt"),
            description: parse("dd"),
            abstract_link: parse(r#"a[href*="/abs/"]"#),
            meta: parse("div.meta"),
            title: parse("div.list-title"),
            author_block: parse("div.list-authors"),
            author_link: parse("a"),
            abstract_paragraph: parse("p.mathjax"),
            dateline: parse("div.list-dateline"),
        }
    }
}

/// Turns listing page HTML into paper records.
pub struct ListingParser {
    base_url: String,
    selectors: Selectors,
    date_pattern: Regex,
}

impl ListingParser {
    /// `base_url` is used to derive each record's PDF URL.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            selectors: Selectors::new(),
            date_pattern: Regex::new(r"\d{4}-\d{2}-\d{2}").expect("valid date pattern"),
        }
    }

    /// Parse a listing page body. Invalid UTF-8 is replaced, not rejected.
    pub fn parse_bytes(&self, body: &[u8]) -> Vec<PaperRecord> {
        self.parse(&String::from_utf8_lossy(body))
    }

    /// Parse a listing page into records, in document order.
    pub fn parse(&self, html: &str) -> Vec<PaperRecord> {
        self.parse_outcomes(html)
            .into_iter()
            .filter_map(PairOutcome::into_record)
            .collect()
    }

    /// Parse a listing page, keeping the skipped pairs visible.
    pub fn parse_outcomes(&self, html: &str) -> Vec<PairOutcome> {
        let document = Html::parse_document(html);
        let mut outcomes = Vec::new();

        for list in document.select(&self.selectors.definition_list) {
            let terms = list.select(&self.selectors.term);
            let descriptions = list.select(&self.selectors.description);

            for (term, description) in terms.zip(descriptions) {
                let outcome = self.extract_pair(term, description);
                if let PairOutcome::Skipped(reason) = &outcome {
                    debug!(reason = ?reason, "Skipping listing entry");
                }
                outcomes.push(outcome);
            }
        }

        outcomes
    }

    fn extract_pair(&self, term: ElementRef<'_>, description: ElementRef<'_>) -> PairOutcome {
        let Some(link) = term.select(&self.selectors.abstract_link).next() else {
            return PairOutcome::Skipped(SkipReason::NoAbstractLink);
        };

        let id = element_text(link)
            .trim()
            .replace(ID_LABEL, "")
            .trim()
            .to_string();
        if id.is_empty() {
            return PairOutcome::Skipped(SkipReason::EmptyIdentifier);
        }

        let pdf_url = urls::pdf_url(&self.base_url, &id);

        let Some(meta) = description.select(&self.selectors.meta).next() else {
            return PairOutcome::Record(PaperRecord {
                id,
                title: String::new(),
                authors: Vec::new(),
                abstract_text: String::new(),
                submitted_date: String::new(),
                pdf_url,
            });
        };

        let title = meta
            .select(&self.selectors.title)
            .next()
            .map(|el| collapse_whitespace(&element_text(el).replace(TITLE_LABEL, "")))
            .unwrap_or_default();

        // Only the first author block counts
        let authors = meta
            .select(&self.selectors.author_block)
            .next()
            .map(|block| {
                block
                    .select(&self.selectors.author_link)
                    .map(|a| element_text(a).trim().to_string())
                    .collect()
            })
            .unwrap_or_default();

        let abstract_text = meta
            .select(&self.selectors.abstract_paragraph)
            .next()
            .map(|p| collapse_whitespace(&element_text(p)))
            .unwrap_or_default();

        let submitted_date = meta
            .select(&self.selectors.dateline)
            .next()
            .map(|el| self.extract_date(&element_text(el)))
            .unwrap_or_default();

        PairOutcome::Record(PaperRecord {
            id,
            title,
            authors,
            abstract_text,
            submitted_date,
            pdf_url,
        })
    }

    /// First `YYYY-MM-DD` substring of a dateline, or empty.
    pub fn extract_date(&self, dateline: &str) -> String {
        self.date_pattern
            .find(dateline)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Collapse runs of whitespace (spaces, tabs, newlines) into single spaces and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
