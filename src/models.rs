// Paper records and the shapes they are persisted in.

use std::collections::BTreeMap;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// One paper as parsed from a listing page.
///
/// Only `id` is guaranteed non-empty. Every other field degrades to an empty
/// value when the listing markup is missing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperRecord {
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    /// `YYYY-MM-DD`, or empty when the dateline had no ISO date in it.
    pub submitted_date: String,
    pub pdf_url: String,
}

impl PaperRecord {
    /// Title and abstract joined by a single space, the text term extraction runs over.
    pub fn searchable_text(&self) -> String {
        format!("{} {}", self.title, self.abstract_text)
    }
}

/// Records for one category, in discovery order across pages.
///
/// No deduplication: an item re-listed on a later page appears twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCrawlResult {
    pub category: String,
    pub papers: Vec<PaperRecord>,
}

impl CategoryCrawlResult {
    pub fn len(&self) -> usize {
        self.papers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }
}

/// The JSON object written for a multi-category run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiCategoryReport {
    pub categories: Vec<String>,
    pub total_papers: usize,
    pub papers_per_category: BTreeMap<String, usize>,
    pub all_papers: Vec<PaperRecord>,
    pub category_papers: BTreeMap<String, Vec<PaperRecord>>,
    pub timestamp: DateTime<Local>,
}

impl MultiCategoryReport {
    /// Build the report from per-category results.
    ///
    /// `categories` is the requested list; categories that came back empty stay
    /// in it but are left out of the per-category maps.
    pub fn new(categories: &[String], results: &[CategoryCrawlResult]) -> Self {
        let mut papers_per_category = BTreeMap::new();
        let mut category_papers = BTreeMap::new();
        let mut all_papers = Vec::new();

        for result in results.iter().filter(|r| !r.is_empty()) {
            papers_per_category.insert(result.category.clone(), result.len());
            category_papers.insert(result.category.clone(), result.papers.clone());
            all_papers.extend(result.papers.iter().cloned());
        }

        Self {
            categories: categories.to_vec(),
            total_papers: all_papers.len(),
            papers_per_category,
            all_papers,
            category_papers,
            timestamp: Local::now(),
        }
    }
}
