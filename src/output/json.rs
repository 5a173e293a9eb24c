// JSON persistence for crawl results.
//
// A single-category run is saved as a plain array of records. A
// multi-category run is saved as a MultiCategoryReport object. Both can be
// read back for offline keyword extraction.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::{MultiCategoryReport, PaperRecord};

/// Either shape a saved results file can take.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SavedPapers {
    Multi(MultiCategoryReport),
    Single(Vec<PaperRecord>),
}

impl SavedPapers {
    /// Every record in the file, in saved order.
    pub fn into_papers(self) -> Vec<PaperRecord> {
        match self {
            SavedPapers::Multi(report) => report.all_papers,
            SavedPapers::Single(papers) => papers,
        }
    }
}

fn write_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    let json = serde_json::to_string_pretty(value).context("Failed to serialize results")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Write a single category's records as a JSON array.
pub fn save_papers(path: &Path, papers: &[PaperRecord]) -> Result<()> {
    write_pretty(path, &papers)?;
    info!(path = %path.display(), count = papers.len(), "Saved paper records");
    Ok(())
}

/// Write a multi-category report object.
pub fn save_report(path: &Path, report: &MultiCategoryReport) -> Result<()> {
    write_pretty(path, report)?;
    info!(
        path = %path.display(),
        categories = report.categories.len(),
        count = report.total_papers,
        "Saved multi-category report"
    );
    Ok(())
}

/// Read records back from a file written by `save_papers` or `save_report`.
pub fn load_papers(path: &Path) -> Result<Vec<PaperRecord>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let saved: SavedPapers = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a saved paper list or report", path.display()))?;
    Ok(saved.into_papers())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryCrawlResult;

    fn record(id: &str) -> PaperRecord {
        PaperRecord {
            id: id.to_string(),
            title: "Sparse Attention".to_string(),
            authors: vec!["Ada Lovelace".to_string()],
            abstract_text: "An abstract.".to_string(),
            submitted_date: "2024-03-14".to_string(),
            pdf_url: format!("https://arxiv.org/pdf/{id}.pdf"),
        }
    }

    #[test]
    fn test_single_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("papers_info.json");
        let papers = vec![record("1"), record("2")];

        save_papers(&path, &papers).unwrap();
        assert_eq!(load_papers(&path).unwrap(), papers);
    }

    #[test]
    fn test_report_file_loads_all_papers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("multi.json");
        let categories = vec!["cs.AI".to_string(), "cs.CV".to_string()];
        let results = vec![
            CategoryCrawlResult {
                category: "cs.AI".to_string(),
                papers: vec![record("1")],
            },
            CategoryCrawlResult {
                category: "cs.CV".to_string(),
                papers: vec![record("2"), record("3")],
            },
        ];
        let report = MultiCategoryReport::new(&categories, &results);

        save_report(&path, &report).unwrap();
        let loaded = load_papers(&path).unwrap();
        let ids: Vec<&str> = loaded.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_load_rejects_unrelated_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("other.json");
        std::fs::write(&path, r#"{"hello": "world"}"#).unwrap();
        assert!(load_papers(&path).is_err());
    }
}
