// PDF downloader.
//
// Each paper is saved as `{dir}/{id}_{title}.pdf`. A file already at that
// path counts as done and is never fetched again. Failures are per file: the
// batch logs them and moves on. Bytes are written in one go with no temp
// file, so a failed write can leave a partial PDF behind.

use std::path::{Path, PathBuf};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::arxiv::client::PageFetcher;
use crate::arxiv::rate_limit::RequestGate;
use crate::error::DownloadError;
use crate::models::PaperRecord;

/// Longest title fragment kept in a file name, in characters.
const MAX_TITLE_CHARS: usize = 100;

/// What happened to one paper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadStatus {
    Downloaded { bytes: usize },
    AlreadyPresent,
}

/// Totals for a batch download.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Strip everything but word characters, whitespace, and hyphens, then cap the length.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace() || *c == '-')
        .take(MAX_TITLE_CHARS)
        .collect()
}

/// Where a paper's PDF lands inside `dir`.
///
/// Old-style identifiers contain a slash (`hep-th/9901001`); it becomes an
/// underscore so the file stays directly inside `dir`.
pub fn target_path(record: &PaperRecord, dir: &Path) -> PathBuf {
    let id = record.id.replace('/', "_");
    dir.join(format!("{}_{}.pdf", id, sanitize_title(&record.title)))
}

pub struct Downloader<'a> {
    fetcher: &'a dyn PageFetcher,
    gate: RequestGate,
    timeout: Duration,
}

impl<'a> Downloader<'a> {
    /// `timeout` applies to each PDF fetch and should be longer than the listing timeout.
    pub fn new(fetcher: &'a dyn PageFetcher, gate: RequestGate, timeout: Duration) -> Self {
        Self {
            fetcher,
            gate,
            timeout,
        }
    }

    /// Download one paper, reporting the failure instead of logging it.
    pub async fn try_download(
        &self,
        record: &PaperRecord,
        dir: &Path,
    ) -> Result<DownloadStatus, DownloadError> {
        let path = target_path(record, dir);
        if path.exists() {
            info!(path = %path.display(), "File already exists, skipping");
            return Ok(DownloadStatus::AlreadyPresent);
        }

        std::fs::create_dir_all(dir).map_err(|source| DownloadError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        self.gate.acquire().await;
        info!(id = %record.id, title = %record.title, "Downloading PDF");
        let bytes = self.fetcher.fetch(&record.pdf_url, self.timeout).await?;

        std::fs::write(&path, &bytes).map_err(|source| DownloadError::Io {
            path: path.clone(),
            source,
        })?;

        info!(path = %path.display(), bytes = bytes.len(), "Download complete");
        Ok(DownloadStatus::Downloaded { bytes: bytes.len() })
    }

    /// Download one paper. Returns true when the PDF is on disk afterwards.
    pub async fn download(&self, record: &PaperRecord, dir: &Path) -> bool {
        if record.pdf_url.is_empty() {
            warn!(id = %record.id, "Paper has no PDF URL");
            return false;
        }

        match self.try_download(record, dir).await {
            Ok(_) => true,
            Err(e) => {
                warn!(id = %record.id, error = %e, "Download failed");
                false
            }
        }
    }

    /// Download the first `max_downloads` papers (all when `None`), one at a time.
    pub async fn download_batch(
        &self,
        records: &[PaperRecord],
        dir: &Path,
        max_downloads: Option<usize>,
    ) -> DownloadSummary {
        let batch = match max_downloads {
            Some(max) => &records[..records.len().min(max)],
            None => records,
        };

        info!(count = batch.len(), dir = %dir.display(), "Starting batch download");

        let pb = ProgressBar::new(batch.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("valid template")
                .progress_chars("=> "),
        );

        let mut summary = DownloadSummary::default();
        for record in batch {
            pb.set_message(record.id.clone());
            summary.attempted += 1;
            if self.download(record, dir).await {
                summary.succeeded += 1;
            } else {
                summary.failed += 1;
            }
            pb.inc(1);
        }
        pb.finish_and_clear();

        info!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Batch download finished"
        );
        summary
    }
}
