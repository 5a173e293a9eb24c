// Downloader and HTTP client tests.
//
// The downloader runs against a counting fake fetcher and a temp directory.
// The reqwest-backed ArxivClient runs against a local wiremock server.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use arxiv_harvest::arxiv::client::{ArxivClient, PageFetcher};
use arxiv_harvest::arxiv::rate_limit::RequestGate;
use arxiv_harvest::download::{target_path, DownloadStatus, Downloader};
use arxiv_harvest::error::{DownloadError, FetchError};
use arxiv_harvest::models::PaperRecord;

const PDF_BYTES: &[u8] = b"%PDF-1.7\n%fake\n";

/// Serves PDF_BYTES for every URL except those containing "broken".
struct CountingFetcher {
    calls: AtomicUsize,
}

impl CountingFetcher {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for CountingFetcher {
    async fn fetch(&self, url: &str, _timeout: Duration) -> Result<Vec<u8>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if url.contains("broken") {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: 500,
            });
        }
        Ok(PDF_BYTES.to_vec())
    }
}

fn record(id: &str, title: &str) -> PaperRecord {
    PaperRecord {
        id: id.to_string(),
        title: title.to_string(),
        authors: vec!["Ada Lovelace".to_string()],
        abstract_text: String::new(),
        submitted_date: "2024-03-14".to_string(),
        pdf_url: format!("https://arxiv.test/pdf/{id}.pdf"),
    }
}

fn downloader(fetcher: &CountingFetcher) -> Downloader<'_> {
    Downloader::new(fetcher, RequestGate::new(Duration::ZERO), Duration::from_secs(60))
}

// ============================================================
// Downloader
// ============================================================

#[tokio::test]
async fn second_download_short_circuits_on_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = CountingFetcher::new();
    let downloader = downloader(&fetcher);
    let paper = record("2403.01234", "Sparse Attention: A Survey");

    assert!(downloader.download(&paper, dir.path()).await);
    assert!(downloader.download(&paper, dir.path()).await);

    assert_eq!(fetcher.calls(), 1);
    let saved = std::fs::read(target_path(&paper, dir.path())).unwrap();
    assert_eq!(saved, PDF_BYTES);
}

#[tokio::test]
async fn try_download_reports_status() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = CountingFetcher::new();
    let downloader = downloader(&fetcher);
    let paper = record("2403.01235", "Graphs");

    let first = downloader.try_download(&paper, dir.path()).await.unwrap();
    assert_eq!(first, DownloadStatus::Downloaded { bytes: PDF_BYTES.len() });
    let second = downloader.try_download(&paper, dir.path()).await.unwrap();
    assert_eq!(second, DownloadStatus::AlreadyPresent);
}

#[tokio::test]
async fn creates_missing_target_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("papers").join("cs.AI");
    let fetcher = CountingFetcher::new();

    assert!(downloader(&fetcher).download(&record("2403.01236", "Nested"), &nested).await);
    assert!(nested.join("2403.01236_Nested.pdf").exists());
}

#[tokio::test]
async fn failed_fetch_returns_false_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = CountingFetcher::new();
    let mut paper = record("2403.01237", "Broken");
    paper.pdf_url = "https://arxiv.test/pdf/broken.pdf".to_string();

    let downloader = downloader(&fetcher);
    assert!(!downloader.download(&paper, dir.path()).await);
    assert!(!target_path(&paper, dir.path()).exists());

    let err = downloader.try_download(&paper, dir.path()).await.unwrap_err();
    assert!(matches!(err, DownloadError::Fetch(FetchError::Status { status: 500, .. })));
}

#[tokio::test]
async fn record_without_pdf_url_is_not_fetched() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = CountingFetcher::new();
    let mut paper = record("2403.01238", "No Link");
    paper.pdf_url.clear();

    assert!(!downloader(&fetcher).download(&paper, dir.path()).await);
    assert_eq!(fetcher.calls(), 0);
}

#[tokio::test]
async fn batch_continues_past_failures() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = CountingFetcher::new();
    let mut broken = record("2403.00002", "Two");
    broken.pdf_url = "https://arxiv.test/pdf/broken.pdf".to_string();
    let papers = vec![record("2403.00001", "One"), broken, record("2403.00003", "Three")];

    let summary = downloader(&fetcher)
        .download_batch(&papers, dir.path(), None)
        .await;

    assert_eq!(summary.attempted, 3);
    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failed, 1);
    assert!(dir.path().join("2403.00003_Three.pdf").exists());
}

#[tokio::test]
async fn batch_honours_max_downloads() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = CountingFetcher::new();
    let papers: Vec<PaperRecord> = (1..=5)
        .map(|n| record(&format!("2403.0000{n}"), "Capped"))
        .collect();

    let summary = downloader(&fetcher)
        .download_batch(&papers, dir.path(), Some(2))
        .await;

    assert_eq!(summary.attempted, 2);
    assert_eq!(fetcher.calls(), 2);
}

// ============================================================
// ArxivClient over HTTP
// ============================================================

#[tokio::test]
async fn client_sends_user_agent_and_returns_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/list/cs.AI/recent"))
        .and(header("user-agent", "arxiv-harvest-test/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .expect(1)
        .mount(&server)
        .await;

    let client = ArxivClient::new("arxiv-harvest-test/1.0").unwrap();
    let body = client
        .fetch(&format!("{}/list/cs.AI/recent", server.uri()), Duration::from_secs(5))
        .await
        .unwrap();

    assert_eq!(body, b"<html></html>");
}

#[tokio::test]
async fn client_maps_error_status_to_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pdf/2403.00001.pdf"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = ArxivClient::new("arxiv-harvest-test/1.0").unwrap();
    let url = format!("{}/pdf/2403.00001.pdf", server.uri());
    let err = client.fetch(&url, Duration::from_secs(5)).await.unwrap_err();

    assert!(matches!(err, FetchError::Status { status: 404, .. }));
    assert_eq!(err.url(), url);
}

#[tokio::test]
async fn client_times_out_slow_responses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let client = ArxivClient::new("arxiv-harvest-test/1.0").unwrap();
    let err = client
        .fetch(&format!("{}/slow", server.uri()), Duration::from_millis(200))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Request { .. } | FetchError::Body { .. }));
}

#[tokio::test]
async fn downloader_over_http_fetches_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pdf/2403.04321.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(PDF_BYTES))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let client = ArxivClient::new("arxiv-harvest-test/1.0").unwrap();
    let downloader = Downloader::new(&client, RequestGate::new(Duration::ZERO), Duration::from_secs(5));
    let mut paper = record("2403.04321", "Over the Wire");
    paper.pdf_url = format!("{}/pdf/2403.04321.pdf", server.uri());

    assert!(downloader.download(&paper, dir.path()).await);
    assert!(downloader.download(&paper, dir.path()).await);
    // MockServer verifies expect(1) on drop
}
