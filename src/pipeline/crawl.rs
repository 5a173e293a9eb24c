// Listing crawl loop: fetch pages for a category until there is nothing
// left or the paper budget is met.
//
// The loop stops when any of these happen:
//   - the accumulated count reaches the budget
//   - a page parses to zero records
//   - a page parses to fewer records than a full page
//   - a fetch fails (records gathered so far are kept, nothing is retried)
//
// The result is truncated to the budget, so a final full page that overshoots
// never leaks extra records.

use std::time::Duration;

use tracing::{info, warn};

use crate::arxiv::client::PageFetcher;
use crate::arxiv::listing::ListingParser;
use crate::arxiv::rate_limit::RequestGate;
use crate::arxiv::urls;
use crate::config::Config;
use crate::models::{CategoryCrawlResult, PaperRecord};

/// Knobs for the paging loop.
#[derive(Debug, Clone)]
pub struct CrawlSettings {
    pub base_url: String,
    /// Entries on a full listing page
    pub page_size: usize,
    pub listing_timeout: Duration,
    /// Page index to start from (0 is the newest page)
    pub start_page: usize,
}

impl CrawlSettings {
    pub fn from_config(config: &Config, start_page: usize) -> Self {
        Self {
            base_url: config.base_url.clone(),
            page_size: config.page_size,
            listing_timeout: config.listing_timeout,
            start_page,
        }
    }
}

/// Why a category crawl ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// Collected at least the requested number of records
    BudgetReached,
    /// A page contained no records
    NoResults,
    /// A page held fewer records than a full page
    LastPage,
    /// A listing fetch failed; the message is the error text
    FetchFailed(String),
}

/// A finished category crawl.
#[derive(Debug, Clone)]
pub struct CategoryCrawl {
    pub result: CategoryCrawlResult,
    pub stop: StopReason,
    pub pages_fetched: usize,
}

enum CrawlState {
    Running { page_index: usize },
    Done(StopReason),
}

/// Drives fetcher and parser through the listing pages of one or more categories.
pub struct Crawler<'a> {
    fetcher: &'a dyn PageFetcher,
    parser: &'a ListingParser,
    gate: RequestGate,
    settings: CrawlSettings,
}

impl<'a> Crawler<'a> {
    pub fn new(
        fetcher: &'a dyn PageFetcher,
        parser: &'a ListingParser,
        gate: RequestGate,
        settings: CrawlSettings,
    ) -> Self {
        Self {
            fetcher,
            parser,
            gate,
            settings,
        }
    }

    /// Crawl one category until `max_papers` are collected or the listing runs out.
    pub async fn crawl_category(&self, category: &str, max_papers: usize) -> CategoryCrawl {
        info!(category = category, target = max_papers, "Starting category crawl");

        let page_size = self.settings.page_size;
        let mut papers: Vec<PaperRecord> = Vec::new();
        let mut pages_fetched = 0;
        let mut state = CrawlState::Running {
            page_index: self.settings.start_page,
        };

        let stop = loop {
            let page_index = match state {
                CrawlState::Done(reason) => break reason,
                CrawlState::Running { page_index } => page_index,
            };

            if papers.len() >= max_papers {
                state = CrawlState::Done(StopReason::BudgetReached);
                continue;
            }

            let url = urls::listing_url(&self.settings.base_url, category, page_index, page_size);
            info!(page = page_index + 1, url = %url, "Fetching listing page");

            self.gate.acquire().await;
            let body = match self.fetcher.fetch(&url, self.settings.listing_timeout).await {
                Ok(body) => body,
                Err(e) => {
                    warn!(category = category, error = %e, "Listing fetch failed, ending crawl");
                    state = CrawlState::Done(StopReason::FetchFailed(e.to_string()));
                    continue;
                }
            };
            pages_fetched += 1;

            let page = self.parser.parse_bytes(&body);
            if page.is_empty() {
                info!(category = category, "No more papers on listing");
                state = CrawlState::Done(StopReason::NoResults);
                continue;
            }

            let page_len = page.len();
            papers.extend(page);
            info!(
                page = page_index + 1,
                page_papers = page_len,
                total = papers.len(),
                "Parsed listing page"
            );

            state = if page_len < page_size {
                info!(category = category, "Reached last listing page");
                CrawlState::Done(StopReason::LastPage)
            } else {
                CrawlState::Running {
                    page_index: page_index + 1,
                }
            };
        };

        papers.truncate(max_papers);

        info!(
            category = category,
            count = papers.len(),
            pages = pages_fetched,
            stop = ?stop,
            "Category crawl finished"
        );

        CategoryCrawl {
            result: CategoryCrawlResult {
                category: category.to_string(),
                papers,
            },
            stop,
            pages_fetched,
        }
    }

    /// Crawl several categories in order, splitting `max_papers` evenly between them.
    ///
    /// Each category gets `max_papers / categories.len()` (at least 1) and runs
    /// its own paging loop. A failed category does not stop the others.
    pub async fn crawl_categories(
        &self,
        categories: &[String],
        max_papers: usize,
    ) -> Vec<CategoryCrawl> {
        if categories.is_empty() {
            return Vec::new();
        }

        let budget = per_category_budget(max_papers, categories.len());
        let mut crawls = Vec::with_capacity(categories.len());

        for (i, category) in categories.iter().enumerate() {
            info!(
                "[{}/{}] Crawling category {} (target {})",
                i + 1,
                categories.len(),
                category,
                budget
            );
            let crawl = self.crawl_category(category, budget).await;
            if crawl.result.is_empty() {
                warn!(category = %category, "Category returned no papers");
            }
            crawls.push(crawl);
        }

        crawls
    }
}

/// Per-category share of a total budget, floored, never below 1.
pub fn per_category_budget(max_papers: usize, categories: usize) -> usize {
    (max_papers / categories.max(1)).max(1)
}
