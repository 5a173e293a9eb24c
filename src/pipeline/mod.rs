// Crawl orchestration: the paging loop over listing pages.

pub mod crawl;
