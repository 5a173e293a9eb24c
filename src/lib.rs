// arxiv-harvest: crawl arXiv listings, extract paper metadata, count terms.
//
// This is the library root. Each module corresponds to one stage of the
// crawl-and-extract pipeline.

pub mod arxiv;
pub mod categories;
pub mod config;
pub mod download;
pub mod error;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod topics;

#[cfg(feature = "wordcloud")]
pub mod wordcloud;
