// Colored terminal output for crawl summaries and keyword tables.
//
// This module handles all terminal-specific formatting. The main.rs command
// handlers delegate here.

use colored::Colorize;

use crate::categories::{category_name, COMMON_CATEGORIES};
use crate::download::DownloadSummary;
use crate::pipeline::crawl::{CategoryCrawl, StopReason};

/// Display the ranked keyword table.
pub fn display_keywords(keywords: &[(String, usize)]) {
    if keywords.is_empty() {
        println!("No keywords found.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Keywords ({} terms) ===", keywords.len()).bold()
    );
    println!();

    let widest = keywords[0].1;
    for (i, (term, count)) in keywords.iter().enumerate() {
        let bar_len = if widest > 0 { count * 30 / widest } else { 0 };
        println!(
            "  {:>3}. {:<24} {:>5}  {}",
            i + 1,
            term,
            count,
            "#".repeat(bar_len.max(1)).cyan()
        );
    }
}

/// Display per-category crawl outcomes.
pub fn display_crawl_summary(crawls: &[CategoryCrawl]) {
    println!("\n{}", "=== Crawl Summary ===".bold());
    println!();

    for crawl in crawls {
        let category = &crawl.result.category;
        let stop = match &crawl.stop {
            StopReason::BudgetReached => "target reached".green().to_string(),
            StopReason::NoResults => "no more results".normal().to_string(),
            StopReason::LastPage => "last page".normal().to_string(),
            StopReason::FetchFailed(e) => {
                format!("fetch failed: {}", super::truncate_chars(e, 80)).yellow().to_string()
            }
        };
        println!(
            "  {:<16} {:<40} {:>5} papers  ({} pages, {})",
            category,
            category_name(category).dimmed(),
            crawl.result.len(),
            crawl.pages_fetched,
            stop
        );
    }

    let total: usize = crawls.iter().map(|c| c.result.len()).sum();
    println!("\n  Total papers: {}", total.to_string().bold());
}

/// Display the outcome of a batch download.
pub fn display_download_summary(summary: &DownloadSummary) {
    println!(
        "\n{} {}/{} papers",
        "Downloaded:".bold(),
        summary.succeeded,
        summary.attempted
    );
    if summary.failed > 0 {
        println!("  {} {} downloads failed (see log)", "!".yellow(), summary.failed);
    }
}

/// Display the catalogue of common categories.
pub fn display_categories() {
    println!("\n{}", "=== Common arXiv Categories ===".bold());
    println!();
    for (code, name) in COMMON_CATEGORIES {
        println!("  {:<16} {}", code.cyan(), name);
    }
}
