use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use arxiv_harvest::arxiv::client::ArxivClient;
use arxiv_harvest::arxiv::listing::ListingParser;
use arxiv_harvest::arxiv::rate_limit::RequestGate;
use arxiv_harvest::config::Config;
use arxiv_harvest::download::Downloader;
use arxiv_harvest::models::{MultiCategoryReport, PaperRecord};
use arxiv_harvest::output::{json, terminal};
use arxiv_harvest::pipeline::crawl::{CategoryCrawl, CrawlSettings, Crawler};
use arxiv_harvest::topics::frequency::FrequencyExtractor;
use arxiv_harvest::topics::stopwords::{StopWordPreset, StopWords};
use arxiv_harvest::topics::traits::TermExtractor;

/// arxiv-harvest: crawl recent arXiv listings.
///
/// Fetches listing pages for one or more categories, extracts paper
/// metadata, prints keyword statistics, and optionally downloads PDFs.
#[derive(Parser)]
#[command(name = "arxiv-harvest", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Crawl categories, save the records, and print keyword statistics
    Crawl(CrawlArgs),

    /// List common category codes
    Categories,

    /// Print keyword statistics for a previously saved results file
    Keywords {
        /// JSON file written by `crawl`
        file: PathBuf,

        /// Number of keywords to show (default: 20)
        #[arg(short, long, default_value = "20")]
        keywords: usize,

        /// Stop-word list: basic, extended, or english
        #[arg(long, default_value = "basic")]
        stop_words: StopWordPreset,
    },
}

#[derive(Args)]
struct CrawlArgs {
    /// Category codes to crawl (e.g. cs.AI cs.CV)
    #[arg(short = 'c', long = "category", num_args = 1.., default_value = "cs.AI")]
    categories: Vec<String>,

    /// Maximum papers in total, split evenly across categories (default: 50)
    #[arg(short = 'n', long, default_value = "50")]
    max_papers: usize,

    /// Download PDFs after crawling
    #[arg(short, long)]
    download: bool,

    /// Directory for downloaded PDFs
    #[arg(long, default_value = "papers")]
    download_dir: PathBuf,

    /// Download at most this many PDFs
    #[arg(long)]
    max_downloads: Option<usize>,

    /// Number of keywords to show (default: 20)
    #[arg(short, long, default_value = "20")]
    keywords: usize,

    /// Seconds between requests (overrides ARXIV_DELAY_SECS)
    #[arg(long)]
    delay: Option<f64>,

    /// Listing page to start from (0 is the newest)
    #[arg(long, default_value = "0")]
    start_page: usize,

    /// Where to save the records (default depends on the number of categories)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Stop-word list for keyword statistics: basic, extended, or english
    #[arg(long, default_value = "basic")]
    stop_words: StopWordPreset,

    #[command(flatten)]
    wordcloud: WordCloudArgs,
}

#[derive(Args)]
struct WordCloudArgs {
    /// Render a word cloud of titles and abstracts
    #[arg(short = 'w', long = "wordcloud")]
    enabled: bool,

    /// Word cloud output file (default: wordcloud.<renderer extension>)
    #[arg(long = "wordcloud-file")]
    file: Option<PathBuf>,

    /// Most words drawn in the cloud (default: 100)
    #[arg(long, default_value = "100")]
    max_words: usize,

    #[arg(long = "wordcloud-width", default_value = "800")]
    width: u32,

    #[arg(long = "wordcloud-height", default_value = "400")]
    height: u32,

    /// Stop-word list for the cloud: basic, extended, or english
    #[arg(long = "wordcloud-stop-words", default_value = "extended")]
    stop_words: StopWordPreset,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("arxiv_harvest=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Crawl(args) => run_crawl(args).await?,

        Commands::Categories => terminal::display_categories(),

        Commands::Keywords {
            file,
            keywords,
            stop_words,
        } => {
            let papers = json::load_papers(&file)?;
            println!("Loaded {} papers from {}", papers.len(), file.display());
            let extractor = FrequencyExtractor::new(StopWords::from_preset(stop_words));
            terminal::display_keywords(&extractor.extract(&papers, keywords));
        }
    }

    Ok(())
}

async fn run_crawl(args: CrawlArgs) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(delay) = args.delay {
        config = config.with_delay_secs(delay)?;
    }

    let client = ArxivClient::new(&config.user_agent)?;
    let parser = ListingParser::new(&config.base_url);
    let gate = RequestGate::new(config.request_delay);
    let crawler = Crawler::new(
        &client,
        &parser,
        gate.clone(),
        CrawlSettings::from_config(&config, args.start_page),
    );

    let single = args.categories.len() == 1;
    let crawls: Vec<CategoryCrawl> = if single {
        vec![
            crawler
                .crawl_category(&args.categories[0], args.max_papers)
                .await,
        ]
    } else {
        crawler
            .crawl_categories(&args.categories, args.max_papers)
            .await
    };

    terminal::display_crawl_summary(&crawls);

    let results: Vec<_> = crawls.into_iter().map(|c| c.result).collect();
    let all_papers: Vec<PaperRecord> = results
        .iter()
        .flat_map(|r| r.papers.iter().cloned())
        .collect();

    if all_papers.is_empty() {
        anyhow::bail!("No papers were retrieved");
    }
    info!(count = all_papers.len(), "Collected papers");

    if single {
        let path = args
            .output
            .unwrap_or_else(|| PathBuf::from("papers_info.json"));
        json::save_papers(&path, &all_papers)?;
        println!("Paper records saved to: {}", path.display());
    } else {
        let path = args
            .output
            .unwrap_or_else(|| PathBuf::from("multi_category_papers.json"));
        let report = MultiCategoryReport::new(&args.categories, &results);
        json::save_report(&path, &report)?;
        println!("Multi-category report saved to: {}", path.display());
    }

    let extractor = FrequencyExtractor::new(StopWords::from_preset(args.stop_words));
    terminal::display_keywords(&extractor.extract(&all_papers, args.keywords));

    if args.wordcloud.enabled {
        render_wordcloud(&args.wordcloud, &all_papers);
    }

    if args.download {
        let downloader = Downloader::new(&client, gate, config.download_timeout);
        let summary = downloader
            .download_batch(&all_papers, &args.download_dir, args.max_downloads)
            .await;
        terminal::display_download_summary(&summary);
    }

    Ok(())
}

/// Render and save the word cloud. Failure is reported, not fatal.
#[cfg(feature = "wordcloud")]
fn render_wordcloud(args: &WordCloudArgs, papers: &[PaperRecord]) {
    use arxiv_harvest::wordcloud::svg::SvgWordCloud;
    use arxiv_harvest::wordcloud::traits::CloudRenderer;
    use tracing::warn;

    let tokens = FrequencyExtractor::new(StopWords::from_preset(args.stop_words)).tokens(papers);
    let renderer = SvgWordCloud {
        width: args.width,
        height: args.height,
        max_words: args.max_words,
    };

    let path = args
        .file
        .clone()
        .unwrap_or_else(|| PathBuf::from(renderer.default_file_name()));
    let result = renderer
        .render(&tokens)
        .and_then(|bytes| write_image(&path, &bytes));

    match result {
        Ok(()) => println!("\n{} {}", "Word cloud saved to:".bold(), path.display()),
        Err(e) => {
            warn!(error = %e, "Word cloud generation failed");
            println!("\n{} {}", "Word cloud failed:".yellow(), e);
        }
    }
}

#[cfg(feature = "wordcloud")]
fn write_image(path: &std::path::Path, bytes: &[u8]) -> Result<()> {
    use anyhow::Context;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(not(feature = "wordcloud"))]
fn render_wordcloud(_args: &WordCloudArgs, _papers: &[PaperRecord]) {
    println!(
        "\n{}",
        "Word cloud skipped: built without the `wordcloud` feature.".yellow()
    );
}
