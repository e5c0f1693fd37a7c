//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching that ignores declared content types
//! - HTML text and link extraction
//! - The depth-bounded, same-host traversal
//! - The session entry point tying them to the robots.txt policy

mod fetcher;
mod parser;
mod traverser;

pub use fetcher::{build_http_client, fetch_page, user_agent_string, FetchedPage};
pub use parser::{parse_html, resolve_link, ParsedPage};
pub use traverser::Traverser;

use crate::config::Config;
use crate::output::CrawlReport;
use crate::robots::load_policy;
use crate::state::VisitedMap;
use crate::url::{authority, extract_host, normalize_url, CrawlTarget};
use crate::CrawlError;
use chrono::Utc;
use reqwest::Client;

/// Runs a complete crawl session
///
/// This is the main entry point for a crawl. It will:
/// 1. Normalize the seed URL (a malformed seed aborts before any fetch)
/// 2. Build the HTTP client
/// 3. Load the seed host's robots.txt once
/// 4. Walk the site up to `config.crawler.max_depth`
///
/// # Arguments
///
/// * `seed` - The raw seed URL
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - The visited map and session statistics
/// * `Err(CrawlError)` - The seed was malformed or the client could not be built
///
/// # Example
///
/// ```no_run
/// use sitewalk::config::Config;
/// use sitewalk::crawler::crawl_site;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = crawl_site("https://example.com/", &Config::default()).await?;
/// for (url, text) in report.visited.iter() {
///     println!("Key: {}, Value: {}", url, text);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn crawl_site(seed: &str, config: &Config) -> Result<CrawlReport, CrawlError> {
    let seed = normalize_url(seed)?;
    let client =
        build_http_client(&config.user_agent, &config.crawler).map_err(CrawlError::HttpClient)?;

    Ok(crawl_with_client(&client, seed, config.crawler.max_depth).await)
}

/// Runs a crawl session with an existing client
///
/// The robots.txt policy is loaded from the seed's scheme and authority
/// (host plus explicit port) and applies to the whole session.
pub async fn crawl_with_client(client: &Client, seed: CrawlTarget, max_depth: u32) -> CrawlReport {
    let started_at = Utc::now();
    let domain = extract_host(&seed);

    tracing::info!("Starting crawl of {} (domain {}, max depth {})", seed, domain, max_depth);

    let policy = load_policy(client, seed.scheme(), &authority(&seed)).await;

    let mut visited = VisitedMap::new();
    let mut traverser = Traverser::new(client, max_depth);
    traverser
        .crawl(seed.clone(), &domain, 0, &policy, &mut visited)
        .await;

    let report = CrawlReport {
        seed,
        domain,
        max_depth,
        policy,
        visited,
        outcomes: traverser.into_outcomes(),
        started_at,
        finished_at: Utc::now(),
    };

    tracing::info!(
        "Crawl completed: {} pages visited in {}ms",
        report.visited.len(),
        report.duration().num_milliseconds()
    );

    report
}
