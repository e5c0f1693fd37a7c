//! Depth-bounded, same-host crawl traversal
//!
//! The traversal is a depth-first walk of the link graph rooted at the seed.
//! It runs on an explicit worklist instead of async recursion; children are
//! pushed in reverse document order so pages are visited in the same order a
//! recursive walk would visit them.
//!
//! Each candidate popped off the worklist goes through these gates, in order:
//! 1. depth greater than the limit → dropped
//! 2. already visited (or already failed) → dropped
//! 3. path matches a robots.txt disallow prefix → dropped, logged as a policy skip
//! 4. fetch; a failure is logged and ends this branch only
//! 5. text recorded in the visited map, same-host links pushed at `depth + 1`

use crate::crawler::fetcher::fetch_page;
use crate::crawler::parser::parse_html;
use crate::robots::DisallowedPathSet;
use crate::state::{OutcomeTally, PageOutcome, VisitedMap};
use crate::url::{hosts_match, CrawlTarget};
use reqwest::Client;
use std::collections::HashSet;

/// A candidate URL with the depth it was discovered at
#[derive(Debug, Clone)]
struct Frame {
    url: CrawlTarget,
    depth: u32,
}

/// Runs crawl traversals with one HTTP client and depth limit
pub struct Traverser<'a> {
    client: &'a Client,
    max_depth: u32,
    /// URLs whose fetch already failed this session; never retried
    failed: HashSet<CrawlTarget>,
    outcomes: OutcomeTally,
}

impl<'a> Traverser<'a> {
    /// Creates a traverser
    ///
    /// # Arguments
    ///
    /// * `client` - The HTTP client used for every page fetch
    /// * `max_depth` - Deepest depth that is still fetched (the seed is depth 0)
    pub fn new(client: &'a Client, max_depth: u32) -> Self {
        Self {
            client,
            max_depth,
            failed: HashSet::new(),
            outcomes: OutcomeTally::new(),
        }
    }

    /// Outcome counts for everything this traverser has considered so far
    pub fn outcomes(&self) -> &OutcomeTally {
        &self.outcomes
    }

    pub fn into_outcomes(self) -> OutcomeTally {
        self.outcomes
    }

    /// Crawls from `url`, recording every fetched page in `visited`
    ///
    /// Only links whose host equals `domain` exactly are followed. Nothing is
    /// returned and nothing fails: fetch errors and policy skips are logged
    /// and counted, and the walk continues with the remaining candidates.
    ///
    /// # Arguments
    ///
    /// * `url` - Where to start
    /// * `domain` - The only host the walk may enter
    /// * `depth` - Depth of `url` (0 for a seed)
    /// * `policy` - Paths that must not be fetched
    /// * `visited` - Accumulator shared across the whole session
    pub async fn crawl(
        &mut self,
        url: CrawlTarget,
        domain: &str,
        depth: u32,
        policy: &DisallowedPathSet,
        visited: &mut VisitedMap,
    ) {
        let mut worklist = vec![Frame { url, depth }];

        while let Some(frame) = worklist.pop() {
            let outcome = self.visit(&frame, policy, visited).await;
            self.outcomes.record(outcome.kind());

            let Visit::Fetched(links) = outcome else {
                continue;
            };

            let child_depth = frame.depth + 1;
            for link in links.into_iter().rev() {
                if hosts_match(&link, domain) {
                    worklist.push(Frame {
                        url: link,
                        depth: child_depth,
                    });
                } else {
                    tracing::trace!("Skipping off-host link {}", link);
                }
            }
        }
    }

    /// Applies the gates to one candidate and fetches it if they all pass
    async fn visit(
        &mut self,
        frame: &Frame,
        policy: &DisallowedPathSet,
        visited: &mut VisitedMap,
    ) -> Visit {
        if frame.depth > self.max_depth {
            tracing::trace!("Depth {} exceeds limit for {}", frame.depth, frame.url);
            return Visit::Skipped(PageOutcome::DepthExceeded);
        }

        if visited.contains(&frame.url) || self.failed.contains(&frame.url) {
            return Visit::Skipped(PageOutcome::Duplicate);
        }

        if let Some(prefix) = policy.disallows(frame.url.path()) {
            tracing::warn!(
                "URL is disallowed by robots.txt: {} (prefix {})",
                frame.url,
                prefix
            );
            return Visit::Skipped(PageOutcome::PolicySkipped);
        }

        let page = match fetch_page(self.client, &frame.url).await {
            Ok(page) => page,
            Err(e) => {
                tracing::error!("Failed to fetch {}: {}", e.url(), e);
                self.failed.insert(frame.url.clone());
                return Visit::Failed;
            }
        };

        tracing::debug!(
            "Fetched {} [depth {}, HTTP {}, {}]",
            frame.url,
            frame.depth,
            page.status_code,
            page.content_type.as_deref().unwrap_or("no content-type")
        );

        let parsed = parse_html(&page.body, &page.final_url);
        visited.insert(frame.url.clone(), parsed.text);

        Visit::Fetched(parsed.links)
    }
}

/// Result of visiting one candidate
enum Visit {
    Fetched(Vec<CrawlTarget>),
    Skipped(PageOutcome),
    Failed,
}

impl Visit {
    fn kind(&self) -> PageOutcome {
        match self {
            Self::Fetched(_) => PageOutcome::Visited,
            Self::Skipped(outcome) => *outcome,
            Self::Failed => PageOutcome::FetchFailed,
        }
    }
}
