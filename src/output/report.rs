use crate::robots::DisallowedPathSet;
use crate::state::{OutcomeTally, VisitedMap};
use crate::url::CrawlTarget;
use chrono::{DateTime, Duration, Utc};

/// Everything one crawl session produced
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Normalized seed URL
    pub seed: CrawlTarget,

    /// Host the crawl was scoped to
    pub domain: String,

    /// Depth limit the session ran with
    pub max_depth: u32,

    /// robots.txt policy in effect (empty if it could not be loaded)
    pub policy: DisallowedPathSet,

    /// Visited URL → extracted text, in first-visit order
    pub visited: VisitedMap,

    /// Per-outcome counters
    pub outcomes: OutcomeTally,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CrawlReport {
    /// Wall-clock duration of the session
    pub fn duration(&self) -> Duration {
        self.finished_at - self.started_at
    }
}
