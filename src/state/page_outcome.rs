/// Page outcome definitions for a crawl session
///
/// Every candidate URL the traverser pops off its worklist ends in exactly one
/// of these outcomes.
use std::collections::HashMap;
use std::fmt;

/// What happened to a candidate URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PageOutcome {
    // ===== Success =====
    /// Page was fetched and its text recorded in the visited map
    Visited,

    // ===== Skips =====
    /// URL was already fetched (or already failed) earlier in the session
    Duplicate,

    /// URL was discovered beyond the maximum depth
    DepthExceeded,

    /// URL path matches a robots.txt disallow prefix
    PolicySkipped,

    // ===== Errors =====
    /// Fetch failed (network error, non-2xx status, timeout)
    FetchFailed,
}

impl PageOutcome {
    /// Returns true if the page made it into the visited map
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Visited)
    }

    /// Returns true if the URL was intentionally not fetched
    pub fn is_skipped(&self) -> bool {
        matches!(
            self,
            Self::Duplicate | Self::DepthExceeded | Self::PolicySkipped
        )
    }

    /// Returns true if this represents an error
    pub fn is_error(&self) -> bool {
        matches!(self, Self::FetchFailed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Visited => "visited",
            Self::Duplicate => "duplicate",
            Self::DepthExceeded => "depth_exceeded",
            Self::PolicySkipped => "policy_skipped",
            Self::FetchFailed => "fetch_failed",
        }
    }

    /// Returns all possible outcomes
    pub fn all() -> [Self; 5] {
        [
            Self::Visited,
            Self::Duplicate,
            Self::DepthExceeded,
            Self::PolicySkipped,
            Self::FetchFailed,
        ]
    }
}

impl fmt::Display for PageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Running count of outcomes for one session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutcomeTally {
    counts: HashMap<PageOutcome, u64>,
}

impl OutcomeTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: PageOutcome) {
        *self.counts.entry(outcome).or_insert(0) += 1;
    }

    pub fn count(&self, outcome: PageOutcome) -> u64 {
        self.counts.get(&outcome).copied().unwrap_or(0)
    }

    /// Total number of candidates considered
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Non-zero counts, in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (PageOutcome, u64)> + '_ {
        PageOutcome::all()
            .into_iter()
            .map(|outcome| (outcome, self.count(outcome)))
            .filter(|(_, count)| *count > 0)
    }
}
