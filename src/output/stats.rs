//! Statistics for a finished crawl session
//!
//! This module provides functionality for summarizing and displaying
//! what a crawl did, from its in-memory report.

use crate::output::CrawlReport;
use crate::state::PageOutcome;
use std::io::{self, Write};

/// Crawl statistics summary
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlStatistics {
    /// Number of pages in the visited map
    pub pages_visited: u64,

    /// Count of candidates by outcome (non-zero only)
    pub outcomes: Vec<(PageOutcome, u64)>,

    /// Number of robots.txt disallow prefixes in effect
    pub disallowed_prefixes: usize,

    /// Total characters of extracted text
    pub total_text_chars: u64,

    /// Session duration in milliseconds
    pub duration_ms: i64,
}

impl CrawlStatistics {
    pub fn count(&self, outcome: PageOutcome) -> u64 {
        self.outcomes
            .iter()
            .find(|(o, _)| *o == outcome)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    fn sum_where(&self, pred: impl Fn(&PageOutcome) -> bool) -> u64 {
        self.outcomes
            .iter()
            .filter(|(outcome, _)| pred(outcome))
            .map(|(_, count)| *count)
            .sum()
    }

    /// Candidates that were fetched and recorded
    pub fn succeeded(&self) -> u64 {
        self.sum_where(PageOutcome::is_success)
    }

    /// Candidates dropped before any fetch (duplicate, depth, robots.txt)
    pub fn skipped(&self) -> u64 {
        self.sum_where(PageOutcome::is_skipped)
    }

    /// Candidates whose fetch failed
    pub fn failed(&self) -> u64 {
        self.sum_where(PageOutcome::is_error)
    }

    /// Share of fetch attempts that succeeded, in percent
    pub fn success_rate(&self) -> f64 {
        let attempted = self.succeeded() + self.failed();
        if attempted > 0 {
            (self.succeeded() as f64 / attempted as f64) * 100.0
        } else {
            0.0
        }
    }
}

/// Computes statistics from a crawl report
pub fn compute_statistics(report: &CrawlReport) -> CrawlStatistics {
    CrawlStatistics {
        pages_visited: report.visited.len() as u64,
        outcomes: report.outcomes.iter().collect(),
        disallowed_prefixes: report.policy.len(),
        total_text_chars: report
            .visited
            .iter()
            .map(|(_, text)| text.chars().count() as u64)
            .sum(),
        duration_ms: report.duration().num_milliseconds(),
    }
}

/// Writes statistics in a human-readable block
pub fn write_statistics<W: Write>(out: &mut W, stats: &CrawlStatistics) -> io::Result<()> {
    writeln!(out, "=== Crawl Statistics ===")?;
    writeln!(out, "  Pages visited: {}", stats.pages_visited)?;
    writeln!(out, "  Disallowed prefixes: {}", stats.disallowed_prefixes)?;
    writeln!(out, "  Text extracted: {} chars", stats.total_text_chars)?;
    writeln!(out, "  Duration: {}ms", stats.duration_ms)?;

    if !stats.outcomes.is_empty() {
        writeln!(out, "Outcomes:")?;
        for (outcome, count) in &stats.outcomes {
            writeln!(out, "  {}: {}", outcome, count)?;
        }
    }

    writeln!(out, "  Skipped without fetching: {}", stats.skipped())?;
    writeln!(
        out,
        "Success Rate: {:.1}% ({} / {} fetches succeeded)",
        stats.success_rate(),
        stats.succeeded(),
        stats.succeeded() + stats.failed()
    )
}

/// Prints statistics to stdout
pub fn print_statistics(stats: &CrawlStatistics) -> io::Result<()> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    write_statistics(&mut lock, stats)?;
    lock.flush()
}
