//! Output module for crawl results
//!
//! This module handles:
//! - The in-memory report of a crawl session
//! - Printing visited entries as `Key: <url>, Value: <text>`
//! - Crawl statistics

mod report;
pub mod stats;

pub use report::CrawlReport;
pub use stats::{compute_statistics, print_statistics, write_statistics, CrawlStatistics};

use crate::state::VisitedMap;
use std::io::{self, Write};

/// Shortens text to at most `max_chars` characters (0 = unlimited)
///
/// Cuts on a character boundary and appends `...` when anything was removed.
pub fn preview(text: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return text.to_string();
    }

    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Writes every visited entry, in first-visit order
pub fn write_entries<W: Write>(
    out: &mut W,
    visited: &VisitedMap,
    preview_chars: usize,
) -> io::Result<()> {
    for (url, text) in visited.iter() {
        writeln!(out, "Key: {}, Value: {}", url, preview(text, preview_chars))?;
    }
    Ok(())
}

/// Prints every visited entry to stdout
pub fn print_entries(visited: &VisitedMap, preview_chars: usize) -> io::Result<()> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    write_entries(&mut lock, visited, preview_chars)?;
    lock.flush()
}
