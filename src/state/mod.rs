//! State module for a single crawl session
//!
//! # Components
//!
//! - `VisitedMap`: the URL → page text accumulator, in first-visit order
//! - `PageOutcome`: what happened to each candidate URL
//! - `OutcomeTally`: per-outcome counters for the session

mod page_outcome;
mod visited;

// Re-export main types
pub use page_outcome::{OutcomeTally, PageOutcome};
pub use visited::VisitedMap;
