use crate::url::CrawlTarget;
use std::collections::HashMap;

/// Per-session record of every successfully fetched URL and its text
///
/// Keys are unique and entries keep first-visit order, so printing the map
/// is reproducible across runs against the same site. The map only grows:
/// inserting an existing key is rejected and leaves the first text in place.
#[derive(Debug, Clone, Default)]
pub struct VisitedMap {
    entries: Vec<(CrawlTarget, String)>,
    index: HashMap<CrawlTarget, usize>,
}

impl VisitedMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, url: &CrawlTarget) -> bool {
        self.index.contains_key(url)
    }

    /// Inserts a page's text
    ///
    /// Returns `false` without modifying the map if `url` is already present.
    pub fn insert(&mut self, url: CrawlTarget, text: String) -> bool {
        if self.index.contains_key(&url) {
            return false;
        }

        self.index.insert(url.clone(), self.entries.len());
        self.entries.push((url, text));
        true
    }

    pub fn get(&self, url: &CrawlTarget) -> Option<&str> {
        self.index
            .get(url)
            .map(|&position| self.entries[position].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in first-visit order
    pub fn iter(&self) -> impl Iterator<Item = (&CrawlTarget, &str)> {
        self.entries.iter().map(|(url, text)| (url, text.as_str()))
    }

    /// Iterates keys in first-visit order
    pub fn keys(&self) -> impl Iterator<Item = &CrawlTarget> {
        self.entries.iter().map(|(url, _)| url)
    }
}
