//! Robots.txt parser implementation
//!
//! Only `Disallow:` lines are honored, and they apply to every crawler:
//! `User-agent` groups, `Allow`, `Crawl-delay` and `Sitemap` lines are ignored.
//! Matching is a literal string-prefix comparison against the URL path, with
//! no wildcard or `$` anchor support.
//!
//! Crawl targets carry percent-encoded paths, so each prefix is stored in the
//! same encoding: `Disallow: /한글` matches `/%ED%95%9C%EA%B8%80/page`.

use url::Url;

const DISALLOW_TOKEN: &str = "Disallow:";

/// Any special-scheme URL; only its path serializer is used
const ENCODING_BASE: &str = "http://robots.invalid/";

/// Ordered set of path prefixes a host's robots.txt disallows
///
/// Immutable once built. An empty set allows everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisallowedPathSet {
    prefixes: Vec<String>,
}

impl DisallowedPathSet {
    /// Creates a permissive set that disallows nothing
    ///
    /// This is used when robots.txt cannot be fetched.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses raw robots.txt content
    ///
    /// Each line is trimmed; a line starting with the case-sensitive token
    /// `Disallow:` contributes everything after the first colon, trimmed.
    /// An empty value is kept too, and as a prefix it matches every path.
    ///
    /// # Examples
    ///
    /// ```
    /// use sitewalk::robots::DisallowedPathSet;
    ///
    /// let set = DisallowedPathSet::parse("User-agent: *\nDisallow: /private\nAllow: /public");
    /// assert_eq!(set.prefixes(), ["/private".to_string()]);
    /// ```
    pub fn parse(content: &str) -> Self {
        let prefixes = content
            .lines()
            .map(str::trim)
            .filter_map(|line| line.strip_prefix(DISALLOW_TOKEN))
            .map(str::trim)
            .map(encode_prefix)
            .collect();

        Self { prefixes }
    }

    /// Builds a set from explicit prefixes, kept in the given order
    pub fn from_prefixes<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes
                .into_iter()
                .map(|prefix| {
                    let prefix: String = prefix.into();
                    encode_prefix(&prefix)
                })
                .collect(),
        }
    }

    /// Returns the disallowed prefixes in file order, percent-encoded
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Returns the first prefix that `path` starts with, if any
    ///
    /// `path` is expected percent-encoded, as [`CrawlTarget::path`] returns it.
    ///
    /// [`CrawlTarget::path`]: crate::url::CrawlTarget::path
    pub fn disallows(&self, path: &str) -> Option<&str> {
        self.prefixes
            .iter()
            .find(|prefix| path.starts_with(prefix.as_str()))
            .map(String::as_str)
    }
}

/// Percent-encodes a prefix the way URL paths are serialized
///
/// Empty values and values not rooted at `/` are kept verbatim; `set_path`
/// would otherwise root them and change what they match.
fn encode_prefix(prefix: &str) -> String {
    if !prefix.starts_with('/') {
        return prefix.to_string();
    }

    match Url::parse(ENCODING_BASE) {
        Ok(mut url) => {
            url.set_path(prefix);
            url.path().to_string()
        }
        Err(_) => prefix.to_string(),
    }
}
