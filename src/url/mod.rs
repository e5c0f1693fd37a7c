//! URL handling module for Sitewalk
//!
//! This module provides URL normalization and host extraction. Every URL the
//! crawler compares, stores, or fetches is a [`CrawlTarget`], which can only be
//! produced by [`normalize_url`] (or the equivalent `TryFrom<Url>`).

mod domain;
mod normalize;

use crate::UrlError;
use std::fmt;
use url::Url;

// Re-export main functions
pub use domain::{authority, extract_host, hosts_match};
pub use normalize::normalize_url;

/// A normalized, absolute, ASCII-only HTTP(S) URL
///
/// Invariants:
/// - the scheme is `http` or `https`
/// - a non-empty host is present
/// - the serialized form is ASCII (non-ASCII and unsafe characters are
///   percent-encoded, international hosts are punycoded)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CrawlTarget(Url);

impl CrawlTarget {
    /// Returns the serialized URL
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the underlying parsed URL
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns the URL scheme (`http` or `https`)
    pub fn scheme(&self) -> &str {
        self.0.scheme()
    }

    /// Returns the host, without port
    pub fn host(&self) -> &str {
        // Checked at construction.
        self.0.host_str().unwrap_or_default()
    }

    /// Returns the percent-encoded path
    pub fn path(&self) -> &str {
        self.0.path()
    }
}

impl TryFrom<Url> for CrawlTarget {
    type Error = UrlError;

    fn try_from(url: Url) -> Result<Self, Self::Error> {
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(UrlError::InvalidScheme(format!(
                "Only HTTP and HTTPS schemes are supported, got: {}",
                url.scheme()
            )));
        }

        match url.host_str() {
            Some(host) if !host.is_empty() => Ok(Self(url)),
            _ => Err(UrlError::MissingHost(url.to_string())),
        }
    }
}

impl fmt::Display for CrawlTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for CrawlTarget {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
