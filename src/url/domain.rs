use crate::url::CrawlTarget;

/// Extracts the host from a crawl target
///
/// The port is not part of the host. ASCII hosts are already lowercase
/// after normalization.
///
/// # Examples
///
/// ```
/// use sitewalk::url::{extract_host, normalize_url};
///
/// let url = normalize_url("https://EXAMPLE.COM:8443/path").unwrap();
/// assert_eq!(extract_host(&url), "example.com");
/// ```
pub fn extract_host(url: &CrawlTarget) -> String {
    url.host().to_string()
}

/// Returns the host plus the explicit port, if any
///
/// Used to address other resources on the same server, such as robots.txt.
/// Default ports are omitted.
///
/// # Examples
///
/// ```
/// use sitewalk::url::{authority, normalize_url};
///
/// let url = normalize_url("http://127.0.0.1:8080/page").unwrap();
/// assert_eq!(authority(&url), "127.0.0.1:8080");
///
/// let url = normalize_url("https://example.com:443/page").unwrap();
/// assert_eq!(authority(&url), "example.com");
/// ```
pub fn authority(url: &CrawlTarget) -> String {
    match url.as_url().port() {
        Some(port) => format!("{}:{}", url.host(), port),
        None => url.host().to_string(),
    }
}

/// Checks whether a link stays on the crawl's domain
///
/// Exact, case-sensitive host comparison: subdomains do not match, and
/// neither scheme nor port is compared.
pub fn hosts_match(link: &CrawlTarget, domain: &str) -> bool {
    link.host() == domain
}
