use crate::url::CrawlTarget;
use crate::UrlError;
use url::Url;

/// Normalizes a raw URL string into a [`CrawlTarget`]
///
/// # Normalization Steps
///
/// 1. Parse the URL into scheme, user-info, host, port, path, query and
///    fragment; reject if malformed
/// 2. Require an HTTP or HTTPS scheme and a host
/// 3. Re-serialize as strict ASCII:
///    - non-ASCII characters (e.g. Hangul, Kana) are UTF-8 percent-encoded
///    - embedded spaces and other unsafe characters are percent-encoded
///    - existing `%XX` escapes are kept as they are
///    - international hosts are converted to punycode, ASCII hosts lowercased
///
/// Fragments and query parameters are kept: two URLs that differ only in
/// their fragment are distinct targets.
///
/// The result is idempotent: normalizing an already normalized URL returns
/// an identical string.
///
/// # Arguments
///
/// * `raw` - The URL string to normalize
///
/// # Returns
///
/// * `Ok(CrawlTarget)` - Normalized URL
/// * `Err(UrlError)` - The input is not an absolute HTTP(S) URL with a host
///
/// # Examples
///
/// ```
/// use sitewalk::url::normalize_url;
///
/// let url = normalize_url("https://example.com/hello world").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/hello%20world");
/// ```
pub fn normalize_url(raw: &str) -> Result<CrawlTarget, UrlError> {
    let url = Url::parse(raw.trim()).map_err(|e| UrlError::Parse(format!("{}: {}", raw, e)))?;
    CrawlTarget::try_from(url)
}
