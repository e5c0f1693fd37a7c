//! HTTP fetcher implementation
//!
//! This module handles all page requests for the crawler:
//! - Building HTTP clients with a descriptive user agent string
//! - GET requests that ignore the declared Content-Type
//! - Error classification into [`PageFetchError`]

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::url::CrawlTarget;
use crate::PageFetchError;
use reqwest::{Client, Url};
use std::time::Duration;

/// A successfully fetched page
#[derive(Debug)]
pub struct FetchedPage {
    /// Final URL after redirects; relative links resolve against it
    pub final_url: Url,
    /// HTTP status code
    pub status_code: u16,
    /// Content-Type header value, informational only
    pub content_type: Option<String>,
    /// Page body content
    pub body: String,
}

/// Formats the user agent string: `CrawlerName/Version (+ContactURL; ContactEmail)`
pub fn user_agent_string(config: &UserAgentConfig) -> String {
    format!(
        "{}/{} (+{}; {})",
        config.crawler_name, config.crawler_version, config.contact_url, config.contact_email
    )
}

/// Builds an HTTP client with proper configuration
///
/// Redirects are followed with reqwest's default policy. Timeouts come from
/// the crawler configuration; there are no retries.
///
/// # Example
///
/// ```no_run
/// use sitewalk::config::{CrawlerConfig, UserAgentConfig};
/// use sitewalk::crawler::build_http_client;
///
/// let client =
///     build_http_client(&UserAgentConfig::default(), &CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    crawler: &CrawlerConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent_string(user_agent))
        .timeout(Duration::from_secs(crawler.request_timeout_secs))
        .connect_timeout(Duration::from_secs(crawler.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page, whatever Content-Type the server declares
///
/// The body is always returned as text for HTML parsing; the server's
/// Content-Type is recorded but never used to reject a page.
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx | `Ok(FetchedPage)` |
/// | Non-2xx after redirects | `PageFetchError::Status` |
/// | Timeout | `PageFetchError::Timeout` |
/// | Connection/DNS/TLS error | `PageFetchError::Network` |
/// | Body cannot be read | `PageFetchError::Body` |
pub async fn fetch_page(client: &Client, url: &CrawlTarget) -> Result<FetchedPage, PageFetchError> {
    let response = client
        .get(url.as_url().clone())
        .send()
        .await
        .map_err(|e| classify_request_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(PageFetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let final_url = response.url().clone();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let body = response.text().await.map_err(|e| {
        if e.is_timeout() {
            PageFetchError::Timeout {
                url: url.to_string(),
            }
        } else {
            PageFetchError::Body {
                url: url.to_string(),
                source: e,
            }
        }
    })?;

    Ok(FetchedPage {
        final_url,
        status_code: status.as_u16(),
        content_type,
        body,
    })
}

fn classify_request_error(url: &CrawlTarget, error: reqwest::Error) -> PageFetchError {
    if error.is_timeout() {
        PageFetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        PageFetchError::Network {
            url: url.to_string(),
            source: error,
        }
    }
}
