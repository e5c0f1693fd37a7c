//! Robots.txt handling module
//!
//! This module fetches a host's robots.txt once per crawl session and turns it
//! into a [`DisallowedPathSet`]. Loading never fails the caller: any problem
//! fetching the file results in an empty set.

mod parser;

pub use parser::DisallowedPathSet;

use crate::RobotsFetchError;
use reqwest::Client;
use url::Url;

/// Builds the robots.txt URL for a host
///
/// `host` may carry an explicit port (`127.0.0.1:8080`).
pub fn robots_url(scheme: &str, host: &str) -> String {
    format!("{}://{}/robots.txt", scheme, host)
}

/// Loads the disallow policy for a host
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `scheme` - The scheme of the seed URL
/// * `host` - The seed host, optionally with `:port`
///
/// # Returns
///
/// The parsed policy, or an empty policy if robots.txt could not be fetched
/// (network error, malformed URL, non-2xx status, timeout). Failures are
/// logged as warnings.
pub async fn load_policy(client: &Client, scheme: &str, host: &str) -> DisallowedPathSet {
    let url = robots_url(scheme, host);

    match fetch_robots(client, &url).await {
        Ok(content) => {
            let policy = DisallowedPathSet::parse(&content);
            tracing::info!(
                "Loaded robots.txt from {} ({} disallowed prefixes)",
                url,
                policy.len()
            );
            policy
        }
        Err(e) => {
            tracing::warn!("Failed to load robots.txt, assuming no restrictions: {}", e);
            DisallowedPathSet::empty()
        }
    }
}

/// Fetches the raw robots.txt content
///
/// # Returns
///
/// * `Ok(String)` - The body of a successful response
/// * `Err(RobotsFetchError)` - The URL was invalid, the request failed, or
///   the server answered with a non-success status
pub async fn fetch_robots(client: &Client, robots_url: &str) -> Result<String, RobotsFetchError> {
    let url = Url::parse(robots_url).map_err(|source| RobotsFetchError::InvalidUrl {
        url: robots_url.to_string(),
        source,
    })?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| RobotsFetchError::Request {
            url: robots_url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(RobotsFetchError::Status {
            url: robots_url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|source| RobotsFetchError::Body {
        url: robots_url.to_string(),
        source,
    })
}
