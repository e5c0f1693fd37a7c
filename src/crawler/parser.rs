//! HTML parser for extracting page text and links
//!
//! This module handles parsing fetched content to extract:
//! - Visible body text (script, style, noscript and template contents excluded)
//! - Links to follow (every `<a href>`), resolved to crawl targets

use crate::url::CrawlTarget;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Elements whose text content is never shown to a reader
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// Visible body text, whitespace collapsed to single spaces
    pub text: String,

    /// Resolved links in document order, duplicates included
    pub links: Vec<CrawlTarget>,
}

/// Parses HTML content and extracts body text and links
///
/// Parsing never fails: html5ever recovers from any malformed markup, so
/// arbitrary bytes that reached us as text still produce a (possibly empty)
/// page.
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The base URL for resolving relative links
///
/// # Example
///
/// ```
/// use sitewalk::crawler::parse_html;
/// use url::Url;
///
/// let html = r#"<html><body><p>Hello</p><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_html(html, &base_url);
/// assert_eq!(parsed.text, "Hello Link");
/// assert_eq!(parsed.links[0].as_str(), "https://example.com/page");
/// ```
pub fn parse_html(html: &str, base_url: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        text: extract_text(&document),
        links: extract_links(&document, base_url),
    }
}

/// Extracts the visible text of the document body
fn extract_text(document: &Html) -> String {
    let Some(body) = select_first(document, "body") else {
        return String::new();
    };

    let mut words: Vec<&str> = Vec::new();
    for node in body.descendants() {
        if let Node::Text(text) = node.value() {
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|element| HIDDEN_ELEMENTS.contains(&element.name()))
            });

            if !hidden {
                words.extend(text.split_whitespace());
            }
        }
    }

    words.join(" ")
}

fn select_first<'a>(document: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(selector).ok()?;
    document.select(&selector).next()
}

/// Extracts and resolves every `<a href>` in the document
fn extract_links(document: &Html, base_url: &Url) -> Vec<CrawlTarget> {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, base_url))
        .collect()
}

/// Resolves a link href to a crawl target
///
/// Two steps, then drop:
/// 1. `base_url.join(href)` parses the href relative to the page and
///    re-encodes it (unescaped spaces and non-ASCII characters are
///    percent-encoded here, so such hrefs never need a second pass)
/// 2. [`CrawlTarget::try_from`] keeps only HTTP(S) URLs with a host
///
/// Returns None if either step rejects the href (`mailto:`, `javascript:`,
/// invalid host or port ...). Malformed hrefs are routine in real HTML, so
/// drops are only logged at debug level.
pub fn resolve_link(href: &str, base_url: &Url) -> Option<CrawlTarget> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    let absolute = match base_url.join(href) {
        Ok(absolute) => absolute,
        Err(e) => {
            tracing::debug!("Could not resolve {:?} against {}: {}", href, base_url, e);
            return None;
        }
    };

    match CrawlTarget::try_from(absolute) {
        Ok(target) => Some(target),
        Err(e) => {
            tracing::debug!("Dropping link {:?}: {}", href, e);
            None
        }
    }
}
