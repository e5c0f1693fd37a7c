//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use sitewalk::config::{Config, CrawlerConfig, UserAgentConfig};
use sitewalk::crawler::{build_http_client, crawl_site, crawl_with_client, Traverser};
use sitewalk::output::CrawlReport;
use sitewalk::robots::DisallowedPathSet;
use sitewalk::state::{PageOutcome, VisitedMap};
use sitewalk::url::normalize_url;
use sitewalk::CrawlError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds an HTML page with the given text and links
fn html_page(text: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<a href="{}"></a>"#, href))
        .collect();
    format!("<html><body><p>{}</p>{}</body></html>", text, anchors)
}

/// Mounts a 200 HTML page at `route`
async fn mount_page(server: &MockServer, route: &str, text: &str, links: &[&str]) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html_page(text, links))
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

/// Mounts a page that must be requested exactly `times` times
async fn mount_page_expect(
    server: &MockServer,
    route: &str,
    text: &str,
    links: &[&str],
    times: u64,
) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html_page(text, links))
                .insert_header("content-type", "text/html"),
        )
        .expect(times)
        .mount(server)
        .await;
}

async fn mount_robots(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

fn test_client() -> reqwest::Client {
    let user_agent = UserAgentConfig {
        crawler_name: "TestBot".to_string(),
        crawler_version: "1.0.0".to_string(),
        contact_url: "https://example.com/contact".to_string(),
        contact_email: "test@example.com".to_string(),
    };
    let crawler = CrawlerConfig {
        max_depth: 5,
        request_timeout_secs: 5,
        connect_timeout_secs: 2,
    };
    build_http_client(&user_agent, &crawler).expect("Failed to build client")
}

async fn crawl_server(server: &MockServer, max_depth: u32) -> CrawlReport {
    let seed = normalize_url(&format!("{}/", server.uri())).expect("Invalid seed");
    crawl_with_client(&test_client(), seed, max_depth).await
}

fn visited_paths(report: &CrawlReport) -> Vec<String> {
    report
        .visited
        .keys()
        .map(|url| url.path().to_string())
        .collect()
}

#[tokio::test]
async fn test_full_crawl_single_domain() {
    let mock_server = MockServer::start().await;
    mount_robots(&mock_server, "User-agent: *\nAllow: /").await;

    mount_page(&mock_server, "/", "Home", &["/page1", "/page2"]).await;
    mount_page(&mock_server, "/page1", "Content 1", &[]).await;
    mount_page(&mock_server, "/page2", "Content 2", &[]).await;

    let report = crawl_server(&mock_server, 5).await;

    assert_eq!(visited_paths(&report), vec!["/", "/page1", "/page2"]);
    assert_eq!(report.domain, "127.0.0.1");
    assert!(report.policy.is_empty());

    let page1 = normalize_url(&format!("{}/page1", mock_server.uri())).unwrap();
    assert_eq!(report.visited.get(&page1), Some("Content 1"));
    assert_eq!(report.outcomes.count(PageOutcome::Visited), 3);
}

#[tokio::test]
async fn test_depth_first_order() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", "Root", &["/a", "/b"]).await;
    mount_page(&mock_server, "/a", "A", &["/a1"]).await;
    mount_page(&mock_server, "/a1", "A1", &[]).await;
    mount_page(&mock_server, "/b", "B", &[]).await;

    let report = crawl_server(&mock_server, 5).await;

    assert_eq!(visited_paths(&report), vec!["/", "/a", "/a1", "/b"]);
}

#[tokio::test]
async fn test_crawl_with_depth_limit() {
    let mock_server = MockServer::start().await;

    // Create a chain: / -> level1 -> level2 -> level3
    mount_page(&mock_server, "/", "Root", &["/level1"]).await;
    mount_page(&mock_server, "/level1", "Level 1", &["/level2"]).await;
    mount_page(&mock_server, "/level2", "Level 2", &["/level3"]).await;

    // Wiremock verifies expect(0) when the mock server drops
    mount_page_expect(&mock_server, "/level3", "Level 3", &[], 0).await;

    let report = crawl_server(&mock_server, 2).await;

    assert_eq!(visited_paths(&report), vec!["/", "/level1", "/level2"]);
    assert_eq!(report.outcomes.count(PageOutcome::DepthExceeded), 1);
}

#[tokio::test]
async fn test_depth_zero_fetches_only_seed() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", "Root", &["/child"]).await;
    mount_page_expect(&mock_server, "/child", "Child", &[], 0).await;

    let report = crawl_server(&mock_server, 0).await;

    assert_eq!(visited_paths(&report), vec!["/"]);
}

#[tokio::test]
async fn test_cycle_terminates() {
    let mock_server = MockServer::start().await;

    mount_page_expect(&mock_server, "/", "Seed", &["/a"], 1).await;
    mount_page_expect(&mock_server, "/a", "A", &["/"], 1).await;

    let report = crawl_server(&mock_server, 5).await;

    assert_eq!(visited_paths(&report), vec!["/", "/a"]);
    assert_eq!(report.outcomes.count(PageOutcome::Duplicate), 1);
}

#[tokio::test]
async fn test_each_url_fetched_at_most_once() {
    let mock_server = MockServer::start().await;

    // Diamond: / -> a, b; a -> c; b -> c; c -> a
    mount_page_expect(&mock_server, "/", "Root", &["/a", "/b", "/a"], 1).await;
    mount_page_expect(&mock_server, "/a", "A", &["/c"], 1).await;
    mount_page_expect(&mock_server, "/b", "B", &["/c"], 1).await;
    mount_page_expect(&mock_server, "/c", "C", &["/a"], 1).await;

    let report = crawl_server(&mock_server, 5).await;

    assert_eq!(visited_paths(&report), vec!["/", "/a", "/c", "/b"]);
    assert_eq!(report.visited.len(), 4);
}

#[tokio::test]
async fn test_robots_txt_respect() {
    let mock_server = MockServer::start().await;
    mount_robots(&mock_server, "User-agent: *\nDisallow: /private").await;

    mount_page(&mock_server, "/", "Home", &["/public", "/private/one"]).await;
    mount_page(&mock_server, "/public", "Public", &["/private/two", "/privateer"]).await;

    // Should never be called
    mount_page_expect(&mock_server, "/private/one", "Secret", &[], 0).await;
    mount_page_expect(&mock_server, "/private/two", "Secret", &[], 0).await;
    mount_page_expect(&mock_server, "/privateer", "Literal prefix", &[], 0).await;

    let report = crawl_server(&mock_server, 5).await;

    assert_eq!(visited_paths(&report), vec!["/", "/public"]);
    assert_eq!(report.policy.prefixes(), ["/private".to_string()]);
    assert_eq!(report.outcomes.count(PageOutcome::PolicySkipped), 3);
    assert!(report
        .visited
        .keys()
        .all(|url| !url.path().starts_with("/private")));
}

#[tokio::test]
async fn test_robots_non_ascii_prefix() {
    let mock_server = MockServer::start().await;
    mount_robots(&mock_server, "User-agent: *\nDisallow: /한글\nDisallow: /my docs").await;

    mount_page(&mock_server, "/", "Home", &["/한글/문서", "/my docs/notes", "/english"]).await;
    mount_page(&mock_server, "/english", "English", &[]).await;

    mount_page_expect(
        &mock_server,
        "/%ED%95%9C%EA%B8%80/%EB%AC%B8%EC%84%9C",
        "Korean",
        &[],
        0,
    )
    .await;
    mount_page_expect(&mock_server, "/my%20docs/notes", "Notes", &[], 0).await;

    let report = crawl_server(&mock_server, 5).await;

    assert_eq!(visited_paths(&report), vec!["/", "/english"]);
    assert_eq!(report.outcomes.count(PageOutcome::PolicySkipped), 2);
}

#[tokio::test]
async fn test_robots_empty_disallow_blocks_everything() {
    let mock_server = MockServer::start().await;
    mount_robots(&mock_server, "User-agent: *\nDisallow:").await;

    mount_page_expect(&mock_server, "/", "Home", &["/page"], 0).await;

    let report = crawl_server(&mock_server, 5).await;

    assert!(report.visited.is_empty());
    assert_eq!(report.policy.len(), 1);
    assert_eq!(report.outcomes.count(PageOutcome::PolicySkipped), 1);
}

#[tokio::test]
async fn test_robots_ignores_user_agent_groups() {
    let mock_server = MockServer::start().await;
    mount_robots(
        &mock_server,
        "User-agent: SomeOtherBot\nDisallow: /other-only\n\nUser-agent: *\nAllow: /",
    )
    .await;

    mount_page(&mock_server, "/", "Home", &["/other-only"]).await;
    mount_page_expect(&mock_server, "/other-only", "Skipped", &[], 0).await;

    let report = crawl_server(&mock_server, 5).await;

    assert_eq!(visited_paths(&report), vec!["/"]);
}

#[tokio::test]
async fn test_missing_robots_means_no_restrictions() {
    let mock_server = MockServer::start().await;

    // No robots.txt mounted: wiremock answers 404
    mount_page(&mock_server, "/", "Home", &["/admin"]).await;
    mount_page(&mock_server, "/admin", "Admin", &[]).await;

    let report = crawl_server(&mock_server, 5).await;

    assert!(report.policy.is_empty());
    assert_eq!(visited_paths(&report), vec!["/", "/admin"]);
}

#[tokio::test]
async fn test_robots_server_error_means_no_restrictions() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Disallow: /"))
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/", "Home", &[]).await;

    let report = crawl_server(&mock_server, 5).await;

    assert!(report.policy.is_empty());
    assert_eq!(visited_paths(&report), vec!["/"]);
}

#[tokio::test]
async fn test_failure_isolation() {
    let mock_server = MockServer::start().await;

    // seed -> A (fails) -> B, seed -> C
    mount_page(&mock_server, "/", "Seed", &["/a", "/c"]).await;
    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(ResponseTemplate::new(500).set_body_string(html_page("A", &["/b"])))
        .mount(&mock_server)
        .await;
    mount_page_expect(&mock_server, "/b", "B", &[], 0).await;
    mount_page(&mock_server, "/c", "C", &[]).await;

    let report = crawl_server(&mock_server, 5).await;

    assert_eq!(visited_paths(&report), vec!["/", "/c"]);
    assert_eq!(report.outcomes.count(PageOutcome::FetchFailed), 1);
}

#[tokio::test]
async fn test_failed_url_not_refetched() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", "Seed", &["/dead", "/c"]).await;
    mount_page(&mock_server, "/c", "C", &["/dead"]).await;
    Mock::given(method("GET"))
        .and(path("/dead"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let report = crawl_server(&mock_server, 5).await;

    assert_eq!(visited_paths(&report), vec!["/", "/c"]);
    assert_eq!(report.outcomes.count(PageOutcome::FetchFailed), 1);
    assert_eq!(report.outcomes.count(PageOutcome::Duplicate), 1);
}

#[tokio::test]
async fn test_host_scoping() {
    let mock_server = MockServer::start().await;
    let port = mock_server.address().port();

    // "localhost" reaches the same server but is a different host string
    let same_server_other_host = format!("http://localhost:{}/offhost", port);
    mount_page(
        &mock_server,
        "/",
        "Home",
        &[
            same_server_other_host.as_str(),
            "https://other.example/page",
            "mailto:someone@example.com",
            "/inside",
        ],
    )
    .await;
    mount_page(&mock_server, "/inside", "Inside", &[]).await;
    mount_page_expect(&mock_server, "/offhost", "Off host", &[], 0).await;

    let report = crawl_server(&mock_server, 5).await;

    assert_eq!(visited_paths(&report), vec!["/", "/inside"]);
    assert!(report.visited.keys().all(|url| url.host() == "127.0.0.1"));
}

#[tokio::test]
async fn test_ignores_declared_content_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            html_page("Binary-labelled", &["/next"]).into_bytes(),
            "application/octet-stream",
        ))
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/next", "Next", &[]).await;

    let report = crawl_server(&mock_server, 5).await;

    assert_eq!(visited_paths(&report), vec!["/", "/next"]);
    let seed = normalize_url(&format!("{}/", mock_server.uri())).unwrap();
    assert_eq!(report.visited.get(&seed), Some("Binary-labelled"));
}

#[tokio::test]
async fn test_visible_text_only() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<html><head><title>T</title><style>p{}</style></head>\
             <body><script>var x = 1;</script><h1>Hello</h1>\n<p>world</p></body></html>",
        ))
        .mount(&mock_server)
        .await;

    let report = crawl_server(&mock_server, 5).await;

    let seed = normalize_url(&format!("{}/", mock_server.uri())).unwrap();
    assert_eq!(report.visited.get(&seed), Some("Hello world"));
}

#[tokio::test]
async fn test_relative_links_resolve_against_redirect_target() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", "Home", &["/old"]).await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/docs/page"))
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/docs/page", "Moved", &["child"]).await;
    mount_page(&mock_server, "/docs/child", "Child", &[]).await;

    let report = crawl_server(&mock_server, 5).await;

    // The requested URL is the key; the redirect target is only the base
    assert_eq!(visited_paths(&report), vec!["/", "/old", "/docs/child"]);
}

#[tokio::test]
async fn test_unencoded_links_are_normalized() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", "Home", &["/한글 문서"]).await;
    mount_page_expect(
        &mock_server,
        "/%ED%95%9C%EA%B8%80%20%EB%AC%B8%EC%84%9C",
        "Korean",
        &[],
        1,
    )
    .await;

    let report = crawl_server(&mock_server, 5).await;

    assert_eq!(report.visited.len(), 2);
    assert!(report.visited.keys().all(|url| url.as_str().is_ascii()));
}

#[tokio::test]
async fn test_unreachable_seed_yields_empty_map() {
    let mock_server = MockServer::start().await;
    let uri = mock_server.uri();
    drop(mock_server);

    let seed = normalize_url(&format!("{}/", uri)).unwrap();
    let report = crawl_with_client(&test_client(), seed, 5).await;

    assert!(report.visited.is_empty());
    assert!(report.policy.is_empty());
    assert_eq!(report.outcomes.count(PageOutcome::FetchFailed), 1);
}

#[tokio::test]
async fn test_traverser_accumulates_across_calls() {
    let mock_server = MockServer::start().await;

    mount_page_expect(&mock_server, "/one", "One", &["/shared"], 1).await;
    mount_page_expect(&mock_server, "/two", "Two", &["/shared"], 1).await;
    mount_page_expect(&mock_server, "/shared", "Shared", &[], 1).await;

    let client = test_client();
    let mut traverser = Traverser::new(&client, 5);
    let mut visited = VisitedMap::new();
    let policy = DisallowedPathSet::empty();

    for route in ["/one", "/two"] {
        let url = normalize_url(&format!("{}{}", mock_server.uri(), route)).unwrap();
        traverser
            .crawl(url, "127.0.0.1", 0, &policy, &mut visited)
            .await;
    }

    assert_eq!(visited.len(), 3);
    assert_eq!(traverser.outcomes().count(PageOutcome::Duplicate), 1);
}

#[tokio::test]
async fn test_crawl_site_with_config() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", "Root", &["/level1"]).await;
    mount_page_expect(&mock_server, "/level1", "Level 1", &[], 0).await;

    let mut config = Config::default();
    config.crawler.max_depth = 0;

    let report = crawl_site(&format!("{}/", mock_server.uri()), &config)
        .await
        .expect("Crawl failed");

    assert_eq!(report.max_depth, 0);
    assert_eq!(visited_paths(&report), vec!["/"]);
    assert!(report.finished_at >= report.started_at);
}

#[tokio::test]
async fn test_crawl_site_malformed_seed() {
    let result = crawl_site("not a url", &Config::default()).await;
    assert!(matches!(result, Err(CrawlError::MalformedUrl(_))));

    let result = crawl_site("ftp://example.com/", &Config::default()).await;
    assert!(matches!(result, Err(CrawlError::MalformedUrl(_))));
}
