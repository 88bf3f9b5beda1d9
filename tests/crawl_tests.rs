//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and exercise the
//! full crawl cycle end-to-end, with output written into temp directories.

use sitescribe::config::Config;
use sitescribe::run_crawl;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds a crawl config pointed at a mock server
fn test_config(start_url: &str, output: &Path) -> Config {
    Config {
        start_url: start_url.to_string(),
        max_depth: 1,
        external_depth: 1,
        concurrent_requests: 2,
        scrape_external: false,
        output_path: output.to_path_buf(),
    }
}

fn html_response(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/html; charset=utf-8")
}

async fn mount_page(server: &MockServer, page_path: &str, body: &str, expected: u64) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(html_response(body))
        .expect(expected)
        .mount(server)
        .await;
}

/// Path of the artifact written for an address, mirroring the writer's
/// naming scheme
fn artifact_path(output: &Path, host: &str, address: &str) -> PathBuf {
    let sanitize = |s: &str| -> String {
        s.chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    };
    output
        .join(sanitize(host))
        .join(format!("{}.md", sanitize(address)))
}

#[tokio::test]
async fn test_basic_scenario_internal_pages_and_external_report() {
    let server = MockServer::start().await;
    let base = server.uri();
    let output = TempDir::new().unwrap();

    // / links to an internal page and an external site; /a links onward.
    mount_page(
        &server,
        "/",
        &format!(
            r#"<html><head><title>Home</title></head><body>
            <a href="{base}/a">A</a>
            <a href="https://external.invalid/page">Elsewhere</a>
            </body></html>"#
        ),
        1,
    )
    .await;
    mount_page(
        &server,
        "/a",
        &format!(
            r#"<html><head><title>A</title></head><body>
            <a href="{base}/b">B</a>
            </body></html>"#
        ),
        1,
    )
    .await;
    // /a sits at the depth limit; its links are never followed.
    mount_page(&server, "/b", "<html><body>b</body></html>", 0).await;

    let config = test_config(&format!("{base}/"), output.path());
    let summary = run_crawl(config, CancellationToken::new()).await.unwrap();

    assert_eq!(summary.documents_created, 2);
    assert_eq!(summary.urls_scanned, 2);

    assert!(artifact_path(output.path(), "127.0.0.1", &format!("{base}/")).exists());
    assert!(artifact_path(output.path(), "127.0.0.1", &format!("{base}/a")).exists());

    // External link recorded but never fetched.
    let report = std::fs::read_to_string(output.path().join("external_links.md")).unwrap();
    assert!(report.contains("## 127.0.0.1"));
    assert!(report.contains("- [external.invalid](https://external.invalid/page)"));
}

#[tokio::test]
async fn test_fragment_variants_fetched_once() {
    let server = MockServer::start().await;
    let base = server.uri();
    let output = TempDir::new().unwrap();

    mount_page(
        &server,
        "/",
        &format!(
            r#"<html><body>
            <a href="{base}/p#first">one</a>
            <a href="{base}/p#second">two</a>
            </body></html>"#
        ),
        1,
    )
    .await;
    // Both fragment spellings collapse to one claim and one fetch.
    mount_page(&server, "/p", "<html><body>p</body></html>", 1).await;

    let config = test_config(&format!("{base}/"), output.path());
    let summary = run_crawl(config, CancellationToken::new()).await.unwrap();

    assert_eq!(summary.documents_created, 2);

    // The artifact name carries no fragment.
    assert!(artifact_path(output.path(), "127.0.0.1", &format!("{base}/p")).exists());
}

#[tokio::test]
async fn test_depth_gating_stops_expansion() {
    let server = MockServer::start().await;
    let base = server.uri();
    let output = TempDir::new().unwrap();

    mount_page(
        &server,
        "/",
        &format!(r#"<html><body><a href="{base}/l1">1</a></body></html>"#),
        1,
    )
    .await;
    mount_page(
        &server,
        "/l1",
        &format!(r#"<html><body><a href="{base}/l2">2</a></body></html>"#),
        1,
    )
    .await;
    mount_page(
        &server,
        "/l2",
        &format!(r#"<html><body><a href="{base}/l3">3</a></body></html>"#),
        1,
    )
    .await;
    // A link discovered on a page at the depth limit is never fetched.
    mount_page(&server, "/l3", "<html><body>3</body></html>", 0).await;

    let mut config = test_config(&format!("{base}/"), output.path());
    config.max_depth = 2;

    let summary = run_crawl(config, CancellationToken::new()).await.unwrap();
    assert_eq!(summary.documents_created, 3);
}

#[tokio::test]
async fn test_external_scraping_enabled_up_to_external_depth() {
    let site = MockServer::start().await;
    let other = MockServer::start().await;
    let site_base = site.uri();
    // Scope is by hostname, so the second server is addressed as
    // `localhost` to make it a different site.
    let other_base = other.uri().replace("127.0.0.1", "localhost");
    let output = TempDir::new().unwrap();

    mount_page(
        &site,
        "/",
        &format!(r#"<html><body><a href="{other_base}/">other</a></body></html>"#),
        1,
    )
    .await;
    // The external page is fetched, but its own links are depth-gated.
    mount_page(
        &other,
        "/",
        &format!(r#"<html><body><a href="{other_base}/next">next</a></body></html>"#),
        1,
    )
    .await;
    mount_page(&other, "/next", "<html><body>next</body></html>", 0).await;

    let mut config = test_config(&format!("{site_base}/"), output.path());
    config.scrape_external = true;
    config.external_depth = 1;

    let summary = run_crawl(config, CancellationToken::new()).await.unwrap();
    assert_eq!(summary.documents_created, 2);
}

#[tokio::test]
async fn test_external_scraping_disabled_records_without_fetching() {
    let site = MockServer::start().await;
    let other = MockServer::start().await;
    let site_base = site.uri();
    let other_base = other.uri().replace("127.0.0.1", "localhost");
    let output = TempDir::new().unwrap();

    mount_page(
        &site,
        "/",
        &format!(r#"<html><body><a href="{other_base}/">other</a></body></html>"#),
        1,
    )
    .await;
    // A different hostname: external, and never touched.
    mount_page(&other, "/", "<html><body>other</body></html>", 0).await;

    let config = test_config(&format!("{site_base}/"), output.path());
    let summary = run_crawl(config, CancellationToken::new()).await.unwrap();

    assert_eq!(summary.documents_created, 1);

    let report = std::fs::read_to_string(output.path().join("external_links.md")).unwrap();
    assert!(report.contains(&format!("({other_base}/)")));
}

#[tokio::test]
async fn test_failed_fetch_not_retried() {
    let server = MockServer::start().await;
    let base = server.uri();
    let output = TempDir::new().unwrap();

    mount_page(
        &server,
        "/",
        &format!(
            r#"<html><body>
            <a href="{base}/bad">bad</a>
            <a href="{base}/bad#again">bad again</a>
            </body></html>"#
        ),
        1,
    )
    .await;
    // The failure consumes the claim: one attempt, no retry, no artifact.
    Mock::given(method("GET"))
        .and(path("/bad"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&format!("{base}/"), output.path());
    let summary = run_crawl(config, CancellationToken::new()).await.unwrap();

    assert_eq!(summary.documents_created, 1);
    assert_eq!(summary.urls_scanned, 2);
    assert!(!artifact_path(output.path(), "127.0.0.1", &format!("{base}/bad")).exists());
}

#[tokio::test]
async fn test_precancelled_run_fetches_nothing() {
    let server = MockServer::start().await;
    let base = server.uri();
    let output = TempDir::new().unwrap();

    mount_page(&server, "/", "<html><body>home</body></html>", 0).await;

    let cancel = CancellationToken::new();
    cancel.cancel();

    let config = test_config(&format!("{base}/"), output.path());
    let summary = run_crawl(config, cancel).await.unwrap();

    assert_eq!(summary.documents_created, 0);
    assert_eq!(summary.urls_scanned, 0);
    // The report is still written on the way out.
    assert!(output.path().join("external_links.md").exists());
}

#[tokio::test]
async fn test_cancellation_lets_in_flight_fetch_finish_without_children() {
    let server = MockServer::start().await;
    let base = server.uri();
    let output = TempDir::new().unwrap();

    // The root page responds slowly; cancellation arrives mid-fetch.
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            html_response(&format!(
                r#"<html><body><a href="{base}/child">child</a></body></html>"#
            ))
            .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/child", "<html><body>child</body></html>", 0).await;

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            cancel.cancel();
        });
    }

    let config = test_config(&format!("{base}/"), output.path());
    let summary = tokio::time::timeout(
        Duration::from_secs(5),
        run_crawl(config, cancel),
    )
    .await
    .expect("join did not complete after cancellation")
    .unwrap();

    // The in-flight fetch completed and produced its artifact, but no
    // child tasks were spawned.
    assert_eq!(summary.documents_created, 1);
}

#[tokio::test]
async fn test_duplicate_external_discoveries_keep_first_url() {
    let server = MockServer::start().await;
    let base = server.uri();
    let output = TempDir::new().unwrap();

    mount_page(
        &server,
        "/",
        r#"<html><body>
        <a href="https://external.invalid/first">one</a>
        <a href="https://external.invalid/second">two</a>
        </body></html>"#,
        1,
    )
    .await;

    let config = test_config(&format!("{base}/"), output.path());
    run_crawl(config, CancellationToken::new()).await.unwrap();

    let report = std::fs::read_to_string(output.path().join("external_links.md")).unwrap();
    assert_eq!(report.matches("external.invalid").count(), 1 + 1); // host label + one URL
    assert!(report.contains("https://external.invalid/first"));
    assert!(!report.contains("https://external.invalid/second"));
}

#[tokio::test]
async fn test_invalid_start_url_aborts_before_any_task() {
    let output = TempDir::new().unwrap();
    let config = test_config("not a url", output.path());

    let result = run_crawl(config, CancellationToken::new()).await;
    assert!(result.is_err());
    assert!(!output.path().join("external_links.md").exists());
}

#[tokio::test]
async fn test_artifact_contains_title_toc_and_footer() {
    let server = MockServer::start().await;
    let base = server.uri();
    let output = TempDir::new().unwrap();

    mount_page(
        &server,
        "/",
        r#"<html><head><title>Welcome</title></head><body>
        <main><h1>Intro</h1><p>Some text.</p></main>
        </body></html>"#,
        1,
    )
    .await;

    let config = test_config(&format!("{base}/"), output.path());
    run_crawl(config, CancellationToken::new()).await.unwrap();

    let artifact = artifact_path(output.path(), "127.0.0.1", &format!("{base}/"));
    let content = std::fs::read_to_string(artifact).unwrap();

    assert!(content.starts_with("# Welcome\n"));
    assert!(content.contains("## Table of Contents"));
    // The page's h1 was demoted below the document title.
    assert!(content.contains("## Intro"));
    assert!(content.contains(&format!("Scraped from [{base}/]({base}/) on ")));
}
