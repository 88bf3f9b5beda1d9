//! Crawl orchestration
//!
//! The traversal engine. Each admitted address becomes one spawned task
//! that claims the address, waits for a concurrency slot, fetches and
//! processes the page, and spawns children for every admissible discovered
//! link. Per-task failures are logged and terminal for that task only; the
//! run completes when every spawned task has terminated.

use crate::config::Config;
use crate::crawler::context::{CrawlCounters, ExternalLinkIndex, VisitedSet};
use crate::crawler::extractor::extract_page;
use crate::crawler::fetcher::{build_http_client, fetch_page};
use crate::crawler::tracker::CompletionTracker;
use crate::output::{convert_html, render_document, write_external_links_report, write_page};
use crate::url::{classify_scope, strip_fragment, LinkScope, SiteOrigin};
use crate::{Result, UrlError};
use reqwest::Client;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use url::Url;

/// One unit of traversal work, fixed at spawn time
#[derive(Debug, Clone)]
pub struct CrawlTask {
    /// The address to fetch (fragment may still be present; it is stripped
    /// before claiming)
    pub url: Url,

    /// Distance from the starting address
    pub depth: u32,

    /// Whether this page belongs to the starting site
    pub is_internal: bool,
}

/// Totals reported after a completed (or canceled) run
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    pub documents_created: u64,
    pub urls_scanned: u64,
    pub elapsed: Duration,
}

/// Run-scoped shared state; one instance per crawl invocation
struct CrawlRun {
    config: Config,
    client: Client,
    origin: SiteOrigin,
    visited: VisitedSet,
    limiter: Semaphore,
    external: ExternalLinkIndex,
    counters: CrawlCounters,
    tracker: CompletionTracker,
    cancel: CancellationToken,
}

impl CrawlRun {
    /// Registers and schedules one task
    fn spawn(run: &Arc<Self>, task: CrawlTask) {
        run.tracker.task_spawned();
        let run = Arc::clone(run);
        tokio::spawn(async move {
            let tracker_handle = Arc::clone(&run);
            CrawlRun::process(run, task).await;
            tracker_handle.tracker.task_finished();
        });
    }

    /// Runs one task through claim, slot, fetch, process, and expansion
    async fn process(run: Arc<Self>, task: CrawlTask) {
        let address = strip_fragment(&task.url);

        // Admission: exactly one task per normalized address.
        if !run.visited.claim(address.as_str()) {
            tracing::debug!("already claimed: {}", address);
            return;
        }

        // Slot acquisition blocks until a fetch slot frees or the run is
        // canceled; canceled tasks terminate without fetching. The biased
        // order makes cancellation win when both are ready.
        let _permit = tokio::select! {
            biased;
            _ = run.cancel.cancelled() => {
                tracing::debug!("canceled before fetch: {}", address);
                return;
            }
            permit = run.limiter.acquire() => match permit {
                Ok(permit) => permit,
                Err(_) => return,
            },
        };

        tracing::info!("scraping {} (depth {})", address, task.depth);
        run.counters.record_scan();

        let body = match fetch_page(&run.client, address.as_str()).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("fetch failed for {}: {}", address, e);
                return;
            }
        };

        let page = extract_page(&body, &address);

        let markdown = match convert_html(&page.content_html) {
            Ok(markdown) => markdown,
            Err(e) => {
                tracing::warn!("markdown conversion failed for {}: {}", address, e);
                return;
            }
        };

        let title = page
            .title
            .clone()
            .unwrap_or_else(|| address.to_string());
        let document = render_document(&markdown, &title, address.as_str());

        let host = address.host_str().unwrap_or("unknown").to_string();
        if let Err(e) = write_page(&run.config.output_path, &host, address.as_str(), &document) {
            tracing::warn!("failed to write artifact for {}: {}", address, e);
            return;
        }
        run.counters.record_document();

        // A task whose fetch outlived the cancellation signal still
        // finishes its own processing but spawns no children.
        if run.cancel.is_cancelled() {
            tracing::debug!("canceled before expansion: {}", address);
            return;
        }

        CrawlRun::expand(&run, &task, &host, &page.links);
    }

    /// Records external discoveries and spawns child tasks for admissible
    /// links. This is the traversal's only fan-out point.
    fn expand(run: &Arc<Self>, task: &CrawlTask, page_host: &str, links: &[Url]) {
        let expand_children = if task.is_internal {
            task.depth < run.config.max_depth
        } else {
            task.depth < run.config.external_depth
        };

        for link in links {
            let scope = classify_scope(link, &run.origin);

            // External discoveries are aggregated whether or not they are
            // ever fetched, and on depth-gated pages too.
            if scope == LinkScope::External {
                if let Some(host) = link.host_str() {
                    run.external.record(page_host, host, link.as_str());
                }
            }

            if !expand_children {
                continue;
            }

            if scope == LinkScope::External && !run.config.scrape_external {
                tracing::debug!("skipping external link: {}", link);
                continue;
            }

            // Cheap pre-check; the claim in process() is authoritative.
            let child_address = strip_fragment(link);
            if run.visited.contains(child_address.as_str()) {
                tracing::debug!("already queued or visited: {}", link);
                continue;
            }

            tracing::debug!("found link: {}", link);
            CrawlRun::spawn(
                run,
                CrawlTask {
                    url: link.clone(),
                    depth: task.depth + 1,
                    is_internal: scope.is_internal(),
                },
            );
        }
    }
}

/// Runs a complete crawl
///
/// Seeds the traversal with the starting address at depth 0, waits for
/// every spawned task to terminate, writes the external-links report, and
/// returns the run totals. Per-task failures never surface here; the only
/// pre-task fatal error is an invalid starting address.
pub async fn run_crawl(config: Config, cancel: CancellationToken) -> Result<CrawlSummary> {
    let started = Instant::now();

    let start_url =
        Url::parse(&config.start_url).map_err(|e| UrlError::Parse(e.to_string()))?;
    let origin = SiteOrigin::from_url(&start_url).ok_or(UrlError::MissingHost)?;

    let client = build_http_client()?;
    let concurrency = config.concurrent_requests;

    let run = Arc::new(CrawlRun {
        config,
        client,
        origin,
        visited: VisitedSet::new(),
        limiter: Semaphore::new(concurrency),
        external: ExternalLinkIndex::new(),
        counters: CrawlCounters::new(),
        tracker: CompletionTracker::new(),
        cancel,
    });

    CrawlRun::spawn(
        &run,
        CrawlTask {
            url: start_url,
            depth: 0,
            is_internal: true,
        },
    );

    // Join point: resolves once every task, including dynamically spawned
    // children, has terminated. Holds after cancellation as well.
    run.tracker.wait().await;

    write_external_links_report(&run.config.output_path, &run.external)?;

    Ok(CrawlSummary {
        documents_created: run.counters.documents_created(),
        urls_scanned: run.counters.urls_scanned(),
        elapsed: started.elapsed(),
    })
}
