//! Crawler module: the concurrent traversal engine
//!
//! This module contains the core crawling logic, including:
//! - Run-scoped shared state (dedup store, counters, external-link index)
//! - Concurrency limiting and completion tracking
//! - HTTP fetching with a bounded per-request timeout
//! - Content extraction and link discovery
//! - Overall crawl orchestration and cancellation

mod context;
mod extractor;
mod fetcher;
mod orchestrator;
mod tracker;

pub use context::{CrawlCounters, ExternalLinkIndex, VisitedSet};
pub use extractor::{extract_page, ExtractedPage};
pub use fetcher::{build_http_client, fetch_page, FetchError, REQUEST_TIMEOUT};
pub use orchestrator::{run_crawl, CrawlSummary, CrawlTask};
pub use tracker::CompletionTracker;
