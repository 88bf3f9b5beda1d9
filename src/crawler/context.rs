//! Run-scoped shared state
//!
//! One instance of each structure here exists per crawl invocation, owned
//! by the run and shared by `Arc` with every spawned task. Every mutation
//! is a single indivisible operation; nothing spans two of them.

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Concurrency-safe set of addresses already claimed for processing.
///
/// An address moves from absent to claimed exactly once and is never
/// unclaimed, even when the claiming task later fails. A failed fetch
/// permanently consumes its claim for this run; there are no retries.
#[derive(Debug, Default)]
pub struct VisitedSet {
    inner: Mutex<HashSet<String>>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically claims an address.
    ///
    /// Returns true if this caller is the first to claim it; the sole
    /// admission gate into fetch-and-process.
    pub fn claim(&self, address: &str) -> bool {
        self.inner.lock().unwrap().insert(address.to_string())
    }

    /// Non-authoritative lookup, used to avoid spawning tasks for
    /// addresses that are already claimed. Racy by nature; `claim` decides.
    pub fn contains(&self, address: &str) -> bool {
        self.inner.lock().unwrap().contains(address)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Monotonic run counters, read once for the completion summary
#[derive(Debug, Default)]
pub struct CrawlCounters {
    documents_created: AtomicU64,
    urls_scanned: AtomicU64,
}

impl CrawlCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one claimed fetch attempt (successful or not)
    pub fn record_scan(&self) {
        self.urls_scanned.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts one artifact written to disk
    pub fn record_document(&self) {
        self.documents_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn urls_scanned(&self) -> u64 {
        self.urls_scanned.load(Ordering::Relaxed)
    }

    pub fn documents_created(&self) -> u64 {
        self.documents_created.load(Ordering::Relaxed)
    }
}

/// Cross-site discoveries grouped by the host of the page that found them.
///
/// Append-only for the duration of a run; one representative URL is kept
/// per (origin host, external host) pair, first discovery wins. Recording
/// happens for every external discovery, whether or not external scraping
/// is enabled, so the report reflects the full external surface even in
/// internal-only runs.
#[derive(Debug, Default)]
pub struct ExternalLinkIndex {
    inner: Mutex<BTreeMap<String, BTreeMap<String, String>>>,
}

impl ExternalLinkIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an external discovery; a no-op if the (origin, external)
    /// pair is already present.
    pub fn record(&self, origin_host: &str, external_host: &str, url: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner
            .entry(origin_host.to_string())
            .or_default()
            .entry(external_host.to_string())
            .or_insert_with(|| url.to_string());
    }

    /// Deterministic snapshot for report generation
    pub fn snapshot(&self) -> Vec<(String, Vec<(String, String)>)> {
        self.inner
            .lock()
            .unwrap()
            .iter()
            .map(|(origin, hosts)| {
                (
                    origin.clone(),
                    hosts
                        .iter()
                        .map(|(host, url)| (host.clone(), url.clone()))
                        .collect(),
                )
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().is_empty()
    }
}
