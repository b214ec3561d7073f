//! Synchronization Passes
//!
//! One pass fetches the archive, compares its change marker against the one
//! recorded by the last completed pass, and (if it changed) streams every
//! record through the router into the catalog.
//!
//! The blocking half (decompression, tar, RDF parsing) runs on the blocking
//! pool and hands books to the async half over a bounded channel, so a slow
//! catalog applies backpressure all the way down to the download.

use crate::catalog::CatalogHandle;
use crate::error::{ErrorKind, Result};
use crate::pipeline;
use crate::router::EntryRouter;
use crate::source::{BoxSyncRead, ChangeMarker, Download, SourceHandle};
use exn::ResultExt;
use pgmirror_catalog::models::Book;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::instrument;

/// Books buffered between the parser and the catalog.
const BOOK_BUFFER: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    /// Limit on each fetch attempt, up to the response headers. Stalls while
    /// reading the body are bounded by the source itself.
    pub fetch_timeout: Duration,
    /// Additional attempts after a retryable fetch failure.
    pub retries: u32,
    /// Delay before the first retry; doubled for each one after.
    pub retry_backoff: Duration,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(60),
            retries: 3,
            retry_backoff: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    /// Another pass held the guard; nothing was fetched.
    AlreadyRunning,
    /// The archive carries the marker of the last completed pass.
    Unchanged(ChangeMarker),
    Completed(PassReport),
}

/// Entry counts for one completed pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PassReport {
    pub entries: u64,
    pub ignored: u64,
    pub skipped: u64,
    pub built: u64,
    pub upserted: u64,
    pub failed_upserts: u64,
}

/// Mirrors one [`Source`](crate::source::Source) into one
/// [`Catalog`](crate::catalog::Catalog).
///
/// At most one pass runs at a time per synchronizer; overlapping calls to
/// [`synchronize_once`](Self::synchronize_once) return immediately with
/// [`PassOutcome::AlreadyRunning`].
pub struct Synchronizer {
    source: SourceHandle,
    catalog: CatalogHandle,
    router: Arc<EntryRouter>,
    options: SyncOptions,
    running: AtomicBool,
    last_marker: Mutex<Option<ChangeMarker>>,
}

impl Synchronizer {
    pub fn new(source: SourceHandle, catalog: CatalogHandle, router: EntryRouter) -> Self {
        Self {
            source,
            catalog,
            router: Arc::new(router),
            options: SyncOptions::default(),
            running: AtomicBool::new(false),
            last_marker: Mutex::new(None),
        }
    }

    pub fn with_options(mut self, options: SyncOptions) -> Self {
        self.options = options;
        self
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Marker of the last completed pass.
    pub fn last_marker(&self) -> Option<ChangeMarker> {
        self.last_marker.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Run one pass unless one is already in progress.
    ///
    /// The marker is only recorded once every entry has been routed; a pass
    /// that fails part-way leaves the previous marker in place so the next
    /// pass starts over.
    ///
    /// # Errors
    ///
    /// Fetch failures (after retries), unreadable archives and a crashed
    /// pipeline. Per-record failures are counted in the [`PassReport`]
    /// instead.
    #[instrument(skip(self), fields(source = self.source.name(), catalog = self.catalog.name()))]
    pub async fn synchronize_once(&self) -> Result<PassOutcome> {
        let Some(_guard) = RunGuard::acquire(&self.running) else {
            tracing::debug!("Synchronization already in progress");
            return Ok(PassOutcome::AlreadyRunning);
        };

        let Download { marker, body } = self.fetch().await?;
        if let Some(marker) = marker.as_ref()
            && self.last_marker().as_ref() == Some(marker)
        {
            tracing::info!(%marker, "Archive unchanged since last pass");
            drain(body).await?;
            return Ok(PassOutcome::Unchanged(marker.clone()));
        }

        tracing::info!(marker = ?marker, "Ingesting archive");
        let report = self.ingest(body).await?;
        *self.last_marker.lock().unwrap_or_else(PoisonError::into_inner) = marker;
        tracing::info!(
            entries = report.entries,
            ignored = report.ignored,
            skipped = report.skipped,
            upserted = report.upserted,
            failed_upserts = report.failed_upserts,
            "Synchronization pass complete"
        );
        Ok(PassOutcome::Completed(report))
    }

    async fn fetch(&self) -> Result<Download> {
        let mut backoff = self.options.retry_backoff;
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            let result = match tokio::time::timeout(self.options.fetch_timeout, self.source.fetch()).await {
                Ok(result) => result,
                Err(elapsed) => Err(elapsed).or_raise(|| ErrorKind::Timeout),
            };
            match result {
                Ok(download) => return Ok(download),
                Err(err) if err.is_retryable() && attempt <= self.options.retries => {
                    tracing::warn!(attempt, error = ?err, "Fetch failed; retrying in {backoff:?}");
                    tokio::time::sleep(backoff).await;
                    backoff = backoff.saturating_mul(2);
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn ingest(&self, body: BoxSyncRead) -> Result<PassReport> {
        let (tx, mut rx) = mpsc::channel::<Book>(BOOK_BUFFER);
        let router = Arc::clone(&self.router);
        let pipeline = tokio::task::spawn_blocking(move || {
            pipeline::run(body, &router, |book| tx.blocking_send(book).is_ok())
        });

        let (mut upserted, mut failed) = (0, 0);
        while let Some(book) = rx.recv().await {
            let record_id = book.id;
            match self.catalog.upsert(book).await {
                Ok(()) => upserted += 1,
                Err(err) => {
                    failed += 1;
                    tracing::warn!(record_id, error = ?err, "Failed to upsert book");
                }
            }
        }

        let mut report = pipeline.await.or_raise(|| ErrorKind::Pipeline)??;
        self.catalog.flush().await?;
        report.upserted = upserted;
        report.failed_upserts = failed;
        Ok(report)
    }
}

/// Read and discard a body that won't be decoded.
async fn drain(mut body: BoxSyncRead) -> Result<u64> {
    tokio::task::spawn_blocking(move || std::io::copy(&mut body, &mut std::io::sink()))
        .await
        .or_raise(|| ErrorKind::Pipeline)?
        .or_raise(|| ErrorKind::Io)
}

/// Holds the single-pass flag; clears it on drop, including on error and
/// cancellation.
struct RunGuard<'a>(&'a AtomicBool);

impl<'a> RunGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
