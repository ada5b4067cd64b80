//! TTL cache in front of another row source.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use questreel_core::settings::DataSource;
use tokio::sync::RwLock;

use crate::error::FetchError;
use crate::parse::Rows;
use crate::source::{RowSource, SourceState};
use crate::tracker::FetchTracker;

struct CacheEntry {
    rows: Arc<Rows>,
    fetched_at: Instant,
}

/// Caches rows per data source for a fixed time-to-live.
///
/// Concurrent fetches of the same source are ordered through a
/// [`FetchTracker`]: only the newest one updates the cache. A superseded
/// fetch hands its caller the cached rows when there are any. Expired
/// entries are pruned whenever a new one is stored.
pub struct CachedRowSource {
    inner: Arc<dyn RowSource>,
    ttl: Duration,
    entries: RwLock<HashMap<DataSource, CacheEntry>>,
    tracker: FetchTracker,
}

impl CachedRowSource {
    pub fn new(inner: Arc<dyn RowSource>, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: RwLock::new(HashMap::new()),
            tracker: FetchTracker::new(),
        }
    }

    /// Drop the cached rows for `source` so the next fetch goes upstream.
    pub async fn invalidate(&self, source: &DataSource) {
        self.entries.write().await.remove(source);
    }

    /// Current state without fetching: cached rows if fresh, `Pending` if a
    /// fetch is outstanding.
    pub async fn peek(&self, source: &DataSource) -> Option<SourceState> {
        if !source.is_configured() {
            return Some(SourceState::Disabled);
        }
        if let Some(rows) = self.fresh(source).await {
            return Some(SourceState::Ready(rows));
        }
        if self.tracker.is_pending(source) {
            return Some(SourceState::Pending);
        }
        None
    }

    async fn fresh(&self, source: &DataSource) -> Option<Arc<Rows>> {
        let entries = self.entries.read().await;
        entries
            .get(source)
            .filter(|e| e.fetched_at.elapsed() < self.ttl)
            .map(|e| Arc::clone(&e.rows))
    }

    /// Number of sources with fresh rows cached.
    pub async fn len(&self) -> usize {
        let entries = self.entries.read().await;
        entries
            .values()
            .filter(|e| e.fetched_at.elapsed() < self.ttl)
            .count()
    }
}

#[async_trait]
impl RowSource for CachedRowSource {
    async fn fetch_rows(&self, source: &DataSource) -> Result<Arc<Rows>, FetchError> {
        if let Some(rows) = self.fresh(source).await {
            tracing::info!(id = ?source.id, "Sheet cache hit");
            return Ok(rows);
        }

        // Dropping this future mid-fetch drops the ticket, which releases
        // the source.
        let ticket = self.tracker.begin(source);
        let seq = ticket.seq();
        let result = self.inner.fetch_rows(source).await;

        if !ticket.complete() {
            tracing::debug!(id = ?source.id, seq, "Discarding superseded sheet fetch");
            if let Some(entry) = self.entries.read().await.get(source) {
                return Ok(Arc::clone(&entry.rows));
            }
            return result;
        }

        if let Ok(rows) = &result {
            let mut entries = self.entries.write().await;
            let before = entries.len();
            entries.retain(|_, e| e.fetched_at.elapsed() < self.ttl);
            if entries.len() < before {
                tracing::debug!(pruned = before - entries.len(), "Pruned expired sheet cache entries");
            }
            entries.insert(
                source.clone(),
                CacheEntry {
                    rows: Arc::clone(rows),
                    fetched_at: Instant::now(),
                },
            );
        }
        result
    }
}
