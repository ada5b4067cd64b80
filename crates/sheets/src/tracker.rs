//! Stale-fetch detection.
//!
//! Every fetch takes a ticket. Only the holder of the newest ticket for a
//! data source may publish its result; an older fetch that finishes late is
//! discarded instead of overwriting fresher data. A ticket dropped before it
//! is completed (the request was cancelled) releases its source, so the
//! source stops reading as pending.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use questreel_core::settings::DataSource;

#[derive(Default)]
struct TrackerInner {
    next_seq: u64,
    /// Newest outstanding ticket per source.
    latest: HashMap<DataSource, u64>,
}

/// Issues [`FetchTicket`]s. The lock is never held across an `.await`.
#[derive(Default)]
pub struct FetchTracker {
    inner: Mutex<TrackerInner>,
}

impl FetchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, TrackerInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Issue a ticket, superseding any outstanding one for `source`.
    pub fn begin(&self, source: &DataSource) -> FetchTicket<'_> {
        let mut inner = self.lock();
        inner.next_seq += 1;
        let seq = inner.next_seq;
        inner.latest.insert(source.clone(), seq);
        FetchTicket {
            tracker: self,
            source: source.clone(),
            seq,
            settled: false,
        }
    }

    /// Whether a fetch for `source` is outstanding.
    pub fn is_pending(&self, source: &DataSource) -> bool {
        self.lock().latest.contains_key(source)
    }

    /// Clear `source` if `seq` is still its newest ticket.
    fn settle(&self, source: &DataSource, seq: u64) -> bool {
        let mut inner = self.lock();
        match inner.latest.get(source) {
            Some(&latest) if latest == seq => {
                inner.latest.remove(source);
                true
            }
            _ => false,
        }
    }
}

/// Proof that a fetch was started, ordered by issue time.
pub struct FetchTicket<'a> {
    tracker: &'a FetchTracker,
    source: DataSource,
    seq: u64,
    settled: bool,
}

impl FetchTicket<'_> {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Settle the ticket. Returns `true` when it was still the newest one,
    /// in which case its result may be published.
    pub fn complete(mut self) -> bool {
        self.settled = true;
        self.tracker.settle(&self.source, self.seq)
    }
}

impl Drop for FetchTicket<'_> {
    fn drop(&mut self) {
        if !self.settled && self.tracker.settle(&self.source, self.seq) {
            tracing::debug!(id = ?self.source.id, seq = self.seq, "Sheet fetch cancelled");
        }
    }
}
