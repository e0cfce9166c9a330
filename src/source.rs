//! Asynchronous record sources and stale-response protection

use crate::core::error::SourceError;
use crate::core::record::Record;
use crate::core::view::CollectionView;
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, RwLock};

/// Something that can fetch the full collection of one record type
///
/// A fetch always returns the whole collection; views replace their raw
/// records wholesale with the result.
#[async_trait]
pub trait RecordSource<T: Record>: Send + Sync {
    /// Fetch every record
    async fn fetch(&self) -> Result<Vec<T>, SourceError>;
}

/// Record source backed by a vector, for tests and offline demos
#[derive(Clone)]
pub struct InMemoryRecordSource<T> {
    records: Arc<RwLock<Vec<T>>>,
}

impl<T: Record> InMemoryRecordSource<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }

    /// Replace the collection served by the next fetch
    pub async fn replace(&self, records: Vec<T>) {
        *self.records.write().await = records;
    }

    pub async fn push(&self, record: T) {
        self.records.write().await.push(record);
    }
}

impl<T: Record> Default for InMemoryRecordSource<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl<T: Record> RecordSource<T> for InMemoryRecordSource<T> {
    async fn fetch(&self) -> Result<Vec<T>, SourceError> {
        Ok(self.records.read().await.clone())
    }
}

// =============================================================================
// Fetch tracking
// =============================================================================

/// Ticket identifying one fetch started by a [`FetchTracker`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Orders overlapping fetches for one view: the last request started wins
///
/// Each fetch takes a ticket with [`FetchTracker::begin`]. When it completes,
/// its records are only applied if no newer fetch was started in the
/// meantime, whatever order the responses arrive in.
#[derive(Debug, Default)]
pub struct FetchTracker {
    latest: AtomicU64,
}

impl FetchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fetch
    pub fn begin(&self) -> FetchTicket {
        FetchTicket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Whether `ticket` belongs to the most recently started fetch
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }

    /// Apply fetched records to `view` if `ticket` is still current
    ///
    /// Returns `false` and leaves the view untouched for a stale ticket.
    pub fn complete<T: Record>(
        &self,
        ticket: FetchTicket,
        view: &mut CollectionView<T>,
        records: Vec<T>,
    ) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.latest.load(Ordering::Acquire),
                dropped = records.len(),
                "stale fetch result dropped"
            );
            return false;
        }
        view.set_records(records);
        true
    }

    /// Start a fetch from `source` and wait for its records
    ///
    /// The returned ticket is handed to [`FetchTracker::complete`] once the
    /// caller holds the view again.
    pub async fn fetch<T, S>(&self, source: &S) -> Result<(FetchTicket, Vec<T>), SourceError>
    where
        T: Record,
        S: RecordSource<T> + ?Sized,
    {
        let ticket = self.begin();
        match source.fetch().await {
            Ok(records) => Ok((ticket, records)),
            Err(e) => {
                tracing::warn!(ticket = ticket.0, error = %e, "fetch failed");
                Err(e)
            }
        }
    }

    /// Fetch from `source` and apply the result to the shared `view`
    ///
    /// The view is only locked once the records have arrived, so several
    /// refreshes of the same view may be in flight at once. Returns
    /// `Ok(false)` when a newer fetch was started while this one was in
    /// flight. On error the view keeps its previous records.
    pub async fn refresh<T, S>(
        &self,
        source: &S,
        view: &Mutex<CollectionView<T>>,
    ) -> Result<bool, SourceError>
    where
        T: Record,
        S: RecordSource<T> + ?Sized,
    {
        let (ticket, records) = self.fetch(source).await?;
        let mut view = view.lock().await;
        Ok(self.complete(ticket, &mut view, records))
    }
}
