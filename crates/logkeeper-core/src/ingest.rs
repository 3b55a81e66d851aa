//! Record acceptance.

use std::sync::Arc;

use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::error::StoreResult;
use crate::traits::RecordStore;
use crate::types::LogRecord;

/// Stamps inbound records with the acceptance time and stores them.
pub struct IngestPath<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S> Clone for IngestPath<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S: RecordStore> IngestPath<S> {
    /// Creates an ingest path that stamps records with the system clock.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock::new()))
    }

    /// Creates an ingest path with a custom clock.
    #[must_use]
    pub fn with_clock(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Accepts a record and returns the timestamp it was stored with.
    ///
    /// Any timestamp already on the record is discarded.
    ///
    /// # Errors
    ///
    /// Returns the store's fault unchanged.
    pub async fn accept(&self, record: LogRecord) -> StoreResult<i64> {
        let timestamp = self.clock.now_millis();
        let record = record.with_timestamp(timestamp);
        debug!(
            timestamp,
            level = %record.level(),
            origin = record.origin_service(),
            "accepting record"
        );
        self.store.insert(record).await?;
        Ok(timestamp)
    }
}
