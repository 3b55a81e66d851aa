//! Criteria-driven search.

use std::sync::Arc;

use tracing::debug;

use crate::criteria::Criteria;
use crate::error::StoreResult;
use crate::traits::RecordStore;
use crate::types::LogRecord;

/// Runs searches against a record store.
///
/// The engine does not know the read ceiling; callers check it before
/// calling [`search`](Self::search).
pub struct QueryEngine<S> {
    store: Arc<S>,
}

impl<S> Clone for QueryEngine<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: RecordStore> QueryEngine<S> {
    /// Creates an engine over a shared store.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Returns at most `limit` records matching `criteria`, newest first.
    ///
    /// Repeating a search on an unmodified store returns the same sequence.
    ///
    /// # Errors
    ///
    /// Returns the store's fault unchanged.
    pub async fn search(&self, criteria: &Criteria, limit: usize) -> StoreResult<Vec<LogRecord>> {
        debug!(?criteria, limit, "searching records");
        let mut records = self.store.scan(criteria, limit).await?;
        records.truncate(limit);
        debug!(found = records.len(), "search complete");
        Ok(records)
    }
}
