//! Criteria-driven bulk deletion.

use std::sync::Arc;

use tracing::{debug, info};

use crate::criteria::Criteria;
use crate::error::StoreResult;
use crate::traits::RecordStore;

/// Removes records from a store by criteria.
///
/// Deletion has no ceiling: every matching record is removed, however many
/// there are. A capped delete would leave part of the matching set behind.
pub struct MutationEngine<S> {
    store: Arc<S>,
}

impl<S> Clone for MutationEngine<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: RecordStore> MutationEngine<S> {
    /// Creates an engine over a shared store.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Removes every record matching `criteria` and returns how many were removed.
    ///
    /// Zero matches is a success with a count of 0.
    ///
    /// # Errors
    ///
    /// Returns the store's fault unchanged.
    pub async fn remove_matching(&self, criteria: &Criteria) -> StoreResult<usize> {
        debug!(?criteria, "removing matching records");
        let removed = self.store.delete_where(criteria).await?;
        info!(removed, "removed matching records");
        Ok(removed)
    }
}
