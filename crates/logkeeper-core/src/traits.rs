//! Traits for record storage backends.
//!
//! This module provides the [`RecordStore`] trait, the only shared mutable
//! resource in the service. The engines are generic over it so in-memory and
//! file-backed stores can be swapped freely.

use std::future::Future;
use std::sync::Arc;

use crate::criteria::Criteria;
use crate::error::StoreResult;
use crate::types::LogRecord;

/// Trait for record storage backends.
///
/// Every operation is awaitable so a slow store never blocks other tasks.
/// Faults are reported as `Err`; "nothing found" is always `Ok`.
pub trait RecordStore: Send + Sync {
    /// Persists a record.
    fn insert(&self, record: LogRecord) -> impl Future<Output = StoreResult<()>> + Send;

    /// Returns up to `limit` records matching `criteria`, newest first.
    ///
    /// Two scans with identical arguments over an unmodified store return
    /// identical sequences.
    fn scan(
        &self,
        criteria: &Criteria,
        limit: usize,
    ) -> impl Future<Output = StoreResult<Vec<LogRecord>>> + Send;

    /// Removes every record matching `criteria` and returns how many were removed.
    ///
    /// The removal is atomic with respect to other store operations: each
    /// record is either removed and counted exactly once, or left in place.
    fn delete_where(&self, criteria: &Criteria) -> impl Future<Output = StoreResult<usize>> + Send;

    /// Returns the number of stored records.
    fn len(&self) -> impl Future<Output = StoreResult<usize>> + Send;

    /// Returns true if the store holds no records.
    fn is_empty(&self) -> impl Future<Output = StoreResult<bool>> + Send {
        async move { Ok(self.len().await? == 0) }
    }
}

impl<S: RecordStore> RecordStore for Arc<S> {
    fn insert(&self, record: LogRecord) -> impl Future<Output = StoreResult<()>> + Send {
        S::insert(self, record)
    }

    fn scan(
        &self,
        criteria: &Criteria,
        limit: usize,
    ) -> impl Future<Output = StoreResult<Vec<LogRecord>>> + Send {
        S::scan(self, criteria, limit)
    }

    fn delete_where(&self, criteria: &Criteria) -> impl Future<Output = StoreResult<usize>> + Send {
        S::delete_where(self, criteria)
    }

    fn len(&self) -> impl Future<Output = StoreResult<usize>> + Send {
        S::len(self)
    }
}
