//! In-memory record storage with retention.
//!
//! This module provides:
//! - [`MemoryRecordStore`] — Thread-safe record storage with optional retention
//! - Implementation of [`RecordStore`] for generic usage

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use tracing::debug;

use crate::config::{MemoryStoreConfig, RetentionPolicy};
use crate::criteria::Criteria;
use crate::error::{StoreError, StoreResult};
use crate::matcher::matches;
use crate::traits::RecordStore;
use crate::types::LogRecord;

/// Thread-safe in-memory record store.
///
/// Records are kept in insertion order. Every mutation takes the write lock,
/// so a deletion sees one consistent snapshot and no reader ever observes a
/// half-applied delete.
pub struct MemoryRecordStore {
    /// Configuration
    config: MemoryStoreConfig,
    /// All records, oldest first
    records: RwLock<VecDeque<LogRecord>>,
    /// Whether the store is serving requests
    open: AtomicBool,
}

impl Default for MemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryRecordStore {
    /// Creates a store that keeps every record.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MemoryStoreConfig::default())
    }

    /// Creates a store with full configuration.
    #[must_use]
    pub fn with_config(config: MemoryStoreConfig) -> Self {
        Self {
            config,
            records: RwLock::new(VecDeque::new()),
            open: AtomicBool::new(true),
        }
    }

    /// Creates a store with the given retention policy.
    #[must_use]
    pub fn with_retention(retention: RetentionPolicy) -> Self {
        Self::with_config(MemoryStoreConfig::default().with_retention(retention))
    }

    /// Stops serving requests; every operation fails with [`StoreError::Closed`].
    pub fn close(&self) {
        self.open.store(false, Ordering::Release);
    }

    /// Resumes serving requests.
    pub fn reopen(&self) {
        self.open.store(true, Ordering::Release);
    }

    /// Returns true if the store is serving requests.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    /// Removes all records.
    pub fn clear(&self) {
        self.records.write().clear();
    }

    /// Applies the retention policy as of now.
    ///
    /// Returns the number of records dropped.
    pub fn enforce_retention(&self) -> usize {
        self.enforce_retention_at(Utc::now().timestamp_millis())
    }

    /// Applies the retention policy as of `now_millis`.
    ///
    /// Returns the number of records dropped.
    pub fn enforce_retention_at(&self, now_millis: i64) -> usize {
        let mut records = self.records.write();
        Self::apply_retention(&self.config.retention, &mut records, now_millis)
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &MemoryStoreConfig {
        &self.config
    }

    fn ensure_open(&self) -> StoreResult<()> {
        if self.is_open() {
            Ok(())
        } else {
            Err(StoreError::Closed)
        }
    }

    fn apply_retention(
        policy: &RetentionPolicy,
        records: &mut VecDeque<LogRecord>,
        now_millis: i64,
    ) -> usize {
        let before = records.len();

        if let Some(cutoff) = policy.cutoff_millis(now_millis) {
            records.retain(|r| r.timestamp() >= cutoff);
        }

        if let Some(max_entries) = policy.max_entries {
            while records.len() > max_entries {
                records.pop_front();
            }
        }

        let dropped = before - records.len();
        if dropped > 0 {
            debug!(dropped, "retention removed records");
        }
        dropped
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl RecordStore for MemoryRecordStore {
    async fn insert(&self, record: LogRecord) -> StoreResult<()> {
        self.ensure_open()?;
        let mut records = self.records.write();
        records.push_back(record);
        Self::apply_retention(
            &self.config.retention,
            &mut records,
            Utc::now().timestamp_millis(),
        );
        Ok(())
    }

    async fn scan(&self, criteria: &Criteria, limit: usize) -> StoreResult<Vec<LogRecord>> {
        self.ensure_open()?;
        let records = self.records.read();
        Ok(records
            .iter()
            .rev()
            .filter(|r| matches(r, criteria))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn delete_where(&self, criteria: &Criteria) -> StoreResult<usize> {
        self.ensure_open()?;
        let mut records = self.records.write();
        let before = records.len();
        records.retain(|r| !matches(r, criteria));
        Ok(before - records.len())
    }

    async fn len(&self) -> StoreResult<usize> {
        self.ensure_open()?;
        Ok(self.records.read().len())
    }
}

/// Shared in-memory store handle.
pub type SharedMemoryStore = Arc<MemoryRecordStore>;
