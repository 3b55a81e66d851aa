//! The logging service facade.
//!
//! [`LoggingService`] is the single entry point a transport talks to. It owns
//! the read ceiling, routes each request to the right engine, and turns store
//! faults into [`ServiceError::Unavailable`].

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::clock::Clock;
use crate::config::ServiceConfig;
use crate::criteria::Criteria;
use crate::error::{Result, ServiceError, StoreError};
use crate::ingest::IngestPath;
use crate::mutation::MutationEngine;
use crate::query::QueryEngine;
use crate::traits::RecordStore;
use crate::types::LogRecord;

/// Ingest, search and delete over one shared store.
pub struct LoggingService<S> {
    config: ServiceConfig,
    store: Arc<S>,
    ingest: IngestPath<S>,
    query: QueryEngine<S>,
    mutation: MutationEngine<S>,
}

impl<S> Clone for LoggingService<S> {
    fn clone(&self) -> Self {
        Self {
            config: self.config,
            store: Arc::clone(&self.store),
            ingest: self.ingest.clone(),
            query: self.query.clone(),
            mutation: self.mutation.clone(),
        }
    }
}

impl<S: RecordStore> LoggingService<S> {
    /// Creates a service with default configuration and the system clock.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_config(store, ServiceConfig::default())
    }

    /// Creates a service with the given configuration.
    #[must_use]
    pub fn with_config(store: S, config: ServiceConfig) -> Self {
        Self::from_shared(Arc::new(store), config)
    }

    /// Creates a service over a store the caller keeps a handle to.
    #[must_use]
    pub fn from_shared(store: Arc<S>, config: ServiceConfig) -> Self {
        let ingest = IngestPath::new(Arc::clone(&store));
        Self::assemble(store, config, ingest)
    }

    /// Creates a service that stamps records with `clock`.
    #[must_use]
    pub fn with_clock(store: Arc<S>, config: ServiceConfig, clock: Arc<dyn Clock>) -> Self {
        let ingest = IngestPath::with_clock(Arc::clone(&store), clock);
        Self::assemble(store, config, ingest)
    }

    fn assemble(store: Arc<S>, config: ServiceConfig, ingest: IngestPath<S>) -> Self {
        Self {
            config,
            query: QueryEngine::new(Arc::clone(&store)),
            mutation: MutationEngine::new(Arc::clone(&store)),
            ingest,
            store,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Returns the underlying store.
    #[must_use]
    pub const fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Stores a record and returns the server-assigned timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Unavailable`] if the store fails.
    pub async fn add_log_entry(&self, record: LogRecord) -> Result<i64> {
        self.ingest
            .accept(record)
            .await
            .map_err(|e| unavailable("ingest", e))
    }

    /// Returns up to `limit` records matching `criteria`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::LimitExceeded`] if `limit` is above the
    /// configured ceiling; the store is not consulted in that case.
    /// Returns [`ServiceError::Unavailable`] if the store fails.
    pub async fn search(&self, criteria: &Criteria, limit: usize) -> Result<Vec<LogRecord>> {
        if !self.config.is_limit_allowed(limit) {
            warn!(
                requested = limit,
                max = self.config.max_read_limit,
                "search limit rejected"
            );
            return Err(ServiceError::LimitExceeded {
                requested: limit,
                max: self.config.max_read_limit,
            });
        }

        self.query
            .search(criteria, limit)
            .await
            .map_err(|e| unavailable("search", e))
    }

    /// Returns the newest `limit` records with no filtering.
    ///
    /// # Errors
    ///
    /// Same as [`search`](Self::search).
    pub async fn fetch(&self, limit: usize) -> Result<Vec<LogRecord>> {
        self.search(&Criteria::all(), limit).await
    }

    /// Removes every record matching `criteria` and returns the count.
    ///
    /// There is no ceiling on deletions.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Unavailable`] if the store fails.
    pub async fn remove(&self, criteria: &Criteria) -> Result<usize> {
        self.mutation
            .remove_matching(criteria)
            .await
            .map_err(|e| unavailable("remove", e))
    }

    /// Returns the number of stored records.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Unavailable`] if the store fails.
    pub async fn count(&self) -> Result<usize> {
        debug!("counting records");
        self.store.len().await.map_err(|e| unavailable("count", e))
    }
}

fn unavailable(operation: &'static str, err: StoreError) -> ServiceError {
    error!(operation, error = %err, "record store failed");
    ServiceError::Unavailable(err)
}
