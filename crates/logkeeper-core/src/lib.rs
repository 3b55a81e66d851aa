//! # logkeeper-core
//!
//! Centralized log record storage with criteria-driven search and bulk deletion.
//!
//! This crate provides:
//!
//! - [`LogRecord`] — Immutable log record with server-assigned timestamp
//! - [`LogLevel`] — Severity levels (Trace, Debug, Info, Warn, Error)
//! - [`Criteria`] — Filter over time, level, origin service, label and keyword
//! - [`matches`] — The predicate deciding whether a record satisfies a [`Criteria`]
//! - [`RecordStore`] — Abstract trait for record backends
//! - [`MemoryRecordStore`] — In-memory storage with retention
//! - [`FileRecordStore`] — File-based storage with rotation
//! - [`QueryEngine`], [`MutationEngine`], [`IngestPath`] — The three request paths
//! - [`LoggingService`] — Facade owning the read ceiling
//!
//! ## Example
//!
//! ```rust
//! use logkeeper_core::{Criteria, LogLevel, LogRecord, LoggingService, MemoryRecordStore};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let service = LoggingService::new(MemoryRecordStore::new());
//!
//! let record = LogRecord::builder()
//!     .level(LogLevel::Error)
//!     .origin_service("billing")
//!     .message("payment gateway timeout")
//!     .label("payments")
//!     .build()?;
//! service.add_log_entry(record).await?;
//!
//! let criteria = Criteria::builder()
//!     .levels([LogLevel::Error])
//!     .message_keywords(["timeout"])
//!     .build();
//! let found = service.search(&criteria, 10).await?;
//! assert_eq!(found.len(), 1);
//!
//! assert_eq!(service.remove(&criteria).await?, 1);
//! # Ok(())
//! # }
//! # tokio::runtime::Runtime::new()
//! #     .expect("runtime")
//! #     .block_on(demo())
//! #     .expect("demo");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod clock;
pub mod config;
pub mod criteria;
pub mod error;
pub mod file_store;
pub mod ingest;
pub mod matcher;
pub mod mutation;
pub mod query;
pub mod service;
pub mod store;
pub mod traits;
pub mod types;

// Re-export main types
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{
    FileStoreConfig, MemoryStoreConfig, RetentionPolicy, ServiceConfig, DEFAULT_MAX_FILE_SIZE,
    DEFAULT_MAX_READ_LIMIT,
};
pub use criteria::{Criteria, CriteriaBuilder};
pub use error::{RecordError, Result, ServiceError, StoreError, StoreResult};
pub use file_store::FileRecordStore;
pub use ingest::IngestPath;
pub use matcher::matches;
pub use mutation::MutationEngine;
pub use query::QueryEngine;
pub use service::LoggingService;
pub use store::{MemoryRecordStore, SharedMemoryStore};
pub use traits::RecordStore;
pub use types::{LogLevel, LogRecord, LogRecordBuilder};
