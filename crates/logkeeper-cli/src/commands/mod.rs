//! CLI command implementations.
//!
//! Each submodule implements a specific CLI command:
//! - [`ingest`] - Store one record
//! - [`search`] - Criteria search, capped by the read limit
//! - [`delete`] - Criteria deletion, uncapped

pub mod delete;
pub mod ingest;
pub mod search;

pub use delete::DeleteCommand;
pub use ingest::IngestCommand;
pub use search::SearchCommand;
