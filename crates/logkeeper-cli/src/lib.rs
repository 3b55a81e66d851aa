//! # logkeeper-cli
//!
//! Command-line interface over a local logkeeper record store.
//!
//! Provides commands for:
//! - Ingesting a record
//! - Searching by criteria, capped by the configured read limit
//! - Deleting by criteria
//!
//! # Architecture
//!
//! Every invocation opens a [`FileRecordStore`](logkeeper_core::FileRecordStore)
//! under `--data-dir` and drives it through a
//! [`LoggingService`](logkeeper_core::LoggingService).
//!
//! ```text
//! ┌───────────┐                ┌────────────────┐     ┌─────────────────┐
//! │ logkeeper │───────────────►│ LoggingService │────►│ FileRecordStore │
//! └───────────┘                └────────────────┘     └─────────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;

pub use cli::{Cli, Commands, DeleteArgs, FilterArgs, Format, IngestArgs, SearchArgs};
pub use error::CliError;
pub use output::OutputFormat;
