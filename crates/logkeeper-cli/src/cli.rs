//! Command-line argument parsing with clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use logkeeper_core::{Criteria, LogLevel, DEFAULT_MAX_READ_LIMIT};

/// Logkeeper - centralized log record storage.
#[derive(Parser, Debug, Clone)]
#[command(name = "logkeeper")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the record segments.
    #[arg(short, long, env = "LOGKEEPER_DATA_DIR", default_value = "./logkeeper-data")]
    pub data_dir: PathBuf,

    /// Largest number of records a search may return.
    #[arg(long, env = "LOGKEEPER_MAX_READ_LIMIT", default_value_t = DEFAULT_MAX_READ_LIMIT)]
    pub max_read_limit: usize,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    pub format: Format,

    /// Emit diagnostics on stderr as JSON lines.
    #[arg(long)]
    pub log_json: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output for scripting.
    Json,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Store a log record.
    Ingest(IngestArgs),

    /// Search stored records, newest first.
    Search(SearchArgs),

    /// Delete every record matching the filters.
    ///
    /// Deletion is not capped by the read limit. With no filters, every
    /// record is removed.
    Delete(DeleteArgs),
}

/// Arguments for the ingest command.
#[derive(Args, Debug, Clone)]
pub struct IngestArgs {
    /// Severity (TRACE, DEBUG, INFO, WARN, ERROR; case-insensitive).
    #[arg(long)]
    pub level: LogLevel,

    /// Service that produced the record.
    #[arg(long)]
    pub origin: String,

    /// Label to attach; repeatable.
    #[arg(long)]
    pub label: Vec<String>,

    /// Message text.
    #[arg(required = true)]
    pub message: String,
}

/// Arguments for the search command.
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Maximum records to return. Defaults to the read limit.
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Record filters.
    #[command(flatten)]
    pub filters: FilterArgs,
}

/// Arguments for the delete command.
#[derive(Args, Debug, Clone)]
pub struct DeleteArgs {
    /// Record filters.
    #[command(flatten)]
    pub filters: FilterArgs,
}

/// Filters shared by search and delete.
///
/// Repeated values within one filter are alternatives; different filters
/// must all hold.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Earliest timestamp, epoch milliseconds (inclusive).
    #[arg(long, allow_negative_numbers = true)]
    pub start: Option<i64>,

    /// Latest timestamp, epoch milliseconds (inclusive).
    #[arg(long, allow_negative_numbers = true)]
    pub end: Option<i64>,

    /// Level to match; repeatable or comma-separated.
    #[arg(long, value_delimiter = ',')]
    pub level: Vec<LogLevel>,

    /// Origin service to match; repeatable.
    #[arg(long)]
    pub origin: Vec<String>,

    /// Label to match; repeatable.
    #[arg(long)]
    pub label: Vec<String>,

    /// Case-sensitive substring of the message; repeatable.
    #[arg(long)]
    pub keyword: Vec<String>,
}

impl FilterArgs {
    /// Builds the criteria these filters describe.
    #[must_use]
    pub fn to_criteria(&self) -> Criteria {
        Criteria::builder()
            .time_range(self.start, self.end)
            .levels(self.level.iter().copied())
            .origin_services(self.origin.iter().cloned())
            .labels(self.label.iter().cloned())
            .message_keywords(self.keyword.iter().cloned())
            .build()
    }
}
