//! Output formatting for CLI commands.
//!
//! Supports table (human-readable) and JSON output formats. JSON record
//! output uses the same field names the service accepts on ingest.

use std::io::Write;

use chrono::{DateTime, SecondsFormat};
use logkeeper_core::LogRecord;
use serde::Serialize;

use crate::cli::Format;
use crate::error::CliError;

/// Renders command results in the format chosen with `--format`.
#[derive(Debug, Clone, Copy)]
pub struct OutputFormat {
    format: Format,
}

impl OutputFormat {
    /// Creates a renderer for `format`.
    #[must_use]
    pub const fn new(format: Format) -> Self {
        Self { format }
    }

    /// Renders `value` to `writer`: pretty JSON, or the value's table.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Format`] if JSON encoding fails and
    /// [`CliError::Io`] if the writer fails.
    pub fn write<W, T>(&self, writer: &mut W, value: &T) -> Result<(), CliError>
    where
        W: Write,
        T: Serialize + TableDisplay,
    {
        match self.format {
            Format::Json => {
                serde_json::to_writer_pretty(&mut *writer, value)
                    .map_err(|e| CliError::Format(format!("cannot encode JSON: {e}")))?;
                writeln!(writer)?;
            }
            Format::Table => value.write_table(writer)?,
        }
        Ok(())
    }
}

/// Human-readable rendering used by [`Format::Table`].
pub trait TableDisplay {
    /// Writes the value as aligned text.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError>;
}

/// Records returned by a search, newest first.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct RecordList {
    /// The records.
    pub records: Vec<LogRecord>,
}

impl TableDisplay for RecordList {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.records.is_empty() {
            writeln!(writer, "No matching records")?;
            return Ok(());
        }

        writeln!(
            writer,
            "{:<24}  {:<5}  {:<16}  {:<20}  MESSAGE",
            "CREATED", "LEVEL", "ORIGIN", "LABELS"
        )?;
        writeln!(writer, "{}", "─".repeat(96))?;

        for record in &self.records {
            let labels: Vec<&str> = record.labels().iter().map(String::as_str).collect();
            writeln!(
                writer,
                "{:<24}  {:<5}  {:<16}  {:<20}  {}",
                format_timestamp(record.timestamp()),
                record.level(),
                truncate(record.origin_service(), 16),
                truncate(&labels.join(","), 20),
                record.message()
            )?;
        }

        writeln!(writer)?;
        writeln!(writer, "Total: {} record(s)", self.records.len())?;
        Ok(())
    }
}

/// Acknowledgement for an ingested record.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct IngestReceipt {
    /// Server-assigned timestamp, epoch milliseconds.
    pub created: i64,
}

impl TableDisplay for IngestReceipt {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(
            writer,
            "Accepted at {} ({})",
            self.created,
            format_timestamp(self.created)
        )?;
        Ok(())
    }
}

/// Result of a delete.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DeleteSummary {
    /// Number of records removed.
    pub removed: usize,
}

impl TableDisplay for DeleteSummary {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Removed {} record(s)", self.removed)?;
        Ok(())
    }
}

/// Renders epoch milliseconds as RFC 3339 UTC, or the raw number when out of range.
fn format_timestamp(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis).map_or_else(
        || millis.to_string(),
        |dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true),
    )
}

/// Truncates to `max_len` characters, marking the cut with "...".
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{kept}...")
    } else {
        s.chars().take(max_len).collect()
    }
}
