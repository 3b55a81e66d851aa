//! Core types for the log service.
//!
//! This module provides:
//! - [`LogLevel`] — Severity levels for log records
//! - [`LogRecord`] — An immutable, accepted log record
//! - [`LogRecordBuilder`] — Validating constructor for records

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RecordError;

/// Log severity levels, ordered from most to least verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    /// Most verbose, detailed tracing information
    Trace = 0,
    /// Debugging information
    Debug = 1,
    /// General information
    Info = 2,
    /// Warning conditions
    Warn = 3,
    /// Error conditions
    Error = 4,
}

impl LogLevel {
    /// All levels, most verbose first.
    pub const ALL: [Self; 5] = [
        Self::Trace,
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
    ];

    /// Returns the wire name of this level.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RecordError::UnknownLevel(s.to_string()))
    }
}

/// A structured log record.
///
/// Records are immutable once built. The only way a stored record changes is
/// by being removed. The timestamp is assigned by
/// [`IngestPath`](crate::IngestPath) at acceptance; whatever the producer
/// supplied is discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireRecord")]
pub struct LogRecord {
    /// Acceptance time, epoch milliseconds.
    #[serde(rename = "created")]
    timestamp: i64,
    #[serde(rename = "logLevel")]
    level: LogLevel,
    #[serde(rename = "originService")]
    origin_service: String,
    message: String,
    labels: BTreeSet<String>,
}

/// Inbound shape of a record; validated into a [`LogRecord`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireRecord {
    #[serde(default)]
    created: i64,
    log_level: LogLevel,
    origin_service: String,
    message: String,
    #[serde(default)]
    labels: BTreeSet<String>,
}

impl TryFrom<WireRecord> for LogRecord {
    type Error = RecordError;

    fn try_from(wire: WireRecord) -> Result<Self, Self::Error> {
        LogRecord::builder()
            .timestamp(wire.created)
            .level(wire.log_level)
            .origin_service(wire.origin_service)
            .message(wire.message)
            .labels(wire.labels)
            .build()
    }
}

impl LogRecord {
    /// Creates a new record builder.
    #[must_use]
    pub fn builder() -> LogRecordBuilder {
        LogRecordBuilder::default()
    }

    /// Acceptance time in epoch milliseconds.
    #[must_use]
    pub const fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Severity level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// The service that produced the record.
    #[must_use]
    pub fn origin_service(&self) -> &str {
        &self.origin_service
    }

    /// The log message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Labels attached by the producer.
    #[must_use]
    pub const fn labels(&self) -> &BTreeSet<String> {
        &self.labels
    }

    /// Returns the record stamped with a new acceptance time.
    pub(crate) fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// Builder for constructing log records.
#[derive(Debug, Default)]
pub struct LogRecordBuilder {
    timestamp: Option<i64>,
    level: Option<LogLevel>,
    origin_service: Option<String>,
    message: Option<String>,
    labels: BTreeSet<String>,
}

impl LogRecordBuilder {
    /// Sets the timestamp. Defaults to 0; ingest overwrites it regardless.
    #[must_use]
    pub const fn timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Sets the log level.
    #[must_use]
    pub const fn level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    /// Sets the origin service.
    #[must_use]
    pub fn origin_service(mut self, origin_service: impl Into<String>) -> Self {
        self.origin_service = Some(origin_service.into());
        self
    }

    /// Sets the message.
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Adds a label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.labels.insert(label.into());
        self
    }

    /// Adds several labels.
    #[must_use]
    pub fn labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels.extend(labels.into_iter().map(Into::into));
        self
    }

    /// Builds the record.
    ///
    /// # Errors
    ///
    /// Returns an error if the level, origin service or message is missing,
    /// or if the origin service is empty.
    pub fn build(self) -> Result<LogRecord, RecordError> {
        let level = self.level.ok_or(RecordError::MissingField("logLevel"))?;
        let origin_service = self
            .origin_service
            .ok_or(RecordError::MissingField("originService"))?;
        if origin_service.trim().is_empty() {
            return Err(RecordError::EmptyOriginService);
        }
        let message = self.message.ok_or(RecordError::MissingField("message"))?;

        Ok(LogRecord {
            timestamp: self.timestamp.unwrap_or(0),
            level,
            origin_service,
            message,
            labels: self.labels,
        })
    }
}
