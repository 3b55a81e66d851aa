//! Ingest command implementation.

use std::io::Write;

use logkeeper_core::{LogRecord, LoggingService, RecordStore};

use crate::cli::IngestArgs;
use crate::error::CliError;
use crate::output::{IngestReceipt, OutputFormat};

/// Handler for the ingest command.
pub struct IngestCommand<'a, S> {
    service: &'a LoggingService<S>,
}

impl<'a, S: RecordStore> IngestCommand<'a, S> {
    /// Creates a new ingest command handler.
    #[must_use]
    pub const fn new(service: &'a LoggingService<S>) -> Self {
        Self { service }
    }

    /// Executes the ingest command.
    ///
    /// # Errors
    ///
    /// Returns error if the record is invalid or the store fails.
    pub async fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        args: &IngestArgs,
    ) -> Result<(), CliError> {
        let record = LogRecord::builder()
            .level(args.level)
            .origin_service(args.origin.as_str())
            .message(args.message.as_str())
            .labels(args.label.iter().cloned())
            .build()?;

        let created = self.service.add_log_entry(record).await?;
        format.write(out, &IngestReceipt { created })
    }
}
