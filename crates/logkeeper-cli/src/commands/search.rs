//! Search command implementation.

use std::io::Write;

use logkeeper_core::{LoggingService, RecordStore};
use tracing::debug;

use crate::cli::SearchArgs;
use crate::error::CliError;
use crate::output::{OutputFormat, RecordList};

/// Handler for the search command.
pub struct SearchCommand<'a, S> {
    service: &'a LoggingService<S>,
}

impl<'a, S: RecordStore> SearchCommand<'a, S> {
    /// Creates a new search command handler.
    #[must_use]
    pub const fn new(service: &'a LoggingService<S>) -> Self {
        Self { service }
    }

    /// Executes the search command.
    ///
    /// Without `--limit`, the search asks for as many records as the read
    /// limit allows.
    ///
    /// # Errors
    ///
    /// Returns error if the limit is above the read limit or the store fails.
    pub async fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        args: &SearchArgs,
    ) -> Result<(), CliError> {
        let limit = args
            .limit
            .unwrap_or(self.service.config().max_read_limit);
        let criteria = args.filters.to_criteria();
        debug!(limit, "running search");

        let records = self.service.search(&criteria, limit).await?;
        format.write(out, &RecordList { records })
    }
}
