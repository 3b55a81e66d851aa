//! Delete command implementation.

use std::io::Write;

use logkeeper_core::{LoggingService, RecordStore};

use crate::cli::DeleteArgs;
use crate::error::CliError;
use crate::output::{DeleteSummary, OutputFormat};

/// Handler for the delete command.
pub struct DeleteCommand<'a, S> {
    service: &'a LoggingService<S>,
}

impl<'a, S: RecordStore> DeleteCommand<'a, S> {
    /// Creates a new delete command handler.
    #[must_use]
    pub const fn new(service: &'a LoggingService<S>) -> Self {
        Self { service }
    }

    /// Executes the delete command.
    ///
    /// # Errors
    ///
    /// Returns error if the store fails.
    pub async fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        args: &DeleteArgs,
    ) -> Result<(), CliError> {
        let removed = self.service.remove(&args.filters.to_criteria()).await?;
        format.write(out, &DeleteSummary { removed })
    }
}
