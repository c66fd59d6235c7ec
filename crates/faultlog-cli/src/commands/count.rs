//! Count command implementation.

use std::io::Write;

use faultlog::ErrorLog;

use crate::error::CliError;
use crate::output::{ErrorCount, OutputFormat};

/// Handler for the count command.
pub struct CountCommand<'a> {
    log: &'a dyn ErrorLog,
}

impl<'a> CountCommand<'a> {
    /// Creates a new count command handler.
    #[must_use]
    pub const fn new(log: &'a dyn ErrorLog) -> Self {
        Self { log }
    }

    /// Writes the number of logged errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be read.
    pub fn execute<W: Write>(&self, out: &mut W, format: &OutputFormat) -> Result<(), CliError> {
        let total_count = self.log.count()?;
        format.write(out, &ErrorCount { total_count })
    }
}
