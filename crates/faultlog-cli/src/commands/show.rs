//! Show command implementation.

use std::io::Write;

use faultlog::{ErrorId, ErrorLog};

use crate::error::CliError;
use crate::output::{ErrorDetail, OutputFormat};

/// Handler for the show command.
pub struct ShowCommand<'a> {
    log: &'a dyn ErrorLog,
}

impl<'a> ShowCommand<'a> {
    /// Creates a new show command handler.
    #[must_use]
    pub const fn new(log: &'a dyn ErrorLog) -> Self {
        Self { log }
    }

    /// Writes one error in full.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is malformed, no error has that
    /// identifier, or the log cannot be read.
    pub fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        id: &str,
    ) -> Result<(), CliError> {
        let id: ErrorId = id.parse()?;
        let entry = self
            .log
            .get(id)?
            .ok_or_else(|| CliError::NotFound(id.to_string()))?;
        format.write(out, &ErrorDetail::from(entry))
    }
}
