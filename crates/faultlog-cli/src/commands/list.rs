//! List command implementation.

use std::io::Write;

use faultlog::{ErrorLog, PageRequest};

use crate::error::CliError;
use crate::output::{ErrorList, ErrorSummary, OutputFormat};

/// Handler for the list command.
pub struct ListCommand<'a> {
    log: &'a dyn ErrorLog,
}

impl<'a> ListCommand<'a> {
    /// Creates a new list command handler.
    #[must_use]
    pub const fn new(log: &'a dyn ErrorLog) -> Self {
        Self { log }
    }

    /// Writes one page of errors, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the page arguments are negative or the log cannot
    /// be read.
    pub fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        page: i64,
        size: i64,
    ) -> Result<(), CliError> {
        let request = PageRequest::new(page, size)?;
        let result = self.log.get_page(request.index, request.size)?;

        let list = ErrorList {
            page: request.index,
            size: request.size,
            total_count: result.total_count,
            errors: result.entries.iter().map(ErrorSummary::from).collect(),
        };
        format.write(out, &list)
    }
}
