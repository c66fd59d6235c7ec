//! Log command implementation.
//!
//! Records a synthetic error so an operator can check that a deployment's
//! log is reachable and writable.

use std::io::Write;

use faultlog::{ErrorLog, ErrorRecord};
use tracing::info;

use crate::error::CliError;
use crate::output::{LoggedError, OutputFormat};

/// Source recorded on errors logged from the command line.
pub const CLI_SOURCE: &str = "faultlog-cli";

/// Handler for the log command.
pub struct LogCommand<'a> {
    log: &'a dyn ErrorLog,
}

impl<'a> LogCommand<'a> {
    /// Creates a new log command handler.
    #[must_use]
    pub const fn new(log: &'a dyn ErrorLog) -> Self {
        Self { log }
    }

    /// Records an error and writes its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the log rejects the record.
    pub fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        message: &str,
        type_name: &str,
        status: u16,
    ) -> Result<(), CliError> {
        let record = ErrorRecord::new()
            .with_type_name(type_name)
            .with_message(message)
            .with_detail(format!("{type_name}: {message}"))
            .with_source(CLI_SOURCE)
            .with_status_code(status)
            .with_local_host_name();

        let id = self.log.add(record)?;
        info!(%id, store = self.log.name(), "logged error");
        format.write(out, &LoggedError { id: id.to_string() })
    }
}
