//! CLI command implementations.
//!
//! Each submodule implements a specific CLI command:
//! - [`list`] - Page through logged errors
//! - [`show`] - Display one error in full
//! - [`count`] - Count logged errors
//! - [`log`] - Record an error

pub mod count;
pub mod list;
pub mod log;
pub mod show;

use std::path::Path;

use faultlog::{ErrorLogConfig, SharedErrorLog};
use tracing::debug;

use crate::error::CliError;

pub use count::CountCommand;
pub use list::ListCommand;
pub use log::LogCommand;
pub use show::ShowCommand;

/// Opens the error log selected on the command line.
///
/// A configuration file wins over the directory. A non-empty `application`
/// overrides the configured application name.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or the log cannot
/// be opened.
pub fn open_log(
    config: Option<&Path>,
    dir: &Path,
    application: &str,
) -> Result<SharedErrorLog, CliError> {
    let mut config = match config {
        Some(path) => ErrorLogConfig::from_file(path)?,
        None => ErrorLogConfig::file(dir),
    };
    if !application.is_empty() {
        config = config.with_application_name(application);
    }
    let log = config.open()?;
    debug!(store = log.name(), "opened error log");
    Ok(log)
}
