//! # faultlog-cli
//!
//! Command-line access to a faultlog error log.
//!
//! Provides commands for:
//! - Paging through logged errors, newest first
//! - Showing one error with its request context
//! - Counting logged errors
//! - Recording a test error
//!
//! The log is opened from a JSON configuration (`--config`) or, by default,
//! as a file log in a directory (`--dir`).

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;

pub use cli::{Cli, Commands, Format};
pub use error::CliError;
pub use output::OutputFormat;
