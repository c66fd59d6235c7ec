//! Command-line argument parsing with clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Browse and record application errors in a faultlog error log.
#[derive(Parser, Debug, Clone)]
#[command(name = "faultlog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// JSON configuration selecting the error log. Takes precedence over `--dir`.
    #[arg(short, long, env = "FAULTLOG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory of a file error log, ignored when a config is given.
    #[arg(short, long, env = "FAULTLOG_DIR", default_value = "errors")]
    pub dir: PathBuf,

    /// Application name stamped on recorded errors.
    #[arg(short, long, env = "FAULTLOG_APPLICATION", default_value = "")]
    pub application: String,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    pub format: Format,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output for scripting.
    Json,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List logged errors, newest first.
    List {
        /// Zero-based page index.
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        page: i64,

        /// Number of errors per page.
        #[arg(short, long, default_value_t = 15, allow_negative_numbers = true)]
        size: i64,
    },

    /// Show one logged error in full.
    Show {
        /// Error identifier.
        id: String,
    },

    /// Print the number of logged errors.
    Count,

    /// Record an error, for testing a deployment's log.
    Log {
        /// Error message.
        message: String,

        /// Error type name.
        #[arg(short = 't', long = "type", default_value = "faultlog::TestError")]
        type_name: String,

        /// HTTP status code.
        #[arg(long, default_value_t = 0)]
        status: u16,
    },
}
