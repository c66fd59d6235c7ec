//! faultlog CLI binary entrypoint.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use faultlog_cli::cli::{Cli, Commands};
use faultlog_cli::commands::{open_log, CountCommand, ListCommand, LogCommand, ShowCommand};
use faultlog_cli::output::OutputFormat;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let format = OutputFormat::new(cli.format);
    let log = open_log(cli.config.as_deref(), &cli.dir, &cli.application)?;
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::List { page, size } => {
            ListCommand::new(log.as_ref()).execute(&mut stdout, &format, page, size)?;
        }
        Commands::Show { id } => {
            ShowCommand::new(log.as_ref()).execute(&mut stdout, &format, &id)?;
        }
        Commands::Count => {
            CountCommand::new(log.as_ref()).execute(&mut stdout, &format)?;
        }
        Commands::Log {
            message,
            type_name,
            status,
        } => {
            LogCommand::new(log.as_ref()).execute(
                &mut stdout,
                &format,
                &message,
                &type_name,
                status,
            )?;
        }
    }

    Ok(())
}
