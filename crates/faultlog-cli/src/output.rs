//! Output formatting for CLI commands.
//!
//! Supports table (human-readable) and JSON output formats.

use std::io::Write;

use faultlog::{ErrorLogEntry, ErrorRecord, NameValues};
use serde::Serialize;

use crate::cli::Format;
use crate::error::CliError;

/// Output formatter that handles both table and JSON output.
#[derive(Debug, Clone)]
pub struct OutputFormat {
    format: Format,
}

impl OutputFormat {
    /// Create a new output formatter.
    #[must_use]
    pub const fn new(format: Format) -> Self {
        Self { format }
    }

    /// Check if JSON format is selected.
    #[must_use]
    pub const fn is_json(&self) -> bool {
        matches!(self.format, Format::Json)
    }

    /// Write a serializable value to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write<W, T>(&self, writer: &mut W, value: &T) -> Result<(), CliError>
    where
        W: Write,
        T: Serialize + TableDisplay,
    {
        match self.format {
            Format::Json => {
                serde_json::to_writer_pretty(&mut *writer, value)
                    .map_err(|e| CliError::Format(format!("JSON serialization failed: {e}")))?;
                writeln!(writer)?;
            }
            Format::Table => {
                value.write_table(writer)?;
            }
        }
        Ok(())
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::new(Format::Table)
    }
}

/// Trait for types that can be displayed as a table.
pub trait TableDisplay {
    /// Write the value as a human-readable table.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError>;
}

/// One row of an error listing.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorSummary {
    /// Error identifier.
    pub id: String,
    /// Capture time, RFC 3339.
    pub time: String,
    /// HTTP status code, 0 when unknown.
    pub status_code: u16,
    /// Error type name.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Error message.
    pub message: String,
    /// User of the failing request.
    pub user: String,
}

impl From<&ErrorLogEntry> for ErrorSummary {
    fn from(entry: &ErrorLogEntry) -> Self {
        let record = entry.record();
        Self {
            id: entry.id().to_string(),
            time: record.time.to_rfc3339(),
            status_code: record.status_code,
            type_name: record.type_name.clone(),
            message: record.message.clone(),
            user: record.user.clone(),
        }
    }
}

/// A page of logged errors.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorList {
    /// Page index shown.
    pub page: usize,
    /// Page size requested.
    pub size: usize,
    /// Errors in the whole log.
    pub total_count: usize,
    /// Errors on this page, newest first.
    pub errors: Vec<ErrorSummary>,
}

impl TableDisplay for ErrorList {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.errors.is_empty() {
            writeln!(writer, "No errors on page {} ({} logged)", self.page, self.total_count)?;
            return Ok(());
        }

        writeln!(
            writer,
            "{:<36}  {:<25}  {:>4}  {:<24}  {}",
            "ID", "TIME", "CODE", "TYPE", "MESSAGE"
        )?;
        writeln!(writer, "{}", "─".repeat(110))?;

        for error in &self.errors {
            writeln!(
                writer,
                "{:<36}  {:<25}  {:>4}  {:<24}  {}",
                error.id,
                error.time,
                error.status_code,
                truncate(&error.type_name, 24),
                truncate(&error.message, 60)
            )?;
        }

        let first = self.page * self.size + 1;
        let last = self.page * self.size + self.errors.len();
        writeln!(writer)?;
        writeln!(writer, "Errors {first}-{last} of {}", self.total_count)?;
        Ok(())
    }
}

/// A single logged error in full.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetail {
    /// Error identifier.
    pub id: String,
    /// Name of the log that served the error.
    pub log: String,
    /// The logged record.
    pub record: ErrorRecord,
}

impl From<ErrorLogEntry> for ErrorDetail {
    fn from(entry: ErrorLogEntry) -> Self {
        Self {
            id: entry.id().to_string(),
            log: entry.log_name().to_string(),
            record: entry.into_record(),
        }
    }
}

impl TableDisplay for ErrorDetail {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        let r = &self.record;
        writeln!(writer, "Error: {}", self.id)?;
        writeln!(writer, "══════════════════════════════════════════════════")?;
        writeln!(writer, "  Application:    {}", r.application_name)?;
        writeln!(writer, "  Host:           {}", r.host_name)?;
        writeln!(writer, "  Time:           {}", r.time.to_rfc3339())?;
        writeln!(writer, "  Type:           {}", r.type_name)?;
        writeln!(writer, "  Source:         {}", r.source)?;
        writeln!(writer, "  Status:         {}", r.status_code)?;
        writeln!(writer, "  User:           {}", r.user)?;
        writeln!(writer, "  Message:        {}", r.message)?;

        if !r.detail.is_empty() {
            writeln!(writer)?;
            writeln!(writer, "Detail")?;
            for line in r.detail.lines() {
                writeln!(writer, "  {line}")?;
            }
        }

        write_collection(writer, "Server Variables", &r.server_variables)?;
        write_collection(writer, "Query String", &r.query_string)?;
        write_collection(writer, "Form", &r.form)?;
        write_collection(writer, "Cookies", &r.cookies)?;
        Ok(())
    }
}

fn write_collection<W: Write>(
    writer: &mut W,
    title: &str,
    values: &NameValues,
) -> Result<(), CliError> {
    if values.is_empty() {
        return Ok(());
    }
    writeln!(writer)?;
    writeln!(writer, "{title}")?;
    for (name, value) in values.iter() {
        writeln!(writer, "  {name} = {value}")?;
    }
    Ok(())
}

/// Total number of logged errors.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorCount {
    /// Errors in the log.
    pub total_count: usize,
}

impl TableDisplay for ErrorCount {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "{}", self.total_count)?;
        Ok(())
    }
}

/// Identifier of a newly recorded error.
#[derive(Debug, Clone, Serialize)]
pub struct LoggedError {
    /// Error identifier.
    pub id: String,
}

impl TableDisplay for LoggedError {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Logged error {}", self.id)?;
        Ok(())
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else if max_chars > 3 {
        let head: String = s.chars().take(max_chars - 3).collect();
        format!("{head}...")
    } else {
        s.chars().take(max_chars).collect()
    }
}
