//! Capturing live errors into error records.
//!
//! This module provides:
//! - [`RequestContext`] — Owned snapshot of the request an error occurred in
//! - [`ErrorRecord::from_error`] — Builds a record from an error and context
//! - [`ErrorCapture`] — Filters records and hands them to an [`ErrorLog`]

use std::error::Error;
use std::fmt::Write as _;

use chrono::Local;
use tracing::{debug, error, info};

use crate::record::{ErrorRecord, NameValues};
use crate::traits::{ErrorLog, SharedErrorLog};
use crate::types::ErrorId;

/// Snapshot of the request an error was raised in.
///
/// All collections are owned copies, so the snapshot stays valid after the
/// request itself is gone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Authenticated user name, empty for anonymous requests.
    pub user: String,
    /// Response status code, 0 when unknown.
    pub status_code: u16,
    /// Server variables such as `REMOTE_ADDR` and `HTTP_USER_AGENT`.
    pub server_variables: NameValues,
    /// Parsed query string.
    pub query_string: NameValues,
    /// Posted form fields.
    pub form: NameValues,
    /// Request cookies.
    pub cookies: NameValues,
}

impl RequestContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the user name.
    #[must_use]
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    /// Sets the response status code.
    #[must_use]
    pub const fn with_status_code(mut self, status_code: u16) -> Self {
        self.status_code = status_code;
        self
    }

    /// Adds a server variable.
    #[must_use]
    pub fn with_server_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.server_variables.add(name, value);
        self
    }

    /// Adds a query string parameter.
    #[must_use]
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_string.add(name, value);
        self
    }

    /// Adds a form field.
    #[must_use]
    pub fn with_form(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.form.add(name, value);
        self
    }

    /// Adds a cookie.
    #[must_use]
    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.add(name, value);
        self
    }
}

impl ErrorRecord {
    /// Builds a record from a live error and an optional request snapshot.
    ///
    /// The type name is the concrete error type, the source is the crate it
    /// comes from, and the detail lists the whole `source()` chain.
    #[must_use]
    pub fn from_error<E>(err: &E, context: Option<&RequestContext>) -> Self
    where
        E: Error + 'static,
    {
        let type_name = std::any::type_name::<E>();
        let source = type_name.split("::").next().unwrap_or_default();
        let message = err.to_string();

        let mut detail = format!("{type_name}: {message}");
        let mut cause = err.source();
        while let Some(inner) = cause {
            let _ = write!(detail, "\ncaused by: {inner}");
            cause = inner.source();
        }

        let mut record = Self {
            host_name: local_host_name(),
            type_name: type_name.to_string(),
            source: source.to_string(),
            message,
            detail,
            time: Local::now().fixed_offset(),
            ..Self::default()
        };

        if let Some(context) = context {
            record.user.clone_from(&context.user);
            record.status_code = context.status_code;
            record.server_variables = context.server_variables.clone();
            record.query_string = context.query_string.clone();
            record.form = context.form.clone();
            record.cookies = context.cookies.clone();
        }

        record
    }

    /// Stamps the record with the name of the local machine.
    #[must_use]
    pub fn with_local_host_name(mut self) -> Self {
        self.host_name = local_host_name();
        self
    }
}

fn local_host_name() -> String {
    hostname::get()
        .ok()
        .and_then(|name| name.into_string().ok())
        .unwrap_or_default()
}

/// Predicate deciding whether a record is logged.
pub type ErrorFilter = Box<dyn Fn(&ErrorRecord) -> bool + Send + Sync>;

/// Turns errors into records and logs them.
///
/// Capturing never fails: a record dismissed by a filter or rejected by the
/// log yields `None`, and log failures are reported through `tracing` only.
pub struct ErrorCapture {
    log: SharedErrorLog,
    filters: Vec<ErrorFilter>,
}

impl ErrorCapture {
    /// Creates a capture layer writing to `log`.
    #[must_use]
    pub fn new(log: SharedErrorLog) -> Self {
        Self {
            log,
            filters: Vec::new(),
        }
    }

    /// Adds a filter; a record is dismissed if any filter returns false.
    #[must_use]
    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&ErrorRecord) -> bool + Send + Sync + 'static,
    {
        self.filters.push(Box::new(filter));
        self
    }

    /// The log records are written to.
    #[must_use]
    pub fn log(&self) -> &dyn ErrorLog {
        self.log.as_ref()
    }

    /// Captures a live error.
    pub fn capture<E>(&self, err: &E, context: Option<&RequestContext>) -> Option<ErrorId>
    where
        E: Error + 'static,
    {
        self.capture_record(ErrorRecord::from_error(err, context))
    }

    /// Logs a prebuilt record.
    pub fn capture_record(&self, record: ErrorRecord) -> Option<ErrorId> {
        if !self.filters.iter().all(|keep| keep(&record)) {
            debug!(error_type = %record.type_name, "error dismissed by filter");
            return None;
        }

        let error_type = record.type_name.clone();
        match self.log.add(record) {
            Ok(id) => {
                info!(%id, %error_type, log = self.log.name(), "captured error");
                Some(id)
            }
            Err(e) => {
                error!(%error_type, log = self.log.name(), error = %e, "failed to log error");
                None
            }
        }
    }
}
