//! Identifiers and result types shared by every error log backend.
//!
//! This module provides:
//! - [`ErrorId`] — Store-assigned identifier of a logged error
//! - [`ErrorLogEntry`] — A record bound to its identifier and serving log
//! - [`ErrorPage`] — One page of entries plus the log's total count
//! - [`PageRequest`] — Validated paging arguments from untrusted input

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ErrorLogError, Result};
use crate::record::ErrorRecord;

/// Unique identifier of a logged error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorId(Uuid);

impl ErrorId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for ErrorId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for ErrorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl FromStr for ErrorId {
    type Err = ErrorLogError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ErrorLogError::invalid("error id is empty"));
        }
        Uuid::parse_str(trimmed)
            .map(Self)
            .map_err(|e| ErrorLogError::invalid(format!("malformed error id '{trimmed}': {e}")))
    }
}

/// A logged error bound to the identifier its log assigned.
///
/// Entries are only created by error logs. The record is a frozen snapshot
/// shared with the log; [`ErrorLogEntry::record_mut`] copies it on first
/// write so edits never reach the log or other holders.
#[derive(Debug, Clone)]
pub struct ErrorLogEntry {
    id: ErrorId,
    log_name: String,
    record: Arc<ErrorRecord>,
}

impl ErrorLogEntry {
    pub(crate) fn new(id: ErrorId, log_name: impl Into<String>, record: Arc<ErrorRecord>) -> Self {
        Self {
            id,
            log_name: log_name.into(),
            record,
        }
    }

    /// Identifier assigned by the log.
    #[must_use]
    pub const fn id(&self) -> ErrorId {
        self.id
    }

    /// Name of the log that served this entry.
    #[must_use]
    pub fn log_name(&self) -> &str {
        &self.log_name
    }

    /// The logged record.
    #[must_use]
    pub fn record(&self) -> &ErrorRecord {
        &self.record
    }

    /// Mutable access to this entry's own copy of the record.
    pub fn record_mut(&mut self) -> &mut ErrorRecord {
        Arc::make_mut(&mut self.record)
    }

    /// Consumes the entry, returning an owned record.
    #[must_use]
    pub fn into_record(self) -> ErrorRecord {
        Arc::unwrap_or_clone(self.record)
    }
}

/// One page of entries, newest first.
#[derive(Debug, Clone, Default)]
pub struct ErrorPage {
    /// Entries on this page.
    pub entries: Vec<ErrorLogEntry>,
    /// Number of entries in the whole log when the page was read.
    pub total_count: usize,
}

/// Paging arguments validated from signed, untrusted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page index.
    pub index: usize,
    /// Number of entries per page.
    pub size: usize,
}

impl PageRequest {
    /// Validates a page index and size.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorLogError::InvalidArgument`] if either value is negative
    /// or the page offset does not fit in `usize`.
    pub fn new(index: i64, size: i64) -> Result<Self> {
        let index = usize::try_from(index)
            .map_err(|_| ErrorLogError::invalid(format!("page index must be >= 0, got {index}")))?;
        let size = usize::try_from(size)
            .map_err(|_| ErrorLogError::invalid(format!("page size must be >= 0, got {size}")))?;
        page_offset(index, size)?;
        Ok(Self { index, size })
    }
}

/// Offset of the first entry of a page.
pub(crate) fn page_offset(index: usize, size: usize) -> Result<usize> {
    index
        .checked_mul(size)
        .ok_or_else(|| ErrorLogError::invalid(format!("page {index} of size {size} overflows")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn error_id_display_parse_roundtrip() {
        let id = ErrorId::new_v4();
        let parsed: Result<ErrorId> = id.to_string().parse();
        assert!(matches!(parsed, Ok(p) if p == id));
    }

    #[test]
    fn error_ids_are_unique() {
        let a = ErrorId::new_v4();
        let b = ErrorId::new_v4();
        assert_ne!(a, b);
    }

    #[test]
    fn error_id_parse_trims_whitespace() {
        let id = ErrorId::new_v4();
        let parsed: Result<ErrorId> = format!("  {id}\n").parse();
        assert!(matches!(parsed, Ok(p) if p == id));
    }

    #[test_case("" ; "empty string")]
    #[test_case("   " ; "whitespace only")]
    #[test_case("not-a-guid" ; "plain text")]
    #[test_case("1234" ; "too short")]
    #[test_case("zzzzzzzz-zzzz-zzzz-zzzz-zzzzzzzzzzzz" ; "non hex digits")]
    fn error_id_parse_rejects_malformed(input: &str) {
        let result = input.parse::<ErrorId>();
        assert!(
            matches!(result, Err(ErrorLogError::InvalidArgument(_))),
            "expected '{input}' to be rejected"
        );
    }

    #[test]
    fn entry_record_mut_copies_on_write() {
        let shared = Arc::new(ErrorRecord::new().with_message("boom"));
        let mut entry = ErrorLogEntry::new(ErrorId::new_v4(), "memory", Arc::clone(&shared));

        entry.record_mut().message = "changed".to_string();

        assert_eq!(entry.record().message, "changed");
        assert_eq!(shared.message, "boom");
    }

    #[test]
    fn entry_into_record() {
        let entry = ErrorLogEntry::new(
            ErrorId::new_v4(),
            "memory",
            Arc::new(ErrorRecord::new().with_message("boom")),
        );
        assert_eq!(entry.log_name(), "memory");
        assert_eq!(entry.into_record().message, "boom");
    }

    #[test]
    fn page_request_accepts_zero() {
        let page = PageRequest::new(0, 0);
        assert_eq!(page.ok(), Some(PageRequest { index: 0, size: 0 }));
    }

    #[test_case(-1, 10 ; "negative index")]
    #[test_case(10, -1 ; "negative size")]
    #[test_case(-5, -5 ; "both negative")]
    fn page_request_rejects_negative(index: i64, size: i64) {
        let result = PageRequest::new(index, size);
        assert!(matches!(result, Err(ErrorLogError::InvalidArgument(_))));
    }

    #[test]
    fn page_offset_overflow_is_invalid() {
        assert!(page_offset(usize::MAX, 2).is_err());
        assert_eq!(page_offset(3, 10).ok(), Some(30));
    }
}
