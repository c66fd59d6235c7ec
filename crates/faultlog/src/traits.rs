//! Traits for error log backends.
//!
//! This module provides the [`ErrorLog`] trait for abstracting over
//! different error storage implementations (in-memory, file-based, etc.).

use std::sync::Arc;

use crate::error::Result;
use crate::record::ErrorRecord;
use crate::types::{ErrorId, ErrorLogEntry, ErrorPage};

/// Trait for error log backends.
///
/// Implementors store captured errors and answer point and paged queries.
/// This trait allows capture and presentation code to work with any backend.
pub trait ErrorLog: Send + Sync {
    /// Short name of the backend, recorded on every entry it serves.
    fn name(&self) -> &str;

    /// Application scope stamped on every record this log stores.
    fn application_name(&self) -> &str;

    /// Stores a record, returning the identifier assigned to it.
    ///
    /// The record's `application_name` is overwritten with
    /// [`ErrorLog::application_name`].
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot persist the record.
    fn add(&self, record: ErrorRecord) -> Result<ErrorId>;

    /// Gets a logged error by identifier.
    ///
    /// Returns `Ok(None)` if the identifier is unknown, including when the
    /// entry has been evicted.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, id: ErrorId) -> Result<Option<ErrorLogEntry>>;

    /// Gets one page of entries, newest first.
    ///
    /// Page 0 holds the `page_size` most recent entries, page 1 the next
    /// older ones, and so on. A `page_size` of 0 returns no entries but still
    /// reports the total count.
    ///
    /// # Errors
    ///
    /// Returns an error if `page_index * page_size` overflows or the backend
    /// cannot be read.
    fn get_page(&self, page_index: usize, page_size: usize) -> Result<ErrorPage>;

    /// Returns the number of logged errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn count(&self) -> Result<usize> {
        self.get_page(0, 0).map(|page| page.total_count)
    }
}

/// Shared, dynamically dispatched error log handle.
pub type SharedErrorLog = Arc<dyn ErrorLog>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorLogError;
    use crate::types::page_offset;

    /// A simple mock log for testing the trait's provided methods.
    struct MockLog {
        entries: std::sync::Mutex<Vec<(ErrorId, Arc<ErrorRecord>)>>,
    }

    impl MockLog {
        fn new() -> Self {
            Self {
                entries: std::sync::Mutex::new(Vec::new()),
            }
        }
    }

    impl ErrorLog for MockLog {
        fn name(&self) -> &str {
            "mock"
        }

        fn application_name(&self) -> &str {
            "tests"
        }

        fn add(&self, mut record: ErrorRecord) -> Result<ErrorId> {
            let id = ErrorId::new_v4();
            record.application_name = self.application_name().to_string();
            self.entries
                .lock()
                .map_err(|_| ErrorLogError::Config("mutex poisoned".to_string()))?
                .push((id, Arc::new(record)));
            Ok(id)
        }

        fn get(&self, id: ErrorId) -> Result<Option<ErrorLogEntry>> {
            let entries = self
                .entries
                .lock()
                .map_err(|_| ErrorLogError::Config("mutex poisoned".to_string()))?;
            Ok(entries
                .iter()
                .find(|(eid, _)| *eid == id)
                .map(|(eid, r)| ErrorLogEntry::new(*eid, self.name(), Arc::clone(r))))
        }

        fn get_page(&self, page_index: usize, page_size: usize) -> Result<ErrorPage> {
            let start = page_offset(page_index, page_size)?;
            let entries = self
                .entries
                .lock()
                .map_err(|_| ErrorLogError::Config("mutex poisoned".to_string()))?;
            Ok(ErrorPage {
                entries: entries
                    .iter()
                    .rev()
                    .skip(start)
                    .take(page_size)
                    .map(|(id, r)| ErrorLogEntry::new(*id, self.name(), Arc::clone(r)))
                    .collect(),
                total_count: entries.len(),
            })
        }
    }

    #[test]
    fn trait_add_and_get() {
        let log = MockLog::new();
        let id = log.add(ErrorRecord::new().with_message("test"));
        assert!(id.is_ok());

        if let Ok(id) = id {
            let entry = log.get(id).ok().flatten();
            assert_eq!(entry.as_ref().map(|e| e.record().message.as_str()), Some("test"));
            assert_eq!(
                entry.as_ref().map(|e| e.record().application_name.as_str()),
                Some("tests")
            );
        }
    }

    #[test]
    fn trait_count_uses_zero_sized_page() {
        let log = MockLog::new();
        assert_eq!(log.count().ok(), Some(0));

        let _ = log.add(ErrorRecord::new());
        let _ = log.add(ErrorRecord::new());
        assert_eq!(log.count().ok(), Some(2));
    }

    #[test]
    fn trait_object_is_usable() {
        let log: SharedErrorLog = Arc::new(MockLog::new());
        let _ = log.add(ErrorRecord::new().with_message("dyn"));

        let page = log.get_page(0, 10);
        assert!(page.is_ok());
        if let Ok(page) = page {
            assert_eq!(page.entries.len(), 1);
            assert_eq!(page.entries[0].log_name(), "mock");
        }
    }
}
