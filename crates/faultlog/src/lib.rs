//! # faultlog
//!
//! Capture, storage and paged retrieval of application errors.
//!
//! This crate provides:
//!
//! - [`ErrorRecord`] — One captured error with its request context
//! - [`ErrorLog`] — Abstract trait for error log backends
//! - [`MemoryErrorLog`] — Bounded in-memory log, oldest evicted first
//! - [`FileErrorLog`] — Directory-backed log, one JSON file per error
//! - [`ErrorLogConfig`] — Backend selection loaded from JSON
//! - [`ErrorLogRegistry`] — Resolves the active log once per process
//! - [`ErrorCapture`] — Turns live errors into logged records
//!
//! ## Example
//!
//! ```rust
//! use faultlog::{ErrorRecord, MemoryErrorLog};
//!
//! let log = MemoryErrorLog::new(15)?;
//! let id = log.add(ErrorRecord::new().with_message("boom"));
//!
//! let page = log.get_page(0, 10)?;
//! assert_eq!(page.total_count, 1);
//! assert_eq!(page.entries[0].id(), id);
//! # Ok::<(), faultlog::ErrorLogError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod capture;
pub mod config;
pub mod error;
pub mod file_store;
pub mod record;
pub mod registry;
pub mod store;
pub mod traits;
pub mod types;

// Re-export main types
pub use capture::{ErrorCapture, ErrorFilter, RequestContext};
pub use config::{ErrorLogConfig, StoreConfig};
pub use error::{ErrorLogError, Result};
pub use file_store::{FileErrorLog, FileErrorLogConfig};
pub use record::{ErrorRecord, NameValue, NameValues};
pub use registry::{default_log, default_registry, ErrorLogRegistry};
pub use store::{MemoryErrorLog, MemoryErrorLogConfig, DEFAULT_CAPACITY, MAX_CAPACITY};
pub use traits::{ErrorLog, SharedErrorLog};
pub use types::{ErrorId, ErrorLogEntry, ErrorPage, PageRequest};
