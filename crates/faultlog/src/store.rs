//! In-memory error log backed by a fixed-capacity ring.
//!
//! This module provides:
//! - [`MemoryErrorLog`] — Thread-safe bounded error log, oldest evicted first
//! - [`MemoryErrorLogConfig`] — Capacity and application scope
//! - Implementation of [`ErrorLog`] for generic usage

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use tracing::debug;

use crate::error::{ErrorLogError, Result};
use crate::record::ErrorRecord;
use crate::traits::ErrorLog;
use crate::types::{page_offset, ErrorId, ErrorLogEntry, ErrorPage};

/// Number of entries kept when no capacity is configured.
pub const DEFAULT_CAPACITY: usize = 15;

/// Largest capacity a memory log accepts.
pub const MAX_CAPACITY: usize = 500;

const LOG_NAME: &str = "memory";

/// The ring every [`MemoryErrorLog::shared`] handle attaches to.
static SHARED_RING: OnceCell<Arc<Ring>> = OnceCell::new();

/// Configuration for a memory error log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryErrorLogConfig {
    /// Maximum number of entries to keep.
    pub capacity: usize,
    /// Application name stamped on stored records.
    pub application_name: String,
}

impl Default for MemoryErrorLogConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            application_name: String::new(),
        }
    }
}

/// Entries in insertion order plus an index by id.
#[derive(Debug, Default)]
struct RingState {
    order: VecDeque<ErrorId>,
    by_id: HashMap<ErrorId, Arc<ErrorRecord>>,
}

/// Fixed-capacity storage shared by one or more log handles.
#[derive(Debug)]
struct Ring {
    capacity: usize,
    state: RwLock<RingState>,
}

impl Ring {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            state: RwLock::new(RingState {
                order: VecDeque::with_capacity(capacity),
                by_id: HashMap::with_capacity(capacity),
            }),
        }
    }
}

/// Thread-safe in-memory error log holding the most recent entries.
///
/// Adds take the ring's write lock; lookups and pages share its read lock.
/// Stored records are frozen behind `Arc`, so the only data leaving the lock
/// is a reference-counted snapshot that callers cannot mutate in place.
#[derive(Debug, Clone)]
pub struct MemoryErrorLog {
    application_name: String,
    ring: Arc<Ring>,
}

impl MemoryErrorLog {
    /// Creates a log with its own private ring.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorLogError::InvalidArgument`] if `capacity` exceeds
    /// [`MAX_CAPACITY`].
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_config(MemoryErrorLogConfig {
            capacity,
            ..Default::default()
        })
    }

    /// Creates a log with its own private ring from a full configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorLogError::InvalidArgument`] if the capacity is out of range.
    pub fn with_config(config: MemoryErrorLogConfig) -> Result<Self> {
        validate_capacity(config.capacity)?;
        Ok(Self {
            application_name: config.application_name,
            ring: Arc::new(Ring::new(config.capacity)),
        })
    }

    /// Attaches to the process-wide ring.
    ///
    /// The first call creates the ring with `capacity`; every later call must
    /// ask for the same capacity. Handles may differ in application name.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorLogError::InvalidArgument`] if the capacity is out of
    /// range, or [`ErrorLogError::CapacityConflict`] if the shared ring was
    /// created with a different capacity.
    pub fn shared(capacity: usize, application_name: impl Into<String>) -> Result<Self> {
        validate_capacity(capacity)?;
        let ring = SHARED_RING.get_or_init(|| {
            debug!(capacity, "creating shared memory error log");
            Arc::new(Ring::new(capacity))
        });
        if ring.capacity != capacity {
            return Err(ErrorLogError::CapacityConflict {
                existing: ring.capacity,
                requested: capacity,
            });
        }
        Ok(Self {
            application_name: application_name.into(),
            ring: Arc::clone(ring),
        })
    }

    /// Returns a handle onto the same ring scoped to another application.
    #[must_use]
    pub fn with_application_name(&self, application_name: impl Into<String>) -> Self {
        Self {
            application_name: application_name.into(),
            ring: Arc::clone(&self.ring),
        }
    }

    /// Maximum number of entries kept.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.ring.capacity
    }

    /// Returns the number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ring.state.read().order.len()
    }

    /// Returns true if the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ring.state.read().order.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&self) {
        let mut state = self.ring.state.write();
        state.order.clear();
        state.by_id.clear();
    }

    /// Returns true if both handles share one ring.
    #[must_use]
    pub fn shares_ring_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.ring, &other.ring)
    }

    /// Stores a record, evicting the oldest entries beyond capacity.
    #[allow(clippy::significant_drop_tightening)]
    pub fn add(&self, mut record: ErrorRecord) -> ErrorId {
        let id = ErrorId::new_v4();
        record.application_name.clone_from(&self.application_name);
        let record = Arc::new(record);

        let mut evicted = 0usize;
        {
            let mut state = self.ring.state.write();
            state.order.push_back(id);
            state.by_id.insert(id, record);

            while state.order.len() > self.ring.capacity {
                if let Some(oldest) = state.order.pop_front() {
                    state.by_id.remove(&oldest);
                    evicted += 1;
                }
            }
        }

        debug!(%id, evicted, "logged error in memory");
        id
    }

    /// Gets a logged error by identifier.
    #[must_use]
    pub fn get(&self, id: ErrorId) -> Option<ErrorLogEntry> {
        let record = self.ring.state.read().by_id.get(&id).map(Arc::clone)?;
        Some(ErrorLogEntry::new(id, LOG_NAME, record))
    }

    /// Gets one page of entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorLogError::InvalidArgument`] if the page offset overflows.
    pub fn get_page(&self, page_index: usize, page_size: usize) -> Result<ErrorPage> {
        let start = page_offset(page_index, page_size)?;

        let (snapshot, total_count) = {
            let state = self.ring.state.read();
            let snapshot: Vec<(ErrorId, Arc<ErrorRecord>)> = state
                .order
                .iter()
                .rev()
                .skip(start)
                .take(page_size)
                .filter_map(|id| state.by_id.get(id).map(|r| (*id, Arc::clone(r))))
                .collect();
            (snapshot, state.order.len())
        };

        Ok(ErrorPage {
            entries: snapshot
                .into_iter()
                .map(|(id, record)| ErrorLogEntry::new(id, LOG_NAME, record))
                .collect(),
            total_count,
        })
    }
}

fn validate_capacity(capacity: usize) -> Result<()> {
    if capacity > MAX_CAPACITY {
        return Err(ErrorLogError::invalid(format!(
            "memory log capacity must be between 0 and {MAX_CAPACITY}, got {capacity}"
        )));
    }
    Ok(())
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl ErrorLog for MemoryErrorLog {
    fn name(&self) -> &str {
        LOG_NAME
    }

    fn application_name(&self) -> &str {
        &self.application_name
    }

    fn add(&self, record: ErrorRecord) -> Result<ErrorId> {
        Ok(MemoryErrorLog::add(self, record))
    }

    fn get(&self, id: ErrorId) -> Result<Option<ErrorLogEntry>> {
        Ok(MemoryErrorLog::get(self, id))
    }

    fn get_page(&self, page_index: usize, page_size: usize) -> Result<ErrorPage> {
        MemoryErrorLog::get_page(self, page_index, page_size)
    }

    fn count(&self) -> Result<usize> {
        Ok(self.len())
    }
}
