//! Process-wide selection of the active error log.
//!
//! An [`ErrorLogRegistry`] resolves its configuration into an error log the
//! first time one is asked for and hands out that same log from then on.
//! Without configuration it falls back to the shared memory log with
//! [`DEFAULT_CAPACITY`](crate::store::DEFAULT_CAPACITY).

use std::sync::Arc;

use once_cell::sync::{Lazy, OnceCell};
use parking_lot::Mutex;
use tracing::info;

use crate::config::ErrorLogConfig;
use crate::error::{ErrorLogError, Result};
use crate::traits::SharedErrorLog;

static DEFAULT_REGISTRY: Lazy<ErrorLogRegistry> = Lazy::new(ErrorLogRegistry::new);

/// Resolves and caches one error log.
#[derive(Default)]
pub struct ErrorLogRegistry {
    config: Mutex<Option<ErrorLogConfig>>,
    log: OnceCell<SharedErrorLog>,
}

impl ErrorLogRegistry {
    /// Creates an unconfigured registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry that will resolve `config`.
    #[must_use]
    pub fn with_config(config: ErrorLogConfig) -> Self {
        Self {
            config: Mutex::new(Some(config)),
            log: OnceCell::new(),
        }
    }

    /// Sets the configuration used on first resolution.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorLogError::AlreadyInitialized`] if the log has already
    /// been resolved, or [`ErrorLogError::InvalidArgument`] if the
    /// configuration is invalid.
    pub fn configure(&self, config: ErrorLogConfig) -> Result<()> {
        config.validate()?;
        let mut current = self.config.lock();
        if self.log.get().is_some() {
            return Err(ErrorLogError::AlreadyInitialized);
        }
        *current = Some(config);
        Ok(())
    }

    /// Returns the active error log, resolving it on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured backend cannot be opened. A failed
    /// resolution is not cached; the next call tries again.
    pub fn log(&self) -> Result<SharedErrorLog> {
        if let Some(log) = self.log.get() {
            return Ok(Arc::clone(log));
        }

        // held across initialization so configure() cannot slip in between
        let config = self.config.lock();
        let log = self.log.get_or_try_init(|| {
            let config = config.clone().unwrap_or_default();
            let log = config.open()?;
            info!(
                store = log.name(),
                application = %config.application_name,
                "resolved error log"
            );
            Ok::<_, ErrorLogError>(log)
        })?;
        Ok(Arc::clone(log))
    }

    /// Returns true once the log has been resolved.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.log.get().is_some()
    }
}

/// The process-wide registry.
#[must_use]
pub fn default_registry() -> &'static ErrorLogRegistry {
    &DEFAULT_REGISTRY
}

/// The process-wide error log.
///
/// # Errors
///
/// Returns an error if the configured backend cannot be opened.
pub fn default_log() -> Result<SharedErrorLog> {
    DEFAULT_REGISTRY.log()
}
