//! Error log configuration.
//!
//! Selects which backend stores captured errors and how it is set up.
//! Configuration is a JSON document:
//!
//! ```json
//! {
//!   "application_name": "shop",
//!   "store": { "kind": "file", "directory": "/var/lib/shop/errors", "max_files": 1000 }
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{ErrorLogError, Result};
use crate::file_store::{FileErrorLog, FileErrorLogConfig};
use crate::store::{MemoryErrorLog, MemoryErrorLogConfig, DEFAULT_CAPACITY, MAX_CAPACITY};
use crate::traits::SharedErrorLog;

/// Backend selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StoreConfig {
    /// Bounded in-memory log.
    Memory {
        /// Maximum number of entries kept.
        #[serde(default = "default_capacity")]
        capacity: usize,
        /// Attach to the process-wide ring instead of a private one.
        #[serde(default = "default_shared")]
        shared: bool,
    },
    /// One JSON file per error in a directory.
    File {
        /// Directory holding the error files.
        directory: PathBuf,
        /// Oldest files beyond this count are deleted.
        #[serde(default)]
        max_files: Option<usize>,
    },
}

const fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

const fn default_shared() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::Memory {
            capacity: DEFAULT_CAPACITY,
            shared: true,
        }
    }
}

/// Top-level error log configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorLogConfig {
    /// Application name stamped on every stored record.
    #[serde(default)]
    pub application_name: String,
    /// Backend selection.
    #[serde(default)]
    pub store: StoreConfig,
}

impl ErrorLogConfig {
    /// Memory configuration with the given capacity and a private ring.
    #[must_use]
    pub fn memory(capacity: usize) -> Self {
        Self {
            store: StoreConfig::Memory {
                capacity,
                shared: false,
            },
            ..Default::default()
        }
    }

    /// File configuration for the given directory.
    #[must_use]
    pub fn file(directory: impl Into<PathBuf>) -> Self {
        Self {
            store: StoreConfig::File {
                directory: directory.into(),
                max_files: None,
            },
            ..Default::default()
        }
    }

    /// Sets the application name.
    #[must_use]
    pub fn with_application_name(mut self, name: impl Into<String>) -> Self {
        self.application_name = name.into();
        self
    }

    /// Load configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ErrorLogError::Config(format!(
                "failed to read config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or fails validation.
    pub fn from_json(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorLogError::InvalidArgument`] if any value is out of range.
    pub fn validate(&self) -> Result<()> {
        match &self.store {
            StoreConfig::Memory { capacity, .. } => {
                if *capacity > MAX_CAPACITY {
                    return Err(ErrorLogError::invalid(format!(
                        "store.capacity must be at most {MAX_CAPACITY}, got {capacity}"
                    )));
                }
            }
            StoreConfig::File {
                directory,
                max_files,
            } => {
                if directory.as_os_str().is_empty() {
                    return Err(ErrorLogError::invalid("store.directory cannot be empty"));
                }
                if *max_files == Some(0) {
                    return Err(ErrorLogError::invalid(
                        "store.max_files must be greater than 0",
                    ));
                }
            }
        }
        Ok(())
    }

    /// Builds the configured error log.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the backend cannot
    /// be opened.
    pub fn open(&self) -> Result<SharedErrorLog> {
        self.validate()?;
        let log: SharedErrorLog = match &self.store {
            StoreConfig::Memory {
                capacity,
                shared: true,
            } => Arc::new(MemoryErrorLog::shared(
                *capacity,
                self.application_name.clone(),
            )?),
            StoreConfig::Memory {
                capacity,
                shared: false,
            } => Arc::new(MemoryErrorLog::with_config(MemoryErrorLogConfig {
                capacity: *capacity,
                application_name: self.application_name.clone(),
            })?),
            StoreConfig::File {
                directory,
                max_files,
            } => Arc::new(FileErrorLog::new(FileErrorLogConfig {
                directory: directory.clone(),
                application_name: self.application_name.clone(),
                max_files: *max_files,
            })?),
        };
        Ok(log)
    }
}
