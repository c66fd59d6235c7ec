//! File-based error log, one JSON document per error.
//!
//! This module provides:
//! - [`FileErrorLog`] — Persistent error log backed by a directory
//! - [`FileErrorLogConfig`] — Directory, application scope and retention
//! - Implementation of [`ErrorLog`]
//!
//! Files are named `error-<seq>-<utc time>-<id>.json`. The zero-padded
//! sequence number makes name order equal insertion order, and is recovered
//! from the directory on open.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::error::{ErrorLogError, Result};
use crate::record::ErrorRecord;
use crate::traits::ErrorLog;
use crate::types::{page_offset, ErrorId, ErrorLogEntry, ErrorPage};

const LOG_NAME: &str = "file";
const FILE_PREFIX: &str = "error-";
const FILE_EXTENSION: &str = "json";
const UUID_LEN: usize = 36;

/// Configuration for file-based error storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileErrorLogConfig {
    /// Directory holding the error files.
    pub directory: PathBuf,
    /// Application name stamped on stored records.
    pub application_name: String,
    /// Oldest files beyond this count are deleted after each add.
    pub max_files: Option<usize>,
}

impl Default for FileErrorLogConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("errors"),
            application_name: String::new(),
            max_files: None,
        }
    }
}

impl FileErrorLogConfig {
    /// Creates a new config with the given directory.
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            ..Default::default()
        }
    }

    /// Sets the application name.
    #[must_use]
    pub fn with_application_name(mut self, name: impl Into<String>) -> Self {
        self.application_name = name.into();
        self
    }

    /// Sets the maximum number of files kept.
    #[must_use]
    pub const fn with_max_files(mut self, max_files: usize) -> Self {
        self.max_files = Some(max_files);
        self
    }
}

/// Internal state guarded by the log's lock.
struct FileState {
    /// Sequence number for the next file.
    next_seq: u64,
}

/// A file name parsed back into its parts.
struct ErrorFile {
    path: PathBuf,
    seq: u64,
    id: ErrorId,
}

/// Directory-backed error log.
///
/// Adds hold the write lock while writing and pruning; reads hold the read
/// lock so a page never observes a half-pruned directory. Each document is
/// written to a temporary file and renamed into place.
pub struct FileErrorLog {
    config: FileErrorLogConfig,
    state: RwLock<FileState>,
}

impl FileErrorLog {
    /// Opens a file error log, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or listed.
    pub fn new(config: FileErrorLogConfig) -> Result<Self> {
        fs::create_dir_all(&config.directory)?;

        let next_seq = list_files(&config.directory)?
            .last()
            .map_or(0, |f| f.seq + 1);

        Ok(Self {
            config,
            state: RwLock::new(FileState { next_seq }),
        })
    }

    /// Opens a file error log in `directory` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn with_directory(directory: impl Into<PathBuf>) -> Result<Self> {
        Self::new(FileErrorLogConfig::new(directory))
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &FileErrorLogConfig {
        &self.config
    }

    /// Writes a record to a new file.
    ///
    /// Retention runs after the file is in place and never fails the add;
    /// files it cannot delete are reported and left behind.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn add(&self, mut record: ErrorRecord) -> Result<ErrorId> {
        let id = ErrorId::new_v4();
        record.application_name.clone_from(&self.config.application_name);

        let mut state = self.state.write();
        let seq = state.next_seq;

        let stamp = record.time.with_timezone(&Utc).format("%Y-%m-%d%H%M%SZ");
        let file_name = format!("{FILE_PREFIX}{seq:010}-{stamp}-{id}.{FILE_EXTENSION}");
        let path = self.config.directory.join(&file_name);
        let tmp_path = self.config.directory.join(format!(".{file_name}.tmp"));

        write_atomically(&tmp_path, &path, &record)?;
        state.next_seq = seq + 1;

        if let Some(max_files) = self.config.max_files {
            self.prune_locked(max_files);
        }
        drop(state);

        debug!(%id, file = %file_name, "logged error to file");
        Ok(id)
    }

    /// Reads a logged error by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be listed or the matching
    /// file cannot be read.
    pub fn get(&self, id: ErrorId) -> Result<Option<ErrorLogEntry>> {
        let _state = self.state.read();
        let Some(file) = list_files(&self.config.directory)?
            .into_iter()
            .find(|f| f.id == id)
        else {
            return Ok(None);
        };

        let record = read_record(&file.path)?;
        Ok(Some(ErrorLogEntry::new(id, LOG_NAME, Arc::new(record))))
    }

    /// Reads one page of entries, newest first.
    ///
    /// Files that cannot be parsed are skipped. `total_count` still counts
    /// them, so a page may hold fewer entries than the total implies.
    ///
    /// # Errors
    ///
    /// Returns an error if the page offset overflows or the directory cannot
    /// be listed.
    pub fn get_page(&self, page_index: usize, page_size: usize) -> Result<ErrorPage> {
        let start = page_offset(page_index, page_size)?;

        let _state = self.state.read();
        let files = list_files(&self.config.directory)?;
        let total_count = files.len();

        let entries = files
            .iter()
            .rev()
            .skip(start)
            .take(page_size)
            .filter_map(|file| match read_record(&file.path) {
                Ok(record) => Some(ErrorLogEntry::new(file.id, LOG_NAME, Arc::new(record))),
                Err(e) => {
                    warn!(path = %file.path.display(), error = %e, "skipping unreadable error file");
                    None
                }
            })
            .collect();

        Ok(ErrorPage {
            entries,
            total_count,
        })
    }

    /// Deletes every error file.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be deleted.
    pub fn clear(&self) -> Result<()> {
        let _state = self.state.write();
        for file in list_files(&self.config.directory)? {
            fs::remove_file(&file.path)?;
        }
        Ok(())
    }

    // ========== Internal Methods ==========

    fn prune_locked(&self, max_files: usize) {
        let files = match list_files(&self.config.directory) {
            Ok(files) => files,
            Err(e) => {
                warn!(error = %e, "failed to list error files for pruning");
                return;
            }
        };

        let excess = files.len().saturating_sub(max_files);
        let mut removed = 0usize;
        for file in files.iter().take(excess) {
            match fs::remove_file(&file.path) {
                Ok(()) => removed += 1,
                Err(e) => {
                    warn!(path = %file.path.display(), error = %e, "failed to prune error file");
                }
            }
        }
        if removed > 0 {
            debug!(removed, "pruned old error files");
        }
    }
}

/// Writes `record` to `tmp_path` and renames it to `path`.
///
/// The temporary file is removed if any step fails.
fn write_atomically(tmp_path: &Path, path: &Path, record: &ErrorRecord) -> Result<()> {
    let written = write_document(tmp_path, record)
        .and_then(|()| fs::rename(tmp_path, path).map_err(ErrorLogError::from));

    if written.is_err() {
        let _ = fs::remove_file(tmp_path);
    }
    written
}

fn write_document(path: &Path, record: &ErrorRecord) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, record)?;
    writer.flush()?;
    Ok(())
}

/// Lists error files in insertion order (oldest first).
///
/// Only regular files are considered.
fn list_files(directory: &Path) -> Result<Vec<ErrorFile>> {
    let mut files: Vec<ErrorFile> = fs::read_dir(directory)?
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
        .filter_map(|entry| parse_file_name(entry.path()))
        .collect();
    files.sort_by_key(|f| f.seq);
    Ok(files)
}

/// Parses `error-<seq>-<stamp>-<uuid>.json`.
fn parse_file_name(path: PathBuf) -> Option<ErrorFile> {
    if path.extension()? != FILE_EXTENSION {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    let rest = stem.strip_prefix(FILE_PREFIX)?;
    let (seq, rest) = rest.split_once('-')?;
    let seq = seq.parse().ok()?;
    // the stamp itself contains hyphens, so take the id from the end
    let split = rest.len().checked_sub(UUID_LEN)?;
    let _stamp = rest.get(..split)?.strip_suffix('-')?;
    let id = rest.get(split..)?.parse().ok()?;
    Some(ErrorFile { path, seq, id })
}

fn read_record(path: &Path) -> Result<ErrorRecord> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl ErrorLog for FileErrorLog {
    fn name(&self) -> &str {
        LOG_NAME
    }

    fn application_name(&self) -> &str {
        &self.config.application_name
    }

    fn add(&self, record: ErrorRecord) -> Result<ErrorId> {
        FileErrorLog::add(self, record)
    }

    fn get(&self, id: ErrorId) -> Result<Option<ErrorLogEntry>> {
        FileErrorLog::get(self, id)
    }

    fn get_page(&self, page_index: usize, page_size: usize) -> Result<ErrorPage> {
        FileErrorLog::get_page(self, page_index, page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(message: &str) -> ErrorRecord {
        ErrorRecord::new().with_message(message)
    }

    fn make_temp_log() -> (FileErrorLog, TempDir) {
        let temp_dir = TempDir::new().expect("create temp dir");
        let log = FileErrorLog::with_directory(temp_dir.path()).expect("create log");
        (log, temp_dir)
    }

    fn messages(page: &ErrorPage) -> Vec<String> {
        page.entries
            .iter()
            .map(|e| e.record().message.clone())
            .collect()
    }

    #[test]
    fn creates_directory() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let path = temp_dir.path().join("nested/errors");
        let log = FileErrorLog::with_directory(&path);
        assert!(log.is_ok());
        assert!(path.exists());
    }

    #[test]
    fn add_then_get() {
        let (log, _dir) = make_temp_log();
        let id = log.add(record("boom")).expect("add");

        let entry = log.get(id).expect("get").expect("entry exists");
        assert_eq!(entry.id(), id);
        assert_eq!(entry.log_name(), "file");
        assert_eq!(entry.record().message, "boom");
    }

    #[test]
    fn writes_one_file_per_error() {
        let (log, dir) = make_temp_log();
        let id = log.add(record("boom")).expect("add");

        let names: Vec<String> = fs::read_dir(dir.path())
            .expect("read dir")
            .filter_map(std::result::Result::ok)
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 1);
        assert!(names[0].starts_with("error-0000000000-"));
        assert!(names[0].ends_with(&format!("-{id}.json")));
    }

    #[test]
    fn get_unknown_is_none() {
        let (log, _dir) = make_temp_log();
        let _ = log.add(record("boom"));
        assert!(matches!(log.get(ErrorId::new_v4()), Ok(None)));
    }

    #[test]
    fn pages_are_newest_first() {
        let (log, _dir) = make_temp_log();
        for i in 0..5 {
            let _ = log.add(record(&format!("m{i}")));
        }

        let first = log.get_page(0, 2).expect("page 0");
        assert_eq!(messages(&first), vec!["m4", "m3"]);
        assert_eq!(first.total_count, 5);

        let last = log.get_page(2, 2).expect("page 2");
        assert_eq!(messages(&last), vec!["m0"]);

        let count_only = log.get_page(0, 0).expect("count");
        assert!(count_only.entries.is_empty());
        assert_eq!(count_only.total_count, 5);
    }

    #[test]
    fn stamps_application_name() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let config = FileErrorLogConfig::new(temp_dir.path()).with_application_name("shop");
        let log = FileErrorLog::new(config).expect("create log");

        let id = log.add(record("boom")).expect("add");
        let entry = log.get(id).expect("get").expect("entry");
        assert_eq!(entry.record().application_name, "shop");
    }

    #[test]
    fn max_files_prunes_oldest() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let config = FileErrorLogConfig::new(temp_dir.path()).with_max_files(3);
        let log = FileErrorLog::new(config).expect("create log");

        let first = log.add(record("m0")).expect("add");
        for i in 1..5 {
            let _ = log.add(record(&format!("m{i}")));
        }

        let page = log.get_page(0, 10).expect("page");
        assert_eq!(messages(&page), vec!["m4", "m3", "m2"]);
        assert!(matches!(log.get(first), Ok(None)));
    }

    #[test]
    fn persists_across_reopen_and_continues_sequence() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let config = FileErrorLogConfig::new(temp_dir.path());

        {
            let log = FileErrorLog::new(config.clone()).expect("create log");
            let _ = log.add(record("before"));
        }

        let log = FileErrorLog::new(config).expect("reopen log");
        let _ = log.add(record("after"));

        let page = log.get_page(0, 10).expect("page");
        assert_eq!(messages(&page), vec!["after", "before"]);
    }

    #[test]
    fn skips_unreadable_files_and_foreign_names() {
        let (log, dir) = make_temp_log();
        let _ = log.add(record("good"));

        let bad_id = ErrorId::new_v4();
        fs::write(
            dir.path().join(format!("error-0000000001-2024-01-01000000Z-{bad_id}.json")),
            "not json",
        )
        .expect("write bad file");
        fs::write(dir.path().join("notes.txt"), "ignored").expect("write foreign file");

        let page = log.get_page(0, 10).expect("page");
        assert_eq!(page.total_count, 2);
        assert_eq!(messages(&page), vec!["good"]);
        assert!(log.get(bad_id).is_err());
    }

    #[test]
    fn clear_removes_files() {
        let (log, _dir) = make_temp_log();
        let _ = log.add(record("boom"));
        log.clear().expect("clear");
        assert_eq!(ErrorLog::count(&log).ok(), Some(0));
    }

    #[test]
    fn prune_survives_entries_it_cannot_remove() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let blocker = temp_dir
            .path()
            .join(format!("error-0000000000-2024-01-01000000Z-{}.json", ErrorId::new_v4()));
        fs::create_dir(&blocker).expect("create blocking directory");

        let config = FileErrorLogConfig::new(temp_dir.path()).with_max_files(2);
        let log = FileErrorLog::new(config).expect("create log");

        for i in 0..5 {
            assert!(log.add(record(&format!("m{i}"))).is_ok(), "add {i} failed");
        }

        let page = log.get_page(0, 10).expect("page");
        assert_eq!(messages(&page), vec!["m4", "m3"]);
        assert_eq!(page.total_count, 2);
        assert!(blocker.is_dir());
    }

    #[test]
    fn failed_write_removes_temp_file() {
        let (_log, dir) = make_temp_log();
        let target = dir.path().join("occupied");
        fs::create_dir(&target).expect("create target directory");
        fs::write(target.join("inner"), "x").expect("fill target directory");
        let tmp_path = dir.path().join(".occupied.tmp");

        let result = write_atomically(&tmp_path, &target, &record("boom"));
        assert!(result.is_err());
        assert!(!tmp_path.exists());
    }

    #[test]
    fn file_without_time_is_skipped() {
        let (log, dir) = make_temp_log();
        let _ = log.add(record("good"));
        fs::write(
            dir.path().join(format!("error-0000000001-2024-01-01000000Z-{}.json", ErrorId::new_v4())),
            r#"{"message":"no time"}"#,
        )
        .expect("write file");

        let page = log.get_page(0, 10).expect("page");
        assert_eq!(messages(&page), vec!["good"]);
    }

    #[test]
    fn config_defaults() {
        let config = FileErrorLogConfig::default();
        assert_eq!(config.directory, PathBuf::from("errors"));
        assert_eq!(config.application_name, "");
        assert!(config.max_files.is_none());
    }
}
