//! File-based record storage with rotation support.
//!
//! This module provides:
//! - [`FileRecordStore`] — Persistent record storage backed by files
//! - Segment rotation based on size
//! - JSON-lines format for records
//! - Criteria-driven deletion by segment rewrite
//!
//! All file I/O runs on tokio's blocking pool, so awaiting the store never
//! stalls an executor thread.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::config::FileStoreConfig;
use crate::criteria::Criteria;
use crate::error::{StoreError, StoreResult};
use crate::matcher::matches;
use crate::traits::RecordStore;
use crate::types::LogRecord;

const SEGMENT_EXT: &str = "log";
const TEMP_EXT: &str = "tmp";

/// Internal state for segment management.
struct FileState {
    /// Current active segment path.
    current_file: Option<PathBuf>,
    /// Current segment size in bytes.
    current_size: u64,
    /// Rotated segments (oldest first).
    rotated_files: Vec<PathBuf>,
}

impl FileState {
    /// All segments, oldest first.
    fn segments(&self) -> impl DoubleEndedIterator<Item = &PathBuf> {
        self.rotated_files.iter().chain(self.current_file.iter())
    }
}

struct Inner {
    config: FileStoreConfig,
    state: RwLock<FileState>,
    /// Monotonic counter for unique segment names within one millisecond.
    file_seq: AtomicU64,
}

/// File-based record storage with rotation.
///
/// Stores records as JSON-lines in segment files, rotating when a segment
/// would grow past `max_file_size`. Mutations hold the store's write lock for
/// their whole duration, so a deletion sees one consistent snapshot.
#[derive(Clone)]
pub struct FileRecordStore {
    inner: Arc<Inner>,
}

impl FileRecordStore {
    /// Opens a file store, resuming any segments already in `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base directory cannot be created or listed.
    pub fn open(config: FileStoreConfig) -> StoreResult<Self> {
        fs::create_dir_all(&config.base_dir)?;

        let mut segments = Vec::new();
        for entry in fs::read_dir(&config.base_dir)? {
            let path = entry?.path();
            if !has_prefix(&path, &config.file_prefix) {
                continue;
            }
            match path.extension().and_then(|ext| ext.to_str()) {
                Some(SEGMENT_EXT) => segments.push(path),
                Some(TEMP_EXT) => {
                    warn!(path = %path.display(), "removing interrupted segment rewrite");
                    fs::remove_file(&path)?;
                }
                _ => {}
            }
        }
        segments.sort();

        let seq = segments.len() as u64;
        let (current_file, current_size) = match segments.pop() {
            Some(last) => {
                let size = fs::metadata(&last)?.len();
                (Some(last), size)
            }
            None => (None, 0),
        };

        debug!(
            base_dir = %config.base_dir.display(),
            segments = segments.len() + usize::from(current_file.is_some()),
            "opened file record store"
        );

        Ok(Self {
            inner: Arc::new(Inner {
                config,
                state: RwLock::new(FileState {
                    current_file,
                    current_size,
                    rotated_files: segments,
                }),
                file_seq: AtomicU64::new(seq),
            }),
        })
    }

    /// Opens a file store with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base directory cannot be created.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> StoreResult<Self> {
        Self::open(FileStoreConfig::new(base_dir))
    }

    /// Starts a new segment; later inserts go there.
    ///
    /// # Errors
    ///
    /// Returns an error if retention cleanup of old segments fails.
    pub fn rotate(&self) -> StoreResult<()> {
        let mut state = self.inner.state.write();
        self.inner.rotate_locked(&mut state);
        self.inner
            .apply_retention_locked(&mut state, Utc::now().timestamp_millis())
            .map(|_| ())
    }

    /// Applies the retention policy as of `now_millis`.
    ///
    /// Retention works on whole rotated segments; the active segment is never
    /// removed by retention. Returns the number of segments removed.
    ///
    /// # Errors
    ///
    /// Returns an error if a segment cannot be read or deleted.
    pub fn enforce_retention_at(&self, now_millis: i64) -> StoreResult<usize> {
        let mut state = self.inner.state.write();
        self.inner.apply_retention_locked(&mut state, now_millis)
    }

    /// Returns the number of segment files.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.inner.state.read().segments().count()
    }

    /// Returns the total size of all segments in bytes.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        let state = self.inner.state.read();
        let rotated: u64 = state
            .rotated_files
            .iter()
            .map(|path| fs::metadata(path).map(|m| m.len()).unwrap_or(0))
            .sum();
        rotated + state.current_size
    }

    /// Removes every segment.
    ///
    /// # Errors
    ///
    /// Returns an error if a segment cannot be deleted.
    pub fn clear(&self) -> StoreResult<()> {
        let mut state = self.inner.state.write();
        for path in state.rotated_files.drain(..) {
            remove_if_exists(&path)?;
        }
        if let Some(path) = state.current_file.take() {
            remove_if_exists(&path)?;
        }
        state.current_size = 0;
        Ok(())
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &FileStoreConfig {
        &self.inner.config
    }
}

impl Inner {
    fn append(&self, record: &LogRecord) -> StoreResult<()> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');
        let line_bytes = line.len() as u64;

        let mut state = self.state.write();

        if state.current_size > 0 && state.current_size + line_bytes > self.config.max_file_size {
            self.rotate_locked(&mut state);
            self.apply_retention_locked(&mut state, Utc::now().timestamp_millis())?;
        }

        let path = match &state.current_file {
            Some(path) => path.clone(),
            None => {
                let path = self.config.base_dir.join(self.generate_filename());
                state.current_file = Some(path.clone());
                state.current_size = 0;
                path
            }
        };

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(line.as_bytes())?;
        writer.flush()?;
        state.current_size += line_bytes;

        Ok(())
    }

    fn scan(&self, criteria: &Criteria, limit: usize) -> StoreResult<Vec<LogRecord>> {
        let state = self.state.read();
        let mut results = Vec::new();

        for path in state.segments().rev() {
            if results.len() >= limit {
                break;
            }
            let records = read_segment(path)?;
            results.extend(
                records
                    .into_iter()
                    .rev()
                    .filter(|r| matches(r, criteria))
                    .take(limit - results.len()),
            );
        }

        Ok(results)
    }

    /// Removes matching records from every segment.
    ///
    /// Runs in three phases under the write lock: every segment is read and
    /// filtered, replacements are staged as temp files, then the temp files
    /// are renamed into place. A read, parse or staging failure returns before
    /// any segment or the tracked segment list changes.
    fn delete_where(&self, criteria: &Criteria) -> StoreResult<usize> {
        let mut state = self.state.write();

        let mut rewrites = Vec::new();
        for path in state.segments() {
            let records = read_segment(path)?;
            let total = records.len();
            let kept: Vec<LogRecord> = records
                .into_iter()
                .filter(|r| !matches(r, criteria))
                .collect();
            if kept.len() < total {
                rewrites.push(SegmentRewrite {
                    path: path.clone(),
                    removed: total - kept.len(),
                    kept,
                });
            }
        }
        if rewrites.is_empty() {
            return Ok(0);
        }

        let mut staged: Vec<(PathBuf, u64)> = Vec::new();
        for rewrite in rewrites.iter().filter(|r| !r.kept.is_empty()) {
            let temp = rewrite.path.with_extension(TEMP_EXT);
            match write_segment(&temp, &rewrite.kept) {
                Ok(size) => staged.push((temp, size)),
                Err(e) => {
                    discard_temp_files(staged.iter().map(|(t, _)| t).chain([&temp]));
                    return Err(e);
                }
            }
        }

        let mut removed = 0;
        let mut emptied = Vec::new();
        let mut staged = staged.into_iter();
        for rewrite in &rewrites {
            let committed = if rewrite.kept.is_empty() {
                remove_if_exists(&rewrite.path).map(|()| None)
            } else {
                match staged.next() {
                    Some((temp, size)) => fs::rename(&temp, &rewrite.path)
                        .map(|()| Some(size))
                        .map_err(StoreError::from),
                    None => Err(StoreError::Task("staged segment missing".into())),
                }
            };

            match committed {
                Ok(None) => emptied.push(rewrite.path.clone()),
                Ok(Some(size)) => {
                    if state.current_file.as_ref() == Some(&rewrite.path) {
                        state.current_size = size;
                    }
                }
                Err(e) => {
                    warn!(
                        path = %rewrite.path.display(),
                        error = %e,
                        "segment rewrite failed during commit"
                    );
                    discard_temp_files(staged.map(|(t, _)| t).collect::<Vec<_>>().iter());
                    forget_segments(&mut state, &emptied);
                    return Err(e);
                }
            }
            removed += rewrite.removed;
        }

        forget_segments(&mut state, &emptied);
        Ok(removed)
    }

    fn count(&self) -> StoreResult<usize> {
        let state = self.state.read();
        state
            .segments()
            .map(|path| read_segment(path).map(|records| records.len()))
            .sum()
    }

    fn rotate_locked(&self, state: &mut FileState) {
        if let Some(current) = state.current_file.take() {
            state.rotated_files.push(current);
        }

        let path = self.config.base_dir.join(self.generate_filename());
        debug!(path = %path.display(), "rotating to new segment");
        state.current_file = Some(path);
        state.current_size = 0;
    }

    /// Removes rotated segments the retention policy no longer allows.
    ///
    /// Every segment is read before any is removed, so a read failure leaves
    /// both the disk and the tracked segment list untouched.
    fn apply_retention_locked(&self, state: &mut FileState, now_millis: i64) -> StoreResult<usize> {
        let policy = self.config.retention;
        let mut expired: Vec<PathBuf> = Vec::new();

        if let Some(cutoff) = policy.cutoff_millis(now_millis) {
            for path in &state.rotated_files {
                let newest = read_segment(path)?
                    .iter()
                    .map(LogRecord::timestamp)
                    .max();
                if newest.is_none_or(|t| t < cutoff) {
                    expired.push(path.clone());
                }
            }
        }

        if let Some(max_entries) = policy.max_entries {
            let mut survivors = Vec::new();
            for path in state.rotated_files.iter().filter(|p| !expired.contains(*p)) {
                survivors.push((path, read_segment(path)?.len()));
            }
            let mut total: usize = survivors.iter().map(|(_, count)| count).sum();
            if let Some(path) = &state.current_file {
                total += read_segment(path)?.len();
            }

            for (path, count) in survivors {
                if total - count < max_entries {
                    break;
                }
                total -= count;
                expired.push(path.clone());
            }
        }

        let mut removed = Vec::with_capacity(expired.len());
        let mut outcome = Ok(());
        for path in &expired {
            if let Err(e) = remove_if_exists(path) {
                outcome = Err(e);
                break;
            }
            removed.push(path.clone());
        }
        state.rotated_files.retain(|p| !removed.contains(p));
        outcome?;

        if !removed.is_empty() {
            info!(segments = removed.len(), "retention removed segments");
        }
        Ok(removed.len())
    }

    fn generate_filename(&self) -> String {
        let timestamp = Utc::now().format("%Y%m%d_%H%M%S_%3f");
        let seq = self.file_seq.fetch_add(1, Ordering::Relaxed);
        format!(
            "{}_{}_s{:04}.{SEGMENT_EXT}",
            self.config.file_prefix, timestamp, seq
        )
    }
}

fn has_prefix(path: &Path, prefix: &str) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with(prefix))
}

fn remove_if_exists(path: &Path) -> StoreResult<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
        _ => Ok(()),
    }
}

/// Reads every record in a segment, oldest first.
///
/// A segment that was named but never written reads as empty.
fn read_segment(path: &Path) -> StoreResult<Vec<LogRecord>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut records = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str::<LogRecord>(&line).map_err(|e| StoreError::Corrupt {
            location: format!("{}:{}", path.display(), index + 1),
            reason: e.to_string(),
        })?;
        records.push(record);
    }
    Ok(records)
}

/// Planned replacement for one segment.
struct SegmentRewrite {
    path: PathBuf,
    /// Records that survive, oldest first; empty means the segment goes away.
    kept: Vec<LogRecord>,
    removed: usize,
}

/// Writes `records` to `path` as JSON lines and syncs it. Returns the size in bytes.
fn write_segment(path: &Path, records: &[LogRecord]) -> StoreResult<u64> {
    let mut writer = BufWriter::new(File::create(path)?);
    let mut size = 0u64;
    for record in records {
        let line = serde_json::to_string(record)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        size += line.len() as u64 + 1;
    }
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(size)
}

fn discard_temp_files<'a>(paths: impl Iterator<Item = &'a PathBuf>) {
    for path in paths {
        if let Err(e) = remove_if_exists(path) {
            warn!(path = %path.display(), error = %e, "failed to remove staged segment");
        }
    }
}

/// Drops segments that no longer exist on disk from the tracked list.
fn forget_segments(state: &mut FileState, gone: &[PathBuf]) {
    if gone.is_empty() {
        return;
    }
    state.rotated_files.retain(|p| !gone.contains(p));
    if state.current_file.as_ref().is_some_and(|p| gone.contains(p)) {
        state.current_file = None;
        state.current_size = 0;
    }
}

/// Runs a blocking storage call off the async executor.
async fn run_blocking<T, F>(f: F) -> StoreResult<T>
where
    F: FnOnce() -> StoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StoreError::Task(e.to_string()))?
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl RecordStore for FileRecordStore {
    async fn insert(&self, record: LogRecord) -> StoreResult<()> {
        let inner = Arc::clone(&self.inner);
        run_blocking(move || inner.append(&record)).await
    }

    async fn scan(&self, criteria: &Criteria, limit: usize) -> StoreResult<Vec<LogRecord>> {
        let inner = Arc::clone(&self.inner);
        let criteria = criteria.clone();
        run_blocking(move || inner.scan(&criteria, limit)).await
    }

    async fn delete_where(&self, criteria: &Criteria) -> StoreResult<usize> {
        let inner = Arc::clone(&self.inner);
        let criteria = criteria.clone();
        run_blocking(move || inner.delete_where(&criteria)).await
    }

    async fn len(&self) -> StoreResult<usize> {
        let inner = Arc::clone(&self.inner);
        run_blocking(move || inner.count()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RetentionPolicy;
    use crate::types::LogLevel;
    use std::time::Duration;
    use tempfile::TempDir;

    fn make_record(level: LogLevel, timestamp: i64, message: &str) -> LogRecord {
        LogRecord::builder()
            .timestamp(timestamp)
            .level(level)
            .origin_service("file-svc")
            .message(message)
            .label("test")
            .build()
            .expect("valid record")
    }

    fn make_temp_store() -> (FileRecordStore, TempDir) {
        let temp_dir = TempDir::new().expect("create temp dir");
        let store = FileRecordStore::with_base_dir(temp_dir.path()).expect("open store");
        (store, temp_dir)
    }

    #[test]
    fn file_store_creates_directory() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let path = temp_dir.path().join("nested/logs");
        let store = FileRecordStore::with_base_dir(&path);
        assert!(store.is_ok());
        assert!(path.exists());
    }

    #[tokio::test]
    async fn file_store_scan_returns_newest_first() {
        let (store, _dir) = make_temp_store();

        for (t, m) in [(1, "first"), (2, "second"), (3, "third")] {
            store
                .insert(make_record(LogLevel::Info, t, m))
                .await
                .expect("insert");
        }

        let results = store.scan(&Criteria::all(), 10).await.expect("scan");
        let messages: Vec<_> = results.iter().map(LogRecord::message).collect();
        assert_eq!(messages, ["third", "second", "first"]);
    }

    #[tokio::test]
    async fn file_store_scan_with_limit_and_criteria() {
        let (store, _dir) = make_temp_store();

        for i in 0..10 {
            let level = if i % 2 == 0 { LogLevel::Error } else { LogLevel::Info };
            store
                .insert(make_record(level, i, &format!("message {i}")))
                .await
                .expect("insert");
        }

        let criteria = Criteria::builder().levels([LogLevel::Error]).build();
        let results = store.scan(&criteria, 3).await.expect("scan");
        let messages: Vec<_> = results.iter().map(LogRecord::message).collect();
        assert_eq!(messages, ["message 8", "message 6", "message 4"]);
    }

    #[tokio::test]
    async fn file_store_rotates_on_size() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let config = FileStoreConfig::new(temp_dir.path()).with_max_file_size(200);
        let store = FileRecordStore::open(config).expect("open store");

        for i in 0..10 {
            store
                .insert(make_record(LogLevel::Info, i, &format!("message {i} with padding text")))
                .await
                .expect("insert");
        }

        assert!(store.file_count() > 1);
        assert_eq!(store.len().await.expect("len"), 10);

        let results = store.scan(&Criteria::all(), 10).await.expect("scan");
        let timestamps: Vec<_> = results.iter().map(LogRecord::timestamp).collect();
        assert_eq!(timestamps, (0..10).rev().collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn file_store_manual_rotation() {
        let (store, _dir) = make_temp_store();

        store.insert(make_record(LogLevel::Info, 1, "before")).await.expect("insert");
        assert_eq!(store.file_count(), 1);

        store.rotate().expect("rotate");
        store.insert(make_record(LogLevel::Info, 2, "after")).await.expect("insert");
        assert_eq!(store.file_count(), 2);

        let results = store.scan(&Criteria::all(), 10).await.expect("scan");
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn file_store_delete_across_segments() {
        let (store, _dir) = make_temp_store();

        store.insert(make_record(LogLevel::Error, 1, "old error")).await.expect("insert");
        store.insert(make_record(LogLevel::Info, 2, "old info")).await.expect("insert");
        store.rotate().expect("rotate");
        store.insert(make_record(LogLevel::Error, 3, "new error")).await.expect("insert");
        store.insert(make_record(LogLevel::Info, 4, "new info")).await.expect("insert");

        let criteria = Criteria::builder().levels([LogLevel::Error]).build();
        assert_eq!(store.delete_where(&criteria).await.expect("delete"), 2);
        assert_eq!(store.delete_where(&criteria).await.expect("delete"), 0);

        let results = store.scan(&Criteria::all(), 10).await.expect("scan");
        let messages: Vec<_> = results.iter().map(LogRecord::message).collect();
        assert_eq!(messages, ["new info", "old info"]);
    }

    #[tokio::test]
    async fn file_store_delete_removes_emptied_segments() {
        let (store, _dir) = make_temp_store();

        store.insert(make_record(LogLevel::Error, 1, "a")).await.expect("insert");
        store.rotate().expect("rotate");
        store.insert(make_record(LogLevel::Info, 2, "b")).await.expect("insert");
        assert_eq!(store.file_count(), 2);

        let criteria = Criteria::builder().levels([LogLevel::Error]).build();
        assert_eq!(store.delete_where(&criteria).await.expect("delete"), 1);
        assert_eq!(store.file_count(), 1);

        assert_eq!(store.delete_where(&Criteria::all()).await.expect("delete"), 1);
        assert_eq!(store.file_count(), 0);
        assert_eq!(store.total_size(), 0);

        store.insert(make_record(LogLevel::Info, 3, "c")).await.expect("insert");
        assert_eq!(store.len().await.expect("len"), 1);
    }

    #[tokio::test]
    async fn file_store_persists_across_reopen() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let config = FileStoreConfig::new(temp_dir.path());

        {
            let store = FileRecordStore::open(config.clone()).expect("open store");
            store
                .insert(make_record(LogLevel::Warn, 7, "persisted"))
                .await
                .expect("insert");
        }

        let store = FileRecordStore::open(config).expect("reopen store");
        let results = store.scan(&Criteria::all(), 10).await.expect("scan");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0], make_record(LogLevel::Warn, 7, "persisted"));
    }

    #[tokio::test]
    async fn file_store_reports_corrupt_lines() {
        let (store, dir) = make_temp_store();
        store.insert(make_record(LogLevel::Info, 1, "ok")).await.expect("insert");

        let segment = fs::read_dir(dir.path())
            .expect("list dir")
            .filter_map(Result::ok)
            .map(|e| e.path())
            .find(|p| p.extension().is_some_and(|ext| ext == SEGMENT_EXT))
            .expect("segment exists");
        let mut file = OpenOptions::new().append(true).open(&segment).expect("open");
        writeln!(file, "{{not json").expect("write");

        let result = store.scan(&Criteria::all(), 10).await;
        assert!(matches!(result, Err(StoreError::Corrupt { .. })));
    }

    fn tracked_segments(store: &FileRecordStore) -> Vec<PathBuf> {
        store.inner.state.read().segments().cloned().collect()
    }

    fn segments_on_disk(dir: &Path) -> usize {
        fs::read_dir(dir)
            .expect("list dir")
            .filter_map(Result::ok)
            .filter(|e| e.path().extension().is_some_and(|ext| ext == SEGMENT_EXT))
            .count()
    }

    fn append_garbage(path: &Path) {
        let mut file = OpenOptions::new().append(true).open(path).expect("open");
        writeln!(file, "{{not json").expect("write");
    }

    #[tokio::test]
    async fn file_store_failed_delete_changes_nothing() {
        let (store, dir) = make_temp_store();
        store.insert(make_record(LogLevel::Error, 1, "seg1 error")).await.expect("insert");
        store.insert(make_record(LogLevel::Info, 2, "seg1 info")).await.expect("insert");
        store.rotate().expect("rotate");
        store.insert(make_record(LogLevel::Info, 3, "seg2 info")).await.expect("insert");
        store.rotate().expect("rotate");
        store.insert(make_record(LogLevel::Info, 4, "seg3 info")).await.expect("insert");

        let segments = tracked_segments(&store);
        assert_eq!(segments.len(), 3);
        let clean = fs::read_to_string(&segments[1]).expect("read segment");
        append_garbage(&segments[1]);

        let errors = Criteria::builder().levels([LogLevel::Error]).build();
        let result = store.delete_where(&errors).await;
        assert!(matches!(result, Err(StoreError::Corrupt { .. })));
        assert_eq!(tracked_segments(&store), segments);
        assert_eq!(segments_on_disk(dir.path()), 3);

        fs::write(&segments[1], clean).expect("repair segment");
        let results = store.scan(&Criteria::all(), 10).await.expect("scan");
        let messages: Vec<_> = results.iter().map(LogRecord::message).collect();
        assert_eq!(messages, ["seg3 info", "seg2 info", "seg1 info", "seg1 error"]);

        assert_eq!(store.delete_where(&errors).await.expect("delete"), 1);
        assert_eq!(store.len().await.expect("len"), 3);
    }

    #[tokio::test]
    async fn file_store_delete_keeps_active_segment_size_in_step() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let store = FileRecordStore::with_base_dir(temp_dir.path()).expect("open store");
        store.insert(make_record(LogLevel::Error, 1, "drop")).await.expect("insert");
        store.insert(make_record(LogLevel::Info, 2, "keep")).await.expect("insert");

        let errors = Criteria::builder().levels([LogLevel::Error]).build();
        assert_eq!(store.delete_where(&errors).await.expect("delete"), 1);

        let active = tracked_segments(&store).pop().expect("active segment");
        let on_disk = fs::metadata(&active).expect("metadata").len();
        assert_eq!(store.total_size(), on_disk);
        assert_eq!(segments_on_disk(temp_dir.path()), 1);
    }

    #[tokio::test]
    async fn file_store_failed_retention_changes_nothing() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let config = FileStoreConfig::new(temp_dir.path())
            .with_retention(RetentionPolicy::with_max_age(Duration::from_secs(60)));
        let store = FileRecordStore::open(config).expect("open store");

        let now = Utc::now().timestamp_millis();
        for message in ["first", "second"] {
            store
                .insert(make_record(LogLevel::Info, now, message))
                .await
                .expect("insert");
            store.rotate().expect("rotate");
        }
        store
            .insert(make_record(LogLevel::Info, now, "active"))
            .await
            .expect("insert");

        let segments = tracked_segments(&store);
        assert_eq!(segments.len(), 3);
        let clean = fs::read_to_string(&segments[1]).expect("read segment");
        append_garbage(&segments[1]);

        let result = store.enforce_retention_at(now + 120_000);
        assert!(matches!(result, Err(StoreError::Corrupt { .. })));
        assert_eq!(tracked_segments(&store), segments);
        assert_eq!(segments_on_disk(temp_dir.path()), 3);

        fs::write(&segments[1], clean).expect("repair segment");
        assert_eq!(store.enforce_retention_at(now + 120_000).expect("retention"), 2);
        assert_eq!(tracked_segments(&store), segments[2..]);
    }

    #[test]
    fn file_store_removes_stale_temp_files_on_open() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let stale = temp_dir.path().join("logkeeper_20240101_000000_000_s0000.tmp");
        fs::write(&stale, "partial").expect("write temp");

        let store = FileRecordStore::with_base_dir(temp_dir.path()).expect("open store");
        assert!(!stale.exists());
        assert_eq!(store.file_count(), 0);
    }

    #[tokio::test]
    async fn file_store_retention_by_age_drops_rotated_segments() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let config = FileStoreConfig::new(temp_dir.path())
            .with_retention(RetentionPolicy::with_max_age(Duration::from_secs(60)));
        let store = FileRecordStore::open(config).expect("open store");

        let now = Utc::now().timestamp_millis();
        store
            .insert(make_record(LogLevel::Info, now - 10_000, "older"))
            .await
            .expect("insert");
        store.rotate().expect("rotate");
        store
            .insert(make_record(LogLevel::Info, now, "recent"))
            .await
            .expect("insert");
        assert_eq!(store.file_count(), 2);

        let removed = store.enforce_retention_at(now + 55_000).expect("retention");
        assert_eq!(removed, 1);

        let results = store.scan(&Criteria::all(), 10).await.expect("scan");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].message(), "recent");
    }

    #[tokio::test]
    async fn file_store_retention_by_count_keeps_at_least_max() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let config = FileStoreConfig::new(temp_dir.path())
            .with_retention(RetentionPolicy::with_max_entries(2));
        let store = FileRecordStore::open(config).expect("open store");

        for i in 0..3 {
            store.insert(make_record(LogLevel::Info, i, "seg")).await.expect("insert");
            store.rotate().expect("rotate");
        }

        // Oldest segment dropped at the third rotation.
        assert_eq!(store.len().await.expect("len"), 2);
        let oldest = store.scan(&Criteria::all(), 10).await.expect("scan");
        assert_eq!(oldest.last().map(LogRecord::timestamp), Some(1));

        // Retention runs at rotation, not on every insert.
        store.insert(make_record(LogLevel::Info, 3, "active")).await.expect("insert");
        assert_eq!(store.len().await.expect("len"), 3);
    }

    #[tokio::test]
    async fn file_store_clear() {
        let (store, _dir) = make_temp_store();
        store.insert(make_record(LogLevel::Info, 1, "m")).await.expect("insert");
        assert!(store.total_size() > 0);

        store.clear().expect("clear");
        assert_eq!(store.file_count(), 0);
        assert_eq!(store.len().await.expect("len"), 0);
    }

    #[tokio::test]
    async fn file_store_scan_empty() {
        let (store, _dir) = make_temp_store();
        let results = store.scan(&Criteria::all(), 10).await.expect("scan");
        assert!(results.is_empty());
    }
}
