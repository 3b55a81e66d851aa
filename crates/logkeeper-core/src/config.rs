//! Service and store configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Default ceiling on the number of records a single search may return.
pub const DEFAULT_MAX_READ_LIMIT: usize = 100;

/// Default maximum size of one file-store segment before rotation: 10 MB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Configuration for [`LoggingService`](crate::LoggingService).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Largest `limit` a search may ask for. Deletions are never capped.
    pub max_read_limit: usize,
}

impl ServiceConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_read_limit: DEFAULT_MAX_READ_LIMIT,
        }
    }

    /// Sets the search ceiling.
    #[must_use]
    pub const fn with_max_read_limit(mut self, max_read_limit: usize) -> Self {
        self.max_read_limit = max_read_limit;
        self
    }

    /// Returns true if a search for `limit` records is allowed.
    #[must_use]
    pub const fn is_limit_allowed(&self, limit: usize) -> bool {
        limit <= self.max_read_limit
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Retention rules applied by a store.
///
/// Retention runs inside the store; the engines never see it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetentionPolicy {
    /// Records older than this are removed.
    pub max_age: Option<Duration>,
    /// At most this many records are kept; the oldest go first.
    pub max_entries: Option<usize>,
}

impl RetentionPolicy {
    /// A policy that keeps everything.
    #[must_use]
    pub const fn keep_all() -> Self {
        Self {
            max_age: None,
            max_entries: None,
        }
    }

    /// A policy bounded by age.
    #[must_use]
    pub const fn with_max_age(max_age: Duration) -> Self {
        Self {
            max_age: Some(max_age),
            max_entries: None,
        }
    }

    /// A policy bounded by record count.
    #[must_use]
    pub const fn with_max_entries(max_entries: usize) -> Self {
        Self {
            max_age: None,
            max_entries: Some(max_entries),
        }
    }

    /// Returns the oldest timestamp still retained at `now_millis`, if age-bounded.
    #[must_use]
    pub fn cutoff_millis(&self, now_millis: i64) -> Option<i64> {
        let max_age = self.max_age?;
        let age = i64::try_from(max_age.as_millis()).unwrap_or(i64::MAX);
        Some(now_millis.saturating_sub(age))
    }
}

/// Configuration for [`MemoryRecordStore`](crate::MemoryRecordStore).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryStoreConfig {
    /// Retention policy enforced on insert.
    pub retention: RetentionPolicy,
}

impl MemoryStoreConfig {
    /// Sets the retention policy.
    #[must_use]
    pub const fn with_retention(mut self, retention: RetentionPolicy) -> Self {
        self.retention = retention;
        self
    }
}

/// Configuration for [`FileRecordStore`](crate::FileRecordStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStoreConfig {
    /// Directory holding the segment files.
    pub base_dir: PathBuf,
    /// Retention policy; `max_age` is applied to rotated segments.
    pub retention: RetentionPolicy,
    /// Maximum size of a single segment before rotation (bytes).
    pub max_file_size: u64,
    /// Prefix for segment file names.
    pub file_prefix: String,
}

impl Default for FileStoreConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("logs"),
            retention: RetentionPolicy::default(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            file_prefix: "logkeeper".to_string(),
        }
    }
}

impl FileStoreConfig {
    /// Creates a config with the given base directory.
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            ..Default::default()
        }
    }

    /// Sets the retention policy.
    #[must_use]
    pub const fn with_retention(mut self, retention: RetentionPolicy) -> Self {
        self.retention = retention;
        self
    }

    /// Sets the max segment size for rotation.
    #[must_use]
    pub const fn with_max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    /// Sets the file prefix.
    #[must_use]
    pub fn with_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }
}
