#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

//! Structured JSON logging shared by the advisor crates.
//!
//! Records are plain serde values; where they end up is decided by a
//! [`LogSink`]. The file sink appends one JSON document per line, the memory
//! sink keeps records around for hosts and tests that inspect them.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Result;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Log severity level.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    /// Debug information.
    Debug,
    /// Informational events.
    #[default]
    Info,
    /// Warning indicator.
    Warn,
    /// Error indicator.
    Error,
}

/// Structured log record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    /// Timestamp in ISO8601.
    pub timestamp: DateTime<Utc>,
    /// Module emitting the log.
    pub module: String,
    /// Severity.
    pub level: LogLevel,
    /// Dotted event key, e.g. `advisor.catalog.loaded`.
    pub message: String,
    /// Arbitrary JSON payload.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl LogRecord {
    /// Creates a record stamped with the current time.
    #[must_use]
    pub fn new(module: impl Into<String>, level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            module: module.into(),
            level,
            message: message.into(),
            metadata: serde_json::Map::new(),
        }
    }

    /// Attaches a metadata field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Replaces metadata with the entries of a JSON object. Non-object values are ignored.
    #[must_use]
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        if let serde_json::Value::Object(map) = metadata {
            self.metadata = map;
        }
        self
    }
}

/// Destination for log records.
pub trait LogSink: Send + Sync {
    /// Persists or forwards a record.
    fn write(&self, record: &LogRecord) -> Result<()>;
}

impl<S: LogSink + ?Sized> LogSink for Arc<S> {
    fn write(&self, record: &LogRecord) -> Result<()> {
        (**self).write(record)
    }
}

/// Thread-safe JSON logger with append-only semantics.
#[derive(Debug)]
pub struct JsonLogger {
    path: PathBuf,
    writer: Mutex<File>,
}

impl JsonLogger {
    /// Creates or opens a logger at the desired path.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;
        Ok(Self {
            path,
            writer: Mutex::new(file),
        })
    }

    /// Returns the underlying file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSink for JsonLogger {
    fn write(&self, record: &LogRecord) -> Result<()> {
        let mut writer = self.writer.lock();
        serde_json::to_writer(&mut *writer, record)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

/// In-memory sink retaining every record it receives.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<LogRecord>>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the retained records.
    #[must_use]
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    /// Messages of the retained records, in arrival order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .map(|record| record.message.clone())
            .collect()
    }
}

impl LogSink for MemorySink {
    fn write(&self, record: &LogRecord) -> Result<()> {
        self.records.lock().push(record.clone());
        Ok(())
    }
}

/// Drops records below a minimum level before handing them to the inner sink.
#[derive(Debug)]
pub struct LevelFilter<S> {
    min_level: LogLevel,
    inner: S,
}

impl<S: LogSink> LevelFilter<S> {
    /// Wraps `inner`, keeping records at or above `min_level`.
    #[must_use]
    pub const fn new(min_level: LogLevel, inner: S) -> Self {
        Self { min_level, inner }
    }

    /// Minimum level forwarded.
    #[must_use]
    pub const fn min_level(&self) -> LogLevel {
        self.min_level
    }
}

impl<S: LogSink> LogSink for LevelFilter<S> {
    fn write(&self, record: &LogRecord) -> Result<()> {
        if record.level < self.min_level {
            return Ok(());
        }
        self.inner.write(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn writes_json_lines() {
        let dir = tempdir().unwrap();
        let logger = JsonLogger::new(dir.path().join("logs").join("advisor.log")).unwrap();
        logger
            .write(&LogRecord::new("catalog", LogLevel::Info, "hello").with_field("courses", 12))
            .unwrap();
        logger
            .write(&LogRecord::new("catalog", LogLevel::Warn, "again"))
            .unwrap();
        let content = fs::read_to_string(logger.path()).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"message\":\"hello\""));
        assert!(lines[0].contains("\"courses\":12"));
        assert!(lines[1].contains("\"level\":\"WARN\""));
    }

    #[test]
    fn level_filter_drops_debug() {
        let sink = Arc::new(MemorySink::new());
        let filtered = LevelFilter::new(LogLevel::Info, Arc::clone(&sink));
        filtered
            .write(&LogRecord::new("m", LogLevel::Debug, "noise"))
            .unwrap();
        filtered
            .write(&LogRecord::new("m", LogLevel::Error, "signal"))
            .unwrap();
        assert_eq!(sink.messages(), vec!["signal".to_string()]);
    }

    #[test]
    fn metadata_ignores_non_objects() {
        let record = LogRecord::new("m", LogLevel::Info, "x").with_metadata(serde_json::json!(3));
        assert!(record.metadata.is_empty());
        let record =
            LogRecord::new("m", LogLevel::Info, "x").with_metadata(serde_json::json!({"a": 1}));
        assert_eq!(record.metadata.get("a"), Some(&serde_json::json!(1)));
    }

    #[test]
    fn levels_are_ordered() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Warn < LogLevel::Error);
    }
}
