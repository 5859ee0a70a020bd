use std::{fmt, path::PathBuf, sync::Arc};

use anyhow::Result;
use serde_json::Value;
use shared_logging::{JsonLogger, LevelFilter, LogLevel, LogRecord, LogSink};

/// Builder configuring telemetry for advisor workflows.
pub struct RecommenderTelemetryBuilder {
    module: String,
    log_path: Option<PathBuf>,
    sinks: Vec<Arc<dyn LogSink>>,
    min_level: LogLevel,
}

impl RecommenderTelemetryBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            log_path: None,
            sinks: Vec::new(),
            min_level: LogLevel::Info,
        }
    }

    /// Sets the JSON log path.
    #[must_use]
    pub fn log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = Some(path.into());
        self
    }

    /// Adds an extra sink.
    #[must_use]
    pub fn sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Drops records below `level`.
    #[must_use]
    pub const fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Finalizes the builder. Fails only when the log file cannot be opened.
    pub fn build(self) -> Result<RecommenderTelemetry> {
        let mut sinks = self.sinks;
        if let Some(path) = self.log_path {
            sinks.push(Arc::new(JsonLogger::new(path)?));
        }
        let sinks = sinks
            .into_iter()
            .map(|sink| Arc::new(LevelFilter::new(self.min_level, sink)) as Arc<dyn LogSink>)
            .collect();
        Ok(RecommenderTelemetry {
            inner: Arc::new(TelemetryInner {
                module: self.module,
                sinks,
            }),
        })
    }
}

/// Telemetry handle shared by the advisor runtime and its callers.
#[derive(Clone)]
pub struct RecommenderTelemetry {
    inner: Arc<TelemetryInner>,
}

struct TelemetryInner {
    module: String,
    sinks: Vec<Arc<dyn LogSink>>,
}

impl fmt::Debug for RecommenderTelemetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecommenderTelemetry")
            .field("module", &self.inner.module)
            .field("sinks", &self.inner.sinks.len())
            .finish()
    }
}

impl RecommenderTelemetry {
    /// Returns a builder for this telemetry helper.
    #[must_use]
    pub fn builder(module: impl Into<String>) -> RecommenderTelemetryBuilder {
        RecommenderTelemetryBuilder::new(module)
    }

    /// Logs a structured record to every sink. The first sink failure is returned
    /// after all sinks have been tried.
    pub fn log(&self, level: LogLevel, message: &str, metadata: Value) -> Result<()> {
        if self.inner.sinks.is_empty() {
            return Ok(());
        }
        let record = LogRecord::new(&self.inner.module, level, message).with_metadata(metadata);
        let mut outcome = Ok(());
        for sink in &self.inner.sinks {
            if let Err(err) = sink.write(&record) {
                if outcome.is_ok() {
                    outcome = Err(err);
                }
            }
        }
        outcome
    }
}
