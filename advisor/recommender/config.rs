use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shared_logging::LogLevel;

use crate::catalog::CatalogLoader;

/// Advisor settings, usually read from `advisor.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisorConfig {
    /// Directory holding program documents.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Program documents, relative to `data_dir` unless absolute.
    #[serde(default = "default_sources")]
    pub sources: Vec<PathBuf>,
    /// Recommendation defaults.
    #[serde(default)]
    pub recommend: RecommendSettings,
    /// Structured logging.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Defaults applied to recommendation requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendSettings {
    /// Maximum number of recommendations.
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Study plan horizon in terms.
    #[serde(default = "default_horizon")]
    pub horizon: u32,
    /// Program filter applied when a request names none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
}

impl Default for RecommendSettings {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            horizon: default_horizon(),
            program: None,
        }
    }
}

/// Where and how much to log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// JSON-lines log file. Logging is off when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Minimum level written.
    #[serde(default)]
    pub level: LogLevel,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            sources: default_sources(),
            recommend: RecommendSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl AdvisorConfig {
    /// Loads configuration from a TOML file.
    ///
    /// Relative `data_dir` and log paths resolve against the file's directory.
    /// Zero `limit` or `horizon` fall back to their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading advisor config {}", path.display()))?;
        let mut config: Self =
            toml::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
        let base = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        if config.data_dir.is_relative() {
            config.data_dir = base.join(&config.data_dir);
        }
        if let Some(log_path) = config.logging.path.as_mut() {
            if log_path.is_relative() {
                *log_path = base.join(&*log_path);
            }
        }
        config.normalize();
        Ok(config)
    }

    /// Loads `path` when given, the defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Replaces zero limits with defaults.
    pub fn normalize(&mut self) {
        if self.recommend.limit == 0 {
            self.recommend.limit = default_limit();
        }
        if self.recommend.horizon == 0 {
            self.recommend.horizon = default_horizon();
        }
        if self
            .recommend
            .program
            .as_deref()
            .is_some_and(|program| program.trim().is_empty())
        {
            self.recommend.program = None;
        }
    }

    /// Absolute or `data_dir`-relative source paths.
    #[must_use]
    pub fn source_paths(&self) -> Vec<PathBuf> {
        self.sources
            .iter()
            .map(|source| {
                if source.is_absolute() {
                    source.clone()
                } else {
                    self.data_dir.join(source)
                }
            })
            .collect()
    }

    /// Catalog loader over [`Self::source_paths`].
    #[must_use]
    pub fn catalog_loader(&self) -> CatalogLoader {
        CatalogLoader::new(self.source_paths())
    }

    /// Serializes the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("serializing advisor config")
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_sources() -> Vec<PathBuf> {
    vec![
        PathBuf::from("ai_program.json"),
        PathBuf::from("ai_product_program.json"),
    ]
}

const fn default_limit() -> usize {
    5
}

const fn default_horizon() -> u32 {
    4
}
