use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::{Catalog, Course, CourseKind, Difficulty};

const DEFAULT_TERM: u32 = 1;
const DEFAULT_CREDITS: f32 = 3.0;
const UNKNOWN_PROGRAM: &str = "Unknown";

/// Errors raised while reading catalog sources. None of them abort a load.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Source could not be read.
    #[error("reading {origin}: {source}")]
    Io {
        /// Source path or label.
        origin: String,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// Source is not a valid program document.
    #[error("parsing {origin}: {source}")]
    Parse {
        /// Source path or label.
        origin: String,
        /// Underlying JSON failure.
        #[source]
        source: serde_json::Error,
    },
    /// A record has no usable name and was skipped.
    #[error("invalid course in {origin}: {reason}")]
    Invalid {
        /// Source path or label.
        origin: String,
        /// What was wrong with the record.
        reason: String,
    },
}

impl CatalogError {
    /// Returns `true` when the source simply does not exist.
    #[must_use]
    pub fn is_missing_source(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// Raw course record as produced by the catalog scraper.
///
/// Every field is read leniently: a value of the wrong shape is treated as
/// absent and later replaced by its default. Numbers may arrive as strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Course name. Records without one are rejected.
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    /// Term number.
    #[serde(default, alias = "term", deserialize_with = "lenient_number")]
    pub semester: Option<f64>,
    /// Kind label.
    #[serde(default, alias = "kind", deserialize_with = "lenient")]
    pub course_type: Option<String>,
    /// Credit weight.
    #[serde(default, deserialize_with = "lenient_number")]
    pub credits: Option<f64>,
    /// Description.
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    /// Prerequisite labels.
    #[serde(default, deserialize_with = "lenient")]
    pub prerequisites: Option<Vec<String>>,
    /// Granted skill labels.
    #[serde(default, alias = "skills_gained", deserialize_with = "lenient")]
    pub skills: Option<Vec<String>>,
    /// Difficulty label.
    #[serde(default, deserialize_with = "lenient")]
    pub difficulty: Option<String>,
}

impl CourseRecord {
    /// Converts the record into a [`Course`] owned by `program`.
    ///
    /// A term that is not a whole number of at least 1 becomes 1; credits that
    /// are negative or not finite become 3. Only a blank name is an error.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn into_course(self, program: &str, origin: &str) -> Result<Course, CatalogError> {
        let name = self.name.as_deref().map(str::trim).unwrap_or_default();
        if name.is_empty() {
            return Err(CatalogError::Invalid {
                origin: origin.to_string(),
                reason: "course name is missing or empty".into(),
            });
        }
        let term = self
            .semester
            .filter(|term| {
                term.fract().abs() < f64::EPSILON && (1.0..=f64::from(u32::MAX)).contains(term)
            })
            .map_or(DEFAULT_TERM, |term| term as u32);
        let credits = self
            .credits
            .filter(|credits| (0.0..=f64::from(f32::MAX)).contains(credits))
            .map_or(DEFAULT_CREDITS, |credits| credits as f32);
        let kind = self
            .course_type
            .as_deref()
            .map_or(CourseKind::Required, CourseKind::parse);
        let difficulty = self.difficulty.map(Difficulty::from).unwrap_or_default();
        Ok(Course::new(
            name,
            program,
            term,
            kind,
            credits,
            self.description.unwrap_or_default(),
        )
        .with_prerequisites(self.prerequisites.unwrap_or_default())
        .with_skills(self.skills.unwrap_or_default())
        .with_difficulty(difficulty))
    }
}

/// Keeps a field only when it deserializes as `T`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// Reads a JSON number or a numeric string.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => raw.trim().parse().ok(),
        _ => None,
    })
}

/// Reads course entries one by one; an entry that is not an object becomes an
/// empty record and is later rejected for its missing name.
fn lenient_records<'de, D>(deserializer: D) -> Result<Vec<CourseRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(entries
        .into_iter()
        .map(|entry| CourseRecord::deserialize(entry).unwrap_or_default())
        .collect())
}

/// One program's catalog document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgramDocument {
    /// Program name.
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    /// Course records.
    #[serde(default, deserialize_with = "lenient_records")]
    pub courses: Vec<CourseRecord>,
}

impl ProgramDocument {
    /// Parses a document from JSON text.
    pub fn from_json(raw: &str, origin: &str) -> Result<Self, CatalogError> {
        serde_json::from_str(raw).map_err(|source| CatalogError::Parse {
            origin: origin.to_string(),
            source,
        })
    }

    /// Converts every valid record; invalid ones are reported and skipped.
    #[must_use]
    pub fn into_courses(self, origin: &str) -> (Vec<Course>, Vec<CatalogError>) {
        let program = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_PROGRAM)
            .to_string();
        let mut courses = Vec::with_capacity(self.courses.len());
        let mut failures = Vec::new();
        for record in self.courses {
            match record.into_course(&program, origin) {
                Ok(course) => courses.push(course),
                Err(err) => failures.push(err),
            }
        }
        (courses, failures)
    }
}

/// Result of a catalog load.
#[derive(Debug)]
pub struct CatalogLoad {
    /// Loaded catalog, or the seed catalog when nothing loaded.
    pub catalog: Catalog,
    /// Per-source and per-record problems encountered along the way.
    pub failures: Vec<CatalogError>,
    /// `true` when the seed catalog was substituted.
    pub seeded: bool,
}

/// Reads program documents from disk.
#[derive(Debug, Clone, Default)]
pub struct CatalogLoader {
    sources: Vec<PathBuf>,
}

impl CatalogLoader {
    /// Creates a loader over the given source files.
    #[must_use]
    pub fn new<I, P>(sources: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            sources: sources.into_iter().map(Into::into).collect(),
        }
    }

    /// Configured source files.
    #[must_use]
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    /// Loads every source, falling back to [`Catalog::seed`] when none yields a course.
    #[must_use]
    pub fn load(&self) -> CatalogLoad {
        let mut courses = Vec::new();
        let mut failures = Vec::new();
        for path in &self.sources {
            match read_document(path) {
                Ok(document) => {
                    let (loaded, invalid) = document.into_courses(&path.display().to_string());
                    courses.extend(loaded);
                    failures.extend(invalid);
                }
                Err(err) => failures.push(err),
            }
        }
        Self::finish(courses, failures)
    }

    /// Ingests already-materialized documents, with the same fallback as [`Self::load`].
    #[must_use]
    pub fn ingest<I>(documents: I) -> CatalogLoad
    where
        I: IntoIterator<Item = ProgramDocument>,
    {
        let mut courses = Vec::new();
        let mut failures = Vec::new();
        for (idx, document) in documents.into_iter().enumerate() {
            let (loaded, invalid) = document.into_courses(&format!("document #{}", idx + 1));
            courses.extend(loaded);
            failures.extend(invalid);
        }
        Self::finish(courses, failures)
    }

    fn finish(courses: Vec<Course>, failures: Vec<CatalogError>) -> CatalogLoad {
        if courses.is_empty() {
            CatalogLoad {
                catalog: Catalog::seed(),
                failures,
                seeded: true,
            }
        } else {
            CatalogLoad {
                catalog: Catalog::new(courses),
                failures,
                seeded: false,
            }
        }
    }
}

fn read_document(path: &Path) -> Result<ProgramDocument, CatalogError> {
    let origin = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        origin: origin.clone(),
        source,
    })?;
    ProgramDocument::from_json(&raw, &origin)
}
