use std::fmt;

use serde::{Deserialize, Serialize};

use crate::text::fold;

/// File and record ingestion.
pub mod loader;
/// Built-in fallback courses.
pub mod seed;

pub use loader::{CatalogError, CatalogLoad, CatalogLoader, CourseRecord, ProgramDocument};

/// Course kind. Unknown labels survive as [`CourseKind::Other`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CourseKind {
    /// Mandatory course.
    #[default]
    Required,
    /// Course the learner chooses; the only kind that gets ranked.
    Elective,
    /// Extracurricular course.
    Optional,
    /// Unrecognized label, kept verbatim.
    Other(String),
}

impl CourseKind {
    /// Parses English or Russian labels, case-insensitively.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match fold(raw).as_str() {
            "required" | "обязательная" | "обязательный" => Self::Required,
            "elective" | "выборная" | "выборный" => Self::Elective,
            "optional" | "факультатив" | "факультативная" => Self::Optional,
            _ => Self::Other(raw.to_string()),
        }
    }

    /// Returns `true` for kinds eligible for recommendation.
    #[must_use]
    pub const fn is_elective(&self) -> bool {
        matches!(self, Self::Elective)
    }

    /// Canonical label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Required => "required",
            Self::Elective => "elective",
            Self::Optional => "optional",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for CourseKind {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<CourseKind> for String {
    fn from(value: CourseKind) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for CourseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Difficulty label carried for display. Scoring ignores it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Difficulty {
    /// Light workload.
    Low,
    /// Typical workload.
    #[default]
    Medium,
    /// Demanding course.
    High,
    /// Unrecognized label.
    Other(String),
}

impl Difficulty {
    /// Canonical label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for Difficulty {
    fn from(value: String) -> Self {
        match fold(&value).as_str() {
            "low" | "easy" => Self::Low,
            "medium" => Self::Medium,
            "high" | "hard" => Self::High,
            _ => Self::Other(value),
        }
    }
}

impl From<Difficulty> for String {
    fn from(value: Difficulty) -> Self {
        value.as_str().to_string()
    }
}

/// A single catalog entry.
///
/// Deserialization goes through [`Course::new`], so stored terms and credits
/// are clamped the same way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredCourse")]
pub struct Course {
    /// Course name, unique within its program.
    pub name: String,
    /// Owning program.
    pub program: String,
    /// Term the course is taught in (1-based).
    pub term: u32,
    /// Course kind.
    pub kind: CourseKind,
    /// Credit weight.
    pub credits: f32,
    /// Free-text description.
    pub description: String,
    /// Free-text prerequisite labels. Not resolved against the catalog.
    pub prerequisites: Vec<String>,
    /// Skills the course grants.
    pub skills: Vec<String>,
    /// Display-only difficulty.
    pub difficulty: Difficulty,
}

impl Course {
    /// Creates a course with no prerequisites or skills.
    ///
    /// `term` below 1 is raised to 1 and negative `credits` become 0.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        program: impl Into<String>,
        term: u32,
        kind: CourseKind,
        credits: f32,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            term: term.max(1),
            kind,
            credits: credits.max(0.0),
            description: description.into(),
            prerequisites: Vec::new(),
            skills: Vec::new(),
            difficulty: Difficulty::default(),
        }
    }

    /// Sets prerequisite labels.
    #[must_use]
    pub fn with_prerequisites<I, S>(mut self, prerequisites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prerequisites = prerequisites.into_iter().map(Into::into).collect();
        self
    }

    /// Sets granted skill labels.
    #[must_use]
    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }

    /// Sets difficulty.
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Returns `true` when the owning program contains `filter`, ignoring case.
    #[must_use]
    pub fn in_program(&self, filter: &str) -> bool {
        fold(&self.program).contains(&fold(filter))
    }
}

#[derive(Deserialize)]
struct StoredCourse {
    name: String,
    program: String,
    term: u32,
    kind: CourseKind,
    credits: f32,
    #[serde(default)]
    description: String,
    #[serde(default)]
    prerequisites: Vec<String>,
    #[serde(default)]
    skills: Vec<String>,
    #[serde(default)]
    difficulty: Difficulty,
}

impl From<StoredCourse> for Course {
    fn from(stored: StoredCourse) -> Self {
        Self::new(
            stored.name,
            stored.program,
            stored.term,
            stored.kind,
            stored.credits,
            stored.description,
        )
        .with_prerequisites(stored.prerequisites)
        .with_skills(stored.skills)
        .with_difficulty(stored.difficulty)
    }
}

/// Immutable course set shared by all requests of a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    courses: Vec<Course>,
}

impl Catalog {
    /// Wraps the provided courses, preserving order.
    #[must_use]
    pub const fn new(courses: Vec<Course>) -> Self {
        Self { courses }
    }

    /// Built-in catalog used when no source yields a course.
    #[must_use]
    pub fn seed() -> Self {
        Self::new(seed::seed_courses())
    }

    /// All courses in load order.
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Number of courses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Returns `true` when the catalog holds no course.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Distinct program names in first-seen order.
    #[must_use]
    pub fn programs(&self) -> Vec<&str> {
        let mut programs: Vec<&str> = Vec::new();
        for course in &self.courses {
            if !programs.contains(&course.program.as_str()) {
                programs.push(&course.program);
            }
        }
        programs
    }

    /// Elective courses in catalog order, optionally restricted to programs
    /// whose name contains `program` (case-insensitive).
    #[must_use]
    pub fn electives(&self, program: Option<&str>) -> Vec<&Course> {
        self.courses
            .iter()
            .filter(|course| course.kind.is_elective())
            .filter(|course| program.is_none_or(|filter| course.in_program(filter)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_parse_in_both_languages() {
        assert_eq!(CourseKind::parse("Elective"), CourseKind::Elective);
        assert_eq!(CourseKind::parse("выборная"), CourseKind::Elective);
        assert_eq!(CourseKind::parse("обязательная"), CourseKind::Required);
        assert_eq!(CourseKind::parse("факультатив"), CourseKind::Optional);
        assert_eq!(
            CourseKind::parse("seminar"),
            CourseKind::Other("seminar".into())
        );
        assert!(!CourseKind::parse("seminar").is_elective());
    }

    #[test]
    fn constructor_enforces_invariants() {
        let course = Course::new("X", "AI", 0, CourseKind::Elective, -2.0, "");
        assert_eq!(course.term, 1);
        assert!(course.credits.abs() < f32::EPSILON);
    }

    #[test]
    fn deserialized_courses_are_clamped() {
        let course: Course = serde_json::from_str(
            r#"{"name": "X", "program": "AI", "term": 0, "kind": "elective", "credits": -2.0}"#,
        )
        .unwrap();
        assert_eq!(course.term, 1);
        assert!(course.credits.abs() < f32::EPSILON);
        assert_eq!(course.difficulty, Difficulty::Medium);

        let seed = Catalog::seed();
        let restored: Catalog =
            serde_json::from_str(&serde_json::to_string(&seed).unwrap()).unwrap();
        assert_eq!(restored, seed);
    }

    #[test]
    fn electives_filter_by_program_case_insensitively() {
        let catalog = Catalog::seed();
        let product = catalog.electives(Some("ai product"));
        assert!(!product.is_empty());
        assert!(product.iter().all(|course| course.program == "AI Product"));
        assert!(catalog.electives(Some("Robotics")).is_empty());
        assert!(catalog
            .electives(None)
            .iter()
            .all(|course| course.kind.is_elective()));
    }

    #[test]
    fn seed_spans_two_programs() {
        let catalog = Catalog::seed();
        assert_eq!(catalog.len(), 12);
        assert_eq!(catalog.programs(), vec!["AI", "AI Product"]);
    }

    #[test]
    fn kind_serializes_as_label() {
        let json = serde_json::to_string(&CourseKind::Other("практика".into())).unwrap();
        assert_eq!(json, "\"практика\"");
        let kind: CourseKind = serde_json::from_str("\"elective\"").unwrap();
        assert_eq!(kind, CourseKind::Elective);
    }
}
