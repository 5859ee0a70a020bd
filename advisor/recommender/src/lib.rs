#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

//! Elective course advisor: skill inference, multi-factor scoring, ranking,
//! and term-by-term study plans over an immutable course catalog.

/// Text normalization helpers.
#[path = "../text.rs"]
pub mod text;

/// Skill levels, skill profiles, and background-to-profile inference.
#[path = "../skills.rs"]
pub mod skills;

/// Course records, catalog snapshots, loading, and the seed catalog.
#[path = "../catalog/main.rs"]
pub mod catalog;

/// Weighted per-course relevance scoring.
#[path = "../scoring.rs"]
pub mod scoring;

/// Candidate filtering, ordering, and priority assignment.
#[path = "../ranker.rs"]
pub mod ranker;

/// Term bucketing of ranked courses.
#[path = "../plan.rs"]
pub mod plan;

/// Text report rendering.
#[path = "../presenter.rs"]
pub mod presenter;

/// TOML configuration.
#[path = "../config.rs"]
pub mod config;

/// Telemetry builder/hook for advisor components.
#[path = "../telemetry.rs"]
pub mod telemetry;

/// Advisor runtime entry point.
#[path = "../main.rs"]
pub mod runtime;

pub use catalog::{
    Catalog, CatalogError, CatalogLoad, CatalogLoader, Course, CourseKind, CourseRecord,
    Difficulty, ProgramDocument,
};
pub use config::{AdvisorConfig, LoggingSettings, RecommendSettings};
pub use plan::{build_plan, StudyPlan};
pub use presenter::{render, NO_RESULTS_MESSAGE};
pub use ranker::{recommend, CourseRecommendation};
pub use runtime::{AdvisorRuntime, RecommendationOutcome, RecommendationRequest};
pub use scoring::{score_course, CourseScore, ScoreBreakdown};
pub use skills::{SkillDimension, SkillLevel, SkillProfile};
pub use telemetry::{RecommenderTelemetry, RecommenderTelemetryBuilder};
pub use text::parse_interests;
