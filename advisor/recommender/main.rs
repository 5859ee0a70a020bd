use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::json;
use shared_logging::LogLevel;
use uuid::Uuid;

use crate::{
    catalog::{Catalog, CatalogLoad},
    config::AdvisorConfig,
    plan::{build_plan, StudyPlan},
    presenter::render,
    ranker::{recommend, CourseRecommendation},
    skills::SkillProfile,
    telemetry::RecommenderTelemetry,
};

/// One learner's request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationRequest {
    /// Free-text background.
    #[serde(default)]
    pub background: String,
    /// Declared interests, in order.
    #[serde(default)]
    pub interests: Vec<String>,
    /// Case-insensitive program filter.
    #[serde(default)]
    pub program: Option<String>,
    /// Maximum number of recommendations.
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Study plan horizon in terms.
    #[serde(default = "default_horizon")]
    pub horizon: u32,
    /// Whether the rendered report includes the plan.
    #[serde(default = "default_true")]
    pub include_plan: bool,
}

impl RecommendationRequest {
    /// Creates a request with the stock limit (5) and horizon (4).
    #[must_use]
    pub fn new(background: impl Into<String>) -> Self {
        Self {
            background: background.into(),
            interests: Vec::new(),
            program: None,
            limit: default_limit(),
            horizon: default_horizon(),
            include_plan: true,
        }
    }

    /// Request prefilled from configuration defaults.
    #[must_use]
    pub fn from_config(config: &AdvisorConfig, background: impl Into<String>) -> Self {
        Self {
            program: config.recommend.program.clone(),
            limit: config.recommend.limit,
            horizon: config.recommend.horizon,
            ..Self::new(background)
        }
    }

    /// Sets interests.
    #[must_use]
    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interests = interests.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the program filter.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = Some(program.into());
        self
    }

    /// Sets the result limit.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Sets the plan horizon.
    #[must_use]
    pub const fn with_horizon(mut self, horizon: u32) -> Self {
        self.horizon = horizon;
        self
    }

    /// Leaves the plan out of the rendered report.
    #[must_use]
    pub const fn without_plan(mut self) -> Self {
        self.include_plan = false;
        self
    }
}

/// Everything produced for one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationOutcome {
    /// Correlates log records of this request.
    pub request_id: Uuid,
    /// Inferred skills.
    pub profile: SkillProfile,
    /// Ranked recommendations; empty when no elective matched.
    pub recommendations: Vec<CourseRecommendation>,
    /// Term-by-term plan over the recommendations.
    pub plan: StudyPlan,
    /// Rendered text report.
    pub report: String,
    /// Time the outcome was produced.
    pub generated_at: DateTime<Utc>,
}

/// Composes skill inference, ranking, planning, and rendering over a shared catalog snapshot.
#[derive(Debug)]
pub struct AdvisorRuntime {
    catalog: RwLock<Arc<Catalog>>,
    telemetry: Option<RecommenderTelemetry>,
}

impl Default for AdvisorRuntime {
    fn default() -> Self {
        Self::new(Catalog::seed())
    }
}

impl AdvisorRuntime {
    /// Creates a runtime over `catalog`.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: RwLock::new(Arc::new(catalog)),
            telemetry: None,
        }
    }

    /// Loads the catalog named by `config` and reports how the load went.
    #[must_use]
    pub fn from_config(config: &AdvisorConfig, telemetry: Option<RecommenderTelemetry>) -> Self {
        let load = config.catalog_loader().load();
        let runtime = Self {
            catalog: RwLock::new(Arc::new(Catalog::default())),
            telemetry,
        };
        runtime.install(load);
        runtime
    }

    /// Attaches telemetry.
    #[must_use]
    pub fn with_telemetry(mut self, telemetry: RecommenderTelemetry) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    /// Current catalog snapshot. Holders keep it alive across replacements.
    #[must_use]
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog.read())
    }

    /// Swaps in a new catalog; in-flight requests finish on the old snapshot.
    pub fn replace_catalog(&self, catalog: Catalog) {
        *self.catalog.write() = Arc::new(catalog);
    }

    /// Installs the result of a catalog load, logging failures and seed fallback.
    pub fn install(&self, load: CatalogLoad) {
        for failure in &load.failures {
            let level = if failure.is_missing_source() {
                LogLevel::Warn
            } else {
                LogLevel::Error
            };
            self.log(
                level,
                "advisor.catalog.source_failed",
                json!({ "error": failure.to_string() }),
            );
        }
        if load.seeded {
            self.log(
                LogLevel::Warn,
                "advisor.catalog.seed_fallback",
                json!({ "courses": load.catalog.len() }),
            );
        }
        self.log(
            LogLevel::Info,
            "advisor.catalog.loaded",
            json!({
                "courses": load.catalog.len(),
                "programs": load.catalog.programs(),
                "seeded": load.seeded,
            }),
        );
        self.replace_catalog(load.catalog);
    }

    /// Runs the full pipeline for one request.
    #[must_use]
    pub fn recommend(&self, request: &RecommendationRequest) -> RecommendationOutcome {
        let request_id = Uuid::new_v4();
        let catalog = self.catalog();
        let profile = SkillProfile::derive(&request.background);
        self.log(
            LogLevel::Debug,
            "advisor.profile.derived",
            json!({ "request_id": request_id, "profile": profile }),
        );

        let recommendations = recommend(
            &profile,
            &request.interests,
            &catalog,
            request.program.as_deref(),
            request.limit,
        );
        if recommendations.is_empty() {
            self.log(
                LogLevel::Info,
                "advisor.recommend.empty",
                json!({ "request_id": request_id, "program": request.program }),
            );
        } else {
            self.log(
                LogLevel::Info,
                "advisor.recommend.completed",
                json!({
                    "request_id": request_id,
                    "returned": recommendations.len(),
                    "top": recommendations[0].course.name,
                    "top_score": recommendations[0].score,
                }),
            );
        }

        let plan = build_plan(&recommendations, request.horizon);
        self.log(
            LogLevel::Debug,
            "advisor.plan.built",
            json!({
                "request_id": request_id,
                "horizon": plan.horizon(),
                "scheduled": plan.course_count(),
            }),
        );
        let report = render(
            &recommendations,
            request.include_plan.then_some(&plan),
        );

        RecommendationOutcome {
            request_id,
            profile,
            recommendations,
            plan,
            report,
            generated_at: Utc::now(),
        }
    }

    fn log(&self, level: LogLevel, message: &str, metadata: serde_json::Value) {
        if let Some(tel) = &self.telemetry {
            let _ = tel.log(level, message, metadata);
        }
    }
}

const fn default_true() -> bool {
    true
}

const fn default_limit() -> usize {
    5
}

const fn default_horizon() -> u32 {
    4
}
