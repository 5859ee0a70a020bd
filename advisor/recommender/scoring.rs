//! Course relevance scoring.
//!
//! A score is the sum of four bounded factors, each already multiplied by its
//! weight, so the total never leaves `[0, 1]`:
//!
//! ```text
//! interest (cap 0.40) + readiness × 0.30 + growth × 0.20 + career × 0.10
//! ```
//!
//! The keyword tables below drive readiness, growth, and career inference.
//! All matching is substring containment over case-folded text.

use serde::{Deserialize, Serialize};

use crate::{
    catalog::Course,
    skills::{SkillDimension, SkillProfile},
    text::{contains_any, fold},
};

/// Increment per matched interest, and the cap on the interest factor.
pub const INTEREST_WEIGHT: f64 = 0.4;
/// Weight of the readiness factor.
pub const READINESS_WEIGHT: f64 = 0.3;
/// Weight of the growth factor.
pub const GROWTH_WEIGHT: f64 = 0.2;
/// Weight of the career factor.
pub const CAREER_WEIGHT: f64 = 0.1;

const DISCLOSURE_HIGH: f64 = 0.7;
const DISCLOSURE_LOW: f64 = 0.3;
const GROWTH_AREA_CAP: usize = 2;
const CAREER_MATCH_CAP: usize = 3;
const NEUTRAL_GROWTH: f64 = 0.5;

/// Keywords of prerequisites a proficient Python background satisfies.
pub const PYTHON_PREREQUISITE: &[&str] = &["python"];

/// Remaining prerequisite keyword groups, in precedence order. Only the first
/// matching group is consulted.
pub const PREREQUISITE_GROUPS: &[(SkillDimension, &[&str])] = &[
    (SkillDimension::MlBasics, &["машинн", "ml"]),
    (SkillDimension::DeepLearning, &["глубок", "deep"]),
    (SkillDimension::Statistics, &["статист", "вероятн"]),
    (SkillDimension::Math, &["алгебр", "math"]),
];

/// Growth areas detected in granted-skill labels.
pub const GROWTH_AREAS: &[(SkillDimension, &[&str])] = &[
    (SkillDimension::Nlp, &["nlp", "text"]),
    (SkillDimension::ComputerVision, &["cv", "vision", "image"]),
    (SkillDimension::DeepLearning, &["pytorch", "нейрон", "neural"]),
    (SkillDimension::Mlops, &["docker", "deploy"]),
];

/// High-demand phrases searched in course name and description.
pub const CAREER_KEYWORDS: &[&str] = &[
    "deep learning",
    "глубокое",
    "nlp",
    "computer vision",
    "mlops",
    "transformer",
    "llm",
    "генеративн",
];

/// Per-factor values behind a score, before weighting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Capped interest contribution (already in `[0, 0.4]`).
    pub interest: f64,
    /// Fraction of prerequisites satisfied.
    pub readiness: f64,
    /// Normalized growth potential.
    pub growth: f64,
    /// Normalized career value.
    pub career: f64,
    /// Interests that matched, in request order.
    pub matched_interests: Vec<String>,
}

/// Score and its justification for one course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseScore {
    /// Weighted total in `[0, 1]`.
    pub value: f64,
    /// Human-readable justification built from the same evidence.
    pub reasoning: String,
    /// Factor values.
    pub breakdown: ScoreBreakdown,
}

/// Scores `course` for a learner with `profile` and `interests`.
///
/// Deterministic and side-effect free.
#[must_use]
pub fn score_course(course: &Course, profile: &SkillProfile, interests: &[String]) -> CourseScore {
    let (interest, matched_interests) = interest_match(course, interests);
    let readiness = readiness(course, profile);
    let growth = growth_potential(course, profile);
    let career = career_value(course);

    let value = (interest
        + readiness * READINESS_WEIGHT
        + growth * GROWTH_WEIGHT
        + career * CAREER_WEIGHT)
        .clamp(0.0, 1.0);

    let breakdown = ScoreBreakdown {
        interest,
        readiness,
        growth,
        career,
        matched_interests,
    };
    CourseScore {
        value,
        reasoning: explain(&breakdown),
        breakdown,
    }
}

/// Interest factor, capped at [`INTEREST_WEIGHT`], with the interests that hit.
fn interest_match(course: &Course, interests: &[String]) -> (f64, Vec<String>) {
    let name = fold(&course.name);
    let description = fold(&course.description);
    let matched: Vec<String> = interests
        .iter()
        .filter(|interest| {
            let needle = fold(interest);
            !needle.is_empty() && (name.contains(&needle) || description.contains(&needle))
        })
        .cloned()
        .collect();
    #[allow(clippy::cast_precision_loss)]
    let raw = matched.len() as f64 * INTEREST_WEIGHT;
    (raw.min(INTEREST_WEIGHT), matched)
}

/// Fraction of prerequisites backed by a proficient profile dimension.
///
/// Courses without prerequisites are fully ready. Labels that hit no keyword
/// group count against readiness. See [`prerequisite_met`] for labels that
/// hit several groups.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn readiness(course: &Course, profile: &SkillProfile) -> f64 {
    if course.prerequisites.is_empty() {
        return 1.0;
    }
    let satisfied = course
        .prerequisites
        .iter()
        .filter(|prerequisite| prerequisite_met(prerequisite, profile))
        .count();
    satisfied as f64 / course.prerequisites.len() as f64
}

/// Judges one prerequisite label.
///
/// A Python mention is met by proficient Python. Otherwise the first group of
/// [`PREREQUISITE_GROUPS`] whose keywords occur decides alone, so "ML math"
/// needs ML basics even when math is strong.
#[must_use]
pub fn prerequisite_met(prerequisite: &str, profile: &SkillProfile) -> bool {
    let text = fold(prerequisite);
    if contains_any(&text, PYTHON_PREREQUISITE) && profile.is_proficient(SkillDimension::Python) {
        return true;
    }
    PREREQUISITE_GROUPS
        .iter()
        .find(|(_, keywords)| contains_any(&text, keywords))
        .is_some_and(|(dimension, _)| profile.is_proficient(*dimension))
}

/// Growth potential: new areas the course opens for this learner, normalized by two.
///
/// Courses without skill labels get a neutral 0.5.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn growth_potential(course: &Course, profile: &SkillProfile) -> f64 {
    if course.skills.is_empty() {
        return NEUTRAL_GROWTH;
    }
    let skills = fold(&course.skills.join(" "));
    let new_areas = GROWTH_AREAS
        .iter()
        .filter(|(dimension, keywords)| {
            contains_any(&skills, keywords) && !profile.is_proficient(*dimension)
        })
        .count()
        .min(GROWTH_AREA_CAP);
    new_areas as f64 / GROWTH_AREA_CAP as f64
}

/// Market value: high-demand phrases in name and description, normalized by three.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn career_value(course: &Course) -> f64 {
    let text = fold(&format!("{} {}", course.name, course.description));
    let matches = CAREER_KEYWORDS
        .iter()
        .filter(|keyword| text.contains(*keyword))
        .count()
        .min(CAREER_MATCH_CAP);
    matches as f64 / CAREER_MATCH_CAP as f64
}

fn explain(breakdown: &ScoreBreakdown) -> String {
    let mut reasons = Vec::new();
    if !breakdown.matched_interests.is_empty() {
        reasons.push(format!(
            "Matches your interests: {}",
            breakdown.matched_interests.join(", ")
        ));
    }
    if breakdown.readiness > DISCLOSURE_HIGH {
        reasons.push("Good foundation for this course".to_string());
    } else if breakdown.readiness < DISCLOSURE_LOW {
        reasons.push("May need extra preparation".to_string());
    }
    if breakdown.growth > DISCLOSURE_HIGH {
        reasons.push("Builds new in-demand skills".to_string());
    }
    if breakdown.career > DISCLOSURE_HIGH {
        reasons.push("High market demand".to_string());
    }
    if reasons.is_empty() {
        "General elective course".to_string()
    } else {
        reasons.join("; ")
    }
}
