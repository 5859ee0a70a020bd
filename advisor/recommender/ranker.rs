use serde::{Deserialize, Serialize};

use crate::{
    catalog::{Catalog, Course},
    scoring::{score_course, ScoreBreakdown},
    skills::SkillProfile,
};

/// A ranked course with its score and justification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecommendation {
    /// Recommended course.
    pub course: Course,
    /// Weighted score in `[0, 1]`.
    pub score: f64,
    /// Human-readable justification.
    pub reasoning: String,
    /// Dense 1-based rank (1 = best).
    pub priority: usize,
    /// Factor values behind `score`.
    pub breakdown: ScoreBreakdown,
}

/// Ranks the catalog's electives for a learner.
///
/// Candidates are the elective courses whose program contains
/// `program_filter` (case-insensitive) when one is given. They are sorted by
/// descending score; equal scores keep catalog order. The top `limit` are
/// returned with priorities `1..=n`. No candidates yields an empty vector.
#[must_use]
pub fn recommend(
    profile: &SkillProfile,
    interests: &[String],
    catalog: &Catalog,
    program_filter: Option<&str>,
    limit: usize,
) -> Vec<CourseRecommendation> {
    let mut ranked: Vec<CourseRecommendation> = catalog
        .electives(program_filter)
        .into_iter()
        .map(|course| {
            let scored = score_course(course, profile, interests);
            CourseRecommendation {
                course: course.clone(),
                score: scored.value,
                reasoning: scored.reasoning,
                priority: 0,
                breakdown: scored.breakdown,
            }
        })
        .collect();

    // `sort_by` is stable, which keeps catalog order among ties.
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(limit.max(1));
    for (idx, recommendation) in ranked.iter_mut().enumerate() {
        recommendation.priority = idx + 1;
    }
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CourseKind;

    fn names(recommendations: &[CourseRecommendation]) -> Vec<&str> {
        recommendations
            .iter()
            .map(|rec| rec.course.name.as_str())
            .collect()
    }

    #[test]
    fn empty_profile_ranks_seed_by_readiness_growth_and_career() {
        let ranked = recommend(&SkillProfile::default(), &[], &Catalog::seed(), None, 10);
        assert_eq!(
            names(&ranked),
            vec![
                "AI Ethics",
                "Обработка естественного языка",
                "Генеративные модели",
                "Компьютерное зрение",
                "Reinforcement Learning",
                "Big Data",
            ]
        );
        assert!(ranked.iter().all(|rec| rec.breakdown.interest.abs() < 1e-9));
    }

    #[test]
    fn output_is_sorted_truncated_and_densely_ranked() {
        let profile = SkillProfile::derive("python developer, машинное обучение");
        let interests = vec!["NLP".to_string()];
        let catalog = Catalog::seed();
        let candidates = catalog.electives(None).len();
        for limit in [1, 3, 5, 50] {
            let ranked = recommend(&profile, &interests, &catalog, None, limit);
            assert_eq!(ranked.len(), limit.min(candidates));
            assert!(ranked.windows(2).all(|pair| pair[0].score >= pair[1].score));
            let priorities: Vec<_> = ranked.iter().map(|rec| rec.priority).collect();
            assert_eq!(priorities, (1..=ranked.len()).collect::<Vec<_>>());
        }
    }

    #[test]
    fn nlp_interest_lifts_nlp_course_to_the_top() {
        let profile = SkillProfile::derive("Python и машинное обучение");
        let ranked = recommend(
            &profile,
            &["NLP".to_string()],
            &Catalog::seed(),
            None,
            5,
        );
        assert_eq!(ranked[0].course.name, "Обработка естественного языка");
        assert!((ranked[0].breakdown.interest - 0.4).abs() < 1e-9);
        assert!(ranked[0].reasoning.contains("NLP"));
    }

    #[test]
    fn program_filter_is_case_insensitive_substring() {
        let ranked = recommend(
            &SkillProfile::default(),
            &[],
            &Catalog::seed(),
            Some("ai product"),
            5,
        );
        assert_eq!(names(&ranked), vec!["AI Ethics"]);
        assert!(ranked.iter().all(|rec| rec.course.program.contains("AI Product")));
    }

    #[test]
    fn unmatched_filter_and_empty_catalog_yield_nothing() {
        let seed = Catalog::seed();
        assert!(recommend(&SkillProfile::default(), &[], &seed, Some("Biology"), 5).is_empty());
        assert!(recommend(&SkillProfile::default(), &[], &Catalog::default(), None, 5).is_empty());
    }

    #[test]
    fn required_and_unknown_kinds_are_never_ranked() {
        let catalog = Catalog::new(vec![
            Course::new("Core", "AI", 1, CourseKind::Required, 3.0, "deep learning"),
            Course::new("Lab", "AI", 1, CourseKind::Other("lab".into()), 3.0, "nlp"),
            Course::new("Pick", "AI", 1, CourseKind::Elective, 3.0, ""),
        ]);
        let ranked = recommend(&SkillProfile::default(), &[], &catalog, None, 5);
        assert_eq!(names(&ranked), vec!["Pick"]);
    }

    #[test]
    fn ties_keep_catalog_order() {
        let catalog = Catalog::new(
            ["First", "Second", "Third"]
                .into_iter()
                .map(|name| Course::new(name, "AI", 1, CourseKind::Elective, 3.0, ""))
                .collect(),
        );
        let ranked = recommend(&SkillProfile::default(), &[], &catalog, None, 3);
        assert_eq!(names(&ranked), vec!["First", "Second", "Third"]);
    }
}
