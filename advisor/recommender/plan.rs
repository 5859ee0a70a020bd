use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{catalog::Course, ranker::CourseRecommendation};

/// Term-by-term plan: every term `1..=horizon` maps to its courses in priority order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudyPlan {
    terms: IndexMap<u32, Vec<Course>>,
}

impl StudyPlan {
    /// Number of terms covered.
    #[must_use]
    pub fn horizon(&self) -> usize {
        self.terms.len()
    }

    /// Courses scheduled in `term`, or `None` outside the horizon.
    #[must_use]
    pub fn term(&self, term: u32) -> Option<&[Course]> {
        self.terms.get(&term).map(Vec::as_slice)
    }

    /// Iterates over `(term, courses)` in ascending term order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &[Course])> {
        self.terms
            .iter()
            .map(|(term, courses)| (*term, courses.as_slice()))
    }

    /// Total number of scheduled courses.
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.terms.values().map(Vec::len).sum()
    }
}

/// Buckets recommendations by their course term.
///
/// Courses whose term lies beyond `horizon` are left out of every bucket.
/// A `horizon` of 0 is treated as 1.
#[must_use]
pub fn build_plan(recommendations: &[CourseRecommendation], horizon: u32) -> StudyPlan {
    let horizon = horizon.max(1);
    let mut terms: IndexMap<u32, Vec<Course>> =
        (1..=horizon).map(|term| (term, Vec::new())).collect();
    for recommendation in recommendations {
        if let Some(bucket) = terms.get_mut(&recommendation.course.term) {
            bucket.push(recommendation.course.clone());
        }
    }
    StudyPlan { terms }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalog::{Catalog, CourseKind},
        ranker::recommend,
        scoring::score_course,
        skills::SkillProfile,
    };

    fn recommendation(name: &str, term: u32, priority: usize) -> CourseRecommendation {
        let course = Course::new(name, "AI", term, CourseKind::Elective, 3.0, "");
        let scored = score_course(&course, &SkillProfile::default(), &[]);
        CourseRecommendation {
            course,
            score: scored.value,
            reasoning: scored.reasoning,
            priority,
            breakdown: scored.breakdown,
        }
    }

    #[test]
    fn every_term_present_even_when_empty() {
        let plan = build_plan(&[], 4);
        assert_eq!(plan.horizon(), 4);
        assert!(plan.iter().all(|(_, courses)| courses.is_empty()));
        assert_eq!(
            plan.iter().map(|(term, _)| term).collect::<Vec<_>>(),
            vec![1, 2, 3, 4]
        );
    }

    #[test]
    fn courses_beyond_horizon_are_omitted() {
        let recs = vec![
            recommendation("A", 1, 1),
            recommendation("B", 3, 2),
            recommendation("C", 2, 3),
        ];
        let plan = build_plan(&recs, 2);
        assert_eq!(plan.horizon(), 2);
        assert_eq!(plan.term(1).unwrap()[0].name, "A");
        assert_eq!(plan.term(2).unwrap()[0].name, "C");
        assert!(plan.term(3).is_none());
        assert_eq!(plan.course_count(), 2);
    }

    #[test]
    fn buckets_keep_priority_order() {
        let recs = vec![
            recommendation("Top", 2, 1),
            recommendation("Middle", 1, 2),
            recommendation("Low", 2, 3),
        ];
        let plan = build_plan(&recs, 3);
        let second: Vec<_> = plan.term(2).unwrap().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(second, vec!["Top", "Low"]);
    }

    #[test]
    fn plan_covers_exactly_in_horizon_recommendations() {
        let ranked = recommend(&SkillProfile::default(), &[], &Catalog::seed(), None, 10);
        for horizon in 1..=4 {
            let plan = build_plan(&ranked, horizon);
            let expected = ranked
                .iter()
                .filter(|rec| rec.course.term <= horizon)
                .count();
            assert_eq!(plan.course_count(), expected);
        }
    }

    #[test]
    fn zero_horizon_is_one_term() {
        let plan = build_plan(&[recommendation("A", 1, 1)], 0);
        assert_eq!(plan.horizon(), 1);
        assert_eq!(plan.course_count(), 1);
    }
}
