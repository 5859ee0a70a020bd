use std::fmt::Write;

use crate::{plan::StudyPlan, ranker::CourseRecommendation};

/// Rendered in place of an empty recommendation list.
pub const NO_RESULTS_MESSAGE: &str =
    "Unfortunately, no courses could be recommended. Try refining your interests.";

const RANK_MARKERS: [&str; 5] = ["🥇", "🥈", "🥉", "4️⃣", "5️⃣"];
const DEFAULT_MARKER: &str = "▪️";

/// Renders recommendations, followed by the non-empty terms of `plan` when given.
#[must_use]
pub fn render(recommendations: &[CourseRecommendation], plan: Option<&StudyPlan>) -> String {
    if recommendations.is_empty() {
        return NO_RESULTS_MESSAGE.to_string();
    }

    let mut out = String::from("🎯 Recommended courses:\n\n");
    for recommendation in recommendations {
        let course = &recommendation.course;
        let _ = writeln!(out, "{} {}", marker(recommendation.priority), course.name);
        let _ = writeln!(out, "   Program: {}", course.program);
        let _ = writeln!(out, "   Term: {}", course.term);
        let _ = writeln!(out, "   {}", recommendation.reasoning);
        let _ = writeln!(out, "   Match: {:.0}%", recommendation.score * 100.0);
        out.push('\n');
    }

    if let Some(plan) = plan {
        out.push_str("\n📚 Study plan by term:\n\n");
        for (term, courses) in plan.iter().filter(|(_, courses)| !courses.is_empty()) {
            let _ = writeln!(out, "Term {term}:");
            for course in courses {
                let _ = writeln!(out, "  • {}", course.name);
            }
            out.push('\n');
        }
    }

    out.truncate(out.trim_end().len());
    out
}

fn marker(priority: usize) -> &'static str {
    priority
        .checked_sub(1)
        .and_then(|idx| RANK_MARKERS.get(idx))
        .copied()
        .unwrap_or(DEFAULT_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{catalog::Catalog, plan::build_plan, ranker::recommend, skills::SkillProfile};

    #[test]
    fn empty_input_renders_fixed_message() {
        assert_eq!(render(&[], None), NO_RESULTS_MESSAGE);
        assert_eq!(render(&[], Some(&build_plan(&[], 4))), NO_RESULTS_MESSAGE);
    }

    #[test]
    fn renders_blocks_and_plan_sections() {
        let ranked = recommend(&SkillProfile::default(), &[], &Catalog::seed(), None, 6);
        let plan = build_plan(&ranked, 2);
        let report = render(&ranked, Some(&plan));
        assert!(report.starts_with("🎯 Recommended courses:"));
        assert!(report.contains("🥇 AI Ethics"));
        assert!(report.contains("   Match: 30%"));
        assert!(report.contains("▪️ Big Data"));
        assert!(report.contains("Term 2:\n  • AI Ethics"));
        assert!(!report.contains("Term 1:"));
        assert!(!report.contains("Term 3:"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let ranked = recommend(&SkillProfile::default(), &[], &Catalog::seed(), None, 3);
        assert_eq!(render(&ranked, None), render(&ranked, None));
        assert!(!render(&ranked, None).contains("Study plan"));
    }
}
