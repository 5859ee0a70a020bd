use super::{Course, CourseKind, Difficulty};

const AI: &str = "AI";
const AI_PRODUCT: &str = "AI Product";

/// Fallback catalog: twelve courses across the AI and AI Product programs.
#[must_use]
pub fn seed_courses() -> Vec<Course> {
    use CourseKind::{Elective, Required};

    vec![
        Course::new(
            "Машинное обучение",
            AI,
            1,
            Required,
            4.0,
            "Основы ML: регрессия, классификация, кластеризация",
        )
        .with_prerequisites(["Python", "Линейная алгебра"])
        .with_skills(["sklearn", "pandas", "ML pipelines"]),
        Course::new(
            "Глубокое обучение",
            AI,
            2,
            Required,
            4.0,
            "Нейронные сети, CNN, RNN, Transformers",
        )
        .with_prerequisites(["Машинное обучение"])
        .with_skills(["PyTorch", "Нейронные сети"]),
        Course::new(
            "Математическая статистика",
            AI,
            1,
            Required,
            3.0,
            "Статистические методы для ML",
        )
        .with_prerequisites(["Теория вероятностей"])
        .with_skills(["Статистический анализ", "A/B тесты"]),
        Course::new(
            "MLOps",
            AI,
            3,
            Required,
            3.0,
            "Развёртывание и мониторинг ML-систем",
        )
        .with_prerequisites(["Машинное обучение", "Docker"])
        .with_skills(["Docker", "CI/CD", "Model serving"]),
        Course::new(
            "Компьютерное зрение",
            AI,
            2,
            Elective,
            3.0,
            "Обработка изображений, детекция, сегментация",
        )
        .with_prerequisites(["Глубокое обучение"])
        .with_skills(["OpenCV", "CNN", "Object Detection"])
        .with_difficulty(Difficulty::High),
        Course::new(
            "Обработка естественного языка",
            AI,
            2,
            Elective,
            3.0,
            "NLP: токенизация, эмбеддинги, трансформеры",
        )
        .with_prerequisites(["Глубокое обучение"])
        .with_skills(["Transformers", "BERT", "Text processing"])
        .with_difficulty(Difficulty::High),
        Course::new(
            "Reinforcement Learning",
            AI,
            3,
            Elective,
            3.0,
            "Обучение с подкреплением",
        )
        .with_prerequisites(["Глубокое обучение", "Теория вероятностей"])
        .with_skills(["RL algorithms", "Gym", "Policy optimization"])
        .with_difficulty(Difficulty::High),
        Course::new(
            "Генеративные модели",
            AI,
            3,
            Elective,
            3.0,
            "VAE, GAN, Diffusion models",
        )
        .with_prerequisites(["Глубокое обучение"])
        .with_skills(["GANs", "Diffusion", "Image generation"])
        .with_difficulty(Difficulty::High),
        Course::new(
            "Big Data",
            AI,
            2,
            Elective,
            3.0,
            "Spark, распределённые вычисления",
        )
        .with_prerequisites(["Python", "SQL"])
        .with_skills(["Spark", "Hadoop", "Distributed computing"]),
        Course::new(
            "Управление AI-продуктом",
            AI_PRODUCT,
            1,
            Required,
            3.0,
            "Product management для AI-продуктов",
        )
        .with_skills(["Product thinking", "Roadmap", "Metrics"]),
        Course::new(
            "Дизайн AI-систем",
            AI_PRODUCT,
            2,
            Required,
            3.0,
            "Проектирование архитектуры ML-систем",
        )
        .with_prerequisites(["Машинное обучение"])
        .with_skills(["System design", "ML architecture"]),
        Course::new(
            "AI Ethics",
            AI_PRODUCT,
            2,
            Elective,
            2.0,
            "Этика искусственного интеллекта",
        )
        .with_skills(["AI Ethics", "Responsible AI", "Bias detection"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_has_electives_in_both_programs() {
        let courses = seed_courses();
        let electives: Vec<_> = courses.iter().filter(|c| c.kind.is_elective()).collect();
        assert_eq!(electives.len(), 6);
        assert!(electives.iter().any(|c| c.program == AI));
        assert!(electives.iter().any(|c| c.program == AI_PRODUCT));
    }
}
