use serde::{Deserialize, Serialize};

use crate::text::{contains_any, fold};

/// Ordinal proficiency level.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    /// No evidence of the skill.
    #[default]
    None,
    /// Introductory exposure.
    Beginner,
    /// Working knowledge.
    Intermediate,
    /// Deep expertise.
    Advanced,
}

impl SkillLevel {
    /// Returns `true` at `Intermediate` or above.
    #[must_use]
    pub fn is_proficient(self) -> bool {
        self >= Self::Intermediate
    }
}

/// Skill dimensions tracked by a [`SkillProfile`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SkillDimension {
    /// Python programming.
    Python,
    /// Mathematics.
    Math,
    /// Statistics and probability.
    Statistics,
    /// Classical machine learning.
    MlBasics,
    /// Neural networks.
    DeepLearning,
    /// Natural language processing.
    Nlp,
    /// Computer vision.
    ComputerVision,
    /// Deployment and operations.
    Mlops,
}

impl SkillDimension {
    /// Every dimension, in profile order.
    pub const ALL: [Self; 8] = [
        Self::Python,
        Self::Math,
        Self::Statistics,
        Self::MlBasics,
        Self::DeepLearning,
        Self::Nlp,
        Self::ComputerVision,
        Self::Mlops,
    ];
}

/// Learner proficiency across all [`SkillDimension`]s.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkillProfile {
    /// Python programming.
    pub python: SkillLevel,
    /// Mathematics.
    pub math: SkillLevel,
    /// Statistics and probability.
    pub statistics: SkillLevel,
    /// Classical machine learning.
    pub ml_basics: SkillLevel,
    /// Neural networks.
    pub deep_learning: SkillLevel,
    /// Natural language processing.
    pub nlp: SkillLevel,
    /// Computer vision.
    pub computer_vision: SkillLevel,
    /// Deployment and operations.
    pub mlops: SkillLevel,
}

/// One row of the background heuristic: any keyword hit raises every grant.
#[derive(Debug, Clone, Copy)]
pub struct SkillRule {
    /// Folded substrings that trigger the rule.
    pub keywords: &'static [&'static str],
    /// Levels raised when the rule fires.
    pub grants: &'static [(SkillDimension, SkillLevel)],
}

/// Background keyword table. Rules are independent; a later rule never lowers a level.
pub const SKILL_RULES: &[SkillRule] = &[
    SkillRule {
        keywords: &["python", "питон", "программирован"],
        grants: &[(SkillDimension::Python, SkillLevel::Intermediate)],
    },
    SkillRule {
        keywords: &["senior", "lead"],
        grants: &[(SkillDimension::Python, SkillLevel::Advanced)],
    },
    SkillRule {
        keywords: &["математик", "math", "физик", "мехмат"],
        grants: &[
            (SkillDimension::Math, SkillLevel::Advanced),
            (SkillDimension::Statistics, SkillLevel::Intermediate),
        ],
    },
    SkillRule {
        keywords: &["ml", "machine learning", "машинн"],
        grants: &[(SkillDimension::MlBasics, SkillLevel::Intermediate)],
    },
    SkillRule {
        keywords: &["data scien", "ds", "аналитик данных"],
        grants: &[
            (SkillDimension::MlBasics, SkillLevel::Intermediate),
            (SkillDimension::Statistics, SkillLevel::Intermediate),
        ],
    },
    SkillRule {
        keywords: &["deep learning", "нейронн", "pytorch", "tensorflow"],
        grants: &[(SkillDimension::DeepLearning, SkillLevel::Intermediate)],
    },
    SkillRule {
        keywords: &["nlp", "нлп", "обработка текст", "natural language"],
        grants: &[(SkillDimension::Nlp, SkillLevel::Intermediate)],
    },
    SkillRule {
        keywords: &[
            "computer vision",
            "cv",
            "компьютерное зрение",
            "компьютерн зрен",
            "opencv",
        ],
        grants: &[(SkillDimension::ComputerVision, SkillLevel::Intermediate)],
    },
    SkillRule {
        keywords: &["mlops", "devops", "docker", "kubernetes", "deploy"],
        grants: &[(SkillDimension::Mlops, SkillLevel::Intermediate)],
    },
];

impl SkillProfile {
    /// Infers a profile from a free-text background description.
    ///
    /// Empty or unrecognized text yields the all-`None` profile.
    #[must_use]
    pub fn derive(background: &str) -> Self {
        let folded = fold(background);
        let mut profile = Self::default();
        if folded.is_empty() {
            return profile;
        }
        for rule in SKILL_RULES {
            if contains_any(&folded, rule.keywords) {
                for &(dimension, level) in rule.grants {
                    profile.raise(dimension, level);
                }
            }
        }
        profile
    }

    /// Level recorded for `dimension`.
    #[must_use]
    pub const fn level(&self, dimension: SkillDimension) -> SkillLevel {
        match dimension {
            SkillDimension::Python => self.python,
            SkillDimension::Math => self.math,
            SkillDimension::Statistics => self.statistics,
            SkillDimension::MlBasics => self.ml_basics,
            SkillDimension::DeepLearning => self.deep_learning,
            SkillDimension::Nlp => self.nlp,
            SkillDimension::ComputerVision => self.computer_vision,
            SkillDimension::Mlops => self.mlops,
        }
    }

    /// Raises `dimension` to at least `level`.
    fn raise(&mut self, dimension: SkillDimension, level: SkillLevel) {
        let slot = match dimension {
            SkillDimension::Python => &mut self.python,
            SkillDimension::Math => &mut self.math,
            SkillDimension::Statistics => &mut self.statistics,
            SkillDimension::MlBasics => &mut self.ml_basics,
            SkillDimension::DeepLearning => &mut self.deep_learning,
            SkillDimension::Nlp => &mut self.nlp,
            SkillDimension::ComputerVision => &mut self.computer_vision,
            SkillDimension::Mlops => &mut self.mlops,
        };
        *slot = (*slot).max(level);
    }

    /// Returns `true` when `dimension` is at `Intermediate` or above.
    #[must_use]
    pub fn is_proficient(&self, dimension: SkillDimension) -> bool {
        self.level(dimension).is_proficient()
    }

    /// Dimensions at `Intermediate` or above, in profile order.
    #[must_use]
    pub fn strengths(&self) -> Vec<SkillDimension> {
        SkillDimension::ALL
            .into_iter()
            .filter(|dimension| self.is_proficient(*dimension))
            .collect()
    }
}
