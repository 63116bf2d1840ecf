use serde::{Deserialize, Serialize};

/// Applicant attributes the heuristic reads. Built fresh for every submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantProfile {
    pub annual_income: f64,
    pub credit_amount: f64,
    pub age: f64,
    pub employment_days: f64,
    pub education_level: EducationLevel,
    pub owns_car: bool,
    pub owns_realty: bool,
    pub number_of_children: u32,
}

impl ApplicantProfile {
    /// Credit requested per unit of income, or zero unless both amounts are positive.
    pub fn credit_to_income_ratio(&self) -> f64 {
        if self.annual_income > 0.0 && self.credit_amount > 0.0 {
            self.credit_amount / self.annual_income
        } else {
            0.0
        }
    }
}

/// Highest completed education, using the categories of the application dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EducationLevel {
    HigherEducation,
    SecondarySpecial,
    IncompleteHigher,
    LowerSecondary,
    AcademicDegree,
}

impl EducationLevel {
    pub fn ordered() -> [EducationLevel; 5] {
        [
            EducationLevel::HigherEducation,
            EducationLevel::SecondarySpecial,
            EducationLevel::IncompleteHigher,
            EducationLevel::LowerSecondary,
            EducationLevel::AcademicDegree,
        ]
    }

    /// Label as it appears in the dataset and on the prediction form.
    pub fn label(&self) -> &'static str {
        match self {
            EducationLevel::HigherEducation => "Higher education",
            EducationLevel::SecondarySpecial => "Secondary / secondary special",
            EducationLevel::IncompleteHigher => "Incomplete higher",
            EducationLevel::LowerSecondary => "Lower secondary",
            EducationLevel::AcademicDegree => "Academic degree",
        }
    }

    pub fn from_label(raw: &str) -> Option<Self> {
        let needle = raw.trim();
        Self::ordered()
            .into_iter()
            .find(|level| level.label().eq_ignore_ascii_case(needle))
    }
}

/// Categorical bucket derived from the risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

/// Display-only contributor shown next to the score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskFactor {
    pub name: &'static str,
    pub impact: f64,
}

/// Rule that contributed points to the risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreRule {
    CreditToIncome,
    Age,
    Education,
    Employment,
    CarOwnership,
    RealtyOwnership,
    Dependents,
}

/// Discrete contribution to a score, kept for transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub rule: ScoreRule,
    pub points: u8,
    pub notes: String,
}

/// Outcome of a single scoring call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub recommendation: &'static str,
    pub confidence: f64,
    pub factors: Vec<RiskFactor>,
    pub components: Vec<ScoreComponent>,
}
