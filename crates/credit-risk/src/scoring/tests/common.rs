use crate::scoring::{ApplicantProfile, EducationLevel, FixedConfidence, RiskScorer};

/// Applicant that earns no points anywhere.
pub(super) fn low_risk_profile() -> ApplicantProfile {
    ApplicantProfile {
        annual_income: 80_000.0,
        credit_amount: 80_000.0,
        age: 45.0,
        employment_days: 2_000.0,
        education_level: EducationLevel::HigherEducation,
        owns_car: true,
        owns_realty: true,
        number_of_children: 0,
    }
}

/// Applicant that trips every rule.
pub(super) fn high_risk_profile() -> ApplicantProfile {
    ApplicantProfile {
        annual_income: 50_000.0,
        credit_amount: 200_000.0,
        age: 22.0,
        employment_days: 100.0,
        education_level: EducationLevel::LowerSecondary,
        owns_car: false,
        owns_realty: false,
        number_of_children: 3,
    }
}

pub(super) fn with_ratio(ratio: f64) -> ApplicantProfile {
    ApplicantProfile {
        credit_amount: 50_000.0 * ratio,
        annual_income: 50_000.0,
        ..low_risk_profile()
    }
}

pub(super) fn fixed_scorer() -> RiskScorer<FixedConfidence> {
    RiskScorer::with_confidence(FixedConfidence(90.0))
}
