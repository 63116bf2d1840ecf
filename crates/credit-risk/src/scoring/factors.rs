use super::domain::{ApplicantProfile, EducationLevel, RiskFactor};

const RATIO_IMPACT_PER_UNIT: f64 = 15.0;
const RATIO_IMPACT_CAP: f64 = 30.0;

/// Explanatory factors for display, strongest first.
///
/// These use their own thresholds and are not an itemisation of the score.
pub(crate) fn display_factors(profile: &ApplicantProfile) -> Vec<RiskFactor> {
    let ratio = profile.credit_to_income_ratio();
    let ratio_impact = if ratio > 0.0 {
        (ratio * RATIO_IMPACT_PER_UNIT).min(RATIO_IMPACT_CAP)
    } else {
        0.0
    };

    let mut factors = vec![
        RiskFactor {
            name: "Income/Credit Ratio",
            impact: ratio_impact,
        },
        RiskFactor {
            name: "Age",
            impact: if profile.age < 30.0 { 15.0 } else { 5.0 },
        },
        RiskFactor {
            name: "Employment History",
            impact: if profile.employment_days < 730.0 {
                15.0
            } else {
                5.0
            },
        },
        RiskFactor {
            name: "Education Level",
            impact: if profile.education_level == EducationLevel::HigherEducation {
                5.0
            } else {
                15.0
            },
        },
        RiskFactor {
            name: "Assets Ownership",
            impact: if !profile.owns_car || !profile.owns_realty {
                10.0
            } else {
                0.0
            },
        },
    ];

    // `sort_by` is stable, so equal impacts keep the order above.
    factors.sort_by(|a, b| b.impact.total_cmp(&a.impact));
    factors
}
