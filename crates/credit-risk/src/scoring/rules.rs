use super::domain::{ApplicantProfile, EducationLevel, ScoreComponent, ScoreRule};

pub(crate) const MAX_RISK_SCORE: u8 = 100;

/// Applies the additive point system and returns the audit trail with the capped score.
pub(crate) fn score_profile(profile: &ApplicantProfile) -> (Vec<ScoreComponent>, u8) {
    let mut components = Vec::new();

    let ratio = profile.credit_to_income_ratio();
    let ratio_points = if ratio > 3.0 {
        30
    } else if ratio > 2.0 {
        20
    } else if ratio > 1.0 {
        10
    } else {
        0
    };
    push(
        &mut components,
        ScoreRule::CreditToIncome,
        ratio_points,
        || format!("credit is {ratio:.2}x annual income"),
    );

    let age = profile.age;
    let age_points = if age < 25.0 {
        15
    } else if age < 30.0 {
        10
    } else if age > 60.0 {
        5
    } else {
        0
    };
    push(&mut components, ScoreRule::Age, age_points, || {
        format!("applicant aged {age}")
    });

    let education_points = match profile.education_level {
        EducationLevel::SecondarySpecial => 10,
        EducationLevel::LowerSecondary => 15,
        EducationLevel::HigherEducation
        | EducationLevel::IncompleteHigher
        | EducationLevel::AcademicDegree => 0,
    };
    push(
        &mut components,
        ScoreRule::Education,
        education_points,
        || format!("education: {}", profile.education_level.label()),
    );

    let days = profile.employment_days;
    let employment_points = if days < 365.0 {
        15
    } else if days < 730.0 {
        10
    } else {
        0
    };
    push(
        &mut components,
        ScoreRule::Employment,
        employment_points,
        || format!("{days} day(s) in current employment"),
    );

    if !profile.owns_car {
        push(&mut components, ScoreRule::CarOwnership, 5, || {
            "no car on record".to_string()
        });
    }

    if !profile.owns_realty {
        push(&mut components, ScoreRule::RealtyOwnership, 5, || {
            "no realty on record".to_string()
        });
    }

    let children = profile.number_of_children;
    if children > 2 {
        push(&mut components, ScoreRule::Dependents, 10, || {
            format!("{children} dependent children")
        });
    }

    let total: u16 = components
        .iter()
        .map(|component| u16::from(component.points))
        .sum();
    let capped = total.min(u16::from(MAX_RISK_SCORE)) as u8;

    (components, capped)
}

// Zero-point rules are left out of the trail.
fn push(
    components: &mut Vec<ScoreComponent>,
    rule: ScoreRule,
    points: u8,
    notes: impl FnOnce() -> String,
) {
    if points > 0 {
        components.push(ScoreComponent {
            rule,
            points,
            notes: notes(),
        });
    }
}
