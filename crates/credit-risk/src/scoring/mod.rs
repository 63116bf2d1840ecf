//! Heuristic credit risk scoring for the prediction page.
//!
//! The score is an additive point system over a handful of applicant attributes. It is not a
//! trained model. Everything except the confidence figure is a pure function of the profile.

mod confidence;
mod domain;
mod factors;
mod form;
mod policy;
mod rules;

#[cfg(test)]
mod tests;

pub use confidence::{
    ConfidenceSource, FixedConfidence, RandomConfidence, SeededConfidence, CONFIDENCE_RANGE,
};
pub use domain::{
    ApplicantProfile, EducationLevel, RiskAssessment, RiskFactor, RiskLevel, ScoreComponent,
    ScoreRule,
};
pub use form::{lenient_count, lenient_decimal, ApplicantForm};

use tracing::debug;

/// Stateless scorer; the confidence source is its only collaborator.
pub struct RiskScorer<C = RandomConfidence> {
    confidence: C,
}

impl RiskScorer<RandomConfidence> {
    pub fn new() -> Self {
        Self::with_confidence(RandomConfidence)
    }
}

impl Default for RiskScorer<RandomConfidence> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ConfidenceSource> RiskScorer<C> {
    pub fn with_confidence(confidence: C) -> Self {
        Self { confidence }
    }

    pub fn assess(&self, profile: &ApplicantProfile) -> RiskAssessment {
        let (components, risk_score) = rules::score_profile(profile);
        let risk_level = RiskLevel::from_score(risk_score);

        debug!(
            risk_score,
            risk_level = risk_level.label(),
            rules = components.len(),
            "applicant scored"
        );

        RiskAssessment {
            risk_score,
            risk_level,
            recommendation: risk_level.recommendation(),
            confidence: self.confidence.sample(),
            factors: factors::display_factors(profile),
            components,
        }
    }

    /// Parses a raw form submission and scores it.
    pub fn assess_form(&self, form: &ApplicantForm) -> (ApplicantProfile, RiskAssessment) {
        let profile = ApplicantProfile::from(form);
        let assessment = self.assess(&profile);
        (profile, assessment)
    }
}
