use super::domain::RiskLevel;

const MEDIUM_RISK_FLOOR: u8 = 30;
const HIGH_RISK_FLOOR: u8 = 60;

impl RiskLevel {
    /// Buckets a score; each floor belongs to the bucket it opens.
    pub fn from_score(score: u8) -> Self {
        if score < MEDIUM_RISK_FLOOR {
            RiskLevel::Low
        } else if score < HIGH_RISK_FLOOR {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    /// Lending guidance shown with the assessment.
    pub fn recommendation(&self) -> &'static str {
        match self {
            RiskLevel::Low => {
                "Approve loan with standard terms. Applicant shows strong creditworthiness."
            }
            RiskLevel::Medium => {
                "Approve with caution. Consider higher interest rate or additional collateral."
            }
            RiskLevel::High => {
                "Decline or require significant collateral. High probability of default."
            }
        }
    }
}
