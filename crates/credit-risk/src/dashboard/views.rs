use serde::{Deserialize, Serialize};

/// Precomputed aggregates behind the dashboard charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub overview: Overview,
    pub risk_distribution: Vec<ColoredSlice>,
    pub gender_distribution: Vec<ColoredSlice>,
    pub income_type_distribution: Vec<CategoryCount>,
    pub contract_type_distribution: Vec<CategoryCount>,
    pub education_distribution: Vec<CategoryCount>,
    pub credit_amount_distribution: Vec<RangeCount>,
    #[serde(default)]
    pub income_credit_scatter: Vec<ScatterPoint>,
    pub age_distribution: Vec<AgeBucket>,
    pub default_rate_by_income: Vec<DefaultRate>,
    pub monthly_applications: Vec<MonthlyCount>,
    pub family_status_distribution: Vec<CategoryCount>,
    pub housing_type_distribution: Vec<CategoryCount>,
    pub avg_credit_by_education: Vec<EducationCredit>,
}

/// Headline figures for the stat cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_applications: u64,
    pub default_rate: f64,
    pub approval_rate: f64,
    pub avg_credit_amount: f64,
    pub avg_income: f64,
    pub total_credit_volume: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColoredSlice {
    pub name: String,
    pub value: u64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub name: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeCount {
    pub range: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub income: f64,
    pub credit: f64,
    pub risk: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeBucket {
    pub age_group: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultRate {
    pub category: String,
    pub rate: f64,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCount {
    pub month: String,
    pub applications: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationCredit {
    pub education: String,
    pub avg_credit: f64,
}
