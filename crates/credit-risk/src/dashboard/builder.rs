use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use tracing::info;

use super::views::{
    AgeBucket, CategoryCount, ColoredSlice, DashboardData, DefaultRate, EducationCredit,
    MonthlyCount, Overview, RangeCount, ScatterPoint,
};
use super::DashboardError;

/// Number of points kept for the income/credit scatter plot.
pub const DEFAULT_SCATTER_LIMIT: usize = 1_000;

const CREDIT_BIN_COUNT: usize = 10;
const AGE_EDGES: [f64; 7] = [0.0, 25.0, 35.0, 45.0, 55.0, 65.0, 100.0];
const INCOME_TYPE_LIMIT: usize = 6;
const DEFAULT_RATE_MIN_GROUP: u64 = 100;
const DEFAULT_RATE_LIMIT: usize = 6;
const SYNTHETIC_MONTHS: u64 = 36;
const FIRST_YEAR: i32 = 2015;

/// One application from the raw export. Unlisted columns are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApplicationRow {
    #[serde(rename = "SK_ID_CURR")]
    pub id: u64,
    #[serde(rename = "TARGET", default)]
    pub target: Option<u8>,
    #[serde(rename = "CODE_GENDER", default)]
    pub gender: Option<String>,
    #[serde(rename = "NAME_CONTRACT_TYPE", default)]
    pub contract_type: Option<String>,
    #[serde(rename = "NAME_INCOME_TYPE", default)]
    pub income_type: Option<String>,
    #[serde(rename = "NAME_EDUCATION_TYPE", default)]
    pub education: Option<String>,
    #[serde(rename = "NAME_FAMILY_STATUS", default)]
    pub family_status: Option<String>,
    #[serde(rename = "NAME_HOUSING_TYPE", default)]
    pub housing_type: Option<String>,
    #[serde(rename = "AMT_INCOME_TOTAL", default)]
    pub income: Option<f64>,
    #[serde(rename = "AMT_CREDIT", default)]
    pub credit: Option<f64>,
    #[serde(rename = "DAYS_BIRTH", default)]
    pub days_birth: Option<f64>,
}

/// Aggregates an application export into [`DashboardData`].
pub struct DatasetBuilder<R = StdRng> {
    rng: R,
    scatter_limit: usize,
}

impl DatasetBuilder<StdRng> {
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Reproducible scatter sampling.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> DatasetBuilder<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            scatter_limit: DEFAULT_SCATTER_LIMIT,
        }
    }

    pub fn scatter_limit(mut self, limit: usize) -> Self {
        self.scatter_limit = limit;
        self
    }

    pub fn build_from_path<P: AsRef<Path>>(
        &mut self,
        path: P,
    ) -> Result<DashboardData, DashboardError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DashboardError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.build_from_reader(file)
    }

    pub fn build_from_reader<T: Read>(
        &mut self,
        reader: T,
    ) -> Result<DashboardData, DashboardError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let rows = csv_reader
            .deserialize::<ApplicationRow>()
            .collect::<Result<Vec<_>, _>>()?;

        self.build(&rows)
    }

    pub fn build(&mut self, rows: &[ApplicationRow]) -> Result<DashboardData, DashboardError> {
        if rows.is_empty() {
            return Err(DashboardError::EmptyDataset);
        }

        let data = DashboardData {
            overview: overview(rows),
            risk_distribution: risk_distribution(rows),
            gender_distribution: gender_distribution(rows),
            income_type_distribution: value_counts(rows.iter().map(|row| &row.income_type))
                .into_iter()
                .take(INCOME_TYPE_LIMIT)
                .collect(),
            contract_type_distribution: value_counts(rows.iter().map(|row| &row.contract_type)),
            education_distribution: value_counts(rows.iter().map(|row| &row.education)),
            credit_amount_distribution: credit_distribution(rows),
            income_credit_scatter: self.scatter_sample(rows),
            age_distribution: age_distribution(rows),
            default_rate_by_income: default_rate_by_income(rows),
            monthly_applications: monthly_applications(rows),
            family_status_distribution: value_counts(rows.iter().map(|row| &row.family_status)),
            housing_type_distribution: value_counts(rows.iter().map(|row| &row.housing_type)),
            avg_credit_by_education: avg_credit_by_education(rows),
        };

        info!(
            applications = data.overview.total_applications,
            default_rate = data.overview.default_rate,
            scatter_points = data.income_credit_scatter.len(),
            "dashboard dataset built"
        );

        Ok(data)
    }

    fn scatter_sample(&mut self, rows: &[ApplicationRow]) -> Vec<ScatterPoint> {
        let eligible: Vec<ScatterPoint> = rows
            .iter()
            .filter_map(|row| match (row.income, row.credit, row.target) {
                (Some(income), Some(credit), Some(risk)) => Some(ScatterPoint {
                    income,
                    credit,
                    risk,
                }),
                _ => None,
            })
            .collect();

        let amount = self.scatter_limit.min(eligible.len());
        eligible
            .choose_multiple(&mut self.rng, amount)
            .cloned()
            .collect()
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0u64), |(sum, count), value| (sum + value, count + 1));
    (count > 0).then(|| sum / count as f64)
}

fn overview(rows: &[ApplicationRow]) -> Overview {
    let default_rate =
        mean(rows.iter().filter_map(|row| row.target).map(f64::from)).unwrap_or(0.0);
    let credits = || rows.iter().filter_map(|row| row.credit);

    Overview {
        total_applications: rows.len() as u64,
        default_rate,
        approval_rate: 1.0 - default_rate,
        avg_credit_amount: mean(credits()).unwrap_or(0.0),
        avg_income: mean(rows.iter().filter_map(|row| row.income)).unwrap_or(0.0),
        total_credit_volume: credits().sum(),
    }
}

fn slice(name: &str, value: u64, color: &str) -> ColoredSlice {
    ColoredSlice {
        name: name.to_string(),
        value,
        color: color.to_string(),
    }
}

fn risk_distribution(rows: &[ApplicationRow]) -> Vec<ColoredSlice> {
    let count = |target: u8| rows.iter().filter(|row| row.target == Some(target)).count() as u64;
    vec![
        slice("Low Risk", count(0), "#10b981"),
        slice("High Risk", count(1), "#ef4444"),
    ]
}

fn gender_distribution(rows: &[ApplicationRow]) -> Vec<ColoredSlice> {
    let count = |code: &str| {
        rows.iter()
            .filter(|row| row.gender.as_deref() == Some(code))
            .count() as u64
    };
    vec![
        slice("Female", count("F"), "#ec4899"),
        slice("Male", count("M"), "#3b82f6"),
        slice("Other", count("XNA"), "#a855f7"),
    ]
}

/// Counts per category, most frequent first, ties by name. Missing values are skipped.
fn value_counts<'a>(values: impl Iterator<Item = &'a Option<String>>) -> Vec<CategoryCount> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for value in values.flatten() {
        *counts.entry(value.as_str()).or_default() += 1;
    }

    let mut entries: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(name, value)| CategoryCount {
            name: name.to_string(),
            value,
        })
        .collect();
    entries.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.name.cmp(&b.name)));
    entries
}

/// Equal-width edges over the observed range; the lowest edge sits just below the minimum
/// so the smallest value lands in the first bin.
fn credit_edges(min: f64, max: f64) -> Vec<f64> {
    let (low, high) = if min == max {
        let pad = |value: f64| {
            if value == 0.0 {
                0.001
            } else {
                0.001 * value.abs()
            }
        };
        (min - pad(min), max + pad(max))
    } else {
        (min, max)
    };

    let step = (high - low) / CREDIT_BIN_COUNT as f64;
    let mut edges: Vec<f64> = (0..=CREDIT_BIN_COUNT)
        .map(|index| low + step * index as f64)
        .collect();
    edges[CREDIT_BIN_COUNT] = high;
    if min != max {
        edges[0] -= (max - min) * 0.001;
    }
    edges
}

fn credit_distribution(rows: &[ApplicationRow]) -> Vec<RangeCount> {
    let credits: Vec<f64> = rows.iter().filter_map(|row| row.credit).collect();
    let (Some(min), Some(max)) = (
        credits.iter().copied().reduce(f64::min),
        credits.iter().copied().reduce(f64::max),
    ) else {
        return Vec::new();
    };

    let edges = credit_edges(min, max);
    let counts = bucket_counts(&edges, credits.iter().copied());

    edges
        .windows(2)
        .zip(counts)
        .map(|(bounds, count)| RangeCount {
            range: format!(
                "${}K-${}K",
                (bounds[0] / 1000.0) as i64,
                (bounds[1] / 1000.0) as i64
            ),
            count,
        })
        .collect()
}

/// Right-closed bucketing: value `v` lands in `(edges[i], edges[i + 1]]`. Values outside
/// the outer edges are dropped.
fn bucket_counts(edges: &[f64], values: impl Iterator<Item = f64>) -> Vec<u64> {
    let mut counts = vec![0u64; edges.len().saturating_sub(1)];
    for value in values {
        if edges.is_empty() || value <= edges[0] {
            continue;
        }
        if let Some(index) = edges[1..].iter().position(|edge| value <= *edge) {
            counts[index] += 1;
        }
    }
    counts
}

fn age_distribution(rows: &[ApplicationRow]) -> Vec<AgeBucket> {
    let ages = rows
        .iter()
        .filter_map(|row| row.days_birth)
        .map(|days| -days / 365.0);
    let counts = bucket_counts(&AGE_EDGES, ages);

    AGE_EDGES
        .windows(2)
        .zip(counts)
        .map(|(bounds, count)| AgeBucket {
            age_group: format!("{}-{}", bounds[0] as i64, bounds[1] as i64),
            count,
        })
        .collect()
}

fn default_rate_by_income(rows: &[ApplicationRow]) -> Vec<DefaultRate> {
    let mut groups: BTreeMap<&str, (u64, u64)> = BTreeMap::new();
    for row in rows {
        if let (Some(income_type), Some(target)) = (row.income_type.as_deref(), row.target) {
            let (defaults, total) = groups.entry(income_type).or_default();
            *defaults += u64::from(target);
            *total += 1;
        }
    }

    let mut rates: Vec<DefaultRate> = groups
        .into_iter()
        .filter(|(_, (_, total))| *total > DEFAULT_RATE_MIN_GROUP)
        .map(|(category, (defaults, total))| DefaultRate {
            category: category.to_string(),
            rate: defaults as f64 / total as f64,
            count: total,
        })
        .collect();

    rates.sort_by(|a, b| b.rate.total_cmp(&a.rate));
    rates.truncate(DEFAULT_RATE_LIMIT);
    rates
}

fn month_label(month: u64) -> String {
    let offset = (month - 1) as i32;
    let year = FIRST_YEAR + offset / 12;
    let month_of_year = (offset % 12) as u32 + 1;

    NaiveDate::from_ymd_opt(year, month_of_year, 1)
        .map(|date| date.format("%b %Y").to_string())
        .unwrap_or_else(|| format!("month {month}"))
}

fn monthly_applications(rows: &[ApplicationRow]) -> Vec<MonthlyCount> {
    let mut months: BTreeMap<u64, u64> = BTreeMap::new();
    for row in rows {
        *months.entry(row.id % SYNTHETIC_MONTHS + 1).or_default() += 1;
    }

    months
        .into_iter()
        .map(|(month, applications)| MonthlyCount {
            month: month_label(month),
            applications,
        })
        .collect()
}

fn avg_credit_by_education(rows: &[ApplicationRow]) -> Vec<EducationCredit> {
    let mut groups: BTreeMap<&str, (f64, u64)> = BTreeMap::new();
    for row in rows {
        if let (Some(education), Some(credit)) = (row.education.as_deref(), row.credit) {
            let (sum, count) = groups.entry(education).or_default();
            *sum += credit;
            *count += 1;
        }
    }

    groups
        .into_iter()
        .map(|(education, (sum, count))| EducationCredit {
            education: education.to_string(),
            avg_credit: sum / count as f64,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credit_edges_pad_the_lower_bound() {
        let edges = credit_edges(100_000.0, 1_100_000.0);

        assert_eq!(edges.len(), 11);
        assert_eq!(edges[0], 99_000.0);
        assert_eq!(edges[1], 200_000.0);
        assert_eq!(edges[10], 1_100_000.0);
    }

    #[test]
    fn credit_edges_widen_a_single_value() {
        let edges = credit_edges(5_000.0, 5_000.0);

        assert_eq!(edges[0], 4_995.0);
        assert_eq!(edges[10], 5_005.0);
    }

    #[test]
    fn bucket_counts_are_right_closed() {
        let counts = bucket_counts(&AGE_EDGES, [0.0, 25.0, 25.5, 65.0, 99.0, 120.0].into_iter());

        assert_eq!(counts, vec![1, 1, 0, 0, 1, 1]);
    }

    #[test]
    fn month_labels_roll_over_years() {
        assert_eq!(month_label(1), "Jan 2015");
        assert_eq!(month_label(12), "Dec 2015");
        assert_eq!(month_label(13), "Jan 2016");
        assert_eq!(month_label(36), "Dec 2017");
    }

    #[test]
    fn value_counts_order_by_frequency_then_name() {
        let values = vec![
            Some("Working".to_string()),
            Some("Pensioner".to_string()),
            None,
            Some("Working".to_string()),
            Some("Commercial associate".to_string()),
        ];

        let counts = value_counts(values.iter());

        let names: Vec<&str> = counts.iter().map(|entry| entry.name.as_str()).collect();
        assert_eq!(names, vec!["Working", "Commercial associate", "Pensioner"]);
        assert_eq!(counts[0].value, 2);
    }
}
