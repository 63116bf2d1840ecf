use crate::infra::parse_education;
use clap::Args;
use credit_risk::config::AppConfig;
use credit_risk::dashboard::{DashboardData, DatasetBuilder, DEFAULT_SCATTER_LIMIT};
use credit_risk::error::AppError;
use credit_risk::scoring::{
    ApplicantProfile, EducationLevel, RiskAssessment, RiskScorer, SeededConfidence,
};
use credit_risk::telemetry;
use serde_json::json;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Annual income of the applicant
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) income: f64,
    /// Requested credit amount
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) credit_amount: f64,
    /// Age in years
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) age: f64,
    /// Days in current employment
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) employment_days: f64,
    /// Education label, e.g. "Higher education" or "Lower secondary"
    #[arg(long, value_parser = parse_education, default_value = "Higher education")]
    pub(crate) education: EducationLevel,
    /// Applicant owns a car
    #[arg(long)]
    pub(crate) own_car: bool,
    /// Applicant owns realty
    #[arg(long)]
    pub(crate) own_realty: bool,
    /// Number of children
    #[arg(long, default_value_t = 0)]
    pub(crate) children: u32,
    /// Seed the confidence figure for repeatable output
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Print the assessment as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

impl AssessArgs {
    fn profile(&self) -> ApplicantProfile {
        ApplicantProfile {
            annual_income: self.income,
            credit_amount: self.credit_amount,
            age: self.age,
            employment_days: self.employment_days,
            education_level: self.education,
            owns_car: self.own_car,
            owns_realty: self.own_realty,
            number_of_children: self.children,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct DashboardBuildArgs {
    /// Application CSV export to aggregate
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Destination of the dashboard JSON file
    #[arg(long)]
    pub(crate) output: PathBuf,
    /// Seed for the scatter sample (random when omitted)
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Maximum number of income/credit scatter points
    #[arg(long, default_value_t = DEFAULT_SCATTER_LIMIT)]
    pub(crate) scatter_limit: usize,
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let profile = args.profile();
    let assessment = match args.seed {
        Some(seed) => RiskScorer::with_confidence(SeededConfidence::new(seed)).assess(&profile),
        None => RiskScorer::new().assess(&profile),
    };

    if args.json {
        let payload = json!({ "profile": profile, "assessment": assessment });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        render_assessment(&profile, &assessment);
    }

    Ok(())
}

pub(crate) fn run_dashboard_build(args: DashboardBuildArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let DashboardBuildArgs {
        input,
        output,
        seed,
        scatter_limit,
    } = args;

    let data = match seed {
        Some(seed) => DatasetBuilder::seeded(seed)
            .scatter_limit(scatter_limit)
            .build_from_path(&input)?,
        None => DatasetBuilder::from_entropy()
            .scatter_limit(scatter_limit)
            .build_from_path(&input)?,
    };
    data.write_to_path(&output)?;

    render_build_summary(&data, &output);
    Ok(())
}

fn render_assessment(profile: &ApplicantProfile, assessment: &RiskAssessment) {
    println!("Credit risk assessment");
    println!(
        "Income {:.0}, credit {:.0} (ratio {:.2}), age {}, employed {} day(s)",
        profile.annual_income,
        profile.credit_amount,
        profile.credit_to_income_ratio(),
        profile.age,
        profile.employment_days
    );
    println!(
        "Education: {}, car: {}, realty: {}, children: {}",
        profile.education_level.label(),
        yes_no(profile.owns_car),
        yes_no(profile.owns_realty),
        profile.number_of_children
    );

    println!(
        "\nRisk score: {}/100 ({} risk)",
        assessment.risk_score,
        assessment.risk_level.label()
    );
    println!("Confidence: {:.1}%", assessment.confidence);
    println!("Recommendation: {}", assessment.recommendation);

    if assessment.components.is_empty() {
        println!("\nScore breakdown: no risk points");
    } else {
        println!("\nScore breakdown");
        for component in &assessment.components {
            println!("- +{} {}", component.points, component.notes);
        }
    }

    println!("\nKey risk factors");
    for factor in &assessment.factors {
        println!("- {}: {:.0}%", factor.name, factor.impact);
    }
}

fn render_build_summary(data: &DashboardData, output: &std::path::Path) {
    println!("Dashboard data processed");
    println!("Total applications: {}", data.overview.total_applications);
    println!("Default rate: {:.2}%", data.overview.default_rate * 100.0);
    println!("Data saved to: {}", output.display());
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
