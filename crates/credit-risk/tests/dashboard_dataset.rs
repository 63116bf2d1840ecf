//! Builds the dashboard dataset from a small application export and reads it back.

mod common {
    use std::path::PathBuf;

    pub(super) const EXPORT: &str = "\
SK_ID_CURR,TARGET,CODE_GENDER,NAME_CONTRACT_TYPE,NAME_INCOME_TYPE,NAME_EDUCATION_TYPE,NAME_FAMILY_STATUS,NAME_HOUSING_TYPE,AMT_INCOME_TOTAL,AMT_CREDIT,DAYS_BIRTH,FLAG_OWN_CAR
100002,1,M,Cash loans,Working,Secondary / secondary special,Single / not married,House / apartment,202500,406597.5,-9461,N
100003,0,F,Cash loans,State servant,Higher education,Married,House / apartment,270000,1293502.5,-16765,N
100004,0,M,Revolving loans,Working,Secondary / secondary special,Single / not married,House / apartment,67500,135000,-19046,Y
100006,0,F,Cash loans,Working,Secondary / secondary special,Civil marriage,House / apartment,135000,312682.5,-19005,N
100007,0,M,Cash loans,Working,Secondary / secondary special,Single / not married,House / apartment,121500,513000,-19932,N
100008,0,M,Cash loans,State servant,Secondary / secondary special,Married,House / apartment,99000,490495.5,-16941,N
100009,0,F,Cash loans,Commercial associate,Higher education,Married,House / apartment,171000,1560726,-13778,Y
100010,0,M,Cash loans,State servant,Higher education,Married,House / apartment,360000,1530000,-18850,Y
";

    pub(super) fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("credit-risk-{}-{}", std::process::id(), name))
            .join("dashboard-data.json")
    }
}

mod building {
    use super::common::*;
    use credit_risk::dashboard::{DashboardError, DatasetBuilder};

    #[test]
    fn overview_matches_the_export() {
        let data = DatasetBuilder::seeded(3)
            .build_from_reader(EXPORT.as_bytes())
            .expect("export builds");

        let overview = &data.overview;
        assert_eq!(overview.total_applications, 8);
        assert_eq!(overview.default_rate, 0.125);
        assert_eq!(overview.approval_rate, 0.875);
        assert_eq!(overview.total_credit_volume, 6_242_004.0);
        assert_eq!(overview.avg_credit_amount, 780_250.5);
        assert_eq!(overview.avg_income, 178_312.5);
    }

    #[test]
    fn distributions_count_each_category() {
        let data = DatasetBuilder::seeded(3)
            .build_from_reader(EXPORT.as_bytes())
            .expect("export builds");

        assert_eq!(data.risk_distribution[0].name, "Low Risk");
        assert_eq!(data.risk_distribution[0].value, 7);
        assert_eq!(data.risk_distribution[1].value, 1);

        let genders: Vec<(&str, u64)> = data
            .gender_distribution
            .iter()
            .map(|slice| (slice.name.as_str(), slice.value))
            .collect();
        assert_eq!(genders, vec![("Female", 3), ("Male", 5), ("Other", 0)]);

        assert_eq!(data.income_type_distribution[0].name, "Working");
        assert_eq!(data.income_type_distribution[0].value, 4);
        assert_eq!(data.income_type_distribution[1].name, "State servant");
        assert_eq!(data.contract_type_distribution.len(), 2);
        assert_eq!(data.family_status_distribution[0].name, "Married");
        assert_eq!(data.family_status_distribution[0].value, 4);
        assert_eq!(data.housing_type_distribution[0].value, 8);
    }

    #[test]
    fn binned_views_cover_every_row() {
        let data = DatasetBuilder::seeded(3)
            .build_from_reader(EXPORT.as_bytes())
            .expect("export builds");

        assert_eq!(data.credit_amount_distribution.len(), 10);
        let binned: u64 = data
            .credit_amount_distribution
            .iter()
            .map(|bin| bin.count)
            .sum();
        assert_eq!(binned, 8);
        assert!(data.credit_amount_distribution[0].range.starts_with("$133K-"));

        let groups: Vec<&str> = data
            .age_distribution
            .iter()
            .map(|bucket| bucket.age_group.as_str())
            .collect();
        assert_eq!(
            groups,
            vec!["0-25", "25-35", "35-45", "45-55", "55-65", "65-100"]
        );
        let aged: u64 = data.age_distribution.iter().map(|bucket| bucket.count).sum();
        assert_eq!(aged, 8);
        assert_eq!(data.age_distribution[1].count, 1);
    }

    #[test]
    fn small_groups_are_left_out_of_default_rates() {
        let data = DatasetBuilder::seeded(3)
            .build_from_reader(EXPORT.as_bytes())
            .expect("export builds");

        assert!(data.default_rate_by_income.is_empty());
    }

    #[test]
    fn monthly_and_education_views() {
        let data = DatasetBuilder::seeded(3)
            .build_from_reader(EXPORT.as_bytes())
            .expect("export builds");

        let total: u64 = data
            .monthly_applications
            .iter()
            .map(|month| month.applications)
            .sum();
        assert_eq!(total, 8);
        // 100008 % 36 == 0, so the first synthetic month is present.
        assert_eq!(data.monthly_applications[0].month, "Jan 2015");
        assert_eq!(
            data.monthly_applications.last().map(|month| month.month.as_str()),
            Some("Dec 2017")
        );

        let education: Vec<&str> = data
            .avg_credit_by_education
            .iter()
            .map(|entry| entry.education.as_str())
            .collect();
        assert_eq!(
            education,
            vec!["Higher education", "Secondary / secondary special"]
        );
        assert_eq!(data.avg_credit_by_education[0].avg_credit, 1_461_409.5);
    }

    #[test]
    fn scatter_sample_respects_limit_and_seed() {
        let first = DatasetBuilder::seeded(11)
            .scatter_limit(3)
            .build_from_reader(EXPORT.as_bytes())
            .expect("export builds");
        let second = DatasetBuilder::seeded(11)
            .scatter_limit(3)
            .build_from_reader(EXPORT.as_bytes())
            .expect("export builds");

        assert_eq!(first.income_credit_scatter.len(), 3);
        assert_eq!(first.income_credit_scatter, second.income_credit_scatter);

        let everything = DatasetBuilder::seeded(11)
            .build_from_reader(EXPORT.as_bytes())
            .expect("export builds");
        assert_eq!(everything.income_credit_scatter.len(), 8);
    }

    #[test]
    fn header_only_export_is_rejected() {
        let header = EXPORT.lines().next().expect("header line");

        let err = DatasetBuilder::seeded(1)
            .build_from_reader(header.as_bytes())
            .expect_err("no rows");

        assert!(matches!(err, DashboardError::EmptyDataset));
    }

    #[test]
    fn malformed_numbers_surface_as_csv_errors() {
        let export = "SK_ID_CURR,TARGET,AMT_CREDIT\n1,0,lots\n";

        let err = DatasetBuilder::seeded(1)
            .build_from_reader(export.as_bytes())
            .expect_err("credit is not numeric");

        assert!(matches!(err, DashboardError::Csv(_)));
    }

    #[test]
    fn missing_cells_are_skipped() {
        let export = "SK_ID_CURR,TARGET,CODE_GENDER,AMT_CREDIT\n1,0,,1000\n2,,F,\n";

        let data = DatasetBuilder::seeded(1)
            .build_from_reader(export.as_bytes())
            .expect("sparse export builds");

        assert_eq!(data.overview.total_applications, 2);
        assert_eq!(data.overview.default_rate, 0.0);
        assert_eq!(data.overview.avg_credit_amount, 1000.0);
        assert_eq!(data.gender_distribution[0].value, 1);
        assert!(data.income_credit_scatter.is_empty());
    }
}

mod persistence {
    use super::common::*;
    use credit_risk::dashboard::{DashboardData, DashboardError, DatasetBuilder};

    #[test]
    fn written_dataset_reads_back() {
        let data = DatasetBuilder::seeded(5)
            .build_from_reader(EXPORT.as_bytes())
            .expect("export builds");
        let path = scratch_path("roundtrip");

        data.write_to_path(&path).expect("dataset writes");
        let loaded = DashboardData::from_path(&path).expect("dataset loads");

        assert_eq!(loaded.overview, data.overview);
        assert_eq!(loaded.monthly_applications, data.monthly_applications);

        let raw = std::fs::read_to_string(&path).expect("file readable");
        assert!(raw.contains("\"totalApplications\": 8"));
        assert!(raw.contains("\"ageGroup\""));

        if let Some(parent) = path.parent() {
            let _ = std::fs::remove_dir_all(parent);
        }
    }

    #[test]
    fn missing_file_reports_its_path() {
        let path = scratch_path("missing");

        let err = DashboardData::from_path(&path).expect_err("file absent");

        match err {
            DashboardError::Io { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn dataset_without_scatter_still_parses() {
        let json = r#"{
            "overview": {"totalApplications": 2, "defaultRate": 0.5, "approvalRate": 0.5,
                         "avgCreditAmount": 10.0, "avgIncome": 20.0, "totalCreditVolume": 20.0},
            "riskDistribution": [], "genderDistribution": [], "incomeTypeDistribution": [],
            "contractTypeDistribution": [], "educationDistribution": [],
            "creditAmountDistribution": [], "ageDistribution": [], "defaultRateByIncome": [],
            "monthlyApplications": [], "familyStatusDistribution": [],
            "housingTypeDistribution": [], "avgCreditByEducation": []
        }"#;

        let data = DashboardData::from_reader(json.as_bytes()).expect("json parses");

        assert_eq!(data.overview.total_applications, 2);
        assert!(data.income_credit_scatter.is_empty());
    }
}
