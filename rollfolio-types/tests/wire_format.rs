use chrono::NaiveDate;
use rollfolio_types::{
    Fund, FundKind, PriceObservation, RollfolioConfig, RollingResult, StatsRequest,
};

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn observations_use_iso_dates() {
    let obs: Vec<PriceObservation> =
        serde_json::from_str(r#"[{"date":"2020-01-01","price":100.5},{"date":"2020-06-01","price":110}]"#)
            .expect("deserialize observations");
    assert_eq!(obs[0].date, d("2020-01-01"));
    assert!((obs[1].price - 110.0).abs() < f64::EPSILON);
}

#[test]
fn rolling_rows_serialize_null_xirr() {
    let rows = vec![
        RollingResult {
            date: d("2021-01-01"),
            xirr: Some(12.34),
        },
        RollingResult {
            date: d("2021-01-02"),
            xirr: None,
        },
    ];
    let json = serde_json::to_string(&rows).expect("serialize rows");
    assert_eq!(
        json,
        r#"[{"date":"2021-01-01","xirr":12.34},{"date":"2021-01-02","xirr":null}]"#
    );
}

#[test]
fn stats_request_matches_period_list_shape() {
    let req: StatsRequest = serde_json::from_str(
        r#"{"period":3,"list":[{"type":"m","value":"119551","title":"Some Fund"},{"type":"i","value":"NIFTY 50","title":""}]}"#,
    )
    .expect("deserialize request");
    assert_eq!(req.period_years, 3);
    assert_eq!(req.funds[0].kind, FundKind::MutualFund);
    assert_eq!(req.funds[1], Fund::index("NIFTY 50").with_title(""));
}

#[test]
fn default_config_survives_json() {
    let cfg = RollfolioConfig::default();
    let json = serde_json::to_string(&cfg).expect("serialize config");
    let de: RollfolioConfig = serde_json::from_str(&json).expect("deserialize config");
    assert_eq!(de, cfg);
    assert!((de.rolling.contribution_amount - 10_000.0).abs() < f64::EPSILON);
}
