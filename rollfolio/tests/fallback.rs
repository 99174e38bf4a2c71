use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use rollfolio::{
    CacheConfig, CalendarIndex, CalendarPolicy, Fund, FundKind, PriceHistory, PriceObservation,
    Rollfolio, RollfolioBuilder, RollfolioError, StatsRequest,
};
use rollfolio_mock::{DynamicMockConnector, MockBehavior, MockConnector};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn pinned() -> RollfolioBuilder {
    Rollfolio::builder().calendar(Arc::new(CalendarIndex::with_today(d(2024, 12, 31))))
}

fn two_points(title: &str) -> PriceHistory {
    PriceHistory {
        title: Some(title.into()),
        observations: vec![
            PriceObservation::new(d(2021, 1, 1), 10.0),
            PriceObservation::new(d(2020, 1, 1), 8.0),
        ],
    }
}

#[tokio::test]
async fn falls_back_after_a_provider_error() {
    let (failing, ctrl) = DynamicMockConnector::new_with_controller("failing");
    ctrl.set_behavior(
        "FLAT",
        MockBehavior::Fail(RollfolioError::provider("failing", "boom")),
    )
    .await;
    let rf = pinned()
        .with_connector(failing)
        .with_connector(Arc::new(MockConnector::new()))
        .build()
        .unwrap();

    let (fund, _) = rf.price_series(&Fund::mutual_fund("FLAT")).await.unwrap();
    assert_eq!(fund.title, "Mock Flat Fund");
    assert_eq!(ctrl.calls(), 1);
}

#[tokio::test]
async fn falls_back_after_a_timeout() {
    let (hanging, ctrl) = DynamicMockConnector::new_with_controller("hanging");
    ctrl.set_behavior("X", MockBehavior::Hang).await;
    let (backup, backup_ctrl) = DynamicMockConnector::new_with_controller("backup");
    backup_ctrl
        .set_behavior("X", MockBehavior::Return(two_points("Backup")))
        .await;
    let rf = pinned()
        .with_connector(hanging)
        .with_connector(backup)
        .provider_timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let (fund, series) = rf.price_series(&Fund::mutual_fund("X")).await.unwrap();
    assert_eq!(fund.title, "Backup");
    assert_eq!(series.first_date(), Some(d(2020, 1, 1)));
    assert_eq!(series.last_date(), Some(d(2021, 1, 1)));
}

#[tokio::test]
async fn slow_mock_times_out() {
    let rf = pinned()
        .with_connector(Arc::new(MockConnector::new()))
        .provider_timeout(Duration::from_millis(20))
        .build()
        .unwrap();
    let err = rf
        .price_series(&Fund::mutual_fund("TIMEOUT"))
        .await
        .unwrap_err();
    match err {
        RollfolioError::AllProvidersFailed(inner) => assert!(matches!(
            inner.as_slice(),
            [RollfolioError::ProviderTimeout { provider, .. }] if provider == "rollfolio-mock"
        )),
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn not_found_everywhere_collapses() {
    let (a, _) = DynamicMockConnector::new_with_controller("a");
    let (b, _) = DynamicMockConnector::new_with_controller("b");
    let rf = pinned().with_connector(a).with_connector(b).build().unwrap();
    let err = rf
        .price_series(&Fund::mutual_fund("GONE"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        RollfolioError::not_found("price history for mutual-fund:GONE")
    );
}

#[tokio::test]
async fn unsupported_kind_is_reported() {
    let (index_only, ctrl) = DynamicMockConnector::new_for_kinds("idx", &[FundKind::Index]);
    let rf = pinned().with_connector(index_only).build().unwrap();
    let err = rf
        .price_series(&Fund::mutual_fund("FLAT"))
        .await
        .unwrap_err();
    assert!(matches!(err, RollfolioError::Unsupported { .. }));
    assert_eq!(ctrl.calls(), 0);
}

#[tokio::test]
async fn empty_history_defers_to_the_next_provider() {
    let (empty, ctrl) = DynamicMockConnector::new_with_controller("empty");
    ctrl.set_behavior("Y", MockBehavior::Return(PriceHistory::default()))
        .await;
    let (full, full_ctrl) = DynamicMockConnector::new_with_controller("full");
    full_ctrl
        .set_behavior("Y", MockBehavior::Return(two_points("Full")))
        .await;
    let rf = pinned()
        .with_connector(empty)
        .with_connector(full)
        .build()
        .unwrap();
    let (fund, series) = rf.price_series(&Fund::index("Y")).await.unwrap();
    assert_eq!(fund.title, "Full");
    assert!(!series.is_empty());
}

#[tokio::test]
async fn observations_outside_the_calendar_are_dropped() {
    let (conn, ctrl) = DynamicMockConnector::new_with_controller("edges");
    ctrl.set_behavior(
        "Z",
        MockBehavior::Return(PriceHistory {
            title: None,
            observations: vec![
                PriceObservation::new(d(1999, 12, 31), 1.0),
                PriceObservation::new(d(2020, 1, 10), 2.0),
                PriceObservation::new(d(2020, 1, 20), -3.0),
                PriceObservation::new(d(2025, 1, 1), 4.0),
            ],
        }),
    )
    .await;
    let rf = pinned().with_connector(conn).build().unwrap();
    let (fund, series) = rf.price_series(&Fund::index("Z")).await.unwrap();
    assert_eq!(fund.title, "Z");
    assert_eq!(series.first_date(), Some(d(2020, 1, 1)));
    assert_eq!(series.last_date(), Some(d(2020, 1, 10)));
    assert_eq!(series.get(d(2020, 1, 1)), Some(2.0));
}

#[tokio::test]
async fn cache_shares_fetches_across_periods() {
    let (conn, ctrl) = DynamicMockConnector::new_with_controller("counted");
    ctrl.set_behavior("C", MockBehavior::Return(two_points("Counted")))
        .await;
    let rf = pinned()
        .with_connector(conn)
        .cache(CacheConfig::default())
        .build()
        .unwrap();
    let fund = Fund::mutual_fund("C");
    let report = rf
        .stats(&[
            StatsRequest::new(1, vec![fund.clone()]),
            StatsRequest::new(2, vec![fund.clone()]),
        ])
        .await;
    assert!(report.warnings.is_empty(), "{:?}", report.warnings);
    assert_eq!(report.groups.len(), 2);
    assert_eq!(ctrl.calls(), 1);
}

#[test]
fn pinned_calendar_is_reused() {
    let rf = pinned()
        .with_connector(Arc::new(MockConnector::new()))
        .build()
        .unwrap();
    let a = rf.calendar();
    let b = rf.calendar();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(a.today(), d(2024, 12, 31));
}

#[test]
fn refresh_daily_replaces_a_stale_calendar() {
    let stale = Arc::new(CalendarIndex::with_today(d(2020, 1, 1)));
    let rf = Rollfolio::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .calendar(Arc::clone(&stale))
        .calendar_policy(CalendarPolicy::RefreshDaily)
        .build()
        .unwrap();
    let fresh = rf.calendar();
    assert!(!Arc::ptr_eq(&fresh, &stale));
    assert!(fresh.today() > stale.today());
    assert!(Arc::ptr_eq(&fresh, &rf.calendar()));
}
