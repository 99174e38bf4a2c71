use std::sync::Arc;

use rollfolio::{CacheConfig, Fund, Rollfolio, StatsRequest};
use rollfolio_mock::MockConnector;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Suggested: RUST_LOG=info,rollfolio=debug (build with --features tracing)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::CLOSE)
        .try_init();

    // 1. Register a provider. The mock serves generated histories offline.
    let rf = Rollfolio::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .cache(CacheConfig::default())
        .contribution_amount(5_000.0)
        .build()?;

    // 2. One fund, one window length.
    let growth = rf.rolling_returns(&Fund::mutual_fund("GROWTH"), 3).await?;
    println!(
        "{} ({}y): {} windows, median {:.2}%",
        growth.fund.title,
        growth.period_years,
        growth.summary.count,
        growth.summary.median.unwrap_or(f64::NAN),
    );

    // 3. Several funds and periods at once; failures land in `warnings`.
    let report = rf
        .stats(&[
            StatsRequest::new(1, vec![Fund::mutual_fund("FLAT"), Fund::index("GROWTH")]),
            StatsRequest::new(5, vec![Fund::mutual_fund("SPARSE"), Fund::mutual_fund("FAIL")]),
        ])
        .await;
    for group in &report.groups {
        for fund in &group.list {
            println!(
                "{:>2}y  {:<20} min {:>7.2}  max {:>7.2}  avg {:>7.2}",
                group.period_years,
                fund.fund.title,
                fund.summary.min.unwrap_or(f64::NAN),
                fund.summary.max.unwrap_or(f64::NAN),
                fund.summary.average.unwrap_or(f64::NAN),
            );
        }
    }
    for w in &report.warnings {
        eprintln!("warning: {w}");
    }

    Ok(())
}
