//! Orchestrator-level tests: response shape, degradation policy and
//! reproducibility, driven through in-memory providers.

use async_trait::async_trait;
use chrono::NaiveDate;
use configuration::{Analysis, Company, Config, Data, RateSource, Server};
use core_types::{BalanceSheetPoint, Series};
use data_access::{MemoryRates, MemoryStore, ProviderError, RateProvider};
use engine::{Engine, EngineError};
use rust_decimal_macros::dec;
use std::path::PathBuf;
use std::sync::Arc;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn test_config() -> Config {
    Config {
        server: Server {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        data: Data {
            dir: PathBuf::from("unused"),
            cache_ttl_secs: 0,
        },
        analysis: Analysis {
            default_lookback_years: 1,
            rate_change_epsilon: dec!(0.0001),
            max_abs_duration: Some(dec!(100)),
            max_rate_staleness_days: 10,
        },
        companies: vec![Company {
            id: "samsung".to_string(),
            name: "Samsung Life".to_string(),
        }],
        rate_sources: vec![
            RateSource {
                id: "us10y".to_string(),
                label: "US Treasury 10Y".to_string(),
            },
            RateSource {
                id: "kr10y".to_string(),
                label: "KTB 10Y".to_string(),
            },
        ],
    }
}

fn filings() -> Vec<BalanceSheetPoint> {
    vec![
        BalanceSheetPoint {
            date: d(2023, 9, 30),
            equity: dec!(100),
            total_assets: Some(dec!(900)),
            total_liabilities: Some(dec!(800)),
        },
        BalanceSheetPoint {
            date: d(2023, 12, 31),
            equity: dec!(102),
            total_assets: Some(dec!(910)),
            total_liabilities: Some(dec!(808)),
        },
        BalanceSheetPoint {
            date: d(2024, 3, 31),
            equity: dec!(101),
            total_assets: None,
            total_liabilities: None,
        },
        BalanceSheetPoint {
            date: d(2024, 6, 30),
            equity: dec!(103.02),
            total_assets: Some(dec!(930)),
            total_liabilities: Some(dec!(826.98)),
        },
    ]
}

fn equity_store() -> MemoryStore {
    let mut store = MemoryStore::new();
    store.insert_filings("samsung", filings());
    store
}

/// Daily fixings landing a few days before each quarter end, so alignment
/// has to carry them forward.
fn us10y() -> MemoryRates {
    MemoryRates::new(
        "us10y",
        Series::from_values(vec![
            (d(2023, 9, 29), dec!(3.0)),
            (d(2023, 12, 29), dec!(3.5)),
            (d(2024, 3, 29), dec!(3.5)),
            (d(2024, 6, 28), dec!(3.25)),
        ]),
    )
}

fn kr10y() -> MemoryRates {
    MemoryRates::new(
        "kr10y",
        Series::from_values(vec![
            (d(2023, 9, 29), dec!(4.0)),
            (d(2023, 12, 29), dec!(4.1)),
            (d(2024, 3, 29), dec!(3.9)),
            (d(2024, 6, 28), dec!(3.9)),
        ]),
    )
}

fn engine_with(rates: Vec<Arc<dyn RateProvider>>) -> Engine {
    Engine::new(test_config(), Arc::new(equity_store()), rates)
}

/// A rate source whose upstream is broken.
struct FailingRates;

#[async_trait]
impl RateProvider for FailingRates {
    fn source_id(&self) -> &str {
        "kr10y"
    }

    async fn fetch_levels(&self, _from: NaiveDate, _to: NaiveDate) -> Result<Series, ProviderError> {
        Err(ProviderError::InvalidData("source offline".to_string()))
    }

    async fn is_available(&self) -> bool {
        false
    }
}

const AS_OF: (i32, u32, u32) = (2024, 8, 15);

#[tokio::test]
async fn report_has_consistent_shape_and_reference_values() {
    let engine = engine_with(vec![Arc::new(us10y()), Arc::new(kr10y())]);
    let report = engine
        .analyze_as_of("samsung", None, d(AS_OF.0, AS_OF.1, AS_OF.2))
        .await
        .unwrap();

    // Axis: four quarters ending at the last completed one, ascending.
    assert_eq!(
        report.quarters,
        vec![
            d(2023, 9, 30),
            d(2023, 12, 31),
            d(2024, 3, 31),
            d(2024, 6, 30),
        ]
    );

    // Every series is positionally aligned to the axis.
    let len = report.quarters.len();
    assert_eq!(report.equity_level.len(), len);
    assert_eq!(report.asset_level.len(), len);
    assert_eq!(report.liability_level.len(), len);
    assert_eq!(report.equity_qoq.len(), len);
    for rate in &report.rates {
        assert_eq!(rate.level.len(), len);
        assert_eq!(rate.change.len(), len);
        assert_eq!(rate.duration.series.len(), len);
    }

    assert_eq!(report.company, "Samsung Life");
    assert_eq!(report.equity_level[0], Some(dec!(100)));
    // The Q1 filing carries no asset figure; the prior quarter's level is
    // carried forward, exactly like a fixing on a non-trading day.
    assert_eq!(report.asset_level[2], Some(dec!(910)));
    assert_eq!(report.equity_qoq[0], None);
    assert_eq!(report.equity_qoq[1], Some(dec!(0.02)));
    assert_eq!(report.equity_qoq[3], Some(dec!(0.02)));

    // Sub-reports come back in configuration order.
    assert_eq!(report.rates[0].id, "us10y");
    assert_eq!(report.rates[1].id, "kr10y");

    // Carried-forward fixings and their absolute changes.
    let us = &report.rates[0];
    assert_eq!(us.level[0], Some(dec!(3.0)));
    assert_eq!(us.change, vec![None, Some(dec!(0.5)), Some(dec!(0.0)), Some(dec!(-0.25))]);

    // Durations: -4 on the +50bp quarter, absent on the flat quarter,
    // +8 on the -25bp quarter; median of {-4, 8} = 2.
    assert_eq!(us.duration.series[0], None);
    assert_eq!(us.duration.series[1], Some(dec!(-4)));
    assert_eq!(us.duration.series[2], None);
    assert_eq!(us.duration.series[3], Some(dec!(8)));
    assert_eq!(us.duration.summary, Some(dec!(2)));
}

#[tokio::test]
async fn unknown_company_is_rejected() {
    let engine = engine_with(vec![Arc::new(us10y())]);
    let result = engine
        .analyze_as_of("nobody", None, d(AS_OF.0, AS_OF.1, AS_OF.2))
        .await;

    assert!(matches!(result, Err(EngineError::UnknownCompany(_))));
}

#[tokio::test]
async fn zero_lookback_is_rejected() {
    let engine = engine_with(vec![Arc::new(us10y())]);
    let result = engine
        .analyze_as_of("samsung", Some(0), d(AS_OF.0, AS_OF.1, AS_OF.2))
        .await;

    assert!(matches!(result, Err(EngineError::InvalidRequest(_))));
}

#[tokio::test]
async fn missing_equity_fails_fast() {
    let engine = Engine::new(
        test_config(),
        Arc::new(MemoryStore::new()),
        vec![Arc::new(us10y())],
    );
    let result = engine
        .analyze_as_of("samsung", None, d(AS_OF.0, AS_OF.1, AS_OF.2))
        .await;

    assert!(matches!(result, Err(EngineError::EquityUnavailable(_))));
}

#[tokio::test]
async fn empty_rate_source_degrades_to_absent_columns() {
    let empty = MemoryRates::new("kr10y", Series::default());
    let engine = engine_with(vec![Arc::new(us10y()), Arc::new(empty)]);
    let report = engine
        .analyze_as_of("samsung", None, d(AS_OF.0, AS_OF.1, AS_OF.2))
        .await
        .unwrap();

    let kr = &report.rates[1];
    assert!(kr.level.iter().all(Option::is_none));
    assert!(kr.change.iter().all(Option::is_none));
    assert!(kr.duration.series.iter().all(Option::is_none));
    assert_eq!(kr.duration.summary, None);

    // Equity fields and the other source are untouched.
    assert!(report.equity_level.iter().all(Option::is_some));
    assert_eq!(report.rates[0].duration.summary, Some(dec!(2)));
}

#[tokio::test]
async fn failing_rate_source_degrades_but_does_not_block_others() {
    let engine = engine_with(vec![Arc::new(us10y()), Arc::new(FailingRates)]);
    let report = engine
        .analyze_as_of("samsung", None, d(AS_OF.0, AS_OF.1, AS_OF.2))
        .await
        .unwrap();

    assert_eq!(report.rates[1].label, "KTB 10Y");
    assert!(report.rates[1].level.iter().all(Option::is_none));
    assert_eq!(report.rates[0].duration.summary, Some(dec!(2)));
}

#[tokio::test]
async fn identical_inputs_yield_identical_reports() {
    let engine = engine_with(vec![Arc::new(us10y()), Arc::new(kr10y())]);
    let as_of = d(AS_OF.0, AS_OF.1, AS_OF.2);

    let first = engine.analyze_as_of("samsung", Some(1), as_of).await.unwrap();
    let second = engine.analyze_as_of("samsung", Some(1), as_of).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn window_longer_than_history_keeps_leading_gaps() {
    let engine = engine_with(vec![Arc::new(us10y())]);
    let report = engine
        .analyze_as_of("samsung", Some(3), d(AS_OF.0, AS_OF.1, AS_OF.2))
        .await
        .unwrap();

    assert_eq!(report.quarters.len(), 12);
    assert!(report.equity_level[..8].iter().all(Option::is_none));
    assert!(report.equity_qoq[..9].iter().all(Option::is_none));
    assert_eq!(report.equity_level[8], Some(dec!(100)));
}

#[tokio::test]
async fn health_reports_one_flag_per_source() {
    let engine = engine_with(vec![Arc::new(us10y()), Arc::new(FailingRates)]);
    let health = engine.health().await;

    assert_eq!(health.get("memory"), Some(&true));
    assert_eq!(health.get("us10y"), Some(&true));
    assert_eq!(health.get("kr10y"), Some(&false));
}
