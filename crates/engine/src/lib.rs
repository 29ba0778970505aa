//! # Ratesense Orchestrator
//!
//! The central orchestrator of one analysis request: it obtains the raw
//! series from the data-access collaborators, runs the alignment / change /
//! duration pipeline once per configured rate source, and assembles the full
//! `AnalysisReport`.
//!
//! Degradation policy: no equity data means no analysis and a structured
//! error; a single failed or empty rate source degrades to all-absent
//! columns for that source while the rest of the response stays intact.

use analytics::aligner;
use analytics::changes::changes;
use analytics::duration::{estimate, DurationParams};
use analytics::{AnalysisReport, RateSourceReport};
use chrono::{Duration, NaiveDate, Utc};
use configuration::Config;
use core_types::{AlignedFrame, ChangeConvention, Series, TimePoint};
use data_access::{CachedRates, CsvStore, EquityProvider, RateProvider};
use futures::future::join_all;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;

pub mod error;

pub use error::EngineError;

/// Column names inside the working frame.
const EQUITY: &str = "equity";
const ASSETS: &str = "assets";
const LIABILITIES: &str = "liabilities";

/// The central orchestrator for rate-sensitivity analyses.
pub struct Engine {
    config: Config,

    // --- Shared, Thread-Safe Collaborators ---
    equity: Arc<dyn EquityProvider>,
    rates: Vec<Arc<dyn RateProvider>>,
}

impl Engine {
    pub fn new(
        config: Config,
        equity: Arc<dyn EquityProvider>,
        rates: Vec<Arc<dyn RateProvider>>,
    ) -> Self {
        Self {
            config,
            equity,
            rates,
        }
    }

    /// Wires the engine to the CSV store named in the configuration, with
    /// every rate source behind the TTL cache. This is the assembly both
    /// binaries use.
    pub fn from_csv_store(config: Config) -> Self {
        let store = CsvStore::new(&config.data.dir);
        let ttl = std::time::Duration::from_secs(config.data.cache_ttl_secs);

        let rates = config
            .rate_sources
            .iter()
            .map(|source| {
                Arc::new(CachedRates::with_ttl(store.rate_source(&source.id), ttl))
                    as Arc<dyn RateProvider>
            })
            .collect();

        Self::new(config, Arc::new(store), rates)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs one analysis with the axis anchored at today.
    pub async fn analyze(
        &self,
        company_id: &str,
        lookback_years: Option<u32>,
    ) -> Result<AnalysisReport, EngineError> {
        self.analyze_as_of(company_id, lookback_years, Utc::now().date_naive())
            .await
    }

    /// Runs one analysis with an explicit as-of date. Given identical raw
    /// input series, the output is bit-identical across runs.
    pub async fn analyze_as_of(
        &self,
        company_id: &str,
        lookback_years: Option<u32>,
        as_of: NaiveDate,
    ) -> Result<AnalysisReport, EngineError> {
        let company = self
            .config
            .company(company_id)
            .ok_or_else(|| EngineError::UnknownCompany(company_id.to_string()))?;

        let years = lookback_years.unwrap_or(self.config.analysis.default_lookback_years);
        if years == 0 {
            return Err(EngineError::InvalidRequest(
                "lookback window must be at least one year".to_string(),
            ));
        }

        let axis = aligner::quarter_axis(as_of, years as usize * 4);
        tracing::info!(company_id, years, as_of = %as_of, "running rate-sensitivity analysis");

        // 1. Equity filings. No equity, no analysis.
        let filings = self.equity.fetch_filings(company_id).await?;
        if filings.is_empty() {
            return Err(EngineError::EquityUnavailable(company_id.to_string()));
        }

        let equity_series =
            Series::from_values(filings.iter().map(|f| (f.date, f.equity)).collect());
        let asset_series = Series::new(
            filings
                .iter()
                .map(|f| TimePoint {
                    date: f.date,
                    value: f.total_assets,
                })
                .collect(),
        );
        let liability_series = Series::new(
            filings
                .iter()
                .map(|f| TimePoint {
                    date: f.date,
                    value: f.total_liabilities,
                })
                .collect(),
        );

        // 2. Rate sources, collected concurrently. One source failing must
        //    not block the others, so each fetch resolves to its own Result.
        let staleness = self.config.analysis.max_rate_staleness_days;
        let from = axis
            .first()
            .copied()
            .map(|d| d - Duration::days(i64::from(staleness)))
            .unwrap_or(as_of);
        let to = axis.last().copied().unwrap_or(as_of);

        let fetches = self.rates.iter().map(|provider| {
            let provider = Arc::clone(provider);
            async move {
                let result = provider.fetch_levels(from, to).await;
                (provider.source_id().to_string(), result)
            }
        });
        let mut fetched: BTreeMap<String, Series> = BTreeMap::new();
        for (source_id, result) in join_all(fetches).await {
            match result {
                Ok(series) => {
                    fetched.insert(source_id, series);
                }
                Err(error) => {
                    tracing::warn!(%source_id, %error, "rate source unavailable, degrading");
                }
            }
        }

        // 3. Alignment onto the shared quarter axis.
        let mut frame = AlignedFrame::new(axis)?;
        frame.insert(EQUITY, aligner::align(frame.dates(), &equity_series))?;
        frame.insert(ASSETS, aligner::align(frame.dates(), &asset_series))?;
        frame.insert(
            LIABILITIES,
            aligner::align(frame.dates(), &liability_series),
        )?;
        for (source_id, series) in &fetched {
            frame.insert(
                rate_column(source_id),
                aligner::align_within(frame.dates(), series, staleness),
            )?;
        }

        // 4. Changes and per-source duration estimates.
        let equity_level = column(&frame, EQUITY)?;
        let equity_qoq = changes(&equity_level, ChangeConvention::Relative);
        let params = DurationParams {
            rate_change_epsilon: self.config.analysis.rate_change_epsilon,
            max_abs_duration: self.config.analysis.max_abs_duration,
        };

        let mut rates = Vec::with_capacity(self.config.rate_sources.len());
        for source in &self.config.rate_sources {
            if !fetched.contains_key(&source.id) {
                rates.push(RateSourceReport::unavailable(
                    &source.id,
                    &source.label,
                    frame.len(),
                ));
                continue;
            }

            let level = column(&frame, &rate_column(&source.id))?;
            let change = changes(&level, ChangeConvention::Absolute);
            let duration = estimate(&equity_qoq, &change, &params)?;

            rates.push(RateSourceReport {
                id: source.id.clone(),
                label: source.label.clone(),
                level,
                change,
                duration,
            });
        }

        Ok(AnalysisReport {
            company_id: company_id.to_string(),
            company: company.name.clone(),
            quarters: frame.dates().to_vec(),
            equity_level,
            asset_level: column(&frame, ASSETS)?,
            liability_level: column(&frame, LIABILITIES)?,
            equity_qoq,
            rates,
        })
    }

    /// Pass-through reachability signal: one boolean per upstream source.
    pub async fn health(&self) -> BTreeMap<String, bool> {
        let mut sources = BTreeMap::new();
        sources.insert(
            self.equity.source_id().to_string(),
            self.equity.is_available().await,
        );
        for provider in &self.rates {
            sources.insert(
                provider.source_id().to_string(),
                provider.is_available().await,
            );
        }
        sources
    }
}

/// Frame column name for a rate source; namespaced so a source id can never
/// collide with the balance-sheet columns.
fn rate_column(source_id: &str) -> String {
    format!("rate:{source_id}")
}

fn column(frame: &AlignedFrame, name: &str) -> Result<Vec<Option<Decimal>>, EngineError> {
    frame
        .column(name)
        .map(|values| values.to_vec())
        .ok_or_else(|| EngineError::Internal(format!("column '{name}' missing from frame")))
}
