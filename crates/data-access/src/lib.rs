//! # Ratesense Data Access
//!
//! The boundary between the analytics pipeline and the upstream data
//! sources. The pipeline only ever sees the two traits defined here; where
//! the series actually come from (an in-memory seed, CSV files on disk, or a
//! caching wrapper around either) is an implementation detail that can be
//! swapped out per deployment and per test.
//!
//! Providers tolerate "not found" by returning empty data rather than an
//! error, so the orchestrator's partial-degradation policy can apply.

use async_trait::async_trait;
use chrono::NaiveDate;
use core_types::{BalanceSheetPoint, Series};

pub mod cache;
pub mod csv_store;
pub mod error;
pub mod memory;

// --- Public API ---
pub use cache::CachedRates;
pub use csv_store::{CsvRateSource, CsvStore};
pub use error::ProviderError;
pub use memory::{MemoryRates, MemoryStore};

/// The abstract interface for the source of quarterly regulatory filings.
/// This trait is the contract the orchestrator uses, allowing the underlying
/// implementation (files, seed data, mock) to be swapped out.
#[async_trait]
pub trait EquityProvider: Send + Sync {
    /// Stable identifier of the upstream source, used in health reporting.
    fn source_id(&self) -> &str;

    /// Fetches the ordered quarterly filings for a company. An unknown
    /// company yields an empty vector, never an error.
    async fn fetch_filings(&self, company_id: &str)
        -> Result<Vec<BalanceSheetPoint>, ProviderError>;

    /// Whether the source is currently reachable/configured.
    async fn is_available(&self) -> bool;
}

/// The abstract interface for one market interest-rate source.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Stable identifier of the rate source (e.g. "us10y").
    fn source_id(&self) -> &str;

    /// Fetches the rate level series within `[from, to]`, both inclusive.
    /// A window with no observations yields an empty series, never an error.
    async fn fetch_levels(&self, from: NaiveDate, to: NaiveDate) -> Result<Series, ProviderError>;

    /// Whether the source is currently reachable/configured.
    async fn is_available(&self) -> bool;
}

/// Sorts filings by quarter-end date and keeps the last filing supplied for
/// a date (restated figures supersede the original ones).
pub fn normalize_filings(mut filings: Vec<BalanceSheetPoint>) -> Vec<BalanceSheetPoint> {
    filings.sort_by_key(|f| f.date);

    let mut deduped: Vec<BalanceSheetPoint> = Vec::with_capacity(filings.len());
    for filing in filings {
        match deduped.last_mut() {
            Some(last) if last.date == filing.date => *last = filing,
            _ => deduped.push(filing),
        }
    }
    deduped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn normalize_sorts_and_keeps_restated_filings() {
        let filings = vec![
            BalanceSheetPoint::new(d(2024, 6, 30), dec!(200)),
            BalanceSheetPoint::new(d(2024, 3, 31), dec!(100)),
            BalanceSheetPoint::new(d(2024, 6, 30), dec!(210)),
        ];

        let normalized = normalize_filings(filings);
        assert_eq!(normalized.len(), 2);
        assert_eq!(normalized[0].date, d(2024, 3, 31));
        assert_eq!(normalized[1].equity, dec!(210));
    }
}
