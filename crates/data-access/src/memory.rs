//! In-memory providers, used to seed demos and to drive the orchestrator in
//! tests without touching the filesystem.

use crate::error::ProviderError;
use crate::{normalize_filings, EquityProvider, RateProvider};
use async_trait::async_trait;
use chrono::NaiveDate;
use core_types::{BalanceSheetPoint, Series, TimePoint};
use std::collections::HashMap;

/// An equity provider backed by a plain map of company id to filings.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    filings: HashMap<String, Vec<BalanceSheetPoint>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the filings for a company, replacing any previous entry.
    pub fn insert_filings(&mut self, company_id: impl Into<String>, filings: Vec<BalanceSheetPoint>) {
        self.filings
            .insert(company_id.into(), normalize_filings(filings));
    }
}

#[async_trait]
impl EquityProvider for MemoryStore {
    fn source_id(&self) -> &str {
        "memory"
    }

    async fn fetch_filings(
        &self,
        company_id: &str,
    ) -> Result<Vec<BalanceSheetPoint>, ProviderError> {
        Ok(self.filings.get(company_id).cloned().unwrap_or_default())
    }

    async fn is_available(&self) -> bool {
        true
    }
}

/// A rate provider backed by a fixed series.
#[derive(Debug, Clone)]
pub struct MemoryRates {
    id: String,
    series: Series,
}

impl MemoryRates {
    pub fn new(id: impl Into<String>, series: Series) -> Self {
        Self {
            id: id.into(),
            series,
        }
    }
}

#[async_trait]
impl RateProvider for MemoryRates {
    fn source_id(&self) -> &str {
        &self.id
    }

    async fn fetch_levels(&self, from: NaiveDate, to: NaiveDate) -> Result<Series, ProviderError> {
        let points: Vec<TimePoint> = self
            .series
            .points()
            .iter()
            .copied()
            .filter(|p| p.date >= from && p.date <= to)
            .collect();
        Ok(Series::new(points))
    }

    async fn is_available(&self) -> bool {
        true
    }
}
