//! A file-backed store: quarterly filings and daily rate fixings kept as
//! plain CSV under a data directory.
//!
//! Layout: `<data_dir>/filings/<company_id>.csv` with columns
//! `quarter_end,equity,total_assets,total_liabilities`, and
//! `<data_dir>/rates/<source_id>.csv` with columns `date,value`. A blank or
//! `.` rate value marks a dated observation with no usable figure (market
//! holiday placeholder) and is normalized to an absent point here, so the
//! analytics pipeline never branches on source-specific markers.

use crate::error::ProviderError;
use crate::{normalize_filings, EquityProvider, RateProvider};
use async_trait::async_trait;
use chrono::NaiveDate;
use core_types::{BalanceSheetPoint, Series, TimePoint};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;

/// The equity side of the store, rooted at a data directory.
#[derive(Debug, Clone)]
pub struct CsvStore {
    dir: PathBuf,
}

impl CsvStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// A rate provider reading `<data_dir>/rates/<source_id>.csv`.
    pub fn rate_source(&self, source_id: impl Into<String>) -> CsvRateSource {
        let source_id = source_id.into();
        let path = self.dir.join("rates").join(format!("{source_id}.csv"));
        CsvRateSource::new(source_id, path)
    }

    fn filings_path(&self, company_id: &str) -> PathBuf {
        self.dir.join("filings").join(format!("{company_id}.csv"))
    }
}

#[derive(Debug, Deserialize)]
struct FilingRow {
    quarter_end: String,
    equity: String,
    #[serde(default)]
    total_assets: Option<String>,
    #[serde(default)]
    total_liabilities: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RateRow {
    date: String,
    #[serde(default)]
    value: Option<String>,
}

#[async_trait]
impl EquityProvider for CsvStore {
    fn source_id(&self) -> &str {
        "filings"
    }

    async fn fetch_filings(
        &self,
        company_id: &str,
    ) -> Result<Vec<BalanceSheetPoint>, ProviderError> {
        let path = self.filings_path(company_id);
        if !path.is_file() {
            // Unknown company: empty, never an error.
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&path)?;
        let mut filings = Vec::new();

        for row in reader.deserialize::<FilingRow>() {
            let row = row?;

            // A filing without an equity figure carries nothing to analyze.
            let equity = row.equity.trim();
            if equity.is_empty() || equity == "-" {
                tracing::warn!(company_id, quarter = %row.quarter_end, "filing without equity figure skipped");
                continue;
            }

            filings.push(BalanceSheetPoint {
                date: parse_date(&row.quarter_end)?,
                equity: parse_decimal(equity)?,
                total_assets: parse_optional_decimal(row.total_assets.as_deref())?,
                total_liabilities: parse_optional_decimal(row.total_liabilities.as_deref())?,
            });
        }

        Ok(normalize_filings(filings))
    }

    async fn is_available(&self) -> bool {
        self.dir.join("filings").is_dir()
    }
}

/// One rate source backed by a single CSV file.
#[derive(Debug, Clone)]
pub struct CsvRateSource {
    id: String,
    path: PathBuf,
}

impl CsvRateSource {
    pub fn new(id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
        }
    }
}

#[async_trait]
impl RateProvider for CsvRateSource {
    fn source_id(&self) -> &str {
        &self.id
    }

    async fn fetch_levels(&self, from: NaiveDate, to: NaiveDate) -> Result<Series, ProviderError> {
        if !self.path.is_file() {
            return Ok(Series::default());
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut points = Vec::new();

        for row in reader.deserialize::<RateRow>() {
            let row = row?;
            let date = parse_date(&row.date)?;
            if date < from || date > to {
                continue;
            }

            let point = match row.value.as_deref().map(str::trim) {
                None | Some("") | Some(".") => TimePoint::absent(date),
                Some(raw) => TimePoint::new(date, parse_decimal(raw)?),
            };
            points.push(point);
        }

        Ok(Series::new(points))
    }

    async fn is_available(&self) -> bool {
        self.path.is_file()
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, ProviderError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| ProviderError::InvalidData(format!("invalid date '{raw}': {e}")))
}

fn parse_decimal(raw: &str) -> Result<Decimal, ProviderError> {
    Decimal::from_str(raw.trim())
        .map_err(|e| ProviderError::InvalidData(format!("invalid value '{raw}': {e}")))
}

fn parse_optional_decimal(raw: Option<&str>) -> Result<Option<Decimal>, ProviderError> {
    match raw.map(str::trim) {
        None | Some("") | Some("-") => Ok(None),
        Some(raw) => parse_decimal(raw).map(Some),
    }
}
