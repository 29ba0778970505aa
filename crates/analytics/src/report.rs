use crate::duration::DurationEstimate;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The complete result of one rate-sensitivity analysis request.
///
/// This struct is the final output of the analytics pipeline and serves as
/// the data transfer object for results throughout the entire system. Every
/// series is positionally aligned to `quarters`; undefined entries are
/// explicit `None`s (JSON `null`), never omitted indices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub company_id: String,
    pub company: String,

    /// The shared fiscal quarter-end date axis, strictly ascending.
    pub quarters: Vec<NaiveDate>,

    // I. Balance-sheet levels
    pub equity_level: Vec<Option<Decimal>>,
    pub asset_level: Vec<Option<Decimal>>,
    pub liability_level: Vec<Option<Decimal>>,

    // II. Equity QoQ change (fraction, not percent)
    pub equity_qoq: Vec<Option<Decimal>>,

    // III. One independent sub-pipeline per configured rate source
    pub rates: Vec<RateSourceReport>,
}

/// The per-rate-source slice of a report: the aligned level series, its
/// absolute change series (percentage points), and the duration estimate
/// derived against the shared equity change series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSourceReport {
    pub id: String,
    pub label: String,
    pub level: Vec<Option<Decimal>>,
    pub change: Vec<Option<Decimal>>,
    pub duration: DurationEstimate,
}

impl RateSourceReport {
    /// A fully absent sub-report for a source that returned no usable data.
    /// The axis length is preserved so the response keeps its shape.
    pub fn unavailable(id: impl Into<String>, label: impl Into<String>, len: usize) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            level: vec![None; len],
            change: vec![None; len],
            duration: DurationEstimate {
                series: vec![None; len],
                summary: None,
            },
        }
    }
}
