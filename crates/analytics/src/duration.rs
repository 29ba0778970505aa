//! The duration estimator: quantifies how much book equity moves per unit
//! change in a long-term rate.

use crate::error::AnalyticsError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tuning knobs for the estimator. Both thresholds operate on the rate's
/// native units (percentage points for the rate change, conventional
/// duration units for the cap).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DurationParams {
    /// Rate changes smaller than this (in percentage points) are treated as
    /// a zero denominator: the period's estimate is absent instead of an
    /// extreme value.
    pub rate_change_epsilon: Decimal,
    /// Per-period estimates whose magnitude exceeds this are reported absent
    /// and excluded from the summary. `None` disables the guard.
    pub max_abs_duration: Option<Decimal>,
}

impl Default for DurationParams {
    fn default() -> Self {
        Self {
            rate_change_epsilon: Decimal::new(1, 4), // 0.0001 pp
            max_abs_duration: Some(Decimal::ONE_HUNDRED),
        }
    }
}

/// A per-period sensitivity series plus one scalar summary over the window.
///
/// Sign convention: positive duration means equity falls when rates rise.
/// The summary is the median of the defined per-period values and is present
/// only when at least two periods have both changes defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationEstimate {
    pub series: Vec<Option<Decimal>>,
    pub summary: Option<Decimal>,
}

/// Computes the duration estimate from index-aligned change series.
///
/// Per period `i`: defined only when both changes are present and the rate
/// change clears the epsilon guard; then
/// `duration[i] = -equity_change[i] / (rate_change[i] / 100)`,
/// i.e. equity fraction per unit decimal rate move.
pub fn estimate(
    equity_change: &[Option<Decimal>],
    rate_change: &[Option<Decimal>],
    params: &DurationParams,
) -> Result<DurationEstimate, AnalyticsError> {
    if equity_change.len() != rate_change.len() {
        return Err(AnalyticsError::LengthMismatch(
            equity_change.len(),
            rate_change.len(),
        ));
    }

    let mut series = Vec::with_capacity(equity_change.len());
    let mut valid_pairs = 0usize;
    let mut defined = Vec::new();

    for i in 0..equity_change.len() {
        if i == 0 {
            // No prior period exists; the slot is absent by construction.
            series.push(None);
            continue;
        }

        let (eq, rc) = match (equity_change[i], rate_change[i]) {
            (Some(eq), Some(rc)) => (eq, rc),
            _ => {
                series.push(None);
                continue;
            }
        };
        valid_pairs += 1;

        if rc.abs() < params.rate_change_epsilon {
            series.push(None);
            continue;
        }

        let value = match eq.checked_div(rc / Decimal::ONE_HUNDRED) {
            Some(ratio) => -ratio,
            None => {
                series.push(None);
                continue;
            }
        };

        if let Some(cap) = params.max_abs_duration {
            if value.abs() > cap {
                tracing::debug!(period = i, %value, "duration outlier excluded");
                series.push(None);
                continue;
            }
        }

        defined.push(value);
        series.push(Some(value));
    }

    let summary = if valid_pairs >= 2 {
        median(&defined)
    } else {
        None
    };

    Ok(DurationEstimate { series, summary })
}

/// Median of the given values; the mean of the two middle values for an even
/// count, `None` when empty.
fn median(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort();

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / Decimal::TWO)
    }
}
