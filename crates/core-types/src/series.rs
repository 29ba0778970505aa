use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single dated observation of one metric.
///
/// The value may be absent: upstream sources sometimes report a date with no
/// usable figure (e.g. a placeholder for a market holiday), and the
/// data-access layer normalizes those to `None` rather than dropping the row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    pub date: NaiveDate,
    pub value: Option<Decimal>,
}

impl TimePoint {
    pub fn new(date: NaiveDate, value: Decimal) -> Self {
        Self {
            date,
            value: Some(value),
        }
    }

    /// An observation slot with no usable value.
    pub fn absent(date: NaiveDate) -> Self {
        Self { date, value: None }
    }
}

/// An ordered sequence of observations for one metric (an equity level or a
/// rate level over time).
///
/// Invariant: dates are strictly ascending with no duplicates. The
/// constructor enforces this for arbitrary input by sorting and, where a date
/// occurs more than once, keeping the last observation supplied for it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Series {
    points: Vec<TimePoint>,
}

impl Series {
    pub fn new(mut points: Vec<TimePoint>) -> Self {
        // Stable sort, so later input wins when dates collide below.
        points.sort_by_key(|p| p.date);

        let mut deduped: Vec<TimePoint> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last_mut() {
                Some(last) if last.date == point.date => *last = point,
                _ => deduped.push(point),
            }
        }

        Self { points: deduped }
    }

    /// Builds a series from `(date, value)` pairs where every value is known.
    pub fn from_values(values: Vec<(NaiveDate, Decimal)>) -> Self {
        Self::new(
            values
                .into_iter()
                .map(|(date, value)| TimePoint::new(date, value))
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn points(&self) -> &[TimePoint] {
        &self.points
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// The most recent present value observed on or before `date`
    /// (carry-forward lookup). Slots whose value is absent are skipped.
    pub fn value_at_or_before(&self, date: NaiveDate) -> Option<Decimal> {
        self.points
            .iter()
            .rev()
            .filter(|p| p.date <= date)
            .find_map(|p| p.value)
    }

    /// Same as [`value_at_or_before`](Self::value_at_or_before), but the
    /// carried-forward observation must be at most `max_age_days` old.
    /// Keeps a stale daily series from filling forward across whole quarters.
    pub fn value_at_or_before_within(&self, date: NaiveDate, max_age_days: u32) -> Option<Decimal> {
        self.points
            .iter()
            .rev()
            .filter(|p| p.date <= date && (date - p.date).num_days() <= i64::from(max_age_days))
            .find_map(|p| p.value)
    }
}

/// One fiscal-quarter regulatory filing: book equity plus the total asset and
/// liability figures reported alongside it (when disclosed).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheetPoint {
    /// Fiscal quarter-end date of the filing.
    pub date: NaiveDate,
    pub equity: Decimal,
    pub total_assets: Option<Decimal>,
    pub total_liabilities: Option<Decimal>,
}

impl BalanceSheetPoint {
    pub fn new(date: NaiveDate, equity: Decimal) -> Self {
        Self {
            date,
            equity,
            total_assets: None,
            total_liabilities: None,
        }
    }
}
