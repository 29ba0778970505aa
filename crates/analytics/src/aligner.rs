//! Quarter alignment: puts heterogeneous date-stamped series (sparse
//! quarterly filings, dense daily rate fixings) onto one shared, strictly
//! ascending axis of calendar quarter-end dates.

use chrono::{Datelike, NaiveDate};
use core_types::Series;
use rust_decimal::Decimal;

/// The calendar end date of the given quarter (1..=4).
fn quarter_end(year: i32, quarter: u32) -> NaiveDate {
    let (month, day) = match quarter {
        1 => (3, 31),
        2 => (6, 30),
        3 => (9, 30),
        _ => (12, 31),
    };
    NaiveDate::from_ymd_opt(year, month, day).expect("quarter-end dates are always valid")
}

/// The most recent completed calendar quarter end on or before `as_of`.
pub fn latest_quarter_end(as_of: NaiveDate) -> NaiveDate {
    let mut year = as_of.year();
    let mut quarter = as_of.month0() / 3 + 1;

    let end = quarter_end(year, quarter);
    if end > as_of {
        if quarter == 1 {
            year -= 1;
            quarter = 4;
        } else {
            quarter -= 1;
        }
    }
    quarter_end(year, quarter)
}

/// Exactly `quarters` strictly ascending, distinct quarter-end dates,
/// finishing at the most recent completed quarter on or before `last`.
///
/// The axis length never depends on how much source data exists; callers
/// must tolerate leading gaps when a history is shorter than the window.
pub fn quarter_axis(last: NaiveDate, quarters: usize) -> Vec<NaiveDate> {
    let last = latest_quarter_end(last);
    let mut year = last.year();
    let mut quarter = last.month0() / 3 + 1;

    let mut axis = Vec::with_capacity(quarters);
    for _ in 0..quarters {
        axis.push(quarter_end(year, quarter));
        if quarter == 1 {
            year -= 1;
            quarter = 4;
        } else {
            quarter -= 1;
        }
    }
    axis.reverse();
    axis
}

/// Aligns a series onto the axis by nearest-prior lookup: for each target
/// date, the latest present observation on or before it, or `None` when the
/// history does not reach back that far.
pub fn align(axis: &[NaiveDate], series: &Series) -> Vec<Option<Decimal>> {
    axis.iter()
        .map(|&date| series.value_at_or_before(date))
        .collect()
}

/// Carry-forward alignment with a staleness bound, used for daily rate
/// series: an observation older than `max_age_days` relative to the target
/// quarter end is treated as absent rather than filled forward.
pub fn align_within(
    axis: &[NaiveDate],
    series: &Series,
    max_age_days: u32,
) -> Vec<Option<Decimal>> {
    axis.iter()
        .map(|&date| series.value_at_or_before_within(date, max_age_days))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn latest_quarter_end_steps_back_mid_quarter() {
        assert_eq!(latest_quarter_end(d(2026, 8, 6)), d(2026, 6, 30));
        assert_eq!(latest_quarter_end(d(2026, 1, 1)), d(2025, 12, 31));
    }

    #[test]
    fn latest_quarter_end_accepts_an_exact_quarter_end() {
        assert_eq!(latest_quarter_end(d(2026, 3, 31)), d(2026, 3, 31));
    }

    #[test]
    fn quarter_axis_is_strictly_ascending_and_exact_length() {
        let axis = quarter_axis(d(2026, 8, 6), 12);

        assert_eq!(axis.len(), 12);
        assert_eq!(axis.first().copied(), Some(d(2023, 9, 30)));
        assert_eq!(axis.last().copied(), Some(d(2026, 6, 30)));
        assert!(axis.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn quarter_axis_crosses_year_boundaries() {
        let axis = quarter_axis(d(2025, 3, 31), 4);

        assert_eq!(
            axis,
            vec![
                d(2024, 6, 30),
                d(2024, 9, 30),
                d(2024, 12, 31),
                d(2025, 3, 31),
            ]
        );
    }

    #[test]
    fn align_carries_the_prior_observation_forward() {
        // Quarter end falls on a weekend; the fixing is from the Friday before.
        let series = Series::from_values(vec![
            (d(2024, 3, 28), dec!(3.40)),
            (d(2024, 6, 28), dec!(3.55)),
        ]);
        let axis = vec![d(2024, 3, 31), d(2024, 6, 30)];

        assert_eq!(
            align(&axis, &series),
            vec![Some(dec!(3.40)), Some(dec!(3.55))]
        );
    }

    #[test]
    fn align_emits_leading_gaps_for_short_histories() {
        let series = Series::from_values(vec![(d(2024, 6, 30), dec!(100))]);
        let axis = vec![d(2023, 12, 31), d(2024, 3, 31), d(2024, 6, 30)];

        assert_eq!(align(&axis, &series), vec![None, None, Some(dec!(100))]);
    }

    #[test]
    fn align_within_drops_stale_fills() {
        // A series that died in January must not populate the March quarter end.
        let series = Series::from_values(vec![(d(2024, 1, 10), dec!(2.9))]);
        let axis = vec![d(2024, 3, 31)];

        assert_eq!(align_within(&axis, &series, 10), vec![None]);
        assert_eq!(align(&axis, &series), vec![Some(dec!(2.9))]);
    }
}
