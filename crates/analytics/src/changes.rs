//! Period-over-period change derivation from aligned level columns.

use core_types::ChangeConvention;
use rust_decimal::Decimal;

/// Derives a change series of identical length from an aligned level column.
///
/// Element 0 is always `None` (no prior value to diff against). A gap on
/// either side of a step yields `None`: a change is never computed across
/// missing data. A zero previous level under the `Relative` convention is a
/// gap as well (`checked_div`), never a panic.
pub fn changes(levels: &[Option<Decimal>], convention: ChangeConvention) -> Vec<Option<Decimal>> {
    let mut out = Vec::with_capacity(levels.len());

    for (i, level) in levels.iter().enumerate() {
        if i == 0 {
            out.push(None);
            continue;
        }

        let change = match (levels[i - 1], *level) {
            (Some(prev), Some(curr)) => match convention {
                ChangeConvention::Relative => curr.checked_div(prev).map(|r| r - Decimal::ONE),
                ChangeConvention::Absolute => Some(curr - prev),
            },
            _ => None,
        };
        out.push(change);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn first_element_is_always_absent() {
        let levels = vec![Some(dec!(100)), Some(dec!(102))];

        assert_eq!(changes(&levels, ChangeConvention::Relative)[0], None);
        assert_eq!(changes(&levels, ChangeConvention::Absolute)[0], None);
    }

    #[test]
    fn relative_changes_are_fractions() {
        let levels = vec![Some(dec!(100)), Some(dec!(102)), Some(dec!(51))];
        let qoq = changes(&levels, ChangeConvention::Relative);

        assert_eq!(qoq, vec![None, Some(dec!(0.02)), Some(dec!(-0.5))]);
    }

    #[test]
    fn absolute_changes_keep_input_units() {
        let levels = vec![Some(dec!(3.0)), Some(dec!(3.5)), Some(dec!(3.5))];
        let diff = changes(&levels, ChangeConvention::Absolute);

        assert_eq!(diff, vec![None, Some(dec!(0.5)), Some(dec!(0.0))]);
    }

    #[test]
    fn gaps_never_produce_a_change() {
        let levels = vec![Some(dec!(100)), None, Some(dec!(105))];
        let qoq = changes(&levels, ChangeConvention::Relative);

        // Neither into nor out of the gap.
        assert_eq!(qoq, vec![None, None, None]);
    }

    #[test]
    fn zero_previous_level_is_a_gap_not_a_panic() {
        let levels = vec![Some(dec!(0)), Some(dec!(5))];
        let qoq = changes(&levels, ChangeConvention::Relative);

        assert_eq!(qoq, vec![None, None]);
    }

    #[test]
    fn output_length_always_matches_input() {
        let levels = vec![None, None, Some(dec!(1))];

        assert_eq!(changes(&levels, ChangeConvention::Relative).len(), 3);
        assert_eq!(changes(&[], ChangeConvention::Absolute).len(), 0);
    }
}
