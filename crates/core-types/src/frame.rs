use crate::error::CoreError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Several series aligned onto one shared, strictly ascending date axis.
///
/// Invariant: every column has exactly as many entries as the axis has dates.
/// Gaps are explicit `None`s, never dropped indices, so positional lookups
/// stay valid across all columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedFrame {
    dates: Vec<NaiveDate>,
    columns: BTreeMap<String, Vec<Option<Decimal>>>,
}

impl AlignedFrame {
    /// Creates an empty frame over the given axis. The axis must be strictly
    /// ascending with no duplicate dates.
    pub fn new(dates: Vec<NaiveDate>) -> Result<Self, CoreError> {
        if dates.windows(2).any(|w| w[0] >= w[1]) {
            return Err(CoreError::InvalidInput(
                "date axis".to_string(),
                "dates must be strictly ascending without duplicates".to_string(),
            ));
        }

        Ok(Self {
            dates,
            columns: BTreeMap::new(),
        })
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Adds a pre-aligned column. Fails if its length does not match the axis.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        values: Vec<Option<Decimal>>,
    ) -> Result<(), CoreError> {
        let name = name.into();
        if values.len() != self.dates.len() {
            return Err(CoreError::LengthMismatch(
                name,
                values.len(),
                self.dates.len(),
            ));
        }

        self.columns.insert(name, values);
        Ok(())
    }

    pub fn column(&self, name: &str) -> Option<&[Option<Decimal>]> {
        self.columns.get(name).map(|v| v.as_slice())
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(|k| k.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn rejects_unsorted_axis() {
        let result = AlignedFrame::new(vec![d(2024, 6, 30), d(2024, 3, 31)]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_duplicate_axis_dates() {
        let result = AlignedFrame::new(vec![d(2024, 3, 31), d(2024, 3, 31)]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_column_of_wrong_length() {
        let mut frame = AlignedFrame::new(vec![d(2024, 3, 31), d(2024, 6, 30)]).unwrap();
        let result = frame.insert("equity", vec![Some(dec!(100))]);
        assert!(result.is_err());
    }

    #[test]
    fn stores_and_returns_columns() {
        let mut frame = AlignedFrame::new(vec![d(2024, 3, 31), d(2024, 6, 30)]).unwrap();
        frame
            .insert("equity", vec![Some(dec!(100)), None])
            .unwrap();

        assert_eq!(frame.column("equity").unwrap()[0], Some(dec!(100)));
        assert_eq!(frame.column("equity").unwrap()[1], None);
        assert!(frame.column("assets").is_none());
    }
}
