use chrono::{Datelike, NaiveDate};
use itertools::Itertools;
use rust_decimal::Decimal;
use serde::Serialize;

use super::Frequency;
use crate::compound::CompoundRecord;

/// One output row of the reshaped series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    /// Compounded value on `date`
    #[serde(rename = "Capital")]
    pub capital: Decimal,
    #[serde(rename = "Amount earned")]
    pub amount_earned: Decimal,
}

impl SummaryRow {
    fn from_record(record: &CompoundRecord, initial_capital: Decimal) -> Self {
        Self {
            date: record.date,
            capital: record.compounded_value,
            amount_earned: record.amount_earned(initial_capital),
        }
    }
}

/// Down-sample daily compounded records to the requested frequency.
///
/// Monthly and yearly output keep the last record of each calendar group.
/// Input must be ascending by date; output preserves that order.
pub fn reshape(
    records: &[CompoundRecord],
    initial_capital: Decimal,
    frequency: Frequency,
) -> Vec<SummaryRow> {
    let to_row = |r: &CompoundRecord| SummaryRow::from_record(r, initial_capital);

    match frequency {
        Frequency::Daily => records.iter().map(to_row).collect(),
        Frequency::Monthly => last_per_group(records, |d| (d.year(), d.month()))
            .into_iter()
            .map(to_row)
            .collect(),
        Frequency::Yearly => last_per_group(records, |d| (d.year(), 0))
            .into_iter()
            .map(to_row)
            .collect(),
    }
}

fn last_per_group<F>(records: &[CompoundRecord], key: F) -> Vec<&CompoundRecord>
where
    F: Fn(NaiveDate) -> (i32, u32),
{
    let groups = records.iter().chunk_by(|r| key(r.date));
    let mut last = Vec::new();
    for (_, group) in &groups {
        if let Some(record) = group.last() {
            last.push(record);
        }
    }
    last
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record(y: i32, m: u32, d: u32, value: Decimal) -> CompoundRecord {
        CompoundRecord {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            rate: dec!(0.001),
            compounded_value: value,
        }
    }

    fn sample() -> Vec<CompoundRecord> {
        vec![
            record(2020, 11, 30, dec!(100)),
            record(2020, 12, 1, dec!(101)),
            record(2020, 12, 30, dec!(102)),
            record(2021, 1, 4, dec!(103)),
            record(2021, 1, 29, dec!(104)),
            record(2021, 2, 1, dec!(105)),
        ]
    }

    #[test]
    fn test_daily_keeps_every_row() {
        let rows = reshape(&sample(), dec!(100), Frequency::Daily);
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[5].capital, dec!(105));
        assert_eq!(rows[5].amount_earned, dec!(5));
    }

    #[test]
    fn test_monthly_keeps_last_of_each_month() {
        let rows = reshape(&sample(), dec!(100), Frequency::Monthly);
        let dates: Vec<String> = rows.iter().map(|r| r.date.to_string()).collect();
        assert_eq!(
            dates,
            vec!["2020-11-30", "2020-12-30", "2021-01-29", "2021-02-01"]
        );
        assert_eq!(rows[1].capital, dec!(102));
    }

    #[test]
    fn test_yearly_keeps_last_of_each_year() {
        let rows = reshape(&sample(), dec!(100), Frequency::Yearly);
        let dates: Vec<String> = rows.iter().map(|r| r.date.to_string()).collect();
        assert_eq!(dates, vec!["2020-12-30", "2021-02-01"]);
        assert_eq!(rows[0].amount_earned, dec!(2));
    }

    #[test]
    fn test_same_month_different_years_are_separate_groups() {
        let records = vec![
            record(2020, 1, 31, dec!(100)),
            record(2021, 1, 29, dec!(110)),
        ];
        let rows = reshape(&records, dec!(100), Frequency::Monthly);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_amount_earned_is_capital_minus_initial() {
        for freq in [Frequency::Daily, Frequency::Monthly, Frequency::Yearly] {
            for row in reshape(&sample(), dec!(99.5), freq) {
                assert_eq!(row.amount_earned, row.capital - dec!(99.5));
            }
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(reshape(&[], dec!(1), Frequency::Monthly).is_empty());
    }
}
