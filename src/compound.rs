//! Compounding engine
//!
//! Each day's compounded value reflects the rates of all *prior* days: the
//! first row always equals the capital, and day `i`'s rate first shows up
//! in day `i + 1`'s value.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::CalcError;
use crate::series::{RateRecord, RateSeries};

/// A daily rate together with the capital compounded up to that day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompoundRecord {
    pub date: NaiveDate,
    pub rate: Decimal,
    pub compounded_value: Decimal,
}

impl CompoundRecord {
    /// Gain over the initial capital
    pub fn amount_earned(&self, capital: Decimal) -> Decimal {
        self.compounded_value - capital
    }
}

/// `value × (1 + rate)`, failing instead of panicking past `Decimal::MAX`.
fn grow(value: Decimal, rate: RateRecord, on: NaiveDate) -> Result<Decimal, CalcError> {
    Decimal::ONE
        .checked_add(rate.rate)
        .and_then(|factor| value.checked_mul(factor))
        .ok_or_else(|| CalcError::Overflow(on.to_string()))
}

/// Compound `capital` over an ascending slice of rates.
pub fn compound_records(
    capital: Decimal,
    records: &[RateRecord],
) -> Result<Vec<CompoundRecord>, CalcError> {
    let mut out = Vec::with_capacity(records.len());
    let mut value = capital;
    let mut previous: Option<RateRecord> = None;

    for record in records {
        if let Some(prev) = previous {
            value = grow(value, prev, record.date)?;
        }
        previous = Some(*record);
        out.push(CompoundRecord {
            date: record.date,
            rate: record.rate,
            compounded_value: value,
        });
    }
    Ok(out)
}

/// Compound `capital` over the whole series.
pub fn compound(capital: Decimal, series: &RateSeries) -> Result<Vec<CompoundRecord>, CalcError> {
    compound_records(capital, series.records())
}

/// Final compounded value of `capital` over a slice, or `capital` itself
/// when the slice is empty.
pub fn final_value(capital: Decimal, records: &[RateRecord]) -> Result<Decimal, CalcError> {
    let Some((last, applied)) = records.split_last() else {
        return Ok(capital);
    };
    applied
        .iter()
        .try_fold(capital, |acc, r| grow(acc, *r, last.date))
}
