//! Daily Selic rate series and the loader that builds it from raw API rows
//!
//! The BCB API returns `{"data": "dd/mm/yyyy", "valor": "0.044627"}` rows
//! with the rate as a percentage. [`load_series`] turns them into an
//! ascending [`RateSeries`] of fractional rates.

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

use crate::error::CalcError;
use crate::validation::REQUEST_DATE_FORMAT;

/// One row as returned by the BCB SGS API
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RawRateRecord {
    pub data: String,
    pub valor: String,
}

impl RawRateRecord {
    pub fn new(data: impl Into<String>, valor: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            valor: valor.into(),
        }
    }
}

/// Daily rate, stored as a fraction (0.005 for 0.5%)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RateRecord {
    pub date: NaiveDate,
    pub rate: Decimal,
}

/// Ascending, duplicate-free sequence of daily rates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateSeries {
    records: Vec<RateRecord>,
}

impl RateSeries {
    /// Build a series from records already in fractional form.
    ///
    /// Records are sorted by date; duplicate dates are rejected.
    pub fn new(mut records: Vec<RateRecord>) -> Result<Self, CalcError> {
        records.sort_by_key(|r| r.date);
        if let Some(pair) = records.windows(2).find(|w| w[0].date == w[1].date) {
            return Err(CalcError::MalformedSeries(format!(
                "duplicate date {}",
                pair[0].date
            )));
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[RateRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.records.first().map(|r| r.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.records.last().map(|r| r.date)
    }
}

fn parse_api_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), REQUEST_DATE_FORMAT)
        .map_err(|_| CalcError::MalformedSeries(format!("invalid date '{}'", value)))
        .context("Failed to parse Selic series date")
}

fn parse_api_rate(value: &str) -> Result<Decimal> {
    let trimmed = value.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| CalcError::MalformedSeries(format!("invalid rate '{}'", value)))
        .context("Failed to parse Selic series rate")
}

/// Parse raw API rows into a [`RateSeries`].
///
/// Sorts ascending, drops the first record when it falls before
/// `requested_start` (the API may return one extra boundary day), and
/// converts percentages to fractions. The end boundary is left as returned.
pub fn load_series(raw: &[RawRateRecord], requested_start: NaiveDate) -> Result<RateSeries> {
    let mut parsed = raw
        .iter()
        .map(|row| {
            Ok(RateRecord {
                date: parse_api_date(&row.data)?,
                rate: parse_api_rate(&row.valor)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    parsed.sort_by_key(|r| r.date);

    if parsed.first().is_some_and(|r| r.date < requested_start) {
        let dropped = parsed.remove(0);
        debug!(
            "Dropping boundary record {} before requested start {}",
            dropped.date, requested_start
        );
    }

    let hundred = Decimal::ONE_HUNDRED;
    for record in &mut parsed {
        record.rate /= hundred;
    }

    if parsed.is_empty() {
        return Err(anyhow!(CalcError::MalformedSeries(
            "no rates returned for the requested range".to_string()
        )));
    }

    Ok(RateSeries::new(parsed)?)
}
