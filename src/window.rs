//! Best investment window search
//!
//! Scans every fixed-length run of consecutive trading days and keeps the
//! one whose compounded value is largest. The result is a diagnostic; it
//! never changes the main compounded series.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::compound::final_value;
use crate::error::CalcError;
use crate::series::RateSeries;

/// Number of records in a window unless configured otherwise
pub const DEFAULT_WINDOW_LENGTH: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WindowResult {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Compounded value on the window's last day
    pub earned_value: Decimal,
    pub length: usize,
}

impl WindowResult {
    /// Gain over the initial capital
    pub fn gain(&self, capital: Decimal) -> Decimal {
        self.earned_value - capital
    }
}

/// Compounded value at the end of the window starting at `start`, or
/// `None` when the window runs past the series.
///
/// Uses the same lag convention as [`crate::compound::compound`], so the
/// last day's own rate is not applied.
pub fn window_value(
    capital: Decimal,
    series: &RateSeries,
    start: usize,
    length: usize,
) -> Result<Option<Decimal>, CalcError> {
    let Some(records) = start
        .checked_add(length)
        .and_then(|end| series.records().get(start..end))
    else {
        return Ok(None);
    };
    final_value(capital, records).map(Some)
}

/// Find the window of `length` records with the highest compounded value.
///
/// Candidate windows start at indices `0..N-length`. A later window only
/// replaces the current best when strictly greater, so ties keep the
/// earliest one. Returns `Ok(None)` when the series is too short or no
/// window ends above zero.
pub fn best_window(
    capital: Decimal,
    series: &RateSeries,
    length: usize,
) -> Result<Option<WindowResult>, CalcError> {
    if length == 0 {
        return Ok(None);
    }
    let candidates = series.len().saturating_sub(length);
    let records = series.records();

    let mut best: Option<WindowResult> = None;
    let mut best_value = Decimal::ZERO;

    for start in 0..candidates {
        let window = &records[start..start + length];
        let value = final_value(capital, window)?;
        if value > best_value {
            best_value = value;
            best = Some(WindowResult {
                start_date: window[0].date,
                end_date: window[length - 1].date,
                earned_value: value,
                length,
            });
        }
    }

    debug!(
        "Scanned {} windows of {} records, best: {:?}",
        candidates, length, best
    );
    Ok(best)
}
