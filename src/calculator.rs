//! End-to-end calculation: validate, fetch, load, search, compound, reshape.

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value;
use std::path::PathBuf;
use tracing::info;

use crate::compound::compound;
use crate::error::CalcError;
use crate::export::{save_outputs, SaveOutcome};
use crate::reports::{reshape, Frequency, SummaryRow};
use crate::series::{load_series, RateSeries};
use crate::sources::RateSource;
use crate::validation::{check_date_ordering, format_request_date, validate_input};
use crate::window::{best_window, WindowResult, DEFAULT_WINDOW_LENGTH};

/// A typed, validated calculation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalcRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub capital: Decimal,
    pub frequency: Frequency,
}

impl CalcRequest {
    pub fn new(
        start_date: NaiveDate,
        end_date: NaiveDate,
        capital: Decimal,
        frequency: Frequency,
    ) -> Result<Self, CalcError> {
        check_date_ordering(start_date, end_date)?;
        Ok(Self {
            start_date,
            end_date,
            capital,
            frequency,
        })
    }

    /// Build a request from untyped input (CLI flags, JSON, TOML).
    pub fn from_raw(
        start_date: &str,
        end_date: &str,
        capital: &Value,
        frequency: &str,
    ) -> Result<Self, CalcError> {
        let input = validate_input(start_date, end_date, capital)?;
        let frequency = frequency.parse::<Frequency>()?;
        Ok(Self {
            start_date: input.start_date,
            end_date: input.end_date,
            capital: input.capital,
            frequency,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CalcOptions {
    pub window_length: usize,
    pub save_csv: bool,
    pub output_dir: PathBuf,
}

impl Default for CalcOptions {
    fn default() -> Self {
        Self {
            window_length: DEFAULT_WINDOW_LENGTH,
            save_csv: false,
            output_dir: PathBuf::from("."),
        }
    }
}

/// Everything a calculation produces
#[derive(Debug, Clone)]
pub struct Calculation {
    pub request: CalcRequest,
    /// Reshaped output at the requested frequency
    pub rows: Vec<SummaryRow>,
    /// Best window found in the loaded series, if any
    pub window: Option<WindowResult>,
    /// Loaded series, rates as fractions
    pub raw: RateSeries,
    pub saved: Vec<SaveOutcome>,
}

/// Run the full calculation against `source`.
pub fn calc_amount(
    request: &CalcRequest,
    source: &dyn RateSource,
    options: &CalcOptions,
) -> Result<Calculation> {
    let start_param = format_request_date(request.start_date);
    let end_param = format_request_date(request.end_date);

    let raw_rows = source
        .fetch(&start_param, &end_param)
        .context("Failed to fetch Selic rates")?;
    let series =
        load_series(&raw_rows, request.start_date).context("Failed to load Selic series")?;
    info!(
        "Loaded {} daily rates ({:?} to {:?})",
        series.len(),
        series.first_date(),
        series.last_date()
    );

    let window = best_window(request.capital, &series, options.window_length)
        .context("Failed to search the best investment window")?;
    match &window {
        Some(w) => info!(
            "The best day to invest is {}, with an amount earned of {} after {} days ({} to {})",
            w.start_date, w.earned_value, w.length, w.start_date, w.end_date
        ),
        None => info!(
            "Series too short for a {}-day window ({} records)",
            options.window_length,
            series.len()
        ),
    }

    let compounded =
        compound(request.capital, &series).context("Failed to compound the Selic series")?;
    let rows = reshape(&compounded, request.capital, request.frequency);

    let saved = if options.save_csv {
        save_outputs(&rows, series.records(), &options.output_dir)?
    } else {
        Vec::new()
    };

    Ok(Calculation {
        request: request.clone(),
        rows,
        window,
        raw: series,
        saved,
    })
}

/// Canned request used by `selic example`
pub fn example_request() -> Result<CalcRequest> {
    let start_date =
        NaiveDate::from_ymd_opt(2010, 1, 11).ok_or_else(|| anyhow!("invalid example start date"))?;
    let end_date =
        NaiveDate::from_ymd_opt(2021, 3, 1).ok_or_else(|| anyhow!("invalid example end date"))?;
    Ok(CalcRequest::new(
        start_date,
        end_date,
        Decimal::new(65743, 2),
        Frequency::Daily,
    )?)
}

pub fn run_example(source: &dyn RateSource, options: &CalcOptions) -> Result<Calculation> {
    info!("Running example");
    let options = CalcOptions {
        save_csv: false,
        ..options.clone()
    };
    calc_amount(&example_request()?, source, &options)
}
