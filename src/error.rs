//! Error handling for the Selic calculator
//!
//! Defines the typed failures of the calculation pipeline and the unified
//! Result alias using anyhow for context chaining and error propagation.

use thiserror::Error;

/// Fatal errors raised while validating input or loading the rate series.
///
/// None of them is recovered locally: the whole calculation stops.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    #[error("capital should be a number, got {0}")]
    InvalidCapitalType(String),

    #[error("inputs are in wrong format, should be calendar dates (YYYY-MM-DD): {0}")]
    InvalidDateType(String),

    #[error("start_date ({start}) must be earlier than end_date ({end})")]
    InvalidDateOrdering { start: String, end: String },

    #[error("unknown frequency '{0}' (expected day, daily, month or year)")]
    InvalidFrequency(String),

    #[error("malformed rate series: {0}")]
    MalformedSeries(String),

    #[error("rate fetch failed: {0}")]
    Fetch(String),

    #[error("compounded value out of range on {0}")]
    Overflow(String),
}

/// Result type alias for calculator operations
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_formatting_is_readable() {
        let err = CalcError::InvalidDateOrdering {
            start: "2021-01-01".to_string(),
            end: "2021-01-01".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "start_date (2021-01-01) must be earlier than end_date (2021-01-01)"
        );
    }

    #[test]
    fn test_anyhow_context_keeps_typed_error() {
        use anyhow::Context;
        let result: Result<()> = Err(CalcError::MalformedSeries("empty response".to_string()))
            .context("failed to load Selic series");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("failed to load Selic series"));
        assert_eq!(
            err.downcast_ref::<CalcError>(),
            Some(&CalcError::MalformedSeries("empty response".to_string()))
        );
    }

    #[test]
    fn test_calc_error_variants() {
        let capital = CalcError::InvalidCapitalType("\"100\"".to_string());
        assert!(capital.to_string().starts_with("capital should be a number"));

        let fetch = CalcError::Fetch("timeout".to_string());
        assert!(fetch.to_string().starts_with("rate fetch failed"));

        let freq = CalcError::InvalidFrequency("weekly".to_string());
        assert!(freq.to_string().contains("weekly"));

        let overflow = CalcError::Overflow("2021-02-26".to_string());
        assert!(overflow.to_string().contains("out of range on 2021-02-26"));
    }
}
