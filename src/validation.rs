//! Input validation for calculation requests
//!
//! Capital and dates arrive untyped (CLI flags, JSON requests, TOML files).
//! This module checks them in a fixed order and produces the normalized
//! date-range parameters the BCB API expects.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

use crate::error::CalcError;

/// Date format accepted on input
pub const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Fixed-width date format used in the BCB request query string
pub const REQUEST_DATE_FORMAT: &str = "%d/%m/%Y";

/// Validated and normalized calculation input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInput {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub capital: Decimal,
    /// `start_date` as `dd/mm/yyyy`
    pub start_param: String,
    /// `end_date` as `dd/mm/yyyy`
    pub end_param: String,
}

/// Validate raw request input.
///
/// Checks, in order: capital is a JSON number, both dates are calendar
/// dates, and `start_date < end_date`.
pub fn validate_input(
    start_date: &str,
    end_date: &str,
    capital: &Value,
) -> Result<ValidatedInput, CalcError> {
    let capital = parse_capital(capital)?;

    let start = parse_input_date(start_date)?;
    let end = parse_input_date(end_date)?;
    check_date_ordering(start, end)?;

    Ok(ValidatedInput {
        start_date: start,
        end_date: end,
        capital,
        start_param: format_request_date(start),
        end_param: format_request_date(end),
    })
}

/// Capital must be a JSON number; numeric-looking strings are rejected.
pub fn parse_capital(value: &Value) -> Result<Decimal, CalcError> {
    match value {
        Value::Number(n) => {
            let text = n.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .map_err(|_| CalcError::InvalidCapitalType(text))
        }
        other => Err(CalcError::InvalidCapitalType(other.to_string())),
    }
}

/// Interpret a raw command-line capital token as JSON.
///
/// `657.43` becomes a number, `"100"` (quoted) stays a string, and anything
/// that is not valid JSON is treated as a bare string.
pub fn capital_from_arg(raw: &str) -> Value {
    serde_json::from_str(raw.trim()).unwrap_or_else(|_| Value::String(raw.to_string()))
}

pub fn parse_input_date(raw: &str) -> Result<NaiveDate, CalcError> {
    NaiveDate::parse_from_str(raw.trim(), INPUT_DATE_FORMAT)
        .map_err(|_| CalcError::InvalidDateType(raw.to_string()))
}

pub fn check_date_ordering(start: NaiveDate, end: NaiveDate) -> Result<(), CalcError> {
    if start >= end {
        return Err(CalcError::InvalidDateOrdering {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok(())
}

pub fn format_request_date(date: NaiveDate) -> String {
    date.format(REQUEST_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_valid_input_is_normalized() {
        let input = validate_input("2010-01-11", "2021-03-01", &json!(657.43)).unwrap();
        assert_eq!(input.capital, dec!(657.43));
        assert_eq!(input.start_param, "11/01/2010");
        assert_eq!(input.end_param, "01/03/2021");
        assert_eq!(input.start_date, NaiveDate::from_ymd_opt(2010, 1, 11).unwrap());
    }

    #[test]
    fn test_integer_capital_accepted() {
        let input = validate_input("2020-01-01", "2020-02-01", &json!(100)).unwrap();
        assert_eq!(input.capital, dec!(100));
    }

    #[test]
    fn test_string_capital_rejected() {
        let err = validate_input("2020-01-01", "2020-02-01", &json!("100")).unwrap_err();
        assert!(matches!(err, CalcError::InvalidCapitalType(_)));
    }

    #[test]
    fn test_null_capital_rejected() {
        let err = validate_input("2020-01-01", "2020-02-01", &Value::Null).unwrap_err();
        assert!(matches!(err, CalcError::InvalidCapitalType(_)));
    }

    #[test]
    fn test_capital_checked_before_dates() {
        let err = validate_input("garbage", "2020-02-01", &json!("x")).unwrap_err();
        assert!(matches!(err, CalcError::InvalidCapitalType(_)));
    }

    #[test]
    fn test_equal_dates_rejected() {
        let err = validate_input("2020-01-01", "2020-01-01", &json!(100)).unwrap_err();
        assert!(matches!(err, CalcError::InvalidDateOrdering { .. }));
    }

    #[test]
    fn test_reversed_dates_rejected() {
        let err = validate_input("2021-01-01", "2020-01-01", &json!(100)).unwrap_err();
        assert!(matches!(err, CalcError::InvalidDateOrdering { .. }));
    }

    #[test]
    fn test_invalid_calendar_date_rejected() {
        let err = validate_input("2021-02-30", "2021-03-01", &json!(100)).unwrap_err();
        assert_eq!(err, CalcError::InvalidDateType("2021-02-30".to_string()));

        let err = validate_input("2021-01-01", "01/03/2021", &json!(100)).unwrap_err();
        assert!(matches!(err, CalcError::InvalidDateType(_)));
    }

    #[test]
    fn test_capital_from_arg() {
        assert_eq!(capital_from_arg("657.43"), json!(657.43));
        assert_eq!(capital_from_arg("\"100\""), json!("100"));
        assert_eq!(capital_from_arg("abc"), json!("abc"));
    }
}
