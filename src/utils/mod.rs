//! Brazilian-locale number formatting for terminal output

use rust_decimal::{Decimal, RoundingStrategy};

/// Format with `.` thousands and `,` decimal separators at `places` digits.
///
/// # Examples
/// ```
/// use selic::utils::format_decimal_br;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_decimal_br(dec!(1234.567), 2), "1.234,57");
/// assert_eq!(format_decimal_br(dec!(-0.5), 2), "-0,50");
/// ```
pub fn format_decimal_br(value: Decimal, places: u32) -> String {
    let rounded = value
        .round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
        .abs();
    let plain = format!("{:.*}", places as usize, rounded);
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), ""));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if value.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{},{}", sign, grouped, frac_part)
    }
}

/// Format as Brazilian Real: "R$ 1.234,56"
///
/// # Examples
/// ```
/// use selic::utils::format_currency;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_currency(dec!(657.43)), "R$ 657,43");
/// ```
pub fn format_currency(value: Decimal) -> String {
    format!("R$ {}", format_decimal_br(value, 2))
}

/// Fractional rate as a percentage: 0.00044627 → "0,044627%"
pub fn format_rate_percent(rate: Decimal) -> String {
    format!("{}%", format_decimal_br(rate * Decimal::ONE_HUNDRED, 6))
}
