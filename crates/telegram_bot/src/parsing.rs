//! Parsing of free-text user input.

use chrono::NaiveDate;
use thiserror::Error;

/// Expense amounts must be positive and are capped to keep obvious typos
/// (an extra digit, a pasted phone number) out of the books.
pub(crate) const MAX_AMOUNT: f64 = 1_000_000.0;

pub(crate) const DATE_FORMAT: &str = "%d.%m.%Y";

#[derive(Debug, PartialEq, Eq, Error)]
pub(crate) enum ParseError {
    #[error("invalid amount")]
    InvalidAmount,
    #[error("invalid date")]
    InvalidDate,
}

pub(crate) fn parse_amount(input: &str) -> Result<f64, ParseError> {
    let amount: f64 = input
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidAmount)?;
    if amount.is_finite() && amount > 0.0 && amount <= MAX_AMOUNT {
        Ok(amount)
    } else {
        Err(ParseError::InvalidAmount)
    }
}

/// Dates are entered as `dd.mm.yyyy`.
pub(crate) fn parse_date(input: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|_| ParseError::InvalidDate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_parse_with_decimals() {
        assert_eq!(parse_amount("150"), Ok(150.0));
        assert_eq!(parse_amount(" 12.50 "), Ok(12.5));
    }

    #[test]
    fn amount_bounds_are_enforced() {
        assert_eq!(parse_amount("0"), Err(ParseError::InvalidAmount));
        assert_eq!(parse_amount("-3"), Err(ParseError::InvalidAmount));
        assert_eq!(parse_amount("1000000"), Ok(1_000_000.0));
        assert_eq!(parse_amount("1000000.01"), Err(ParseError::InvalidAmount));
    }

    #[test]
    fn amount_rejects_non_numbers() {
        assert_eq!(parse_amount("ten"), Err(ParseError::InvalidAmount));
        assert_eq!(parse_amount(""), Err(ParseError::InvalidAmount));
        assert_eq!(parse_amount("nan"), Err(ParseError::InvalidAmount));
        assert_eq!(parse_amount("inf"), Err(ParseError::InvalidAmount));
    }

    #[test]
    fn dates_use_day_month_year() {
        assert_eq!(
            parse_date("07.03.2026"),
            Ok(NaiveDate::from_ymd_opt(2026, 3, 7).unwrap())
        );
        assert_eq!(parse_date("2026-03-07"), Err(ParseError::InvalidDate));
        assert_eq!(parse_date("31.02.2026"), Err(ParseError::InvalidDate));
    }
}
