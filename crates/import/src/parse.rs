//! Field-level parsers for the raw tokens found in statement exports.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ImportError;

/// Day-first before year-first; the first format that parses wins.
pub const DEFAULT_DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d", "%Y-%m-%d"];

/// Which of `.` and `,` marks the fraction. The other is a thousands separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecimalSeparator {
    #[default]
    Dot,
    Comma,
}

impl DecimalSeparator {
    fn fraction(self) -> char {
        match self {
            DecimalSeparator::Dot => '.',
            DecimalSeparator::Comma => ',',
        }
    }
}

/// Tries each format in order. Tokens with a time-of-day suffix
/// (`2024-03-01 10:22:11`, `2024-03-01T10:22:11`) are retried on the date part.
pub fn parse_date<S: AsRef<str>>(token: &str, formats: &[S]) -> Result<NaiveDate, ImportError> {
    let token = token.trim().trim_matches('"').trim();

    let date_part = token
        .split(|c: char| c.is_whitespace() || c == 'T')
        .next()
        .unwrap_or(token);

    for candidate in [token, date_part] {
        for fmt in formats {
            if let Ok(date) = NaiveDate::parse_from_str(candidate, fmt.as_ref()) {
                return Ok(date);
            }
        }
    }

    Err(ImportError::InvalidDate(token.to_string()))
}

/// Reads a monetary token, dropping quotes, grouping separators, currency
/// symbols and codes. Never fails: anything unreadable is zero.
///
/// Only the span from the first to the last digit is read, so a dot inside a
/// symbol such as `Rs.` or `S/.` is not taken for the fraction. A `-` at
/// either end of the text around that span, or accounting parentheses, make
/// the value negative.
pub fn parse_amount(token: &str, separator: DecimalSeparator) -> Decimal {
    let token = token.trim().trim_matches(|c: char| c == '"' || c == '\'').trim();
    let chars: Vec<char> = token.chars().collect();
    let fraction = separator.fraction();

    let (Some(first), Some(last)) = (
        chars.iter().position(|c| c.is_ascii_digit()),
        chars.iter().rposition(|c| c.is_ascii_digit()),
    ) else {
        return Decimal::ZERO;
    };

    // `.50` keeps its leading separator; `Rs.50` does not.
    let start = if first > 0
        && chars[first - 1] == fraction
        && (first < 2 || !chars[first - 2].is_alphabetic())
    {
        first - 1
    } else {
        first
    };

    let digits: String = chars[start..=last]
        .iter()
        .filter_map(|&c| {
            if c.is_ascii_digit() {
                Some(c)
            } else if c == fraction {
                Some('.')
            } else {
                None
            }
        })
        .collect();

    let prefix: String = chars[..start].iter().collect();
    let suffix: String = chars[last + 1..].iter().collect();
    let parenthesised = token.starts_with('(') && token.ends_with(')');
    let negative = parenthesised || carries_sign(&prefix) || carries_sign(&suffix);

    match Decimal::from_str(&digits) {
        Ok(value) if negative => -value,
        Ok(value) => value,
        Err(_) => Decimal::ZERO,
    }
}

fn carries_sign(around: &str) -> bool {
    let around = around.trim();
    around.starts_with('-') || around.ends_with('-')
}
