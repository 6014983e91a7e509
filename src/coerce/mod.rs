//! Typed conversion of captured placeholder text.
//!
//! These helpers sit outside the compile/match path: callers hand them a
//! captured value and, for dates, the placeholder's format directive. Every
//! helper trims surrounding whitespace first and reports failure as `None`;
//! use `unwrap_or_default()` where a zero value is wanted.
//!
//! Number and date conventions come from a [`Culture`]:
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use unformat_engine::coerce::{try_parse_decimal, try_parse_i64, Culture};
//!
//! let pt_br = Culture::pt_br();
//! assert_eq!(try_parse_decimal(" 12,5 ", &pt_br), Some(Decimal::new(125, 1)));
//! assert_eq!(try_parse_decimal("12.5", &Culture::invariant()), Some(Decimal::new(125, 1)));
//! assert_eq!(try_parse_i64("12,5", &pt_br), None);
//! ```

mod datetime;

pub use datetime::try_parse_date_time;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Order of the day, month and year fields in numeric dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateOrder {
    MonthDayYear,
    DayMonthYear,
    YearMonthDay,
}

/// Number and date conventions used when parsing captured text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Culture {
    pub decimal_separator: char,
    pub group_separator: char,
    pub date_order: DateOrder,
}

impl Culture {
    /// Culture-neutral conventions: `1,234.5`, `MM/dd/yyyy`.
    pub fn invariant() -> Self {
        Self {
            decimal_separator: '.',
            group_separator: ',',
            date_order: DateOrder::MonthDayYear,
        }
    }

    /// Brazilian Portuguese: `1.234,5`, `dd/MM/yyyy`.
    pub fn pt_br() -> Self {
        Self {
            decimal_separator: ',',
            group_separator: '.',
            date_order: DateOrder::DayMonthYear,
        }
    }

    /// British English: `1,234.5`, `dd/MM/yyyy`.
    pub fn en_gb() -> Self {
        Self {
            decimal_separator: '.',
            group_separator: ',',
            date_order: DateOrder::DayMonthYear,
        }
    }
}

impl Default for Culture {
    fn default() -> Self {
        Self::invariant()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberStyle {
    /// Sign and digits.
    Integer,
    /// Sign, grouped integer part, decimal separator.
    Decimal,
    /// Decimal plus an exponent.
    Float,
}

/// Rewrite culture-formatted number text into the form Rust's parsers accept.
fn normalize_number(raw: &str, culture: &Culture, style: NumberStyle) -> Option<String> {
    let text = raw.trim();
    let mut chars = text.chars().peekable();
    let mut normalized = String::with_capacity(text.len());

    if let Some(&sign @ ('+' | '-')) = chars.peek() {
        if sign == '-' {
            normalized.push('-');
        }
        chars.next();
    }

    let mut digits = false;
    let mut fraction = false;
    let mut exponent = false;
    while let Some(ch) = chars.next() {
        if ch.is_ascii_digit() {
            normalized.push(ch);
            digits = true;
        } else if style != NumberStyle::Integer
            && ch == culture.decimal_separator
            && !fraction
            && !exponent
        {
            normalized.push('.');
            fraction = true;
        } else if style != NumberStyle::Integer
            && ch == culture.group_separator
            && digits
            && !fraction
            && !exponent
        {
            continue;
        } else if style == NumberStyle::Float && matches!(ch, 'e' | 'E') && digits && !exponent {
            normalized.push('e');
            exponent = true;
            if let Some(&sign @ ('+' | '-')) = chars.peek() {
                normalized.push(sign);
                chars.next();
            }
        } else {
            return None;
        }
    }

    digits.then_some(normalized)
}

pub fn try_parse_decimal(raw: &str, culture: &Culture) -> Option<Decimal> {
    let normalized = normalize_number(raw, culture, NumberStyle::Decimal)?;
    Decimal::from_str(&normalized).ok()
}

pub fn try_parse_f64(raw: &str, culture: &Culture) -> Option<f64> {
    let normalized = normalize_number(raw, culture, NumberStyle::Float)?;
    normalized.parse::<f64>().ok().filter(|value| value.is_finite())
}

pub fn try_parse_i64(raw: &str, culture: &Culture) -> Option<i64> {
    let normalized = normalize_number(raw, culture, NumberStyle::Integer)?;
    normalized.parse::<i64>().ok()
}
