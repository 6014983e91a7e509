//! Date-time parsing for captured placeholder text.
//!
//! Format hints use composite-format date directives (`dd/MM/yyyy`, `HH:mm`,
//! `o`, ...). They are translated to chrono format strings and must match the
//! whole value. Values carrying a UTC offset are normalized to UTC.

use super::{Culture, DateOrder};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

const ISO_DATE_TIMES: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const TIME_SUFFIXES: &[&str] = &[" %H:%M:%S", " %H:%M"];

/// Parse `raw` as a date-time.
///
/// Without a hint, RFC 3339, ISO-8601 and the culture's numeric layouts are
/// tried in turn. With a hint, the value must match that directive exactly.
///
/// ```rust
/// use chrono::NaiveDate;
/// use unformat_engine::coerce::{try_parse_date_time, Culture};
///
/// let expected = NaiveDate::from_ymd_opt(2017, 10, 30)
///     .and_then(|d| d.and_hms_opt(0, 0, 0));
/// assert_eq!(try_parse_date_time("30/10/2017", Some("dd/MM/yyyy"), &Culture::invariant()), expected);
/// assert_eq!(try_parse_date_time("30/10/2017", None, &Culture::pt_br()), expected);
/// assert_eq!(try_parse_date_time("30", None, &Culture::pt_br()), None);
/// ```
pub fn try_parse_date_time(raw: &str, hint: Option<&str>, culture: &Culture) -> Option<NaiveDateTime> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }
    match hint {
        None => parse_default(text, culture),
        Some(hint) => parse_exact(text, hint, culture),
    }
}

fn parse_default(text: &str, culture: &Culture) -> Option<NaiveDateTime> {
    if let Ok(value) = DateTime::parse_from_rfc3339(text) {
        return Some(value.naive_utc());
    }
    if let Some(value) = ISO_DATE_TIMES
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(text, layout).ok())
    {
        return Some(value);
    }
    if let Some(value) = parse_date_only(text, "%Y-%m-%d") {
        return Some(value);
    }

    for separator in ['/', '-', '.'] {
        let date = short_date_layout(culture.date_order, separator);
        for suffix in TIME_SUFFIXES {
            let layout = format!("{date}{suffix}");
            if let Ok(value) = NaiveDateTime::parse_from_str(text, &layout) {
                return Some(value);
            }
        }
        if let Some(value) = parse_date_only(text, &date) {
            return Some(value);
        }
    }
    None
}

fn parse_exact(text: &str, hint: &str, culture: &Culture) -> Option<NaiveDateTime> {
    let short_date = short_date_layout(culture.date_order, '/');
    match hint {
        "o" | "O" => DateTime::parse_from_rfc3339(text)
            .map(|value| value.naive_utc())
            .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f"))
            .ok(),
        "r" | "R" => DateTime::parse_from_rfc2822(text)
            .ok()
            .map(|value| value.naive_utc()),
        "s" => NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S").ok(),
        "u" => NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%SZ").ok(),
        "d" => parse_date_only(text, &short_date),
        "g" => parse_with_layout(text, &format!("{short_date} %H:%M")),
        "G" => parse_with_layout(text, &format!("{short_date} %H:%M:%S")),
        _ if hint.chars().count() == 1 => None,
        custom => parse_with_layout(text, &translate_custom(custom)?),
    }
}

/// Try the layout as offset-aware, then naive, then date-only at midnight.
fn parse_with_layout(text: &str, layout: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_str(text, layout)
        .map(|value| value.naive_utc())
        .or_else(|_| NaiveDateTime::parse_from_str(text, layout))
        .ok()
        .or_else(|| parse_date_only(text, layout))
}

fn parse_date_only(text: &str, layout: &str) -> Option<NaiveDateTime> {
    NaiveDate::parse_from_str(text, layout)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

fn short_date_layout(order: DateOrder, separator: char) -> String {
    let [first, second, third] = match order {
        DateOrder::MonthDayYear => ["%m", "%d", "%Y"],
        DateOrder::DayMonthYear => ["%d", "%m", "%Y"],
        DateOrder::YearMonthDay => ["%Y", "%m", "%d"],
    };
    format!("{first}{separator}{second}{separator}{third}")
}

/// Translate a custom date directive into a chrono format string.
///
/// Returns `None` for directives chrono cannot express.
fn translate_custom(hint: &str) -> Option<String> {
    let chars: Vec<char> = hint.chars().collect();
    let mut layout = String::with_capacity(hint.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        match ch {
            '\'' | '"' => {
                let close = chars[i + 1..].iter().position(|&c| c == ch)? + i + 1;
                for &quoted in &chars[i + 1..close] {
                    push_literal(&mut layout, quoted);
                }
                i = close + 1;
            }
            '\\' => {
                push_literal(&mut layout, *chars.get(i + 1)?);
                i += 2;
            }
            '%' => i += 1,
            'y' | 'M' | 'd' | 'H' | 'h' | 'm' | 's' | 'f' | 'F' | 't' | 'z' | 'K' => {
                let run = chars[i..].iter().take_while(|&&c| c == ch).count();
                push_specifier(&mut layout, ch, run)?;
                i += run;
            }
            other => {
                push_literal(&mut layout, other);
                i += 1;
            }
        }
    }

    Some(layout)
}

fn push_literal(layout: &mut String, ch: char) {
    if ch == '%' {
        layout.push_str("%%");
    } else {
        layout.push(ch);
    }
}

fn push_specifier(layout: &mut String, ch: char, run: usize) -> Option<()> {
    let item = match (ch, run) {
        ('y', 1 | 2) => "%y",
        ('y', _) => "%Y",
        ('M', 1 | 2) => "%m",
        ('M', 3) => "%b",
        ('M', _) => "%B",
        ('d', 1 | 2) => "%d",
        ('d', 3) => "%a",
        ('d', _) => "%A",
        ('H', 1 | 2) => "%H",
        ('h', 1 | 2) => "%I",
        ('m', 1 | 2) => "%M",
        ('s', 1 | 2) => "%S",
        ('t', 1 | 2) => "%p",
        ('z', 1 | 2) => "%#z",
        ('z', 3) | ('K', 1) => "%:z",
        ('f' | 'F', _) if layout.ends_with('.') => {
            layout.pop();
            "%.f"
        }
        ('f' | 'F', 3) => "%3f",
        ('f' | 'F', 6) => "%6f",
        ('f' | 'F', 9) => "%9f",
        _ => return None,
    };
    layout.push_str(item);
    Some(())
}
