//! Text conversions used by the input widgets and chart labels.

use chrono::{DateTime, Utc};

use crate::config::DATE_FORMAT_SHORT;

/// `$ 1,234,567` style rendering of a money amount.
pub fn format_money(value: f64) -> String {
    let rendered = if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    };
    let (sign, digits) = match rendered.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rendered.as_str()),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("$ {}{}.{}", sign, grouped, frac),
        None => format!("$ {}{}", sign, grouped),
    }
}

/// Reads back what `format_money` produced, or whatever the user typed.
///
/// Dollar signs, whitespace and group separators are dropped and the leading
/// integer is taken; anything after it is ignored. Empty input reads as zero.
pub fn parse_money(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| *c != '$' && *c != ',' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return Some(0.0);
    }
    leading_integer(&cleaned).map(|value| value as f64)
}

fn leading_integer(text: &str) -> Option<i64> {
    let mut end = 0;
    for (i, ch) in text.char_indices() {
        if ch.is_ascii_digit() || (i == 0 && (ch == '-' || ch == '+')) {
            end = i + ch.len_utf8();
        } else {
            break;
        }
    }
    text[..end].parse().ok()
}

pub fn format_percent(value: f64) -> String {
    format!("{}%", value)
}

pub fn parse_percent(text: &str) -> Option<f64> {
    let cleaned = text.replace('%', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Some(0.0);
    }
    cleaned.parse().ok()
}

/// Input step for a money field: the power of ten just below the value.
pub fn amount_step(value: f64) -> f64 {
    let digits = format!("{}", value.abs().trunc() as u64).len();
    10f64.powi(digits as i32 - 1)
}

/// Short calendar date for a unix timestamp in seconds.
pub fn short_date(timestamp: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp(timestamp, 0)
        .map(|date| date.format(DATE_FORMAT_SHORT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_groups_thousands() {
        assert_eq!(format_money(0.0), "$ 0");
        assert_eq!(format_money(999.0), "$ 999");
        assert_eq!(format_money(1000.0), "$ 1,000");
        assert_eq!(format_money(1234567.0), "$ 1,234,567");
        assert_eq!(format_money(-25000.0), "$ -25,000");
        assert_eq!(format_money(1500.5), "$ 1,500.5");
    }

    #[test]
    fn money_parser_takes_leading_integer() {
        assert_eq!(parse_money("$ 1,234,567"), Some(1234567.0));
        assert_eq!(parse_money("  "), Some(0.0));
        assert_eq!(parse_money("12.9"), Some(12.0));
        assert_eq!(parse_money("-40"), Some(-40.0));
        assert_eq!(parse_money("abc"), None);
    }

    #[test]
    fn percent_parser() {
        assert_eq!(parse_percent("0.35%"), Some(0.35));
        assert_eq!(parse_percent("%"), Some(0.0));
        assert_eq!(parse_percent("x%"), None);
        assert_eq!(format_percent(1.5), "1.5%");
    }

    #[test]
    fn step_follows_digit_count() {
        assert_eq!(amount_step(7.0), 1.0);
        assert_eq!(amount_step(10_000.0), 10_000.0);
        assert_eq!(amount_step(0.0), 1.0);
        assert_eq!(amount_step(512.75), 100.0);
    }

    #[test]
    fn short_date_uses_utc() {
        assert_eq!(short_date(1_514_764_800).as_deref(), Some("01 Jan 2018"));
    }
}
