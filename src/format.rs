//! `uk-UA` presentation of dates and amounts.
//!
//! Both formatters fall back to the input text when it cannot be parsed, so a
//! malformed upstream value is shown as-is instead of failing the render.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use rust_decimal::{Decimal, RoundingStrategy};

/// Thousands separator used by `uk-UA` (no-break space).
pub const GROUP_SEPARATOR: char = '\u{a0}';

/// Decimal mark used by `uk-UA`.
pub const DECIMAL_SEPARATOR: char = ',';

const DATE_PATTERN: &str = "%d.%m.%Y";

/// Parse a textual date into an instant.
///
/// Accepts RFC 3339 timestamps, bare `YYYY-MM-DD` dates and offset-less
/// `YYYY-MM-DDTHH:MM[:SS[.fff]]` values. The last two are read as UTC.
pub fn parse_date(value: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt);
    }

    let utc = FixedOffset::east_opt(0)?;

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, pattern) {
            return Some(utc.from_utc_datetime(&dt));
        }
    }

    None
}

/// Format a date as `DD.MM.YYYY`, or return the input unchanged if it is not a date.
pub fn format_date(value: &str) -> String {
    match parse_date(value) {
        Some(dt) => dt.format(DATE_PATTERN).to_string(),
        None => value.to_string(),
    }
}

/// Format a calendar date the way `format_date` does.
pub fn format_calendar_date(date: NaiveDate) -> String {
    date.format(DATE_PATTERN).to_string()
}

/// Format a decimal amount with `uk-UA` grouping and exactly two fraction
/// digits (`"1234.5"` -> `"1 234,50"`). Unparseable text is returned unchanged.
pub fn format_amount(amount: &str) -> String {
    match parse_leading_number(amount) {
        Some(value) => format_number(value),
        None => amount.to_string(),
    }
}

/// Read the longest numeric prefix of `text`, skipping leading whitespace.
///
/// Trailing characters after the number are ignored, so `"12abc"` reads as 12.
fn parse_leading_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    if text[end..].starts_with("Infinity") {
        let negative = end == 1 && bytes[0] == b'-';
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    text[..end].parse::<f64>().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

fn format_number(value: f64) -> String {
    let sign = if value.is_sign_negative() { "-" } else { "" };
    let magnitude = value.abs();

    if magnitude.is_infinite() {
        return format!("{sign}∞");
    }

    // Round the exact binary value half away from zero.
    let fixed = match Decimal::from_f64_retain(magnitude) {
        Some(decimal) => {
            let mut rounded =
                decimal.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            rounded.rescale(2);
            rounded.to_string()
        }
        None => format!("{:.2}", magnitude),
    };

    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    format!("{sign}{}{DECIMAL_SEPARATOR}{frac}", group_digits(whole))
}

fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * 2);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(ch);
    }

    out
}
