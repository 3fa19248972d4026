//! Display Formatting
//!
//! Currency and date rendering helpers shared by the board, cards, and
//! dashboard.

use chrono::{DateTime, Local, NaiveDate, Utc};

/// Format a dollar amount as USD with no fractional digits and comma
/// thousands separators, e.g. `$3,500`. Missing or non-numeric values
/// render as `$0` rather than `$NaN`.
pub fn format_usd(value: Option<f64>) -> String {
    let amount = match value {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    };
    let cents_rounded = amount.round() as i64;
    let negative = cents_rounded < 0;
    let digits = cents_rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Calendar date, e.g. `Mar 5, 2026`.
pub fn format_close_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Date plus time, e.g. `Mar 5, 2026 - 3:04 PM`, in the viewer's timezone.
pub fn format_activity_date(date: &DateTime<Utc>) -> String {
    date.with_timezone(&Local).format("%b %-d, %Y - %-I:%M %p").to_string()
}

/// Value for an `<input type="date">`, which wants `YYYY-MM-DD`.
pub fn date_input_value(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse an `<input type="date">` value.
pub fn parse_date_input(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Value for an `<input type="datetime-local">`, in the viewer's timezone.
pub fn datetime_input_value(date: &DateTime<Utc>) -> String {
    date.with_timezone(&Local).format("%Y-%m-%dT%H:%M").to_string()
}

/// Parse an `<input type="datetime-local">` value as viewer-local time.
pub fn parse_datetime_input(raw: &str) -> Option<DateTime<Utc>> {
    let naive = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M").ok()?;
    naive
        .and_local_timezone(Local)
        .single()
        .map(|local| local.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_thousands_separators() {
        assert_eq!(format_usd(Some(3500.0)), "$3,500");
        assert_eq!(format_usd(Some(1_250_000.0)), "$1,250,000");
        assert_eq!(format_usd(Some(999.0)), "$999");
    }

    #[test]
    fn null_and_nan_render_as_zero_dollars() {
        assert_eq!(format_usd(None), "$0");
        assert_eq!(format_usd(Some(f64::NAN)), "$0");
        assert_eq!(format_usd(Some(f64::INFINITY)), "$0");
    }

    #[test]
    fn rounds_to_whole_dollars() {
        assert_eq!(format_usd(Some(1234.56)), "$1,235");
        assert_eq!(format_usd(Some(0.4)), "$0");
    }

    #[test]
    fn date_input_round_trip() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        assert_eq!(date_input_value(date), "2026-03-05");
        assert_eq!(parse_date_input("2026-03-05"), Some(date));
        assert_eq!(parse_date_input("not a date"), None);
    }
}
