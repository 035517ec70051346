use chrono::{Datelike, NaiveDate};

/// Parse an ISO `YYYY-MM-DD` date. Anything else is `None`.
pub fn parse_ymd(ymd: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(ymd.trim(), "%Y-%m-%d").ok()
}

/// `2026-02-09` -> `09/02/2026`. Unparseable input renders as empty.
pub fn dmy(ymd: &str) -> String {
    match parse_ymd(ymd) {
        Some(d) => d.format("%d/%m/%Y").to_string(),
        None => String::new(),
    }
}

/// `2026-02-09` -> `02/2026`.
pub fn month_label(ymd: &str) -> String {
    match parse_ymd(ymd) {
        Some(d) => format!("{:02}/{}", d.month(), d.year()),
        None => String::new(),
    }
}

/// Duration as `7u 30m`; negative input clamps to zero.
pub fn duration(minutes: i64, unit: &str) -> String {
    let m = minutes.max(0);
    format!("{}{unit} {:02}m", m / 60, m % 60)
}

/// Signed delta as `+0u05` / `-7u30`. Zero is positive.
pub fn signed_delta(minutes: i64, unit: &str) -> String {
    let sign = if minutes >= 0 { '+' } else { '-' };
    let a = minutes.abs();
    format!("{sign}{}{unit}{:02}", a / 60, a % 60)
}
