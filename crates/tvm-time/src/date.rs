//! Date parsing and day counting on top of `chrono::NaiveDate`.
//!
//! All textual dates use the fixed `"Mon DD YYYY"` format (e.g.
//! `"Jan 15 2025"`).  Day counts are signed whole-day differences; the
//! ACT/360 convention used by the rate code divides these by 360 where a
//! year fraction is needed.

use chrono::NaiveDate;
use tvm_core::{Error, Result, Settings};

/// The textual date format accepted and produced by this crate.
pub const DATE_FORMAT: &str = "%b %d %Y";

/// Parse a date in the fixed `"Mon DD YYYY"` format.
///
/// Returns [`Error::Date`] on malformed input.
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|e| Error::Date(format!("`{text}` does not match `Mon DD YYYY`: {e}")))
}

/// Format a date in the fixed `"Mon DD YYYY"` format.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Signed day count `to − from`; negative when `to` precedes `from`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// The current evaluation date (the pinned date if set, else the system
/// clock).
pub fn today() -> NaiveDate {
    Settings::instance().evaluation_date()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fixed_format() {
        let d = parse_date("Jan 15 2025").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
    }

    #[test]
    fn parse_trims_whitespace() {
        assert!(parse_date("  Dec 31 2030 ").is_ok());
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(parse_date("2025-01-15"), Err(Error::Date(_))));
        assert!(matches!(parse_date("Foo 15 2025"), Err(Error::Date(_))));
        assert!(matches!(parse_date(""), Err(Error::Date(_))));
    }

    #[test]
    fn format_round_trips() {
        let text = "Feb 28 2026";
        assert_eq!(format_date(parse_date(text).unwrap()), text);
    }

    #[test]
    fn day_count_is_signed() {
        let a = parse_date("Jan 01 2025").unwrap();
        let b = parse_date("Jan 31 2025").unwrap();
        assert_eq!(days_between(a, b), 30);
        assert_eq!(days_between(b, a), -30);
        assert_eq!(days_between(a, a), 0);
    }
}
