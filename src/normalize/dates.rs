//! Lenient calendar-date parsing for the many date spellings upstream uses

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::Cell;

static ISO_DATETIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4}-\d{2}-\d{2})[T ]\d{2}:\d{2}(:\d{2}(\.\d+)?)?(Z|[+-]\d{2}:?\d{2})?$").unwrap()
});

/// Text ending in a lone two-digit group, e.g. `3/3/20` or `03-MAR-20`
static SHORT_YEAR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(^|\D)\d{2}$").unwrap()
});

/// A month name and a four-digit year with no day, e.g. `March 2019`
static MONTH_YEAR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z]{3,})\.?,?\s+(\d{4})$").unwrap()
});

static ORDINAL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})(st|nd|rd|th)\b").unwrap()
});

/// Date-only layouts, tried in order. Month-first wins for ambiguous slashes.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%m-%d-%Y",
    "%m.%d.%Y",
    "%Y%m%d",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
    "%d-%b-%Y",
    "%A, %B %d, %Y",
];

/// Layouts with a two-digit year, resolved by chrono's `%y` century pivot
const SHORT_YEAR_FORMATS: &[&str] = &[
    "%m/%d/%y",
    "%m-%d-%y",
    "%d-%b-%y",
    "%B %d, %y",
    "%B %d %y",
    "%d %B %y",
];

/// chrono reads `%Y` from as few as one digit, so `March 2019` would
/// otherwise come back as 20 March of year 19.
const MIN_YEAR: i32 = 1000;

/// Date-with-time layouts; the time of day is dropped
const DATETIME_FORMATS: &[&str] = &[
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%Y/%m/%d %H:%M:%S",
];

/// Parse free-form text as a calendar date.
///
/// Returns `None` when no known layout matches; never panics.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(caps) = ISO_DATETIME_REGEX.captures(trimmed) {
        return NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d").ok();
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(dt.date_naive());
    }

    if let Some(caps) = MONTH_YEAR_REGEX.captures(trimmed) {
        // No day given: anchor to the first of the month
        let text = format!("1 {} {}", &caps[1], &caps[2]);
        return NaiveDate::parse_from_str(&text, "%d %B %Y").ok();
    }

    let cleaned = ORDINAL_REGEX.replace_all(trimmed, "$1");

    if SHORT_YEAR_REGEX.is_match(&cleaned) {
        if let Some(date) = SHORT_YEAR_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(&cleaned, fmt).ok())
        {
            return Some(date);
        }
    }

    if let Some(date) = DATE_FORMATS
        .iter()
        .filter_map(|fmt| NaiveDate::parse_from_str(&cleaned, fmt).ok())
        .find(|date| date.year() >= MIN_YEAR)
    {
        return Some(date);
    }

    DATETIME_FORMATS
        .iter()
        .filter_map(|fmt| NaiveDateTime::parse_from_str(&cleaned, fmt).ok())
        .map(|dt| dt.date())
        .find(|date| date.year() >= MIN_YEAR)
}

/// Replace a date-looking text cell with its `YYYY-MM-DD` form.
///
/// Anything that is not text, or text that does not parse, comes back unchanged.
pub fn coerce_date(cell: Cell) -> Cell {
    match cell {
        Cell::Text(text) => match parse_date(&text) {
            Some(date) => Cell::Text(date.format("%Y-%m-%d").to_string()),
            None => Cell::Text(text),
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_common_spellings() {
        for text in ["March 3, 2020", "2020-03-03", "03/03/2020"] {
            assert_eq!(parse_date(text), Some(ymd(2020, 3, 3)), "{}", text);
        }
    }

    #[test]
    fn test_datetime_truncated() {
        assert_eq!(parse_date("2019-07-01T15:30:00"), Some(ymd(2019, 7, 1)));
        assert_eq!(parse_date("2019-07-01 00:00:00"), Some(ymd(2019, 7, 1)));
        assert_eq!(parse_date("2019-07-01T23:59:59.123-05:00"), Some(ymd(2019, 7, 1)));
        assert_eq!(parse_date("07/01/2019 10:15 PM"), Some(ymd(2019, 7, 1)));
    }

    #[test]
    fn test_month_names() {
        assert_eq!(parse_date("Mar 3, 2020"), Some(ymd(2020, 3, 3)));
        assert_eq!(parse_date("3 March 2020"), Some(ymd(2020, 3, 3)));
        assert_eq!(parse_date("March 3rd, 2020"), Some(ymd(2020, 3, 3)));
    }

    #[test]
    fn test_day_first_fallback() {
        // 25 cannot be a month, so the day-first layout applies
        assert_eq!(parse_date("25/03/2020"), Some(ymd(2020, 3, 25)));
    }

    #[test]
    fn test_short_year() {
        assert_eq!(parse_date("3/3/20"), Some(ymd(2020, 3, 3)));
        assert_eq!(parse_date("03-03-99"), Some(ymd(1999, 3, 3)));
    }

    #[test]
    fn test_month_year_is_first_of_month() {
        assert_eq!(parse_date("March 2019"), Some(ymd(2019, 3, 1)));
        assert_eq!(parse_date("Jul 2019"), Some(ymd(2019, 7, 1)));
        assert_eq!(parse_date("Dec 1999"), Some(ymd(1999, 12, 1)));
        assert_eq!(parse_date("Dec. 1999"), Some(ymd(1999, 12, 1)));
    }

    #[test]
    fn test_two_digit_year_after_month_name() {
        assert_eq!(parse_date("July 1 19"), Some(ymd(2019, 7, 1)));
        assert_eq!(parse_date("July 1, 19"), Some(ymd(2019, 7, 1)));
        assert_eq!(parse_date("1 July 19"), Some(ymd(2019, 7, 1)));
    }

    #[test]
    fn test_day_month_abbreviation_dashes() {
        assert_eq!(parse_date("3-Mar-2020"), Some(ymd(2020, 3, 3)));
        assert_eq!(parse_date("03-MAR-20"), Some(ymd(2020, 3, 3)));
    }

    #[test]
    fn test_never_yields_tiny_years() {
        for text in ["March 2019", "Jul 19", "July 1 19", "20-03-03", "3/3/20 10:15"] {
            if let Some(date) = parse_date(text) {
                assert!(date.year() >= MIN_YEAR, "{} -> {}", text, date);
            }
        }
    }

    #[test]
    fn test_compact_digits() {
        assert_eq!(parse_date("20200303"), Some(ymd(2020, 3, 3)));
    }

    #[test]
    fn test_unparseable() {
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("2020-13-45"), None);
    }

    #[test]
    fn test_coerce_date() {
        assert_eq!(
            coerce_date(Cell::Text("March 3, 2020".into())),
            Cell::Text("2020-03-03".into())
        );
        assert_eq!(
            coerce_date(Cell::Text("not a date".into())),
            Cell::Text("not a date".into())
        );
        assert_eq!(coerce_date(Cell::Number(20200303.into())), Cell::Number(20200303.into()));
    }
}
