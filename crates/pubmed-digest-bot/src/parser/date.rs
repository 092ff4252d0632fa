//! PubMed date fields.
//!
//! `DP` (date of publication) is free-form: `2024 Jan 15`, `2024 Jan`,
//! `2024 Jan-Feb`, `2024 Spring`, `2024`, or a span such as
//! `2023 Dec 28-2024 Jan 3` of which the first date is used.
//! `DEP` (electronic publication) is always `YYYYMMDD`.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

static PUBLICATION_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d{4})(?:\s+([A-Za-z]+)(?:-[A-Za-z]+)?(?:\s+(\d{1,2}))?)?")
        .expect("valid publication date pattern")
});

/// Parse a `DP` value.
///
/// Returns the date and whether it was precise to the day. Missing month or
/// day default to the first.
#[must_use]
pub fn parse_publication_date(value: &str) -> Option<(NaiveDate, bool)> {
    let caps = PUBLICATION_DATE.captures(value)?;
    let year: i32 = caps.get(1)?.as_str().parse().ok()?;
    let month = caps.get(2).and_then(|m| month_number(m.as_str()));
    let day: Option<u32> = caps.get(3).and_then(|d| d.as_str().parse().ok());

    match (month, day) {
        (Some(month), Some(day)) => NaiveDate::from_ymd_opt(year, month, day)
            .map(|date| (date, true))
            .or_else(|| NaiveDate::from_ymd_opt(year, month, 1).map(|date| (date, false))),
        (Some(month), None) => NaiveDate::from_ymd_opt(year, month, 1).map(|date| (date, false)),
        (None, _) => NaiveDate::from_ymd_opt(year, 1, 1).map(|date| (date, false)),
    }
}

/// Parse a `DEP` value.
#[must_use]
pub fn parse_electronic_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y%m%d").ok()
}

/// Month abbreviations and seasons to month numbers.
fn month_number(word: &str) -> Option<u32> {
    let word = word.to_ascii_lowercase();
    let month = match word.get(..3)? {
        "jan" => 1,
        "feb" => 2,
        "mar" | "spr" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" | "sum" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" | "fal" | "aut" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" | "win" => 12,
        _ => return None,
    };
    Some(month)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_full_date() {
        assert_eq!(parse_publication_date("2024 Jan 15"), Some((date(2024, 1, 15), true)));
        assert_eq!(parse_publication_date("2025 Sep 26"), Some((date(2025, 9, 26), true)));
    }

    #[test]
    fn test_partial_dates() {
        assert_eq!(parse_publication_date("2024 Mar"), Some((date(2024, 3, 1), false)));
        assert_eq!(parse_publication_date("2024"), Some((date(2024, 1, 1), false)));
        assert_eq!(parse_publication_date("2024 Jan-Feb"), Some((date(2024, 1, 1), false)));
        assert_eq!(parse_publication_date("2023 Winter"), Some((date(2023, 12, 1), false)));
        assert_eq!(parse_publication_date("2023 Fall"), Some((date(2023, 9, 1), false)));
    }

    #[test]
    fn test_span_uses_first_date() {
        assert_eq!(
            parse_publication_date("2023 Dec 28-2024 Jan 3"),
            Some((date(2023, 12, 28), true))
        );
    }

    #[test]
    fn test_invalid_day_falls_back_to_month() {
        assert_eq!(parse_publication_date("2023 Feb 30"), Some((date(2023, 2, 1), false)));
    }

    #[test]
    fn test_garbage() {
        assert_eq!(parse_publication_date("unknown"), None);
        assert_eq!(parse_publication_date(""), None);
    }

    #[test]
    fn test_electronic_date() {
        assert_eq!(parse_electronic_date("20240119"), Some(date(2024, 1, 19)));
        assert_eq!(parse_electronic_date("2024-01-19"), None);
    }
}
