//! Closed publication date windows.

use std::fmt;

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::error::{FetchError, FetchResult};

/// Accepted input format for a single date.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Separators accepted between the two dates of a typed range.
const SEPARATORS: &[&str] = &[" to ", ".."];

/// A closed interval `[start, end]` of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> FetchResult<Self> {
        if start > end {
            return Err(FetchError::invalid_range(format!(
                "start date {start} is after end date {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Rolling window of the last `days` days, ending today.
    #[must_use]
    pub fn past_days(today: NaiveDate, days: u32) -> Self {
        let start = today.checked_sub_days(Days::new(u64::from(days))).unwrap_or(NaiveDate::MIN);
        Self { start, end: today }
    }

    /// Parse `YYYY-MM-DD to YYYY-MM-DD` (or `YYYY-MM-DD..YYYY-MM-DD`).
    pub fn parse(input: &str) -> FetchResult<Self> {
        let input = input.trim();
        let (start, end) = SEPARATORS
            .iter()
            .find_map(|sep| input.split_once(sep))
            .ok_or_else(|| FetchError::invalid_range("expected two dates separated by 'to'"))?;

        Self::new(parse_date(start)?, parse_date(end)?)
    }

    /// First day of the range.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether `date` lies inside the range, bounds included.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// PubMed `filter` query value, e.g. `dates.2024/01/01-2024/01/31`.
    #[must_use]
    pub fn pubmed_filter(&self) -> String {
        format!("dates.{}-{}", self.start.format("%Y/%m/%d"), self.end.format("%Y/%m/%d"))
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start.format(DATE_FORMAT), self.end.format(DATE_FORMAT))
    }
}

fn parse_date(value: &str) -> FetchResult<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| FetchError::invalid_range(format!("'{value}' is not a YYYY-MM-DD date")))
}
