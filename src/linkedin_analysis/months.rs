// src/linkedin_analysis/months.rs
//! Month vocabulary and the date-range grammar shared by every strategy.

use super::types::PRESENT;
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// `Jan`, `jan 2020`, `DEC 1999`: a word-bounded month with an optional year.
fn month_year_pattern() -> String {
    format!(r"\b(?:{})\b(?:\s+\d{{4}}\b)?", MONTHS.join("|"))
}

static DATE_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    let month_year = month_year_pattern();
    Regex::new(&format!(
        r"(?i)(?P<start>{my})\s*-\s*(?:(?P<present>\bpresent\b)|(?P<end>{my}))",
        my = month_year
    ))
    .expect("date range pattern is valid")
});

// Standalone tokens only count as dates when they carry a year, so words
// like "May" inside a title do not cut it short.
static DATED_MONTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b(?:{})\s+\d{{4}}\b", MONTHS.join("|")))
        .expect("month-year pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange<'t> {
    pub start: &'t str,
    pub end: &'t str,
    pub span: Range<usize>,
}

impl<'t> DateRange<'t> {
    fn from_captures(caps: &regex::Captures<'t>) -> Option<Self> {
        let whole = caps.get(0)?;
        let start = caps.name("start")?.as_str();
        let end = match caps.name("end") {
            Some(end) => end.as_str(),
            None => PRESENT,
        };

        Some(Self {
            start,
            end,
            span: whole.range(),
        })
    }
}

/// Non-overlapping date ranges, left to right.
pub fn find_date_ranges(text: &str) -> impl Iterator<Item = DateRange<'_>> {
    DATE_RANGE
        .captures_iter(text)
        .filter_map(|caps| DateRange::from_captures(&caps))
}

/// A date range opening the line, optionally followed by a duration note
/// such as `· 2 yrs 3 mos` or `(3 years)`.
pub fn leading_date_range(line: &str) -> Option<DateRange<'_>> {
    let caps = DATE_RANGE.captures(line)?;
    let range = DateRange::from_captures(&caps)?;
    if range.span.start != 0 {
        return None;
    }

    let rest = line[range.span.end..].trim_start();
    match rest.chars().next() {
        None | Some('·' | '(' | '|' | ',') => Some(range),
        _ => None,
    }
}

pub fn is_date_range_line(line: &str) -> bool {
    leading_date_range(line).is_some()
}

/// Byte offset just past the last `Month YYYY` token in `text`.
pub fn last_dated_month_end(text: &str) -> Option<usize> {
    DATED_MONTH.find_iter(text).last().map(|m| m.end())
}
