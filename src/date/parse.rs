//! Reading masked strings back into date parts and calendar dates.

use chrono::{Datelike, NaiveDate};

use super::mask::{digit_count, MAX_DIGITS, SEPARATOR};

/// Errors from reading a `DD/MM/YYYY` string as a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateParseError {
    #[error("expected DD/MM/YYYY, got {0:?}")]
    Malformed(String),
    #[error("{0:?} is not a calendar date")]
    NotACalendarDate(String),
}

// ---------------------------------------------------------------------------
// ParsedDate
// ---------------------------------------------------------------------------

/// The day, month and year segments of a (possibly partial) masked string.
///
/// Segments that have not been typed yet are `None`. A segment is `Some` as
/// soon as it holds at least one digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParsedDate {
    pub day: Option<u32>,
    pub month: Option<u32>,
    pub year: Option<i32>,
    /// All eight digits are present.
    pub complete: bool,
}

impl ParsedDate {
    /// Split a masked string on its separators.
    pub fn parse(masked: &str) -> Self {
        let mut segments = masked.split(SEPARATOR);
        let day = segments.next().and_then(parse_segment);
        let month = segments.next().and_then(parse_segment);
        let year = segments.next().and_then(parse_segment).map(|y| y as i32);
        Self {
            day,
            month,
            year,
            complete: digit_count(masked) == MAX_DIGITS,
        }
    }

    /// The calendar date, if all digits are present and form a real date.
    pub fn to_calendar_date(self) -> Option<NaiveDate> {
        if !self.complete {
            return None;
        }
        NaiveDate::from_ymd_opt(self.year?, self.month?, self.day?)
    }
}

fn parse_segment(segment: &str) -> Option<u32> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

// ---------------------------------------------------------------------------
// Strict parsing and formatting
// ---------------------------------------------------------------------------

/// Parse an exact `DD/MM/YYYY` string into a calendar date.
pub fn parse_date(text: &str) -> Result<NaiveDate, DateParseError> {
    let (first, second, year) = split_exact(text)?;
    NaiveDate::from_ymd_opt(year, second, first)
        .ok_or_else(|| DateParseError::NotACalendarDate(text.to_owned()))
}

/// Parse an exact `MM/DD/YYYY` string into a calendar date.
pub fn parse_month_first(text: &str) -> Result<NaiveDate, DateParseError> {
    let (first, second, year) = split_exact(text)?;
    NaiveDate::from_ymd_opt(year, first, second)
        .ok_or_else(|| DateParseError::NotACalendarDate(text.to_owned()))
}

/// Format a calendar date as `DD/MM/YYYY`.
pub fn format_date(date: NaiveDate) -> String {
    format!("{:02}/{:02}/{:04}", date.day(), date.month(), date.year())
}

/// Split `NN/NN/NNNN` into its three numbers without judging their ranges.
fn split_exact(text: &str) -> Result<(u32, u32, i32), DateParseError> {
    let malformed = || DateParseError::Malformed(text.to_owned());
    let bytes = text.as_bytes();
    let shape_ok = bytes.len() == MAX_DIGITS + 2
        && bytes.iter().enumerate().all(|(i, &b)| match i {
            2 | 5 => b == SEPARATOR as u8,
            _ => b.is_ascii_digit(),
        });
    if !shape_ok {
        return Err(malformed());
    }
    let first = text[0..2].parse().map_err(|_| malformed())?;
    let second = text[3..5].parse().map_err(|_| malformed())?;
    let year = text[6..10].parse().map_err(|_| malformed())?;
    Ok((first, second, year))
}

// ===========================================================================
// Tests
// ===========================================================================
