//! Validation of masked date strings and the visual state derived from it.
//!
//! Two checks run at different times:
//!
//! - the year-underflow check is live: it is evaluated against the current
//!   value on every render;
//! - emptiness, completeness, calendar validity and bounds are evaluated on
//!   blur (or on a picker commit) and the verdict is kept until the next one.

use chrono::NaiveDate;

use super::parse::{parse_date, parse_month_first, DateParseError, ParsedDate};

/// Years below this are rejected as soon as the year segment has a digit.
pub const MIN_YEAR: i32 = 1000;

// ---------------------------------------------------------------------------
// VisualState / Variant
// ---------------------------------------------------------------------------

/// The visual state a date field is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualState {
    Default,
    Active,
    Success,
    Warning,
    Error,
}

/// Caller-supplied visual override for a field whose value is not in error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Active,
    Success,
    Warning,
}

impl From<Variant> for VisualState {
    fn from(variant: Variant) -> Self {
        match variant {
            Variant::Active => VisualState::Active,
            Variant::Success => VisualState::Success,
            Variant::Warning => VisualState::Warning,
        }
    }
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// Inclusive `[min, max]` range for accepted dates. Either end may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub min: Option<NaiveDate>,
    pub max: Option<NaiveDate>,
}

impl Bounds {
    /// No limits.
    pub const UNBOUNDED: Bounds = Bounds { min: None, max: None };

    /// Whether `date` lies within the bounds (inclusive at both ends).
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.min.map_or(true, |min| date >= min) && self.max.map_or(true, |max| date <= max)
    }
}

/// Read a bound attribute.
///
/// Bounds are `DD/MM/YYYY`. A bound that is not a calendar date day-first but
/// is one month-first (`05/15/2023`) is accepted as month-first.
pub fn parse_bound(text: &str) -> Result<NaiveDate, DateParseError> {
    match parse_date(text) {
        Ok(date) => Ok(date),
        Err(err @ DateParseError::NotACalendarDate(_)) => match parse_month_first(text) {
            Ok(date) => {
                tracing::warn!(bound = text, "date bound read month-first");
                Ok(date)
            }
            Err(_) => Err(err),
        },
        Err(err) => Err(err),
    }
}

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

/// Outcome of a full (blur-time) validation.
///
/// Everything except `Valid` is shown as [`VisualState::Error`]; the reason is
/// kept for logging and tests only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Valid,
    Empty,
    YearUnderflow,
    Incomplete,
    NotACalendarDate,
    OutOfBounds,
}

impl Verdict {
    pub fn is_error(self) -> bool {
        self != Verdict::Valid
    }
}

/// Whether the year segment has been started and is below [`MIN_YEAR`].
pub fn year_underflow(value: &str) -> bool {
    ParsedDate::parse(value)
        .year
        .is_some_and(|year| year < MIN_YEAR)
}

/// Run every check against `value`, in priority order.
pub fn validate(value: &str, bounds: &Bounds) -> Verdict {
    if value.is_empty() {
        return Verdict::Empty;
    }
    if year_underflow(value) {
        return Verdict::YearUnderflow;
    }
    let parsed = ParsedDate::parse(value);
    if !parsed.complete {
        return Verdict::Incomplete;
    }
    let Some(date) = parsed.to_calendar_date() else {
        return Verdict::NotACalendarDate;
    };
    if !bounds.contains(date) {
        return Verdict::OutOfBounds;
    }
    Verdict::Valid
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validation state owned by one date field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    bounds: Bounds,
    variant: Option<Variant>,
    verdict: Option<Verdict>,
}

impl Validation {
    pub fn new(bounds: Bounds, variant: Option<Variant>) -> Self {
        Self {
            bounds,
            variant,
            verdict: None,
        }
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn variant(&self) -> Option<Variant> {
        self.variant
    }

    /// The last blur/commit verdict, if the field has been validated yet.
    pub fn verdict(&self) -> Option<Verdict> {
        self.verdict
    }

    /// Validate `value` fully and remember the verdict.
    pub fn settle(&mut self, value: &str) -> Verdict {
        let verdict = validate(value, &self.bounds);
        tracing::debug!(value, ?verdict, "date field validated");
        self.verdict = Some(verdict);
        verdict
    }

    /// The visual state for `value` right now.
    pub fn visual_state(&self, value: &str) -> VisualState {
        if year_underflow(value) || self.verdict.is_some_and(Verdict::is_error) {
            return VisualState::Error;
        }
        self.variant.map_or(VisualState::Default, VisualState::from)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
