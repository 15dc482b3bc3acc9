//! Date handling for the date field: masking, parsing, validation, calendar.

pub mod calendar;
pub mod mask;
pub mod parse;
pub mod validate;

pub use calendar::{Clock, DayCell, FixedClock, Locale, SystemClock};
pub use mask::mask_date;
pub use parse::{format_date, parse_date, DateParseError, ParsedDate};
pub use validate::{Bounds, Validation, Variant, Verdict, VisualState};
