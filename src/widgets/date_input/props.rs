//! Configuration for [`DateInput`](super::DateInput).

use std::fmt;

use crate::date::validate::parse_bound;
use crate::date::{Bounds, Clock, DateParseError, Locale, SystemClock, Variant};
use crate::event::{ChangeCallback, ChangeEvent};

/// Placeholder shown while the field is empty.
pub const DEFAULT_PLACEHOLDER: &str = "DD/MM/YYYY";

/// Which end of the range a bound belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundKind {
    Min,
    Max,
}

impl fmt::Display for BoundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BoundKind::Min => "min",
            BoundKind::Max => "max",
        })
    }
}

/// Errors from building a date field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {kind} bound {value:?}")]
    InvalidBound {
        kind: BoundKind,
        value: String,
        #[source]
        source: DateParseError,
    },
    #[error("min bound {min:?} is after max bound {max:?}")]
    InvertedBounds { min: String, max: String },
}

/// Builder-style configuration for a date field.
///
/// # Examples
///
/// ```
/// use gilt_forms::widgets::date_input::{DateInput, DateInputProps};
/// use gilt_forms::date::Variant;
///
/// let input = DateInput::new(
///     DateInputProps::new()
///         .with_min("02/02/2023")
///         .with_max("15/05/2023")
///         .with_variant(Variant::Active)
///         .with_test_id("date-input"),
/// )
/// .unwrap();
/// assert_eq!(input.attribute("min"), Some("02/02/2023"));
/// ```
pub struct DateInputProps {
    pub value: Option<String>,
    pub min: Option<String>,
    pub max: Option<String>,
    pub variant: Option<Variant>,
    pub test_id: Option<String>,
    pub placeholder: String,
    pub locale: Locale,
    /// Passthrough attributes, forwarded verbatim in insertion order.
    pub attributes: Vec<(String, String)>,
    pub(crate) clock: Box<dyn Clock>,
    pub(crate) on_change: Option<ChangeCallback>,
}

impl Default for DateInputProps {
    fn default() -> Self {
        Self {
            value: None,
            min: None,
            max: None,
            variant: None,
            test_id: None,
            placeholder: DEFAULT_PLACEHOLDER.to_owned(),
            locale: Locale::default(),
            attributes: Vec::new(),
            clock: Box::new(SystemClock),
            on_change: None,
        }
    }
}

impl DateInputProps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial value. It is masked on entry, so `1002` becomes `10/02/`.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_min(mut self, min: impl Into<String>) -> Self {
        self.min = Some(min.into());
        self
    }

    pub fn with_max(mut self, max: impl Into<String>) -> Self {
        self.max = Some(max.into());
        self
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = Some(variant);
        self
    }

    pub fn with_test_id(mut self, test_id: impl Into<String>) -> Self {
        self.test_id = Some(test_id.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Add a passthrough attribute. A repeated name replaces the earlier value.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
        self
    }

    /// Source of "today" for the picker. Defaults to the local clock.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn on_change(mut self, f: impl FnMut(&ChangeEvent) + 'static) -> Self {
        self.on_change = Some(ChangeCallback::new(f));
        self
    }

    /// Parse `min`/`max` into [`Bounds`].
    pub fn bounds(&self) -> Result<Bounds, ConfigError> {
        let min = parse_optional_bound(BoundKind::Min, self.min.as_deref())?;
        let max = parse_optional_bound(BoundKind::Max, self.max.as_deref())?;
        if let (Some(lo), Some(hi)) = (min, max) {
            if lo > hi {
                return Err(ConfigError::InvertedBounds {
                    min: self.min.clone().unwrap_or_default(),
                    max: self.max.clone().unwrap_or_default(),
                });
            }
        }
        Ok(Bounds { min, max })
    }
}

fn parse_optional_bound(
    kind: BoundKind,
    text: Option<&str>,
) -> Result<Option<chrono::NaiveDate>, ConfigError> {
    text.map(|value| {
        parse_bound(value).map_err(|source| ConfigError::InvalidBound {
            kind,
            value: value.to_owned(),
            source,
        })
    })
    .transpose()
}

impl fmt::Debug for DateInputProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateInputProps")
            .field("value", &self.value)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("variant", &self.variant)
            .field("test_id", &self.test_id)
            .field("placeholder", &self.placeholder)
            .field("locale", &self.locale)
            .field("attributes", &self.attributes)
            .field("on_change", &self.on_change)
            .finish_non_exhaustive()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::error::Error;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn defaults() {
        let props = DateInputProps::new();
        assert_eq!(props.placeholder, "DD/MM/YYYY");
        assert_eq!(props.locale, Locale::Es);
        assert_eq!(props.bounds(), Ok(Bounds::UNBOUNDED));
    }

    #[test]
    fn bounds_parse_both_ends() {
        let props = DateInputProps::new().with_min("02/02/2023").with_max("05/15/2023");
        assert_eq!(
            props.bounds(),
            Ok(Bounds {
                min: Some(ymd(2023, 2, 2)),
                max: Some(ymd(2023, 5, 15)),
            })
        );
    }

    #[test]
    fn invalid_bound_names_the_end() {
        let err = DateInputProps::new().with_max("soon").bounds().unwrap_err();
        assert_eq!(err.to_string(), "invalid max bound \"soon\"");
        assert!(err.source().is_some());
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let err = DateInputProps::new()
            .with_min("10/10/2023")
            .with_max("01/01/2023")
            .bounds()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvertedBounds {
                min: "10/10/2023".into(),
                max: "01/01/2023".into(),
            }
        );
    }

    #[test]
    fn attributes_keep_order_and_replace() {
        let props = DateInputProps::new()
            .with_attribute("name", "dob")
            .with_attribute("aria-label", "Fecha")
            .with_attribute("name", "birth");
        assert_eq!(
            props.attributes,
            vec![
                ("name".to_owned(), "birth".to_owned()),
                ("aria-label".to_owned(), "Fecha".to_owned()),
            ]
        );
    }

    #[test]
    fn debug_hides_clock() {
        let dbg = format!("{:?}", DateInputProps::new().with_test_id("d"));
        assert!(dbg.contains("DateInputProps"));
        assert!(dbg.contains("\"d\""));
        assert!(dbg.contains(".."));
    }
}
