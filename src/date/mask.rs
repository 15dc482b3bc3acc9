//! Positional `DD/MM/YYYY` masking.
//!
//! The mask only looks at digits and their count. Whether the digits form a
//! real date is the validator's concern (see [`crate::date::validate`]).

/// Digits in a complete `DDMMYYYY` run.
pub const MAX_DIGITS: usize = 8;

/// Separator inserted between the day, month and year segments.
pub const SEPARATOR: char = '/';

/// Mask raw field text into a `DD/MM/YYYY` string or a prefix of one.
///
/// `previous` is the masked value before this edit. It is used to detect a
/// backspace over a trailing separator: `10/02/` edited to `10/02` removes the
/// `2` as well, otherwise the four-digit rule would put the separator right
/// back.
///
/// ```
/// use gilt_forms::date::mask::mask_date;
///
/// assert_eq!(mask_date("010220225555", ""), "01/02/2022");
/// assert_eq!(mask_date("1002", ""), "10/02/");
/// assert_eq!(mask_date("10/02", "10/02/"), "10/0");
/// ```
pub fn mask_date(raw: &str, previous: &str) -> String {
    let mut digits: String = raw
        .chars()
        .filter(char::is_ascii_digit)
        .take(MAX_DIGITS)
        .collect();
    if deletes_trailing_separator(raw, previous) {
        digits.pop();
    }
    format_digits(&digits)
}

/// Lay out the first [`MAX_DIGITS`] ASCII digits of `text` with separators.
///
/// Anything that is not an ASCII digit is skipped. Exactly four digits render
/// with a trailing separator and an empty year segment (`1002` -> `10/02/`).
pub fn format_digits(text: &str) -> String {
    let digits: String = text
        .chars()
        .filter(char::is_ascii_digit)
        .take(MAX_DIGITS)
        .collect();
    let digits = digits.as_str();
    let mut out = String::with_capacity(MAX_DIGITS + 2);
    match digits.len() {
        0..=2 => out.push_str(digits),
        3 => {
            out.push_str(&digits[..2]);
            out.push(SEPARATOR);
            out.push_str(&digits[2..]);
        }
        _ => {
            out.push_str(&digits[..2]);
            out.push(SEPARATOR);
            out.push_str(&digits[2..4]);
            out.push(SEPARATOR);
            out.push_str(&digits[4..]);
        }
    }
    out
}

/// Count the digits in a masked (or raw) string.
pub fn digit_count(text: &str) -> usize {
    text.chars().filter(char::is_ascii_digit).count()
}

fn deletes_trailing_separator(raw: &str, previous: &str) -> bool {
    previous.len() == raw.len() + 1
        && previous.ends_with(SEPARATOR)
        && previous.starts_with(raw)
}

// ===========================================================================
// Tests
// ===========================================================================
