//! Built-in form widgets: DateInput, PercentageInput.

pub mod date_input;
pub mod percentage_input;

pub use date_input::{DateInput, DateInputProps, DatePart};
pub use percentage_input::{PercentageInput, PercentageInputProps};
