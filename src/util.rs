/// Number conversion helpers.
///
/// This module converts between numbers and their textual form the way the
/// language does: number-to-string for display and concatenation, and
/// string-to-number for arithmetic on strings.
pub mod num;
