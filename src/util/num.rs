/// Magnitude from which numbers are written in exponent form.
const EXPONENT_THRESHOLD: f64 = 1e21;

/// Formats a number the way the language prints it.
///
/// Integral values are written without a fractional part, `-0` is written as
/// `0`, and the non-finite values use their language names.
///
/// ## Example
/// ```
/// use evalon::util::num::format_number;
///
/// assert_eq!(format_number(3.0), "3");
/// assert_eq!(format_number(-0.0), "0");
/// assert_eq!(format_number(0.5), "0.5");
/// assert_eq!(format_number(f64::NAN), "NaN");
/// assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
/// ```
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    if value.fract() == 0.0 && value.abs() < EXPONENT_THRESHOLD {
        return format!("{value:.0}");
    }
    if value.abs() >= EXPONENT_THRESHOLD {
        return format!("{value:e}").replace('e', "e+").replace("e+-", "e-");
    }
    format!("{value}")
}

/// Converts a string to a number.
///
/// Surrounding whitespace is ignored and the empty string converts to `0`.
/// Decimal literals, optionally signed and with an exponent, and the words
/// `Infinity`/`-Infinity` are accepted; anything else is `NaN`.
///
/// ## Example
/// ```
/// use evalon::util::num::string_to_number;
///
/// assert_eq!(string_to_number(""), 0.0);
/// assert_eq!(string_to_number(" 12.5 "), 12.5);
/// assert_eq!(string_to_number("-Infinity"), f64::NEG_INFINITY);
/// assert!(string_to_number("inf").is_nan());
/// assert!(string_to_number("1 + 2").is_nan());
/// ```
#[must_use]
pub fn string_to_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {},
    }
    let is_decimal = trimmed.chars()
                            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
                     && trimmed.chars().any(|c| c.is_ascii_digit());
    if !is_decimal {
        return f64::NAN;
    }
    trimmed.parse().unwrap_or(f64::NAN)
}
