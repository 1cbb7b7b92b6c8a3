//! Result formatting for the calculator display
//!
//! Values in the normal range are rounded to 10 decimal places and rendered
//! as the shortest round-trip decimal text (via `ryu`), so `3.8000000000000003`
//! shows as `3.8` and `16.0` as `16`. Very large or very small magnitudes
//! switch to exponential notation with 10 fractional digits and an explicit
//! exponent sign.
//!
//! ```rust
//! use calcpad_engine::numfmt::format_result;
//!
//! assert_eq!(format_result(1.5 + 2.3), "3.8");
//! assert_eq!(format_result(1e15), "1.0000000000e+15");
//! ```

/// Magnitudes at or above this render in exponential notation
pub const EXPONENTIAL_UPPER: f64 = 1e15;

/// Non-zero magnitudes below this render in exponential notation
pub const EXPONENTIAL_LOWER: f64 = 1e-10;

/// Fractional digits kept in both notations
pub const FRACTION_DIGITS: usize = 10;

const ROUNDING_SCALE: f64 = 1e10;

/// ryu writes magnitudes below this with an exponent; plain decimals are kept
/// down to `1e-6`
const RYU_DECIMAL_LOWER: f64 = 1e-5;
const DECIMAL_LOWER: f64 = 1e-6;

/// Format a computed value for the display
pub fn format_result(result: f64) -> String {
    if !result.is_finite() {
        return format_non_finite(result).to_string();
    }

    let magnitude = result.abs();
    if magnitude >= EXPONENTIAL_UPPER || (magnitude < EXPONENTIAL_LOWER && result != 0.0) {
        return to_exponential(result, FRACTION_DIGITS);
    }

    let rounded = round_half_up(result * ROUNDING_SCALE) / ROUNDING_SCALE;
    to_shortest(rounded)
}

/// Round to the nearest integer, ties toward positive infinity
///
/// `f64::round` sends `-2.5` to `-3`; this sends it to `-2`.
fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Exponential notation with a fixed number of fractional digits
///
/// Rust's `{:e}` omits the `+` on non-negative exponents; it is added back so
/// the output reads `1.0000000000e+15`.
pub fn to_exponential(value: f64, digits: usize) -> String {
    let text = format!("{:.*e}", digits, value);
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        },
        _ => text,
    }
}

fn to_shortest(value: f64) -> String {
    // -0.0 compares equal to 0.0
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (DECIMAL_LOWER..RYU_DECIMAL_LOWER).contains(&magnitude) {
        // f64 Display is shortest round-trip and never uses an exponent
        return value.to_string();
    }

    let mut buffer = ryu::Buffer::new();
    let text = buffer.format_finite(value);
    text.strip_suffix(".0").unwrap_or(text).to_string()
}

fn format_non_finite(value: f64) -> &'static str {
    if value.is_nan() {
        "NaN"
    } else if value.is_sign_positive() {
        "Infinity"
    } else {
        "-Infinity"
    }
}
