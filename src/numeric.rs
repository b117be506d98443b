//! Decimal float tokens as they appear in `vec3:` and `rawFloat:` values
//!
//! Parsing and formatting never consult the locale: the decimal point is always
//! `.`. Formatting emits the shortest digits that parse back to the same `f32`.

/// Length of the decimal token starting at `start`, if one is there.
///
/// Grammar: `[+-]? digits* ('.' digits+)? ([eE] [+-]? digits+)?` with at least
/// one mantissa digit. Scanning stops at the first byte that cannot extend the
/// token; callers decide whether that byte is an acceptable boundary.
pub fn scan_decimal(bytes: &[u8], start: usize) -> Option<usize> {
    let mut i = start;
    if matches!(bytes.get(i), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while bytes.get(i).is_some_and(u8::is_ascii_digit) {
        i += 1;
    }
    let mut mantissa_digits = i - int_start;

    if bytes.get(i) == Some(&b'.') && bytes.get(i + 1).is_some_and(u8::is_ascii_digit) {
        i += 1;
        let frac_start = i;
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        mantissa_digits += i - frac_start;
    }

    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_start = j;
        while bytes.get(j).is_some_and(u8::is_ascii_digit) {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    Some(i - start)
}

/// Whether `byte` may directly follow a decimal token.
pub fn is_token_boundary(byte: Option<u8>) -> bool {
    match byte {
        None => true,
        Some(b) => !(b.is_ascii_alphanumeric() || matches!(b, b'.' | b'+' | b'-' | b'_')),
    }
}

/// Parse a complete decimal token into a finite `f32`.
///
/// Returns `None` when the text is not exactly one token or the value does not
/// fit an `f32`: it overflows to infinity (e.g. `1e50`) or a non-zero mantissa
/// underflows to zero (e.g. `1e-50`).
///
/// ```
/// use zenflip::numeric::parse_decimal;
///
/// assert_eq!(parse_decimal("-5.25"), Some(-5.25));
/// assert_eq!(parse_decimal(".5e1"), Some(5.0));
/// assert_eq!(parse_decimal("1,5"), None);
/// assert_eq!(parse_decimal("1e50"), None);
/// assert_eq!(parse_decimal("1e-50"), None);
/// ```
pub fn parse_decimal(token: &str) -> Option<f32> {
    let len = scan_decimal(token.as_bytes(), 0)?;
    if len != token.len() {
        return None;
    }
    let value = token.parse::<f32>().ok().filter(|v| v.is_finite())?;
    if value == 0.0 && has_nonzero_mantissa(token) {
        return None;
    }
    Some(value)
}

fn has_nonzero_mantissa(token: &str) -> bool {
    token
        .bytes()
        .take_while(|b| !matches!(b, b'e' | b'E'))
        .any(|b| matches!(b, b'1'..=b'9'))
}

/// Decimal exponents rendered in fixed notation: `1e-4` up to `1e14`.
const FIXED_EXPONENTS: std::ops::Range<i32> = -4..15;

/// Format an `f32` with the shortest round-trip digits.
///
/// Fixed notation is used for moderate magnitudes, scientific (`1.5E+20`,
/// `1E-07`) otherwise. Integral values carry no fractional part.
///
/// ```
/// use zenflip::numeric::format_decimal;
///
/// assert_eq!(format_decimal(-10.0), "-10");
/// assert_eq!(format_decimal(0.1), "0.1");
/// assert_eq!(format_decimal(1.5e20), "1.5E+20");
/// assert_eq!(format_decimal(1e-7), "1E-07");
/// ```
pub fn format_decimal(value: f32) -> String {
    if !value.is_finite() || value == 0.0 {
        return value.to_string();
    }

    let scientific = format!("{:e}", value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return value.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return value.to_string();
    };

    if FIXED_EXPONENTS.contains(&exponent) {
        value.to_string()
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}E{}{:02}", mantissa, sign, exponent.unsigned_abs())
    }
}
