//! Hex-float codec for `raw:` blobs
//!
//! World files store binary floats as lowercase hex text. Each float is 8 hex
//! characters: the 4 bytes of the IEEE-754 single in little-endian order, written
//! left to right. `0000803f` is `1.0`.

use thiserror::Error;

/// Hex characters per encoded `f32`
pub const HEX_CHARS_PER_FLOAT: usize = 8;

/// Error type for hex-float decoding failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum HexFloatError {
    /// Input length does not fit the expected number of hex characters
    #[error("invalid hex length {found}, expected {expected}")]
    InvalidLength { expected: usize, found: usize },
    /// Contains a non-hex character
    #[error("invalid hex character '{found}' at position {position}")]
    InvalidDigit { position: usize, found: char },
}

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, HexFloatError>;

fn hex_value(text: &str, position: usize) -> Result<u8> {
    let c = text.as_bytes()[position];
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        b'A'..=b'F' => Ok(c - b'A' + 10),
        _ => Err(HexFloatError::InvalidDigit { position, found: char_at(text, position) }),
    }
}

/// The character that byte `position` belongs to.
fn char_at(text: &str, position: usize) -> char {
    let start = (0..=position).rev().find(|&i| text.is_char_boundary(i)).unwrap_or(0);
    text[start..].chars().next().unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Decode exactly 8 hex characters into an `f32`.
///
/// # Examples
///
/// ```
/// use zenflip::hexfloat::decode_f32;
///
/// assert_eq!(decode_f32("0000803f").unwrap(), 1.0);
/// assert_eq!(decode_f32("000080BF").unwrap(), -1.0);
/// assert!(decode_f32("0000803").is_err());
/// ```
pub fn decode_f32(hex: &str) -> Result<f32> {
    if hex.len() != HEX_CHARS_PER_FLOAT {
        return Err(HexFloatError::InvalidLength { expected: HEX_CHARS_PER_FLOAT, found: hex.len() });
    }
    decode_word(hex, 0)
}

/// Decode the 8-byte word of `text` starting at byte `offset`.
fn decode_word(text: &str, offset: usize) -> Result<f32> {
    let mut le = [0u8; 4];
    for (i, byte) in le.iter_mut().enumerate() {
        let hi = hex_value(text, offset + i * 2)?;
        let lo = hex_value(text, offset + i * 2 + 1)?;
        *byte = (hi << 4) | lo;
    }
    Ok(f32::from_le_bytes(le))
}

/// Encode an `f32` as 8 lowercase hex characters.
///
/// ```
/// use zenflip::hexfloat::encode_f32;
///
/// assert_eq!(encode_f32(1.0), "0000803f");
/// assert_eq!(encode_f32(-0.0), "00000080");
/// ```
pub fn encode_f32(value: f32) -> String {
    let mut out = String::with_capacity(HEX_CHARS_PER_FLOAT);
    push_encoded(&mut out, value);
    out
}

fn push_encoded(out: &mut String, value: f32) {
    const DIGITS: &[u8; 16] = b"0123456789abcdef";
    for byte in value.to_le_bytes() {
        out.push(DIGITS[(byte >> 4) as usize] as char);
        out.push(DIGITS[(byte & 0x0f) as usize] as char);
    }
}

/// Decode a blob of back-to-back 8-character floats.
pub fn decode_floats(hex: &str) -> Result<Vec<f32>> {
    if hex.len() % HEX_CHARS_PER_FLOAT != 0 {
        let expected = hex.len().next_multiple_of(HEX_CHARS_PER_FLOAT);
        return Err(HexFloatError::InvalidLength { expected, found: hex.len() });
    }

    (0..hex.len())
        .step_by(HEX_CHARS_PER_FLOAT)
        .map(|offset| decode_word(hex, offset))
        .collect()
}

/// Encode a slice of floats as one lowercase blob with no separators.
pub fn encode_floats(values: &[f32]) -> String {
    let mut out = String::with_capacity(values.len() * HEX_CHARS_PER_FLOAT);
    for &value in values {
        push_encoded(&mut out, value);
    }
    out
}
