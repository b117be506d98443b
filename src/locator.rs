//! Field location in world text
//!
//! A field kind is a literal tag such as `trafoOSToWSPos=vec3:` plus the shape of
//! the value that follows it. [`scan`] walks the text lazily, yielding every
//! occurrence whose value fits the shape. Occurrences that do not fit are
//! skipped and left for the caller to pass through untouched.

use std::ops::Range;

use tracing::debug;

use crate::numeric::{is_token_boundary, parse_decimal, scan_decimal};

/// Value shape that must follow a field tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldShape {
    /// Exactly `n` decimal tokens separated by whitespace
    Decimals(usize),
    /// One hex run of exactly this many characters
    HexFixed(usize),
    /// One non-empty hex run made of records of this many characters.
    /// The record length is checked by the transform, not the locator.
    HexRecords(usize),
}

/// A named, tagged field category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldKind {
    pub name: String,
    pub tag: String,
    pub shape: FieldShape,
}

impl FieldKind {
    pub fn new(name: impl Into<String>, tag: impl Into<String>, shape: FieldShape) -> Self {
        Self { name: name.into(), tag: tag.into(), shape }
    }
}

/// Decoded value of a located field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'t> {
    Decimals(Vec<f32>),
    Hex(&'t str),
}

/// One located field occurrence
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMatch<'t> {
    /// Tag and value
    pub span: Range<usize>,
    /// Value only; this is the part a rewrite replaces
    pub value_span: Range<usize>,
    /// Value text as it appears in the source
    pub raw: &'t str,
    pub value: FieldValue<'t>,
}

/// Lazy iterator over the occurrences of one field kind
#[derive(Debug, Clone)]
pub struct FieldMatches<'t, 'k> {
    text: &'t str,
    kind: &'k FieldKind,
    pos: usize,
    malformed: usize,
}

impl FieldMatches<'_, '_> {
    /// Tag occurrences skipped so far because the value did not fit the shape.
    pub fn malformed(&self) -> usize {
        self.malformed
    }
}

/// Scan `text` for occurrences of `kind`, in order, from the start.
///
/// # Examples
///
/// ```
/// use zenflip::locator::{scan, FieldKind, FieldShape, FieldValue};
///
/// let kind = FieldKind::new("object-position", "trafoOSToWSPos=vec3:", FieldShape::Decimals(3));
/// let text = "trafoOSToWSPos=vec3:10.0 -5.0 2.0\n";
/// let found: Vec<_> = scan(text, &kind).collect();
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].raw, "10.0 -5.0 2.0");
/// assert_eq!(found[0].value, FieldValue::Decimals(vec![10.0, -5.0, 2.0]));
/// ```
pub fn scan<'t, 'k>(text: &'t str, kind: &'k FieldKind) -> FieldMatches<'t, 'k> {
    // An empty tag would match everywhere without advancing
    let pos = if kind.tag.is_empty() { text.len() } else { 0 };
    FieldMatches { text, kind, pos, malformed: 0 }
}

impl<'t> Iterator for FieldMatches<'t, '_> {
    type Item = FieldMatch<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.text.as_bytes();
        while self.pos < self.text.len() {
            let tag_start = self.pos + self.text[self.pos..].find(self.kind.tag.as_str())?;
            let value_start = tag_start + self.kind.tag.len();
            self.pos = value_start;

            if !is_tag_boundary(bytes, tag_start) {
                continue;
            }

            match read_value(self.text, value_start, self.kind.shape) {
                Some((end, value)) => {
                    self.pos = end;
                    return Some(FieldMatch {
                        span: tag_start..end,
                        value_span: value_start..end,
                        raw: &self.text[value_start..end],
                        value,
                    });
                }
                None => {
                    self.malformed += 1;
                    debug!(
                        kind = %self.kind.name,
                        offset = tag_start,
                        "skipping field whose value does not fit {:?}",
                        self.kind.shape
                    );
                }
            }
        }
        None
    }
}

/// A tag only counts when it does not continue an identifier.
fn is_tag_boundary(bytes: &[u8], tag_start: usize) -> bool {
    match tag_start.checked_sub(1).map(|i| bytes[i]) {
        None => true,
        Some(b) => !(b.is_ascii_alphanumeric() || b == b'_'),
    }
}

fn read_value(text: &str, start: usize, shape: FieldShape) -> Option<(usize, FieldValue<'_>)> {
    match shape {
        FieldShape::Decimals(count) => read_decimals(text, start, count),
        FieldShape::HexFixed(len) => {
            let end = read_hex_run(text.as_bytes(), start)?;
            (end - start == len).then(|| (end, FieldValue::Hex(&text[start..end])))
        }
        FieldShape::HexRecords(_) => {
            let end = read_hex_run(text.as_bytes(), start)?;
            Some((end, FieldValue::Hex(&text[start..end])))
        }
    }
}

fn skip_blanks(bytes: &[u8], mut i: usize) -> usize {
    while matches!(bytes.get(i), Some(b' ' | b'\t')) {
        i += 1;
    }
    i
}

/// Whitespace between tokens may include line breaks.
fn skip_separators(bytes: &[u8], mut i: usize) -> usize {
    while bytes.get(i).is_some_and(u8::is_ascii_whitespace) {
        i += 1;
    }
    i
}

fn read_decimals(text: &str, start: usize, count: usize) -> Option<(usize, FieldValue<'_>)> {
    let bytes = text.as_bytes();
    let mut values = Vec::with_capacity(count);
    let mut i = start;

    for n in 0..count {
        if n > 0 {
            let after = skip_separators(bytes, i);
            if after == i {
                return None;
            }
            i = after;
        }
        let len = scan_decimal(bytes, i)?;
        let value = parse_decimal(&text[i..i + len])?;
        values.push(value);
        i += len;
    }

    if !is_token_boundary(bytes.get(i).copied()) {
        return None;
    }
    // A further number on the same line means the arity is wrong
    let next = skip_blanks(bytes, i);
    if next > i && scan_decimal(bytes, next).is_some() {
        return None;
    }

    Some((i, FieldValue::Decimals(values)))
}

/// End of a non-empty hex run starting at `start` that ends at an identifier boundary.
fn read_hex_run(bytes: &[u8], start: usize) -> Option<usize> {
    let mut end = start;
    while bytes.get(end).is_some_and(u8::is_ascii_hexdigit) {
        end += 1;
    }
    if end == start {
        return None;
    }
    match bytes.get(end) {
        Some(b) if b.is_ascii_alphanumeric() || *b == b'_' => None,
        _ => Some(end),
    }
}
