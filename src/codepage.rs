//! Single-byte code page I/O
//!
//! World files are written in a Windows single-byte code page (usually 1250 or
//! 1252). Every field this crate rewrites is ASCII, so documents are read by
//! widening each byte to the `char` with the same value and written back by
//! narrowing. Bytes outside ASCII survive untouched whatever the code page.

use std::fs;
use std::path::Path;

use thiserror::Error;

/// Errors from reading or writing world files
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CodepageError {
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: std::io::Error },

    #[error("failed to write {path}: {source}")]
    Write { path: String, source: std::io::Error },

    /// Text holds a character with no single-byte encoding
    #[error("character {found:?} at byte {position} has no single-byte encoding")]
    Unrepresentable { position: usize, found: char },
}

pub type Result<T> = std::result::Result<T, CodepageError>;

/// Widen every byte to the char with the same code point.
pub fn decode_single_byte(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Narrow text produced by [`decode_single_byte`] back to bytes.
pub fn encode_single_byte(text: &str) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(text.len());
    for (position, c) in text.char_indices() {
        let byte = u8::try_from(c).map_err(|_| CodepageError::Unrepresentable { position, found: c })?;
        out.push(byte);
    }
    Ok(out)
}

/// Read a world file as text.
pub fn read_world(path: &Path) -> Result<String> {
    let bytes = fs::read(path)
        .map_err(|source| CodepageError::Read { path: path.display().to_string(), source })?;
    Ok(decode_single_byte(&bytes))
}

/// Write text back in the file's code page.
pub fn write_world(path: &Path, text: &str) -> Result<()> {
    let bytes = encode_single_byte(text)?;
    fs::write(path, bytes)
        .map_err(|source| CodepageError::Write { path: path.display().to_string(), source })
}
