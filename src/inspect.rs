//! Read-only report about a world file
//!
//! Summarises what a flip would see: line endings, world markers, and how many
//! occurrences of each field kind are well formed.

use serde::Serialize;

use crate::codepage::decode_single_byte;
use crate::locator::scan;
use crate::rewrite::FieldRegistry;

/// Marker found near the top of every world archive
const WORLD_MARKER: &str = "zCWorld";
/// Marker of the object tree section
const VOB_TREE_MARKER: &str = "VobTree";

/// Errors from inspecting a file
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum InspectError {
    #[error("failed to read {path}: {source}")]
    Io { path: String, source: std::io::Error },
}

/// Count of each line terminator style
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LineEndings {
    pub crlf: usize,
    pub lf: usize,
    pub cr: usize,
}

impl LineEndings {
    /// Count terminators in raw bytes.
    pub fn count(bytes: &[u8]) -> Self {
        let mut endings = LineEndings::default();
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\r' if bytes.get(i + 1) == Some(&b'\n') => {
                    endings.crlf += 1;
                    i += 1;
                }
                b'\r' => endings.cr += 1,
                b'\n' => endings.lf += 1,
                _ => {}
            }
            i += 1;
        }
        endings
    }

    /// Short description of the dominant style.
    pub fn label(&self) -> &'static str {
        match (self.crlf > 0, self.lf > 0, self.cr > 0) {
            (false, false, false) => "none",
            (true, false, false) => "CRLF",
            (false, true, false) => "LF",
            (false, false, true) => "CR",
            _ => "mixed",
        }
    }
}

/// Name of the byte order mark `bytes` starts with, if any.
///
/// World files are written without one; a BOM means an editor re-saved the file.
pub fn detect_bom(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        Some("UTF-8")
    } else if bytes.starts_with(&[0xFF, 0xFE]) {
        Some("UTF-16 LE")
    } else if bytes.starts_with(&[0xFE, 0xFF]) {
        Some("UTF-16 BE")
    } else {
        None
    }
}

/// Occurrences of one field kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KindSummary {
    pub kind: String,
    pub tag: String,
    pub fields: usize,
    pub malformed: usize,
}

/// Everything `inspect` reports about a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectReport {
    pub bytes: usize,
    pub bom: Option<&'static str>,
    pub line_endings: LineEndings,
    pub world_marker: bool,
    pub vob_tree: bool,
    pub non_ascii_bytes: usize,
    pub kinds: Vec<KindSummary>,
}

/// Inspect raw file contents.
pub fn inspect_bytes(bytes: &[u8], registry: &FieldRegistry) -> InspectReport {
    let text = decode_single_byte(bytes);
    let kinds = registry
        .iter()
        .map(|rule| {
            let mut matches = scan(&text, &rule.kind);
            let fields = matches.by_ref().count();
            KindSummary {
                kind: rule.kind.name.clone(),
                tag: rule.kind.tag.clone(),
                fields,
                malformed: matches.malformed(),
            }
        })
        .collect();

    InspectReport {
        bytes: bytes.len(),
        bom: detect_bom(bytes),
        line_endings: LineEndings::count(bytes),
        world_marker: text.contains(WORLD_MARKER),
        vob_tree: text.contains(VOB_TREE_MARKER),
        non_ascii_bytes: bytes.iter().filter(|b| !b.is_ascii()).count(),
        kinds,
    }
}

/// Inspect a file on disk with the standard field kinds.
pub fn inspect_file(path: &std::path::Path) -> Result<InspectReport, InspectError> {
    let bytes = std::fs::read(path)
        .map_err(|source| InspectError::Io { path: path.display().to_string(), source })?;
    Ok(inspect_bytes(&bytes, &FieldRegistry::standard()))
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

/// Format an inspect report for the terminal.
pub fn format_inspect_text(report: &InspectReport) -> String {
    let endings = &report.line_endings;
    let mut out = String::new();
    out.push_str(&format!("Size:          {} bytes\n", report.bytes));
    out.push_str(&format!("BOM:           {}\n", report.bom.unwrap_or("none")));
    out.push_str(&format!(
        "Line endings:  {} (CRLF {}, LF {}, CR {})\n",
        endings.label(),
        endings.crlf,
        endings.lf,
        endings.cr
    ));
    out.push_str(&format!("World marker:  {}\n", yes_no(report.world_marker)));
    out.push_str(&format!("VobTree:       {}\n", yes_no(report.vob_tree)));
    out.push_str(&format!("Non-ASCII:     {} bytes\n", report.non_ascii_bytes));
    out.push_str("Fields:\n");

    let width = report.kinds.iter().map(|k| k.kind.len()).max().unwrap_or(0);
    for kind in &report.kinds {
        out.push_str(&format!("  {:<width$}  {}", kind.kind, kind.fields));
        if kind.malformed > 0 {
            out.push_str(&format!(" ({} malformed)", kind.malformed));
        }
        out.push('\n');
    }
    out
}
