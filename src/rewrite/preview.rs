//! Before/after samples for a flip, without writing anything
//!
//! Each kind is staged against the original text, so the samples show what
//! a real rewrite would put in place of each value.

use serde::Serialize;

use super::report::FieldCount;
use super::{RewriteError, Rewriter};

/// Values longer than this are shortened in text output
const PREVIEW_WIDTH: usize = 48;

/// One value as it is now and as a flip would write it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewSample {
    /// Byte offset of the value in the source text
    pub offset: usize,
    pub before: String,
    pub after: String,
}

/// Samples and counts for one field kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KindPreview {
    pub count: FieldCount,
    pub samples: Vec<PreviewSample>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewReport {
    pub kinds: Vec<KindPreview>,
}

impl PreviewReport {
    pub fn get(&self, kind: &str) -> Option<&KindPreview> {
        self.kinds.iter().find(|k| k.count.kind == kind)
    }
}

impl Rewriter {
    /// Collect up to `samples` replacements per kind.
    pub fn preview(&self, text: &str, samples: usize) -> Result<PreviewReport, RewriteError> {
        let mut kinds = Vec::with_capacity(self.registry().len());
        for rule in self.registry().iter() {
            let pass = self.stage(text, rule)?;
            let samples = pass
                .replacements
                .iter()
                .take(samples)
                .map(|r| PreviewSample {
                    offset: r.range.start,
                    before: r.before.to_string(),
                    after: r.after.clone(),
                })
                .collect();
            kinds.push(KindPreview { count: pass.count, samples });
        }
        Ok(PreviewReport { kinds })
    }
}

fn shorten(value: &str) -> String {
    if value.chars().count() <= PREVIEW_WIDTH {
        return value.to_string();
    }
    let head: String = value.chars().take(PREVIEW_WIDTH - 3).collect();
    format!("{}...", head)
}

/// Format a preview for the terminal.
pub fn format_preview_text(report: &PreviewReport) -> String {
    let mut out = String::new();
    for kind in &report.kinds {
        let count = &kind.count;
        if !count.active {
            out.push_str(&format!("{}: not run, needs --rotation\n", count.kind));
            continue;
        }
        out.push_str(&format!("{}: {} fields", count.kind, count.matches));
        if count.records != count.matches {
            out.push_str(&format!(", {} records", count.records));
        }
        if count.skipped > 0 {
            out.push_str(&format!(", {} left untouched", count.skipped));
        }
        out.push('\n');
        for sample in &kind.samples {
            out.push_str(&format!("  @{}\n", sample.offset));
            out.push_str(&format!("    - {}\n", shorten(&sample.before)));
            out.push_str(&format!("    + {}\n", shorten(&sample.after)));
        }
    }
    out
}
