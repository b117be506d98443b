//! Per-kind counts returned by a rewrite

use serde::Serialize;

use crate::transforms::AxisFlip;

/// Counts for one field kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldCount {
    pub kind: String,
    /// Whether the pass ran (the rotation pass needs the rotation toggle)
    pub active: bool,
    /// Field occurrences rewritten
    pub matches: usize,
    /// Records rewritten; equals `matches` except for keyframe blocks
    pub records: usize,
    /// Tag occurrences left untouched (malformed value or wrong blob length)
    pub skipped: usize,
}

impl FieldCount {
    pub fn inactive(kind: impl Into<String>) -> Self {
        Self { kind: kind.into(), active: false, matches: 0, records: 0, skipped: 0 }
    }
}

/// Counts for every field kind, in pass order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlipReport {
    pub flip: AxisFlip,
    pub counts: Vec<FieldCount>,
}

impl FlipReport {
    pub fn new(flip: AxisFlip) -> Self {
        Self { flip, counts: Vec::new() }
    }

    pub fn push(&mut self, count: FieldCount) {
        self.counts.push(count);
    }

    pub fn get(&self, kind: &str) -> Option<&FieldCount> {
        self.counts.iter().find(|c| c.kind == kind)
    }

    /// Records transformed for `kind`; zero for unknown or inactive kinds.
    pub fn count(&self, kind: &str) -> usize {
        self.get(kind).map_or(0, |c| c.records)
    }

    pub fn total_records(&self) -> usize {
        self.counts.iter().map(|c| c.records).sum()
    }

    pub fn total_skipped(&self) -> usize {
        self.counts.iter().map(|c| c.skipped).sum()
    }

    /// Merge another report's counts into this one (batch totals).
    pub fn absorb(&mut self, other: &FlipReport) {
        for count in &other.counts {
            match self.counts.iter_mut().find(|c| c.kind == count.kind) {
                Some(mine) => {
                    mine.active |= count.active;
                    mine.matches += count.matches;
                    mine.records += count.records;
                    mine.skipped += count.skipped;
                }
                None => self.counts.push(count.clone()),
            }
        }
    }
}

/// Format a report as the plain-text summary printed after a flip.
pub fn format_report_text(report: &FlipReport) -> String {
    let mut out = String::from("Summary:\n");
    let width = report.counts.iter().map(|c| c.kind.len()).max().unwrap_or(0);
    for count in &report.counts {
        let detail = if !count.active {
            " (not run, needs --rotation)".to_string()
        } else if count.records != count.matches {
            format!(" records in {} blocks", count.matches)
        } else {
            String::new()
        };
        out.push_str(&format!("  {:<width$}  {}{}", count.kind, count.records, detail));
        if count.skipped > 0 {
            out.push_str(&format!(", {} left untouched", count.skipped));
        }
        out.push('\n');
    }
    out
}
