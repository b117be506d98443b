//! Rewrite driver
//!
//! Runs one pass per field kind, in registry order. Each pass scans the current
//! text, stages a replacement for every value it can transform, then splices
//! all of them in a single left-to-right copy. The next pass sees the spliced
//! text. Field tags are disjoint, so passes never touch each other's spans.
//!
//! # Module Structure
//!
//! - [`registry`] - Field kinds and the transform bound to each
//! - [`report`] - Per-kind counts
//! - [`preview`] - Before/after samples without rewriting

pub mod preview;
pub mod registry;
pub mod report;

use std::ops::Range;

use tracing::{debug, info};

use crate::hexfloat::HexFloatError;
use crate::locator::scan;
use crate::transforms::AxisFlip;

pub use preview::{format_preview_text, KindPreview, PreviewReport, PreviewSample};
pub use registry::{FieldAction, FieldRegistry, FieldRule, Rewrite, STANDARD_KINDS};
pub use report::{format_report_text, FieldCount, FlipReport};

/// Verbose mode logs this many matches per kind before going quiet
const VERBOSE_SAMPLES: usize = 10;

/// Verbose mode logs a progress line every this many matches
const PROGRESS_INTERVAL: usize = 100;

/// Errors that abort a rewrite
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum RewriteError {
    /// A located hex value failed to decode. The locator only captures hex
    /// digits, so this is a locator/codec mismatch rather than bad data.
    #[error("{kind} field at byte {offset}: {source}")]
    Codec { kind: String, offset: usize, source: HexFloatError },
}

/// Options for one rewrite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlipOptions {
    pub flip: AxisFlip,
    /// Log per-match diagnostics; never changes the output text
    pub verbose: bool,
}

impl FlipOptions {
    pub fn new(flip: AxisFlip) -> Self {
        Self { flip, verbose: false }
    }
}

/// Rewritten text plus counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutcome {
    pub text: String,
    pub report: FlipReport,
}

/// A staged value replacement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement<'t> {
    /// Byte range of the value in the scanned text
    pub range: Range<usize>,
    pub before: &'t str,
    pub after: String,
}

/// Everything one pass found, before splicing
#[derive(Debug, Clone)]
pub(crate) struct StagedPass<'t> {
    pub replacements: Vec<Replacement<'t>>,
    pub count: FieldCount,
}

/// Applies a registry of field rules with one flip selection
#[derive(Debug, Clone)]
pub struct Rewriter {
    registry: FieldRegistry,
    options: FlipOptions,
}

impl Rewriter {
    pub fn new(registry: FieldRegistry, options: FlipOptions) -> Self {
        Self { registry, options }
    }

    /// Standard field kinds.
    pub fn standard(options: FlipOptions) -> Self {
        Self::new(FieldRegistry::standard(), options)
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    pub fn options(&self) -> &FlipOptions {
        &self.options
    }

    /// Rewrite every known field in `text`.
    pub fn rewrite(&self, text: &str) -> Result<RewriteOutcome, RewriteError> {
        let mut current = text.to_string();
        let mut report = FlipReport::new(self.options.flip);

        for rule in self.registry.iter() {
            let (count, spliced) = {
                let pass = self.stage(&current, rule)?;
                let spliced = (!pass.replacements.is_empty())
                    .then(|| splice(&current, &pass.replacements));
                (pass.count, spliced)
            };
            debug!(
                kind = %rule.kind.name,
                active = count.active,
                records = count.records,
                skipped = count.skipped,
                "pass complete"
            );
            report.push(count);
            if let Some(next) = spliced {
                current = next;
            }
        }

        Ok(RewriteOutcome { text: current, report })
    }

    /// Scan one kind and stage its replacements.
    pub(crate) fn stage<'t>(
        &self,
        text: &'t str,
        rule: &FieldRule,
    ) -> Result<StagedPass<'t>, RewriteError> {
        let flip = &self.options.flip;
        if !rule.is_active(flip) {
            return Ok(StagedPass {
                replacements: Vec::new(),
                count: FieldCount::inactive(rule.kind.name.clone()),
            });
        }

        let mut replacements = Vec::new();
        let mut records = 0;
        let mut rejected = 0;
        let mut matches = scan(text, &rule.kind);

        for found in matches.by_ref() {
            let rewrite = rule.action.apply(&found.value, flip).map_err(|source| {
                RewriteError::Codec {
                    kind: rule.kind.name.clone(),
                    offset: found.span.start,
                    source,
                }
            })?;
            let Some(rewrite) = rewrite else {
                rejected += 1;
                debug!(
                    kind = %rule.kind.name,
                    offset = found.span.start,
                    len = found.raw.len(),
                    "value left untouched"
                );
                continue;
            };

            records += rewrite.records;
            if self.options.verbose {
                log_match(&rule.kind.name, replacements.len() + 1, found.raw, &rewrite.text);
            }
            replacements.push(Replacement {
                range: found.value_span,
                before: found.raw,
                after: rewrite.text,
            });
        }

        let count = FieldCount {
            kind: rule.kind.name.clone(),
            active: true,
            matches: replacements.len(),
            records,
            skipped: matches.malformed() + rejected,
        };
        Ok(StagedPass { replacements, count })
    }
}

fn log_match(kind: &str, n: usize, before: &str, after: &str) {
    if n <= VERBOSE_SAMPLES {
        info!("{} #{}: {} -> {}", kind, n, before, after);
    } else if n % PROGRESS_INTERVAL == 0 {
        info!("{}: {} fields processed", kind, n);
    }
}

/// Build a new text with every staged range replaced.
///
/// `replacements` must be sorted by position and must not overlap.
pub fn splice(text: &str, replacements: &[Replacement<'_>]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for r in replacements {
        out.push_str(&text[last..r.range.start]);
        out.push_str(&r.after);
        last = r.range.end;
    }
    out.push_str(&text[last..]);
    out
}

/// Mirror every standard field of a world document.
///
/// # Examples
///
/// ```
/// use zenflip::rewrite::{flip_document, FlipOptions};
/// use zenflip::transforms::AxisFlip;
///
/// let outcome = flip_document("trafoOSToWSPos=vec3:10.0 -5.0 2.0", &FlipOptions::new(AxisFlip::X)).unwrap();
/// assert_eq!(outcome.text, "trafoOSToWSPos=vec3:-10 -5 2");
/// assert_eq!(outcome.report.count("object-position"), 1);
/// ```
pub fn flip_document(text: &str, options: &FlipOptions) -> Result<RewriteOutcome, RewriteError> {
    Rewriter::standard(*options).rewrite(text)
}
