//! Report extraction
//!
//! Script stdout is scanned line by line against an ordered table of labeled
//! patterns. Every rule is tried on every line (no early exit), so for fields
//! written by several lines, status included, the last matching line wins.
//! Within one line, rules apply in table order. Nothing here can fail: text
//! that matches no rule simply leaves the record at its defaults.

mod analysis;
mod evolution;
mod validation;

pub use analysis::extract_analysis;
pub use evolution::extract_evolution;
pub use validation::extract_validation;

use regex::{Captures, Regex};
use tracing::trace;

/// Field setter invoked with the captures of a matching line and the line itself
pub type FieldSetter<R> = fn(&mut R, &Captures<'_>, &str);

/// One labeled entry of an extraction table
pub struct PatternRule<R> {
    pub label: &'static str,
    pub matcher: Regex,
    pub apply: FieldSetter<R>,
}

/// Ordered set of rules for one record type
pub struct ExtractionTable<R> {
    rules: Vec<PatternRule<R>>,
}

impl<R> ExtractionTable<R> {
    pub fn new(rules: Vec<PatternRule<R>>) -> Self {
        Self { rules }
    }

    /// Apply every rule to every line of `text`, mutating `record` in place
    pub fn apply(&self, text: &str, record: &mut R) {
        for line in text.lines() {
            for rule in &self.rules {
                if let Some(caps) = rule.matcher.captures(line) {
                    trace!(label = rule.label, line = %line, "extraction rule matched");
                    (rule.apply)(record, &caps, line);
                }
            }
        }
    }
}

/// Build a rule from a static pattern.
///
/// Patterns are compile-time literals covered by tests, so a bad one is a bug.
pub(crate) fn rule<R>(label: &'static str, pattern: &str, apply: FieldSetter<R>) -> PatternRule<R> {
    PatternRule {
        label,
        matcher: Regex::new(pattern).unwrap_or_else(|e| panic!("bad pattern for {label}: {e}")),
        apply,
    }
}

/// Set an integer field from capture group 1; keep the prior value otherwise
pub(crate) fn set_count(field: &mut u64, caps: &Captures<'_>) {
    if let Some(value) = caps.get(1).and_then(|m| m.as_str().parse::<u64>().ok()) {
        *field = value;
    }
}

/// Set a fractional field from capture group 1 (`,` accepted as decimal mark)
pub(crate) fn set_decimal(field: &mut f64, caps: &Captures<'_>) {
    if let Some(value) = caps
        .get(1)
        .and_then(|m| m.as_str().replace(',', ".").parse::<f64>().ok())
    {
        *field = value;
    }
}

/// Set a text field from capture group 1, trimmed; keep the prior value if absent
pub(crate) fn set_text(field: &mut String, caps: &Captures<'_>) {
    if let Some(m) = caps.get(1) {
        *field = m.as_str().trim().to_string();
    }
}
