// Validation report extraction

use super::{rule, set_decimal, set_text, ExtractionTable};
use crate::domain::{ValidationReport, ValidationStatus, UNKNOWN_TEST_TYPE};
use regex::Captures;
use std::sync::LazyLock;

static VALIDATION_TABLE: LazyLock<ExtractionTable<ValidationReport>> = LazyLock::new(|| {
    ExtractionTable::new(vec![
        rule("duree", r"(?i)dur[ée]e\s*:\s*(\d+(?:[.,]\d+)?)?", duree),
        rule("details", r"^\s*D[ée]tails\s*:\s*(.*)$", details),
        // Success before failure: a line carrying both reads as a failure
        rule("reussi", r"réussi|PASSED|SUCCÈS", reussi),
        rule("echec", r"échoué|ÉCHEC|FAILED|ERREUR|ERROR", echec),
    ])
});

fn duree(r: &mut ValidationReport, caps: &Captures<'_>, _: &str) {
    set_decimal(&mut r.duree, caps);
}

fn details(r: &mut ValidationReport, caps: &Captures<'_>, _: &str) {
    set_text(&mut r.details, caps);
}

fn reussi(r: &mut ValidationReport, _: &Captures<'_>, line: &str) {
    r.statut = ValidationStatus::Reussi;
    r.resultat = line.trim().to_string();
}

fn echec(r: &mut ValidationReport, _: &Captures<'_>, line: &str) {
    r.statut = ValidationStatus::Echec;
    r.resultat = line.trim().to_string();
}

/// Build the validation record from the script's stdout.
///
/// `test_type` comes from the caller, not from the text; `None` and blank
/// values are reported as `"unknown"`.
pub fn extract_validation(
    stdout: &str,
    test_type: Option<&str>,
    completed_at: String,
) -> ValidationReport {
    let mut report = ValidationReport {
        test_type: test_type
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(UNKNOWN_TEST_TYPE)
            .to_string(),
        ..Default::default()
    };
    VALIDATION_TABLE.apply(stdout, &mut report);
    report.timestamp = completed_at;
    report
}
