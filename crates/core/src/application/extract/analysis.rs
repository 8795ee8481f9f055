// Analysis report extraction

use super::{rule, set_count, set_decimal, ExtractionTable};
use crate::domain::{AnalysisReport, RunStatus};
use regex::Captures;
use std::sync::LazyLock;

static ANALYSIS_TABLE: LazyLock<ExtractionTable<AnalysisReport>> = LazyLock::new(|| {
    ExtractionTable::new(vec![
        rule(
            "fichiers_analyses",
            r"(?i)fichiers analys[ée]s\s*:\s*(\d+)?",
            fichiers_analyses,
        ),
        rule(
            "corrections_detectees",
            r"(?i)corrections d[ée]tect[ée]es\s*:\s*(\d+)?",
            corrections_detectees,
        ),
        rule(
            "score_utilite",
            r"(?i)score (?:d'|de )?utilit[ée]\s*:\s*(\d+(?:[.,]\d+)?)?",
            score_utilite,
        ),
        // Success before failure: a line carrying both reads as a failure
        rule("succes", r"SUCCÈS|SUCCESS|termin[ée]e avec succ[èe]s", succes),
        rule("erreur", r"ERREUR|ÉCHEC|FAILED|ERROR", erreur),
    ])
});

fn fichiers_analyses(r: &mut AnalysisReport, caps: &Captures<'_>, _: &str) {
    set_count(&mut r.fichiers_analyses, caps);
}

fn corrections_detectees(r: &mut AnalysisReport, caps: &Captures<'_>, _: &str) {
    set_count(&mut r.corrections_detectees, caps);
}

fn score_utilite(r: &mut AnalysisReport, caps: &Captures<'_>, _: &str) {
    set_decimal(&mut r.score_utilite, caps);
}

fn succes(r: &mut AnalysisReport, _: &Captures<'_>, _: &str) {
    r.statut = RunStatus::Termine;
}

fn erreur(r: &mut AnalysisReport, _: &Captures<'_>, _: &str) {
    r.statut = RunStatus::Erreur;
}

/// Build the analysis record from the script's stdout
pub fn extract_analysis(stdout: &str, completed_at: String) -> AnalysisReport {
    let mut report = AnalysisReport::default();
    ANALYSIS_TABLE.apply(stdout, &mut report);
    report.timestamp = completed_at;
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    const TS: &str = "2026-10-19T08:00:00.000Z";

    #[test]
    fn test_typical_output() {
        let stdout = "\
🔬 Analyse microscopique de src/
Total fichiers analysés: 42
Corrections détectées: 7
Score utilité: 7.5
Analyse terminée avec succès
";
        let report = extract_analysis(stdout, TS.to_string());
        assert_eq!(report.fichiers_analyses, 42);
        assert_eq!(report.corrections_detectees, 7);
        assert_eq!(report.score_utilite, 7.5);
        assert_eq!(report.statut, RunStatus::Termine);
        assert_eq!(report.timestamp, TS);
    }

    #[test]
    fn test_integer_score() {
        let report = extract_analysis("Score utilité: 8", TS.to_string());
        assert_eq!(report.score_utilite, 8.0);
    }

    #[test]
    fn test_line_without_number_keeps_previous_value() {
        let stdout = "Total fichiers analysés: 42\nTotal fichiers analysés: inconnu";
        let report = extract_analysis(stdout, TS.to_string());
        assert_eq!(report.fichiers_analyses, 42);
    }

    #[test]
    fn test_error_marker_sets_erreur() {
        let stdout = "Total fichiers analysés: 3\nERREUR: impossible de lire src/x.js";
        let report = extract_analysis(stdout, TS.to_string());
        assert_eq!(report.statut, RunStatus::Erreur);
        assert_eq!(report.fichiers_analyses, 3);
    }

    #[test]
    fn test_last_status_line_wins() {
        let failed_then_ok = "ERROR: first pass\nretrying\nSUCCESS";
        assert_eq!(
            extract_analysis(failed_then_ok, TS.to_string()).statut,
            RunStatus::Termine
        );

        let ok_then_failed = "SUCCESS\nretrying\nERROR: second pass";
        assert_eq!(
            extract_analysis(ok_then_failed, TS.to_string()).statut,
            RunStatus::Erreur
        );
    }

    #[test]
    fn test_both_markers_on_one_line_is_failure() {
        let report = extract_analysis("SUCCESS partiel, ERROR sur 2 fichiers", TS.to_string());
        assert_eq!(report.statut, RunStatus::Erreur);
    }

    #[test]
    fn test_failure_tokens_are_case_sensitive() {
        let report = extract_analysis("aucune erreur trouvée", TS.to_string());
        assert_eq!(report.statut, RunStatus::Termine);
    }

    #[test]
    fn test_empty_output_degrades_to_defaults() {
        let report = extract_analysis("", TS.to_string());
        assert_eq!(
            report,
            AnalysisReport {
                timestamp: TS.to_string(),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let stdout = "Total fichiers analysés: 42\nScore utilité: 7.5\nERREUR";
        let first = extract_analysis(stdout, "a".to_string());
        let second = extract_analysis(stdout, "b".to_string());
        assert_eq!(
            AnalysisReport {
                timestamp: String::new(),
                ..first
            },
            AnalysisReport {
                timestamp: String::new(),
                ..second
            }
        );
    }
}
