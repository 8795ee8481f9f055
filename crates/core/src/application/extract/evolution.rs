// Evolution report extraction

use super::{rule, set_count, set_decimal, ExtractionTable};
use crate::domain::{EvolutionReport, RunStatus};
use regex::Captures;
use std::sync::LazyLock;

static EVOLUTION_TABLE: LazyLock<ExtractionTable<EvolutionReport>> = LazyLock::new(|| {
    ExtractionTable::new(vec![
        rule(
            "corrections_integrees",
            r"(?i)corrections int[ée]gr[ée]es\s*:\s*(\d+)?",
            corrections_integrees,
        ),
        rule(
            "corrections_reportees",
            r"(?i)corrections (?:report[ée]es|diff[ée]r[ée]es)\s*:\s*(\d+)?",
            corrections_reportees,
        ),
        rule("tests_reussis", r"(?i)tests r[ée]ussis\s*:\s*(\d+)?", tests_reussis),
        rule("tests_echoues", r"(?i)tests [ée]chou[ée]s\s*:\s*(\d+)?", tests_echoues),
        rule(
            "amelioration_performance",
            r"(?i)am[ée]lioration (?:de (?:la )?)?performances?\s*:\s*([+-]?\d+(?:[.,]\d+)?)?",
            amelioration_performance,
        ),
        rule("bugs_corriges", r"(?i)bugs corrig[ée]s\s*:\s*(\d+)?", bugs_corriges),
        rule("sauvegarde", r"(?i)sauvegarde cr[ée]+\s*:\s*(.*\S)?", sauvegarde),
        rule("succes", r"SUCCÈS|SUCCESS|termin[ée]e avec succ[èe]s", succes),
        rule("erreur", r"ERREUR|ÉCHEC|FAILED|ERROR", erreur),
    ])
});

fn corrections_integrees(r: &mut EvolutionReport, caps: &Captures<'_>, _: &str) {
    set_count(&mut r.corrections_integrees, caps);
}

fn corrections_reportees(r: &mut EvolutionReport, caps: &Captures<'_>, _: &str) {
    set_count(&mut r.corrections_reportees, caps);
}

fn tests_reussis(r: &mut EvolutionReport, caps: &Captures<'_>, _: &str) {
    set_count(&mut r.tests_reussis, caps);
}

fn tests_echoues(r: &mut EvolutionReport, caps: &Captures<'_>, _: &str) {
    set_count(&mut r.tests_echoues, caps);
}

fn amelioration_performance(r: &mut EvolutionReport, caps: &Captures<'_>, _: &str) {
    set_decimal(&mut r.amelioration_performance, caps);
}

fn bugs_corriges(r: &mut EvolutionReport, caps: &Captures<'_>, _: &str) {
    set_count(&mut r.bugs_corriges, caps);
}

fn sauvegarde(r: &mut EvolutionReport, caps: &Captures<'_>, _: &str) {
    if let Some(path) = caps.get(1) {
        r.sauvegarde = Some(path.as_str().trim().to_string());
    }
}

fn succes(r: &mut EvolutionReport, _: &Captures<'_>, _: &str) {
    r.statut = RunStatus::Termine;
}

fn erreur(r: &mut EvolutionReport, _: &Captures<'_>, _: &str) {
    r.statut = RunStatus::Erreur;
}

/// Build the evolution record from the script's stdout
pub fn extract_evolution(stdout: &str, completed_at: String) -> EvolutionReport {
    let mut report = EvolutionReport::default();
    EVOLUTION_TABLE.apply(stdout, &mut report);
    report.timestamp = completed_at;
    report
}
