// Result Records
//
// One fixed schema per pipeline. Field names are part of the HTTP contract
// consumed by the dashboard, hence the French snake_case names.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Test type reported when the caller did not supply one
pub const UNKNOWN_TEST_TYPE: &str = "unknown";

/// Business status of an analysis or evolution run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    #[default]
    Termine,
    Erreur,
}

/// Business status of a validation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    #[default]
    Reussi,
    Echec,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Termine => write!(f, "termine"),
            RunStatus::Erreur => write!(f, "erreur"),
        }
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationStatus::Reussi => write!(f, "reussi"),
            ValidationStatus::Echec => write!(f, "echec"),
        }
    }
}

/// Outcome of the microscopic code analysis script
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub fichiers_analyses: u64,
    pub corrections_detectees: u64,
    pub score_utilite: f64,
    pub statut: RunStatus,
    /// ISO-8601, assigned at extraction time
    pub timestamp: String,
}

/// Outcome of the project evolution script
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvolutionReport {
    pub corrections_integrees: u64,
    pub corrections_reportees: u64,
    pub tests_reussis: u64,
    pub tests_echoues: u64,
    /// Percentage
    pub amelioration_performance: f64,
    pub bugs_corriges: u64,
    pub statut: RunStatus,
    /// Backup location reported by the script, if any
    pub sauvegarde: Option<String>,
    pub timestamp: String,
}

/// Outcome of the post-build validation script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub statut: ValidationStatus,
    /// Seconds
    pub duree: f64,
    pub resultat: String,
    pub details: String,
    pub test_type: String,
    pub timestamp: String,
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self {
            statut: ValidationStatus::Reussi,
            duree: 0.0,
            resultat: String::new(),
            details: String::new(),
            test_type: UNKNOWN_TEST_TYPE.to_string(),
            timestamp: String::new(),
        }
    }
}
