// Pipeline action vocabularies
//
// Each pipeline accepts a closed set of action names. Parsing is the only way
// to obtain an action, so an unknown name never reaches the process runner.

use super::error::DomainError;
use std::fmt;
use std::str::FromStr;

/// Actions of the analysis pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisAction {
    /// Analyse a single target directory (`dossierCible`)
    Analyser,
    /// Analyse the whole project
    AnalyserTout,
}

impl AnalysisAction {
    pub const ALL: [AnalysisAction; 2] = [AnalysisAction::Analyser, AnalysisAction::AnalyserTout];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisAction::Analyser => "analyser",
            AnalysisAction::AnalyserTout => "analyser-tout",
        }
    }
}

/// Actions of the evolution pipeline (all of them mutate the project tree)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvolutionAction {
    CreerSauvegarde,
    LancerEvolution,
    Rollback,
}

impl EvolutionAction {
    pub const ALL: [EvolutionAction; 3] = [
        EvolutionAction::CreerSauvegarde,
        EvolutionAction::LancerEvolution,
        EvolutionAction::Rollback,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EvolutionAction::CreerSauvegarde => "creer-sauvegarde",
            EvolutionAction::LancerEvolution => "lancer-evolution",
            EvolutionAction::Rollback => "rollback",
        }
    }
}

/// Actions of the post-build validation pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationAction {
    TestBuild,
    TestFonctionnel,
    TestPerformance,
    TestCompatibilite,
    TestRegression,
    TestStress,
    TestRollback,
    ValidationComplete,
}

impl ValidationAction {
    pub const ALL: [ValidationAction; 8] = [
        ValidationAction::TestBuild,
        ValidationAction::TestFonctionnel,
        ValidationAction::TestPerformance,
        ValidationAction::TestCompatibilite,
        ValidationAction::TestRegression,
        ValidationAction::TestStress,
        ValidationAction::TestRollback,
        ValidationAction::ValidationComplete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationAction::TestBuild => "test-build",
            ValidationAction::TestFonctionnel => "test-fonctionnel",
            ValidationAction::TestPerformance => "test-performance",
            ValidationAction::TestCompatibilite => "test-compatibilite",
            ValidationAction::TestRegression => "test-regression",
            ValidationAction::TestStress => "test-stress",
            ValidationAction::TestRollback => "test-rollback",
            ValidationAction::ValidationComplete => "validation-complete",
        }
    }
}

impl FromStr for AnalysisAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| DomainError::UnrecognizedAction {
                pipeline: "analysis",
                action: s.to_string(),
            })
    }
}

impl FromStr for EvolutionAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| DomainError::UnrecognizedAction {
                pipeline: "evolution",
                action: s.to_string(),
            })
    }
}

impl FromStr for ValidationAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| DomainError::UnrecognizedAction {
                pipeline: "validation",
                action: s.to_string(),
            })
    }
}

impl fmt::Display for AnalysisAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for EvolutionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ValidationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
