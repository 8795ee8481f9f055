// Pipeline definitions
//
// A pipeline ties together an action vocabulary, the argument template of
// each action and the extraction table of its report. The three pipelines
// share everything else (mapping, running, envelope).

use crate::application::extract::{extract_analysis, extract_evolution, extract_validation};
use crate::application::mapper::{json_param, required_str_param};
use crate::domain::{
    AnalysisAction, AnalysisReport, DomainError, EvolutionAction, EvolutionReport, Parameters,
    PipelineKind, ValidationAction, ValidationReport,
};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Request parameter names (wire contract)
pub mod param {
    pub const DOSSIER_CIBLE: &str = "dossierCible";
    pub const CORRECTIONS: &str = "corrections";
    pub const TEST_TYPE: &str = "testType";
}

pub trait Pipeline: Send + Sync + 'static {
    type Action: Copy + fmt::Display + FromStr<Err = DomainError> + Send + Sync;
    type Report: Serialize + fmt::Debug + Clone + Send;

    const KIND: PipelineKind;

    /// Arguments following the script path
    fn arguments(action: Self::Action, params: &Parameters) -> Result<Vec<String>, DomainError>;

    /// Build the report from stdout
    fn extract(stdout: &str, params: &Parameters, completed_at: String) -> Self::Report;

    /// Whether the action changes the project tree (advisory locking)
    fn mutates(_action: Self::Action) -> bool {
        false
    }
}

/// Microscopic code analysis
pub struct Analysis;

/// Project evolution (backup, apply corrections, rollback)
pub struct Evolution;

/// Post-build validation
pub struct Validation;

impl Pipeline for Analysis {
    type Action = AnalysisAction;
    type Report = AnalysisReport;

    const KIND: PipelineKind = PipelineKind::Analysis;

    fn arguments(action: AnalysisAction, params: &Parameters) -> Result<Vec<String>, DomainError> {
        match action {
            AnalysisAction::Analyser => Ok(vec![
                action.to_string(),
                required_str_param(params, param::DOSSIER_CIBLE)?.to_string(),
            ]),
            AnalysisAction::AnalyserTout => Ok(vec![action.to_string()]),
        }
    }

    fn extract(stdout: &str, _params: &Parameters, completed_at: String) -> AnalysisReport {
        extract_analysis(stdout, completed_at)
    }
}

impl Pipeline for Evolution {
    type Action = EvolutionAction;
    type Report = EvolutionReport;

    const KIND: PipelineKind = PipelineKind::Evolution;

    fn arguments(action: EvolutionAction, params: &Parameters) -> Result<Vec<String>, DomainError> {
        let mut args = vec![action.to_string()];
        if action == EvolutionAction::LancerEvolution {
            // Corrections travel as one JSON argument; the script owns their shape
            if let Some(corrections) = json_param(params, param::CORRECTIONS)? {
                args.push(corrections);
            }
        }
        Ok(args)
    }

    fn extract(stdout: &str, _params: &Parameters, completed_at: String) -> EvolutionReport {
        extract_evolution(stdout, completed_at)
    }

    fn mutates(_action: EvolutionAction) -> bool {
        true
    }
}

impl Pipeline for Validation {
    type Action = ValidationAction;
    type Report = ValidationReport;

    const KIND: PipelineKind = PipelineKind::Validation;

    fn arguments(
        action: ValidationAction,
        _params: &Parameters,
    ) -> Result<Vec<String>, DomainError> {
        Ok(vec![action.to_string()])
    }

    fn extract(stdout: &str, params: &Parameters, completed_at: String) -> ValidationReport {
        let test_type = params.get(param::TEST_TYPE).and_then(|v| v.as_str());
        extract_validation(stdout, test_type, completed_at)
    }

    fn mutates(action: ValidationAction) -> bool {
        action == ValidationAction::TestRollback
    }
}
