// Response Assembler
//
// `success` says whether the pipeline ran to completion, NOT whether the
// script reported a good outcome: a report with `statut: "erreur"` is still a
// completed run.

use crate::error::AppError;
use serde::{Deserialize, Serialize};

/// Captured output of a completed run, with its extracted record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome<R> {
    pub resultats: R,
    /// Raw stdout
    pub logs: String,
    /// Raw stderr
    pub erreurs: String,
}

/// Outward-facing response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Envelope<R> {
    Completed {
        success: bool,
        resultats: R,
        logs: String,
        erreurs: String,
    },
    Failed {
        success: bool,
        error: String,
    },
}

impl<R> Envelope<R> {
    pub fn completed(outcome: Outcome<R>) -> Self {
        Envelope::Completed {
            success: true,
            resultats: outcome.resultats,
            logs: outcome.logs,
            erreurs: outcome.erreurs,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Envelope::Failed {
            success: false,
            error: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Envelope::Completed { .. })
    }
}

impl<R> From<Result<Outcome<R>, AppError>> for Envelope<R> {
    fn from(result: Result<Outcome<R>, AppError>) -> Self {
        match result {
            Ok(outcome) => Envelope::completed(outcome),
            Err(err) => Envelope::failed(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AnalysisReport, DomainError, RunStatus};
    use serde_json::json;

    #[test]
    fn test_business_error_is_still_a_success_envelope() {
        let outcome = Outcome {
            resultats: AnalysisReport {
                statut: RunStatus::Erreur,
                timestamp: "t".to_string(),
                ..Default::default()
            },
            logs: "ERREUR: fichier illisible".to_string(),
            erreurs: String::new(),
        };
        let envelope = Envelope::completed(outcome);
        assert!(envelope.is_success());

        let body = serde_json::to_value(&envelope).unwrap();
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["resultats"]["statut"], json!("erreur"));
        assert_eq!(body["logs"], json!("ERREUR: fichier illisible"));
        assert_eq!(body["erreurs"], json!(""));
    }

    #[test]
    fn test_failure_envelope_shape() {
        let result: Result<Outcome<AnalysisReport>, AppError> =
            Err(DomainError::MissingParameter("dossierCible".to_string()).into());
        let envelope = Envelope::from(result);
        assert!(!envelope.is_success());
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"success": false, "error": "Missing parameter: dossierCible"})
        );
    }
}
