//! HTTP Request/Response Types
//!
//! Field names follow the dashboard's JSON contract (camelCase requests).

use jarvis_core::application::pipeline::param;
use jarvis_core::domain::{MemoryEntry, OperationRequest};
use serde::{Deserialize, Serialize};

/// POST /api/analyse
#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    pub action: String,
    #[serde(rename = "dossierCible", default)]
    pub dossier_cible: Option<String>,
}

impl From<AnalysisRequest> for OperationRequest {
    fn from(req: AnalysisRequest) -> Self {
        let mut op = OperationRequest::new(req.action);
        if let Some(dossier) = req.dossier_cible {
            op = op.with_parameter(param::DOSSIER_CIBLE, dossier);
        }
        op
    }
}

/// POST /api/evolution
#[derive(Debug, Deserialize)]
pub struct EvolutionRequest {
    pub action: String,
    #[serde(default)]
    pub corrections: Option<serde_json::Value>,
}

impl From<EvolutionRequest> for OperationRequest {
    fn from(req: EvolutionRequest) -> Self {
        let mut op = OperationRequest::new(req.action);
        if let Some(corrections) = req.corrections {
            op = op.with_parameter(param::CORRECTIONS, corrections);
        }
        op
    }
}

/// POST /api/validation
#[derive(Debug, Deserialize)]
pub struct ValidationRequest {
    pub action: String,
    #[serde(rename = "testType", default)]
    pub test_type: Option<String>,
}

impl From<ValidationRequest> for OperationRequest {
    fn from(req: ValidationRequest) -> Self {
        let mut op = OperationRequest::new(req.action);
        if let Some(test_type) = req.test_type {
            op = op.with_parameter(param::TEST_TYPE, test_type);
        }
        op
    }
}

/// GET /api/health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub version: &'static str,
}

/// GET /api/memory
#[derive(Debug, Default, Deserialize)]
pub struct MemoryListQuery {
    pub limit: Option<usize>,
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryListResponse {
    pub success: bool,
    pub entries: Vec<MemoryEntry>,
}

/// POST /api/memory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryRecordResponse {
    pub success: bool,
    pub entry: MemoryEntry,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_analysis_request_maps_dossier_cible() {
        let req: AnalysisRequest =
            serde_json::from_value(json!({"action": "analyser", "dossierCible": "src"})).unwrap();
        let op = OperationRequest::from(req);
        assert_eq!(op.action, "analyser");
        assert_eq!(op.str_param("dossierCible"), Some("src"));
    }

    #[test]
    fn test_evolution_request_keeps_structured_corrections() {
        let req: EvolutionRequest = serde_json::from_value(json!({
            "action": "lancer-evolution",
            "corrections": [{"fichier": "a.js", "type": "perf"}]
        }))
        .unwrap();
        let op = OperationRequest::from(req);
        assert_eq!(
            op.parameters["corrections"],
            json!([{"fichier": "a.js", "type": "perf"}])
        );
    }

    #[test]
    fn test_validation_request_without_test_type() {
        let req: ValidationRequest =
            serde_json::from_value(json!({"action": "test-build"})).unwrap();
        let op = OperationRequest::from(req);
        assert!(op.parameters.is_empty());
    }
}
