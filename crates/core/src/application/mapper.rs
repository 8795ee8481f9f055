// Request Mapper
//
// Pure translation of (action, parameters) into a CommandSpec. Nothing is
// spawned here and the shape of structured parameters is not inspected.

use crate::application::pipeline::Pipeline;
use crate::config::PipelineConfig;
use crate::domain::{CommandSpec, DomainError, OperationRequest, Parameters};

/// Map a request onto the pipeline's command template
///
/// # Errors
/// - DomainError::UnrecognizedAction if the action is outside the pipeline vocabulary
/// - DomainError::MissingParameter if the action needs a parameter that is absent
pub fn map_request<P: Pipeline>(
    config: &PipelineConfig,
    request: &OperationRequest,
) -> Result<(P::Action, CommandSpec), DomainError> {
    let action: P::Action = request.action.parse()?;

    let mut arguments = vec![config.script_for(P::KIND).display().to_string()];
    arguments.extend(P::arguments(action, &request.parameters)?);

    let spec = CommandSpec {
        executable: config.node_bin.clone(),
        arguments,
        working_dir: config.root.clone(),
        timeout: config.timeout_for(P::KIND),
    };

    Ok((action, spec))
}

/// Non-empty string parameter
pub(crate) fn required_str_param<'a>(
    params: &'a Parameters,
    name: &str,
) -> Result<&'a str, DomainError> {
    match params.get(name) {
        None | Some(serde_json::Value::Null) => {
            Err(DomainError::MissingParameter(name.to_string()))
        }
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => {
            Err(DomainError::MissingParameter(name.to_string()))
        }
        Some(serde_json::Value::String(s)) => Ok(s),
        Some(_) => Err(DomainError::InvalidParameter {
            name: name.to_string(),
            reason: "expected a string".to_string(),
        }),
    }
}

/// Optional structured parameter, serialized to compact JSON text
pub(crate) fn json_param(params: &Parameters, name: &str) -> Result<Option<String>, DomainError> {
    match params.get(name) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(value) => serde_json::to_string(value)
            .map(Some)
            .map_err(|e| DomainError::InvalidParameter {
                name: name.to_string(),
                reason: e.to_string(),
            }),
    }
}
