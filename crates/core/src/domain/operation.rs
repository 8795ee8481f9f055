// Operation Domain Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Named parameters of an operation request (JSON values, may be nested)
pub type Parameters = serde_json::Map<String, serde_json::Value>;

/// The three maintenance pipelines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineKind {
    Analysis,
    Evolution,
    Validation,
}

impl PipelineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineKind::Analysis => "analysis",
            PipelineKind::Evolution => "evolution",
            PipelineKind::Validation => "validation",
        }
    }
}

impl fmt::Display for PipelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One invocation of a pipeline: an action name plus its parameters.
///
/// The action is kept as raw text here; it is only checked against the
/// pipeline vocabulary when the request is mapped to a command.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationRequest {
    pub action: String,
    #[serde(default)]
    pub parameters: Parameters,
}

impl OperationRequest {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            parameters: Parameters::new(),
        }
    }

    /// Attach a parameter (builder style)
    pub fn with_parameter(
        mut self,
        name: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// String parameter, if present and a string
    pub fn str_param(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).and_then(|v| v.as_str())
    }
}

/// Concrete external command derived from an [`OperationRequest`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub executable: String,
    /// Argument vector, passed to the process as-is (never through a shell)
    pub arguments: Vec<String>,
    pub working_dir: PathBuf,
    pub timeout: Duration,
}

impl CommandSpec {
    pub fn timeout_ms(&self) -> i64 {
        i64::try_from(self.timeout.as_millis()).unwrap_or(i64::MAX)
    }

    /// Key identifying the resource this command acts upon (root + script)
    pub fn resource_key(&self) -> String {
        let target = self.arguments.first().map(String::as_str).unwrap_or("");
        format!("{}::{}", self.working_dir.display(), target)
    }
}
