// Pipeline configuration (built by the daemon, read-only afterwards)

use crate::application::constants::{
    DEFAULT_ANALYSIS_SCRIPT, DEFAULT_ANALYSIS_TIMEOUT, DEFAULT_EVOLUTION_SCRIPT,
    DEFAULT_EVOLUTION_TIMEOUT, DEFAULT_NODE_BIN, DEFAULT_VALIDATION_SCRIPT,
    DEFAULT_VALIDATION_TIMEOUT,
};
use crate::domain::PipelineKind;
use std::path::PathBuf;
use std::time::Duration;

/// Where and how the pipeline scripts are run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Host application root; working directory of every child process
    pub root: PathBuf,
    /// Interpreter used for all scripts
    pub node_bin: String,
    pub analysis_script: PathBuf,
    pub evolution_script: PathBuf,
    pub validation_script: PathBuf,
    pub analysis_timeout: Duration,
    pub evolution_timeout: Duration,
    pub validation_timeout: Duration,
    /// Serialize mutating actions per script (off: original behavior)
    pub serialize_mutations: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            node_bin: DEFAULT_NODE_BIN.to_string(),
            analysis_script: PathBuf::from(DEFAULT_ANALYSIS_SCRIPT),
            evolution_script: PathBuf::from(DEFAULT_EVOLUTION_SCRIPT),
            validation_script: PathBuf::from(DEFAULT_VALIDATION_SCRIPT),
            analysis_timeout: DEFAULT_ANALYSIS_TIMEOUT,
            evolution_timeout: DEFAULT_EVOLUTION_TIMEOUT,
            validation_timeout: DEFAULT_VALIDATION_TIMEOUT,
            serialize_mutations: false,
        }
    }
}

impl PipelineConfig {
    pub fn script_for(&self, kind: PipelineKind) -> &PathBuf {
        match kind {
            PipelineKind::Analysis => &self.analysis_script,
            PipelineKind::Evolution => &self.evolution_script,
            PipelineKind::Validation => &self.validation_script,
        }
    }

    pub fn timeout_for(&self, kind: PipelineKind) -> Duration {
        match kind {
            PipelineKind::Analysis => self.analysis_timeout,
            PipelineKind::Evolution => self.evolution_timeout,
            PipelineKind::Validation => self.validation_timeout,
        }
    }
}
