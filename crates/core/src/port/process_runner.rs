// Process Runner Port
// Abstraction for running an external command to completion (or timeout)

use crate::domain::CommandSpec;
use async_trait::async_trait;
use thiserror::Error;

/// Captured outcome of one child process.
///
/// A non-zero exit code is NOT an error at this level: failing scripts are
/// expected to say so on stdout, where the report extractor looks for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionResult {
    pub stdout: String,
    pub stderr: String,
    /// The timeout fired and the process was terminated; output is partial
    pub timed_out: bool,
    pub exit_code: Option<i32>,
    pub duration_ms: i64,
}

/// Execution errors
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Spawn failed: {0}")]
    SpawnFailed(String),

    #[error("Process timeout after {0}ms")]
    Timeout(i64),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Process Runner trait
///
/// Implementations:
/// - SubprocessRunner (infra-system): spawns an OS process
/// - MockProcessRunner: scripted output for tests
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run the command and capture its output
    ///
    /// # Errors
    /// - ExecutionError::SpawnFailed if the process cannot be started
    /// - ExecutionError::IoError if waiting on the process fails
    ///
    /// A timeout is reported through `ExecutionResult::timed_out`, not as an error.
    async fn run(&self, spec: &CommandSpec) -> Result<ExecutionResult, ExecutionError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Mock runner behavior
    #[derive(Debug, Clone)]
    pub enum MockBehavior {
        /// Complete with the given stdout / stderr
        Output { stdout: String, stderr: String },
        /// Fail to spawn with message
        SpawnFail(String),
        /// Time out after printing the given partial stdout
        Timeout { partial_stdout: String },
    }

    /// Mock Process Runner for testing
    pub struct MockProcessRunner {
        behavior: Arc<Mutex<MockBehavior>>,
        calls: Arc<Mutex<Vec<CommandSpec>>>,
    }

    impl MockProcessRunner {
        pub fn new(behavior: MockBehavior) -> Self {
            Self {
                behavior: Arc::new(Mutex::new(behavior)),
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }
        pub fn with_stdout(stdout: impl Into<String>) -> Self {
            Self::new(MockBehavior::Output {
                stdout: stdout.into(),
                stderr: String::new(),
            })
        }
        pub fn with_output(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
            Self::new(MockBehavior::Output {
                stdout: stdout.into(),
                stderr: stderr.into(),
            })
        }
        pub fn spawn_failing(message: impl Into<String>) -> Self {
            Self::new(MockBehavior::SpawnFail(message.into()))
        }
        pub fn timing_out(partial_stdout: impl Into<String>) -> Self {
            Self::new(MockBehavior::Timeout {
                partial_stdout: partial_stdout.into(),
            })
        }
        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
        pub fn last_spec(&self) -> Option<CommandSpec> {
            self.calls.lock().unwrap().last().cloned()
        }
    }

    #[async_trait]
    impl ProcessRunner for MockProcessRunner {
        async fn run(&self, spec: &CommandSpec) -> Result<ExecutionResult, ExecutionError> {
            self.calls.lock().unwrap().push(spec.clone());

            let behavior = self.behavior.lock().unwrap().clone();

            match behavior {
                MockBehavior::Output { stdout, stderr } => Ok(ExecutionResult {
                    stdout,
                    stderr,
                    timed_out: false,
                    exit_code: Some(0),
                    duration_ms: 10,
                }),
                MockBehavior::SpawnFail(msg) => Err(ExecutionError::SpawnFailed(msg)),
                MockBehavior::Timeout { partial_stdout } => Ok(ExecutionResult {
                    stdout: partial_stdout,
                    stderr: String::new(),
                    timed_out: true,
                    exit_code: None,
                    duration_ms: spec.timeout_ms(),
                }),
            }
        }
    }
}
