// Operation Service - runs one pipeline invocation end to end
//
// Idle -> Mapping -> Spawning/Running -> Captured -> Extracting -> Responded
// with Failed reachable from Mapping, Spawning and Running (timeout).

use crate::application::envelope::Outcome;
use crate::application::lock::ResourceLocks;
use crate::application::mapper::map_request;
use crate::application::pipeline::{Analysis, Evolution, Pipeline, Validation};
use crate::config::PipelineConfig;
use crate::domain::{AnalysisReport, EvolutionReport, OperationRequest, ValidationReport};
use crate::error::Result;
use crate::port::{ExecutionError, ProcessRunner, TimeProvider};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Operation Service with injected dependencies
pub struct OperationService {
    runner: Arc<dyn ProcessRunner>,
    time_provider: Arc<dyn TimeProvider>,
    config: PipelineConfig,
    locks: Option<Arc<ResourceLocks>>,
}

impl OperationService {
    pub fn new(
        runner: Arc<dyn ProcessRunner>,
        time_provider: Arc<dyn TimeProvider>,
        config: PipelineConfig,
    ) -> Self {
        let locks = config
            .serialize_mutations
            .then(|| Arc::new(ResourceLocks::new()));
        Self {
            runner,
            time_provider,
            config,
            locks,
        }
    }

    /// Run the analysis pipeline
    pub async fn analyse(&self, request: OperationRequest) -> Result<Outcome<AnalysisReport>> {
        self.execute::<Analysis>(request).await
    }

    /// Run the evolution pipeline
    pub async fn evolve(&self, request: OperationRequest) -> Result<Outcome<EvolutionReport>> {
        self.execute::<Evolution>(request).await
    }

    /// Run the validation pipeline
    pub async fn validate(&self, request: OperationRequest) -> Result<Outcome<ValidationReport>> {
        self.execute::<Validation>(request).await
    }

    /// Map, run and extract one request
    ///
    /// # Errors
    /// - AppError::Domain for unknown actions / missing parameters (nothing is spawned)
    /// - AppError::Execution for spawn failures and timeouts
    pub async fn execute<P: Pipeline>(
        &self,
        request: OperationRequest,
    ) -> Result<Outcome<P::Report>> {
        let pipeline = P::KIND.as_str();
        debug!(pipeline, action = %request.action, state = "mapping", "Operation received");

        let (action, spec) = map_request::<P>(&self.config, &request)?;

        // Detached: dropping the caller (client disconnect) does not cancel
        // the child, only the timeout ends a run early.
        let runner = Arc::clone(&self.runner);
        let locks = self.locks.clone().filter(|_| P::mutates(action));
        let action_name = action.to_string();
        let run = tokio::spawn(async move {
            let _permit = match &locks {
                Some(locks) => {
                    let key = spec.resource_key();
                    debug!(
                        pipeline,
                        action = %action_name,
                        resource = %key,
                        "Waiting for resource permit"
                    );
                    Some(locks.acquire(&key).await)
                }
                None => None,
            };

            debug!(pipeline, action = %action_name, state = "spawning", "Running command");
            let result = runner.run(&spec).await;
            (spec, result)
        });

        let (spec, result) = run
            .await
            .map_err(|e| ExecutionError::IoError(format!("Pipeline task failed: {}", e)))?;
        let result = result?;

        debug!(
            pipeline,
            %action,
            state = "extracting",
            stdout_bytes = result.stdout.len(),
            stderr_bytes = result.stderr.len(),
            "Output captured"
        );
        let report = P::extract(
            &result.stdout,
            &request.parameters,
            self.time_provider.now_iso8601(),
        );

        if result.timed_out {
            warn!(
                pipeline,
                %action,
                timeout_ms = spec.timeout_ms(),
                partial_report = ?report,
                "Operation timed out"
            );
            return Err(ExecutionError::Timeout(spec.timeout_ms()).into());
        }

        info!(
            pipeline,
            %action,
            duration_ms = result.duration_ms,
            exit_code = ?result.exit_code,
            "Operation completed"
        );

        Ok(Outcome {
            resultats: report,
            logs: result.stdout,
            erreurs: result.stderr,
        })
    }
}
