// Subprocess runner implementation
// reason: async-trait, tokio for async process management
use async_trait::async_trait;
use std::collections::HashMap;
use std::ffi::OsString;
use std::process::Stdio;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use jarvis_core::application::constants::{KILL_GRACE_PERIOD, OUTPUT_DRAIN_GRACE};
use jarvis_core::domain::CommandSpec;
use jarvis_core::port::{ExecutionError, ExecutionResult, ProcessRunner, TimeProvider};

type SharedBuffer = Arc<Mutex<Vec<u8>>>;

/// Subprocess runner
/// Spawns isolated child processes with environment allowlisting
pub struct SubprocessRunner {
    time_provider: Arc<dyn TimeProvider>,
    env_allowlist: Vec<String>,
    kill_grace: Duration,
}

impl SubprocessRunner {
    /// Create a new subprocess runner
    ///
    /// # Arguments
    /// * `time_provider` - Time provider for duration tracking
    /// * `env_allowlist` - Environment variables forwarded to children (everything else is dropped)
    ///
    /// # Example
    /// ```ignore
    /// let runner = SubprocessRunner::new(
    ///     Arc::new(SystemTimeProvider),
    ///     vec!["PATH".to_string(), "HOME".to_string()],
    /// );
    /// ```
    pub fn new(time_provider: Arc<dyn TimeProvider>, env_allowlist: Vec<String>) -> Self {
        Self {
            time_provider,
            env_allowlist,
            kill_grace: KILL_GRACE_PERIOD,
        }
    }

    /// Override the SIGTERM -> SIGKILL grace period
    pub fn with_kill_grace(mut self, kill_grace: Duration) -> Self {
        self.kill_grace = kill_grace;
        self
    }

    /// Allowlisted variables present in `lookup`; values need not be UTF-8
    fn filter_env(
        &self,
        lookup: impl Fn(&str) -> Option<OsString>,
    ) -> HashMap<String, OsString> {
        self.env_allowlist
            .iter()
            .filter_map(|key| lookup(key.as_str()).map(|value| (key.clone(), value)))
            .collect()
    }

    /// Spawn the child with piped output, in its own process group on Unix
    fn spawn(&self, spec: &CommandSpec) -> Result<Child, ExecutionError> {
        let mut command = Command::new(&spec.executable);
        command
            .args(&spec.arguments)
            .env_clear()
            .envs(self.filter_env(|key| std::env::var_os(key)))
            .current_dir(&spec.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        #[cfg(unix)]
        command.process_group(0);

        command
            .spawn()
            .map_err(|e| ExecutionError::SpawnFailed(format!("{}: {}", spec.executable, e)))
    }

    /// Terminate a timed-out child: SIGTERM to its group, SIGKILL after the grace period
    async fn terminate(&self, child: &mut Child) {
        #[cfg(unix)]
        if let Some(pid) = child.id() {
            use nix::sys::signal::{killpg, Signal};
            use nix::unistd::Pid;

            let pgid = Pid::from_raw(pid as i32);
            info!(pid = %pid, "Sending SIGTERM to process group");
            if let Err(e) = killpg(pgid, Signal::SIGTERM) {
                warn!(pid = %pid, error = %e, "SIGTERM failed");
            }

            if timeout(self.kill_grace, child.wait()).await.is_ok() {
                info!(pid = %pid, "Process exited after SIGTERM");
                return;
            }

            warn!(pid = %pid, "Process did not exit after SIGTERM, sending SIGKILL");
            if let Err(e) = killpg(pgid, Signal::SIGKILL) {
                warn!(pid = %pid, error = %e, "SIGKILL failed");
            }
        }

        if let Err(e) = child.kill().await {
            debug!(error = %e, "Kill after timeout failed (process already gone?)");
        }
    }

    /// Spawn, wait under the timeout, collect whatever output was produced
    async fn run_internal(&self, spec: &CommandSpec) -> Result<ExecutionResult, ExecutionError> {
        let start_time = self.time_provider.now_millis();

        info!(
            command = %spec.executable,
            args = ?spec.arguments,
            working_dir = %spec.working_dir.display(),
            timeout_ms = spec.timeout_ms(),
            "Starting subprocess execution"
        );

        let mut child = self.spawn(spec)?;

        let stdout_buf = SharedBuffer::default();
        let stderr_buf = SharedBuffer::default();
        let drains = [
            child.stdout.take().map(|out| spawn_drain(out, stdout_buf.clone())),
            child.stderr.take().map(|err| spawn_drain(err, stderr_buf.clone())),
        ];

        let (exit_code, timed_out) = match timeout(spec.timeout, child.wait()).await {
            Ok(Ok(status)) => (status.code(), false),
            Ok(Err(e)) => return Err(ExecutionError::IoError(e.to_string())),
            Err(_) => {
                warn!(
                    command = %spec.executable,
                    timeout_ms = spec.timeout_ms(),
                    "Subprocess timed out"
                );
                self.terminate(&mut child).await;
                (None, true)
            }
        };

        for drain in drains.into_iter().flatten() {
            finish_drain(drain).await;
        }

        let duration_ms = self.time_provider.now_millis() - start_time;

        let result = ExecutionResult {
            stdout: take_text(&stdout_buf),
            stderr: take_text(&stderr_buf),
            timed_out,
            exit_code,
            duration_ms,
        };

        info!(
            command = %spec.executable,
            duration_ms = %duration_ms,
            exit_code = ?result.exit_code,
            timed_out = result.timed_out,
            "Subprocess execution completed"
        );

        Ok(result)
    }
}

/// Copy a pipe into a shared buffer until EOF, so partial output survives a timeout
fn spawn_drain<R>(mut reader: R, sink: SharedBuffer) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut chunk = [0u8; 8192];
        loop {
            match reader.read(&mut chunk).await {
                Ok(0) | Err(_) => break,
                Ok(n) => sink
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .extend_from_slice(&chunk[..n]),
            }
        }
    })
}

/// Wait briefly for a drain to hit EOF; a leaked grandchild may hold the pipe open
async fn finish_drain(mut drain: JoinHandle<()>) {
    if timeout(OUTPUT_DRAIN_GRACE, &mut drain).await.is_err() {
        debug!("Output pipe still open after process exit, abandoning drain");
        drain.abort();
    }
}

fn take_text(buf: &SharedBuffer) -> String {
    let bytes = std::mem::take(&mut *buf.lock().unwrap_or_else(PoisonError::into_inner));
    String::from_utf8_lossy(&bytes).into_owned()
}

#[async_trait]
impl ProcessRunner for SubprocessRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<ExecutionResult, ExecutionError> {
        self.run_internal(spec).await
    }
}
