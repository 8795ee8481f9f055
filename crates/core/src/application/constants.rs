// Pipeline constants (no magic values in the service code)
use std::time::Duration;

/// Interpreter used for the maintenance scripts
pub const DEFAULT_NODE_BIN: &str = "node";

/// Script paths, relative to the host application root
pub const DEFAULT_ANALYSIS_SCRIPT: &str = "scripts/analyseur-microscopique.cjs";
pub const DEFAULT_EVOLUTION_SCRIPT: &str = "scripts/evolution-projet.cjs";
pub const DEFAULT_VALIDATION_SCRIPT: &str = "scripts/validation-post-build.cjs";

/// Analysis timeout (5 minutes)
pub const DEFAULT_ANALYSIS_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Evolution timeout (10 minutes, it rebuilds and re-tests the project)
pub const DEFAULT_EVOLUTION_TIMEOUT: Duration = Duration::from_secs(10 * 60);

/// Validation timeout (5 minutes)
pub const DEFAULT_VALIDATION_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Grace period between SIGTERM and SIGKILL for a timed-out script
pub const KILL_GRACE_PERIOD: Duration = Duration::from_secs(2);

/// How long to keep draining pipes after the process is gone
pub const OUTPUT_DRAIN_GRACE: Duration = Duration::from_millis(500);

/// Environment variables forwarded to scripts; everything else is dropped
pub const DEFAULT_ENV_ALLOWLIST: [&str; 5] = ["PATH", "HOME", "USER", "NODE_ENV", "NODE_PATH"];

/// Memory log listing bounds
pub const DEFAULT_MEMORY_LIST_LIMIT: usize = 50;
pub const MAX_MEMORY_LIST_LIMIT: usize = 500;
