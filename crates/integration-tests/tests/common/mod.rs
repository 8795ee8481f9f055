//! Shared fixtures: a temporary host root with shell stand-ins for the
//! pipeline scripts, run through the real subprocess runner.

#![allow(dead_code)]

use jarvis_core::application::constants::DEFAULT_ENV_ALLOWLIST;
use jarvis_core::application::OperationService;
use jarvis_core::port::time_provider::SystemTimeProvider;
use jarvis_core::PipelineConfig;
use jarvis_infra_system::SubprocessRunner;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

pub struct HostRoot {
    pub dir: TempDir,
    pub config: PipelineConfig,
}

impl HostRoot {
    /// Temp root where every pipeline runs `sh <script>`
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_path_buf();
        let config = PipelineConfig {
            root: root.clone(),
            node_bin: "sh".to_string(),
            analysis_script: root.join("analyse.sh"),
            evolution_script: root.join("evolution.sh"),
            validation_script: root.join("validation.sh"),
            ..Default::default()
        };
        // Unwritten scripts still exist so a missing case fails loudly in the output
        for script in [
            &config.analysis_script,
            &config.evolution_script,
            &config.validation_script,
        ] {
            std::fs::write(script, "echo \"no script for $1\"\n").unwrap();
        }
        Self { dir, config }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write_analysis(&self, body: &str) -> &Self {
        std::fs::write(&self.config.analysis_script, body).unwrap();
        self
    }

    pub fn write_evolution(&self, body: &str) -> &Self {
        std::fs::write(&self.config.evolution_script, body).unwrap();
        self
    }

    pub fn write_validation(&self, body: &str) -> &Self {
        std::fs::write(&self.config.validation_script, body).unwrap();
        self
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.path().join(name)
    }

    pub fn service(&self) -> OperationService {
        service_for(self.config.clone())
    }
}

pub fn runner() -> Arc<SubprocessRunner> {
    Arc::new(
        SubprocessRunner::new(
            Arc::new(SystemTimeProvider),
            DEFAULT_ENV_ALLOWLIST.iter().map(|s| s.to_string()).collect(),
        )
        .with_kill_grace(Duration::from_millis(200)),
    )
}

pub fn service_for(config: PipelineConfig) -> OperationService {
    OperationService::new(runner(), Arc::new(SystemTimeProvider), config)
}
