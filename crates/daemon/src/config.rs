//! Daemon configuration from `JARVIS_*` environment variables
//!
//! Unset or unparsable values fall back to defaults.

use jarvis_api_http::HttpServerConfig;
use jarvis_core::PipelineConfig;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_DB_PATH: &str = "~/.jarvis/memory.db";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct DaemonConfig {
    pub pipeline: PipelineConfig,
    pub http: HttpServerConfig,
    pub db_path: PathBuf,
    pub log_format: LogFormat,
}

impl DaemonConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (process env in production, a map in tests)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let path = |key: &str| {
            lookup(key).map(|v| PathBuf::from(shellexpand::tilde(&v).into_owned()))
        };
        let millis = |key: &str| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis)
        };

        let defaults = PipelineConfig::default();
        let root = path("JARVIS_ROOT")
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or(defaults.root);

        let pipeline = PipelineConfig {
            root,
            node_bin: lookup("JARVIS_NODE_BIN")
                .map(|v| shellexpand::tilde(&v).into_owned())
                .unwrap_or(defaults.node_bin),
            analysis_script: path("JARVIS_ANALYSIS_SCRIPT").unwrap_or(defaults.analysis_script),
            evolution_script: path("JARVIS_EVOLUTION_SCRIPT").unwrap_or(defaults.evolution_script),
            validation_script: path("JARVIS_VALIDATION_SCRIPT")
                .unwrap_or(defaults.validation_script),
            analysis_timeout: millis("JARVIS_ANALYSIS_TIMEOUT_MS")
                .unwrap_or(defaults.analysis_timeout),
            evolution_timeout: millis("JARVIS_EVOLUTION_TIMEOUT_MS")
                .unwrap_or(defaults.evolution_timeout),
            validation_timeout: millis("JARVIS_VALIDATION_TIMEOUT_MS")
                .unwrap_or(defaults.validation_timeout),
            serialize_mutations: lookup("JARVIS_SERIALIZE_MUTATIONS")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.serialize_mutations),
        };

        let http_defaults = HttpServerConfig::default();
        let http = HttpServerConfig {
            host: lookup("JARVIS_HTTP_HOST").unwrap_or(http_defaults.host),
            port: lookup("JARVIS_HTTP_PORT")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(http_defaults.port),
        };

        let db_path = path("JARVIS_DB_PATH")
            .unwrap_or_else(|| PathBuf::from(shellexpand::tilde(DEFAULT_DB_PATH).into_owned()));

        let log_format = match lookup("JARVIS_LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Self {
            pipeline,
            http,
            db_path,
            log_format,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> DaemonConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        DaemonConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.pipeline.node_bin, "node");
        assert_eq!(config.pipeline.analysis_timeout, Duration::from_secs(300));
        assert_eq!(config.pipeline.evolution_timeout, Duration::from_secs(600));
        assert!(!config.pipeline.serialize_mutations);
        assert_eq!(config.http.host, "127.0.0.1");
        assert_eq!(config.http.port, 3001);
        assert!(config.db_path.ends_with(".jarvis/memory.db"));
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("JARVIS_ROOT", "/srv/app"),
            ("JARVIS_NODE_BIN", "/usr/local/bin/node"),
            ("JARVIS_VALIDATION_SCRIPT", "tools/validate.cjs"),
            ("JARVIS_EVOLUTION_TIMEOUT_MS", "1500"),
            ("JARVIS_SERIALIZE_MUTATIONS", "true"),
            ("JARVIS_HTTP_PORT", "8080"),
            ("JARVIS_DB_PATH", "/tmp/jarvis.db"),
            ("JARVIS_LOG_FORMAT", "json"),
        ]);
        assert_eq!(config.pipeline.root, PathBuf::from("/srv/app"));
        assert_eq!(config.pipeline.node_bin, "/usr/local/bin/node");
        assert_eq!(
            config.pipeline.validation_script,
            PathBuf::from("tools/validate.cjs")
        );
        assert_eq!(config.pipeline.evolution_timeout, Duration::from_millis(1500));
        assert!(config.pipeline.serialize_mutations);
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.db_path, PathBuf::from("/tmp/jarvis.db"));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_numbers_fall_back() {
        let config = config_from(&[
            ("JARVIS_ANALYSIS_TIMEOUT_MS", "soon"),
            ("JARVIS_VALIDATION_TIMEOUT_MS", "0"),
            ("JARVIS_HTTP_PORT", "99999"),
        ]);
        assert_eq!(config.pipeline.analysis_timeout, Duration::from_secs(300));
        assert_eq!(config.pipeline.validation_timeout, Duration::from_secs(300));
        assert_eq!(config.http.port, 3001);
    }

    #[test]
    fn test_flag_parsing() {
        assert!(parse_flag("1"));
        assert!(parse_flag("ON"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("nope"));
    }
}
