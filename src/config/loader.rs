// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{
    DEFAULT_ENGINE_COMMAND, DEFAULT_ENGINE_SCRIPT, DEFAULT_ENGINE_TIMEOUT_SECS,
    FALLBACK_CONCURRENCY,
};
use crate::config::ReasoningConfig;
use crate::errors::ConfigError;
use crate::observability::messages::validation::ValidationIssueReported;
use crate::observability::messages::StructuredLog;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Batch configuration: how to launch the engine, how to schedule the batch,
/// where results go, and the knowledge graphs to reason over.
///
/// # Example
/// ```yaml
/// engine:
///   command: python3
///   args: [full_data_wrapper.py]
///   working_dir: ./symbolic
///   timeout_seconds: 600
/// strategy: worker_pool
/// executor_options:
///   max_concurrency: 2
/// output:
///   directory: results
/// graphs:
///   - prefix: "http://FrenchRoyalty.org/"
///     KG: FrenchRoyalty
///     rules_file: french_royalty.csv
///     rdf_file: french_royalty.nt
///     constraints_folder: FrenchRoyalty
///     pca_threshold: 0.7
///     skip_validation: true
/// ```
#[derive(Debug, Deserialize)]
pub struct BatchConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub strategy: Strategy,
    #[serde(default)]
    pub executor_options: ExecutorOptions,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub graphs: Vec<ReasoningConfig>,
}

/// Batch scheduling strategy.
///
/// * `Sequential` - one engine process at a time, in input order
/// * `WorkerPool` - up to `max_concurrency` engine processes at once, folded in input order
#[derive(Debug, Default, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    #[default]
    Sequential,
    WorkerPool,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExecutorOptions {
    pub max_concurrency: Option<usize>,
}

impl ExecutorOptions {
    /// Configured concurrency, else the platform's parallelism, else 4.
    pub fn resolved_concurrency(&self) -> usize {
        self.max_concurrency.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(FALLBACK_CONCURRENCY)
        })
    }
}

/// How to launch the external reasoning engine.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_command")]
    pub command: String,
    #[serde(default = "default_args")]
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    /// `0` disables the timeout.
    pub timeout_seconds: Option<u64>,
}

fn default_command() -> String {
    DEFAULT_ENGINE_COMMAND.to_string()
}

fn default_args() -> Vec<String> {
    vec![DEFAULT_ENGINE_SCRIPT.to_string()]
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            args: default_args(),
            working_dir: None,
            env: BTreeMap::new(),
            timeout_seconds: None,
        }
    }
}

impl EngineConfig {
    pub fn timeout(&self) -> Option<Duration> {
        match self.timeout_seconds.unwrap_or(DEFAULT_ENGINE_TIMEOUT_SECS) {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Directory for result files; the current directory when absent.
    pub directory: Option<PathBuf>,
    #[serde(default = "default_persist")]
    pub persist: bool,
}

fn default_persist() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: None,
            persist: true,
        }
    }
}

/// Load a batch config. `.toml` files are parsed as TOML, everything else as YAML.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<BatchConfig, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let is_toml = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("toml"))
        .unwrap_or(false);

    if is_toml {
        Ok(toml::from_str(&content)?)
    } else {
        Ok(serde_yaml::from_str(&content)?)
    }
}

/// Load a batch config and reject it if validation finds errors.
///
/// Warnings are logged and do not fail the load.
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<BatchConfig, ConfigError> {
    let cfg = load_config(path)?;

    let (warnings, errors): (Vec<_>, Vec<_>) = crate::config::validate_batch_config(&cfg)
        .into_iter()
        .partition(|issue| issue.is_warning());

    for warning in &warnings {
        ValidationIssueReported { issue: warning }.log();
    }

    if !errors.is_empty() {
        for error in &errors {
            ValidationIssueReported { issue: error }.log();
        }
        return Err(ConfigError::Invalid(errors));
    }

    Ok(cfg)
}
