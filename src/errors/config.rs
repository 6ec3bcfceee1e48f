// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Issues found while validating a batch configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The engine launch command is blank
    EmptyEngineCommand,
    /// A worker pool with zero slots would never dispatch anything
    ZeroConcurrency,
    /// Two descriptors share a graph name; result files may collide
    DuplicateGraphName {
        graph_name: String,
    },
}

impl ValidationError {
    /// Warnings are reported but do not reject the configuration.
    pub fn is_warning(&self) -> bool {
        matches!(self, ValidationError::DuplicateGraphName { .. })
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyEngineCommand => {
                write!(f, "engine command is empty")
            }
            ValidationError::ZeroConcurrency => {
                write!(f, "executor_options.max_concurrency must be at least 1")
            }
            ValidationError::DuplicateGraphName { graph_name } => {
                write!(
                    f,
                    "Graph '{}' appears more than once; result files written in the same second will overwrite each other",
                    graph_name
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors raised while loading a batch configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration validation failed:\n{}", join_issues(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_issues(issues: &[ValidationError]) -> String {
    issues
        .iter()
        .map(|issue| issue.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
