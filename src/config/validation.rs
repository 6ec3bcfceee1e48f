// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Batch configuration validation.
//!
//! Only the batch's own structure is checked here: the engine launch command,
//! the worker pool size and graph name collisions. Descriptor contents (paths,
//! prefixes, thresholds) belong to the engine and are never inspected.
//!
//! An empty graph list is valid and produces an empty batch.

use std::collections::HashSet;

use crate::config::BatchConfig;
use crate::errors::ValidationError;

/// Run every check and return all issues found, warnings included.
///
/// Use [`ValidationError::is_warning`] to separate blocking errors from warnings.
pub fn validate_batch_config(config: &BatchConfig) -> Vec<ValidationError> {
    let mut issues = Vec::new();

    if config.engine.command.trim().is_empty() {
        issues.push(ValidationError::EmptyEngineCommand);
    }

    if config.executor_options.max_concurrency == Some(0) {
        issues.push(ValidationError::ZeroConcurrency);
    }

    issues.extend(duplicate_graph_names(config));

    issues
}

/// Result files are keyed by graph name and second, so repeated names can
/// overwrite each other's output.
fn duplicate_graph_names(config: &BatchConfig) -> Vec<ValidationError> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut issues = Vec::new();

    for graph in &config.graphs {
        let name = graph.graph_name();
        if !seen.insert(name) && reported.insert(name) {
            issues.push(ValidationError::DuplicateGraphName {
                graph_name: name.to_string(),
            });
        }
    }

    issues
}
