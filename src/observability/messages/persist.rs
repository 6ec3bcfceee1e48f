// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for result file writes.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::path::Path;
use tracing::Span;

/// A result document was written.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ResultPersisted<'a> {
    pub graph: &'a str,
    pub path: &'a Path,
}

impl Display for ResultPersisted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Saved results for '{}' to {}",
            self.graph,
            self.path.display()
        )
    }
}

impl StructuredLog for ResultPersisted<'_> {
    fn log(&self) {
        tracing::info!(
            graph = self.graph,
            path = %self.path.display(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "result_persisted",
            span_name = name,
            graph = self.graph,
            path = %self.path.display(),
        )
    }
}

/// A result document could not be written. Batch processing continues.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct ResultPersistFailed<'a> {
    pub graph: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for ResultPersistFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Could not save results for '{}': {}", self.graph, self.error)
    }
}

impl StructuredLog for ResultPersistFailed<'_> {
    fn log(&self) {
        tracing::error!(graph = self.graph, error = %self.error, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "result_persist_failed",
            span_name = name,
            graph = self.graph,
            error = %self.error,
        )
    }
}
