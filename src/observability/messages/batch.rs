// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for batch lifecycle and per-item outcomes.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// Batch started.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use kg_dispatch::observability::messages::batch::BatchStarted;
///
/// let msg = BatchStarted {
///     strategy: "WorkerPool",
///     graph_count: 3,
///     max_concurrency: 2,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct BatchStarted<'a> {
    pub strategy: &'a str,
    pub graph_count: usize,
    pub max_concurrency: usize,
}

impl Display for BatchStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Processing {} knowledge graphs with {} strategy, max_concurrency={}",
            self.graph_count, self.strategy, self.max_concurrency
        )
    }
}

impl StructuredLog for BatchStarted<'_> {
    fn log(&self) {
        tracing::info!(
            strategy = self.strategy,
            graph_count = self.graph_count,
            max_concurrency = self.max_concurrency,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "batch",
            span_name = name,
            strategy = self.strategy,
            graph_count = self.graph_count,
            max_concurrency = self.max_concurrency,
        )
    }
}

/// One batch item is about to be dispatched.
///
/// # Log Level
/// `info!` - Important operational event
pub struct BatchItemStarted<'a> {
    /// 1-based position in the batch.
    pub position: usize,
    pub total: usize,
    pub graph: &'a str,
}

impl Display for BatchItemStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "[{}/{}] Processing {}...", self.position, self.total, self.graph)
    }
}

impl StructuredLog for BatchItemStarted<'_> {
    fn log(&self) {
        tracing::info!(
            position = self.position,
            total = self.total,
            graph = self.graph,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "batch_item",
            span_name = name,
            position = self.position,
            graph = self.graph,
        )
    }
}

/// One batch item succeeded and was folded into the totals.
///
/// # Log Level
/// `info!` - Important operational event
pub struct BatchItemSucceeded<'a> {
    pub position: usize,
    pub graph: &'a str,
    pub predictions: usize,
    pub queries: usize,
}

impl Display for BatchItemSucceeded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "'{}' generated {} predictions from {} queries",
            self.graph, self.predictions, self.queries
        )
    }
}

impl StructuredLog for BatchItemSucceeded<'_> {
    fn log(&self) {
        tracing::info!(
            position = self.position,
            graph = self.graph,
            predictions = self.predictions,
            queries = self.queries,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "batch_item_succeeded",
            span_name = name,
            graph = self.graph,
        )
    }
}

/// One batch item failed; the batch continues.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use kg_dispatch::observability::messages::batch::BatchItemFailed;
///
/// let error = std::io::Error::new(std::io::ErrorKind::NotFound, "python3 not found");
/// let msg = BatchItemFailed {
///     position: 2,
///     graph: "Family",
///     kind: "launch",
///     error: &error,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct BatchItemFailed<'a> {
    pub position: usize,
    pub graph: &'a str,
    pub kind: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for BatchItemFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Skipping '{}' after {} error: {}",
            self.graph, self.kind, self.error
        )
    }
}

impl StructuredLog for BatchItemFailed<'_> {
    fn log(&self) {
        tracing::error!(
            position = self.position,
            graph = self.graph,
            kind = self.kind,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "batch_item_failed",
            span_name = name,
            graph = self.graph,
            kind = self.kind,
        )
    }
}

/// Batch finished; totals are final.
///
/// # Log Level
/// `info!` - Important operational event
pub struct BatchCompleted<'a> {
    pub strategy: &'a str,
    pub attempted: usize,
    pub successful: usize,
    pub total_predictions: usize,
    pub total_queries: usize,
    pub duration: Duration,
}

impl Display for BatchCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Batch completed with {} strategy: {}/{} graphs succeeded, {} predictions, {} queries in {:?}",
            self.strategy,
            self.successful,
            self.attempted,
            self.total_predictions,
            self.total_queries,
            self.duration
        )
    }
}

impl StructuredLog for BatchCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            strategy = self.strategy,
            attempted = self.attempted,
            successful = self.successful,
            total_predictions = self.total_predictions,
            total_queries = self.total_queries,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "batch_completed",
            span_name = name,
            strategy = self.strategy,
            duration = ?self.duration,
        )
    }
}
