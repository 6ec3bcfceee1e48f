// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Ordered fold of invocation outcomes into batch totals.
//!
//! The aggregator is owned by exactly one control task. Executors call
//! [`BatchAggregator::fold`] once per descriptor, in input order, whatever
//! order the invocations finished in. Folding never fails: errors are logged
//! and recorded, and the batch moves on. Result files are written on the
//! blocking pool so large documents do not stall the runtime.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::ReasoningConfig;
use crate::errors::DispatchError;
use crate::model::{ReasoningResult, Triple};
use crate::observability::messages::batch::{BatchCompleted, BatchItemFailed, BatchItemSucceeded};
use crate::observability::messages::persist::{ResultPersistFailed, ResultPersisted};
use crate::observability::messages::StructuredLog;
use crate::persist::ResultPersister;

/// Cross-batch counters. Only successful invocations contribute to
/// `successful`, `total_predictions` and `total_queries`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchTotals {
    pub attempted: usize,
    pub successful: usize,
    /// Sum of `new_triples.len()` over successful invocations.
    pub total_predictions: usize,
    /// Sum of `sparql_queries.len()` over successful invocations.
    pub total_queries: usize,
}

impl BatchTotals {
    pub fn failed(&self) -> usize {
        self.attempted - self.successful
    }
}

/// Why one batch item was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    /// 1-based position in the batch.
    pub position: usize,
    pub graph: String,
    pub kind: &'static str,
    pub message: String,
}

/// A successful item whose result file could not be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistFailure {
    pub position: usize,
    pub graph: String,
    pub message: String,
}

/// Final, read-only outcome of a batch.
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub strategy: &'static str,
    pub totals: BatchTotals,
    /// Every successful invocation's `new_triples`, in input order.
    pub predictions: Vec<Triple>,
    /// Result files written, in input order.
    pub persisted: Vec<PathBuf>,
    pub failures: Vec<BatchFailure>,
    pub persist_failures: Vec<PersistFailure>,
    pub duration: Duration,
}

pub struct BatchAggregator {
    persister: Option<ResultPersister>,
    totals: BatchTotals,
    predictions: Vec<Triple>,
    persisted: Vec<PathBuf>,
    failures: Vec<BatchFailure>,
    persist_failures: Vec<PersistFailure>,
    started: Instant,
}

impl BatchAggregator {
    /// `None` disables result files; totals are still accumulated.
    pub fn new(persister: Option<ResultPersister>) -> Self {
        Self {
            persister,
            totals: BatchTotals::default(),
            predictions: Vec::new(),
            persisted: Vec::new(),
            failures: Vec::new(),
            persist_failures: Vec::new(),
            started: Instant::now(),
        }
    }

    /// Fold one invocation outcome. `position` is 1-based.
    pub async fn fold(
        &mut self,
        position: usize,
        descriptor: &ReasoningConfig,
        outcome: Result<ReasoningResult, DispatchError>,
    ) {
        self.totals.attempted += 1;
        let graph = descriptor.graph_name();

        match outcome {
            Ok(result) if result.success => self.record_success(position, graph, result).await,
            Ok(result) => {
                // Engines behind the trait are expected to report this as an
                // error; treat a bare unsuccessful result the same way.
                let message = result.error_message().to_string();
                self.record_failure(
                    position,
                    DispatchError::ReportedFailure {
                        graph: graph.to_string(),
                        message,
                        exit_code: None,
                        stderr: String::new(),
                        result: Box::new(result),
                    },
                );
            }
            Err(error) => self.record_failure(position, error),
        }
    }

    async fn record_success(&mut self, position: usize, graph: &str, result: ReasoningResult) {
        self.totals.successful += 1;
        self.totals.total_predictions += result.new_triple_count();
        self.totals.total_queries += result.query_count();

        BatchItemSucceeded {
            position,
            graph,
            predictions: result.new_triple_count(),
            queries: result.query_count(),
        }
        .log();

        let result = match self.persister.clone() {
            Some(persister) => self.persist(position, graph, persister, result).await,
            None => result,
        };

        self.predictions.extend(result.new_triples);
    }

    /// Write one result file off the runtime threads and hand the result back.
    async fn persist(
        &mut self,
        position: usize,
        graph: &str,
        persister: ResultPersister,
        result: ReasoningResult,
    ) -> ReasoningResult {
        let document = Arc::new(result);
        let shared = document.clone();
        let file_graph = graph.to_string();
        let written =
            tokio::task::spawn_blocking(move || persister.persist_for_graph(&shared, &file_graph))
                .await;

        match written {
            Ok(Ok(path)) => {
                ResultPersisted { graph, path: &path }.log();
                self.persisted.push(path);
            }
            Ok(Err(error)) => self.record_persist_failure(position, graph, &error),
            Err(join_error) => self.record_persist_failure(position, graph, &join_error),
        }

        Arc::try_unwrap(document).unwrap_or_else(|shared| (*shared).clone())
    }

    fn record_persist_failure(
        &mut self,
        position: usize,
        graph: &str,
        error: &dyn std::error::Error,
    ) {
        ResultPersistFailed { graph, error }.log();
        self.persist_failures.push(PersistFailure {
            position,
            graph: graph.to_string(),
            message: error.to_string(),
        });
    }

    fn record_failure(&mut self, position: usize, error: DispatchError) {
        BatchItemFailed {
            position,
            graph: error.graph(),
            kind: error.kind(),
            error: &error,
        }
        .log();

        self.failures.push(BatchFailure {
            position,
            graph: error.graph().to_string(),
            kind: error.kind(),
            message: error.to_string(),
        });
    }

    /// Freeze the aggregator into its report.
    pub fn finish(self, strategy: &'static str) -> BatchReport {
        let duration = self.started.elapsed();

        BatchCompleted {
            strategy,
            attempted: self.totals.attempted,
            successful: self.totals.successful,
            total_predictions: self.totals.total_predictions,
            total_queries: self.totals.total_queries,
            duration,
        }
        .log();

        BatchReport {
            strategy,
            totals: self.totals,
            predictions: self.predictions,
            persisted: self.persisted,
            failures: self.failures,
            persist_failures: self.persist_failures,
            duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QueryRecord;

    fn descriptor(graph: &str) -> ReasoningConfig {
        ReasoningConfig::new("http://example.org/", graph, "r.csv", "d.nt", graph, 0.7)
    }

    fn success(predictions: usize, queries: usize) -> ReasoningResult {
        let mut result = ReasoningResult::failure("");
        result.success = true;
        result.error = None;
        result.new_triples = (0..predictions)
            .map(|i| Triple::new(format!("s{i}"), "p", "o"))
            .collect();
        result.sparql_queries = (0..queries)
            .map(|i| QueryRecord {
                query: format!("SELECT {i}"),
                execution_time: 0.5,
                result_count: 1,
                timestamp: String::new(),
            })
            .collect();
        result
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let report = BatchAggregator::new(None).finish("Sequential");

        assert_eq!(report.totals, BatchTotals::default());
        assert!(report.predictions.is_empty());
        assert!(report.persisted.is_empty());
        assert!(report.failures.is_empty());
    }

    #[tokio::test]
    async fn test_only_successes_count() {
        let mut aggregator = BatchAggregator::new(None);

        aggregator.fold(1, &descriptor("A"), Ok(success(2, 3))).await;
        aggregator
            .fold(
                2,
                &descriptor("B"),
                Err(DispatchError::Timeout {
                    graph: "B".to_string(),
                    timeout: Duration::from_secs(1),
                }),
            )
            .await;
        aggregator.fold(3, &descriptor("C"), Ok(success(1, 0))).await;

        let report = aggregator.finish("Sequential");
        assert_eq!(
            report.totals,
            BatchTotals {
                attempted: 3,
                successful: 2,
                total_predictions: 3,
                total_queries: 3,
            }
        );
        assert_eq!(report.totals.failed(), 1);
        assert_eq!(report.predictions.len(), 3);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].position, 2);
        assert_eq!(report.failures[0].graph, "B");
        assert_eq!(report.failures[0].kind, "timeout");
    }

    #[tokio::test]
    async fn test_unsuccessful_ok_result_is_a_failure() {
        let mut aggregator = BatchAggregator::new(None);

        aggregator.fold(1, &descriptor("A"), Ok(ReasoningResult::failure("bad rules"))).await;

        let report = aggregator.finish("Sequential");
        assert_eq!(report.totals.successful, 0);
        assert_eq!(report.failures[0].kind, "reported_failure");
        assert!(report.failures[0].message.contains("bad rules"));
    }

    #[tokio::test]
    async fn test_successes_are_persisted_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut aggregator = BatchAggregator::new(Some(ResultPersister::in_directory(dir.path())));

        aggregator.fold(1, &descriptor("Royalty"), Ok(success(1, 1))).await;
        aggregator.fold(2, &descriptor("Broken"), Ok(ReasoningResult::failure("nope"))).await;
        aggregator.fold(3, &descriptor("Family"), Ok(success(2, 0))).await;

        let report = aggregator.finish("Sequential");
        assert_eq!(report.persisted.len(), 2);
        let names: Vec<String> = report
            .persisted
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert!(names[0].starts_with("results_Royalty_"));
        assert!(names[1].starts_with("results_Family_"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[tokio::test]
    async fn test_persist_failure_does_not_undo_success() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"file").unwrap();
        let mut aggregator = BatchAggregator::new(Some(ResultPersister::in_directory(&blocker)));

        aggregator.fold(1, &descriptor("A"), Ok(success(2, 1))).await;
        aggregator.fold(2, &descriptor("B"), Ok(success(1, 1))).await;

        let report = aggregator.finish("Sequential");
        assert_eq!(report.totals.successful, 2);
        assert_eq!(report.totals.total_predictions, 3);
        assert!(report.persisted.is_empty());
        assert_eq!(report.persist_failures.len(), 2);
        assert_eq!(report.persist_failures[1].graph, "B");
    }

    #[tokio::test]
    async fn test_duplicate_graph_names_each_get_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut aggregator = BatchAggregator::new(Some(ResultPersister::in_directory(dir.path())));

        aggregator.fold(1, &descriptor("Family"), Ok(success(1, 0))).await;
        aggregator.fold(2, &descriptor("Family"), Ok(success(2, 0))).await;
        aggregator.fold(3, &descriptor("Family"), Ok(success(3, 0))).await;

        let report = aggregator.finish("Sequential");
        assert_eq!(report.totals.successful, 3);
        assert_eq!(report.persisted.len(), 3);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 3);
        let predictions: Vec<usize> = report
            .persisted
            .iter()
            .map(|p| crate::persist::load_result(p).unwrap().new_triple_count())
            .collect();
        assert_eq!(predictions, vec![1, 2, 3]);
        assert_eq!(report.predictions.len(), 6);
    }
}
