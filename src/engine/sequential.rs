// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! One engine process at a time.
//!
//! Each descriptor is dispatched, fully awaited and folded before the next one
//! starts. No state is shared between invocations apart from the aggregator,
//! which only this loop touches.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::Instrument;

use crate::config::ReasoningConfig;
use crate::engine::{BatchAggregator, BatchReport};
use crate::observability::messages::batch::{BatchItemStarted, BatchStarted};
use crate::observability::messages::StructuredLog;
use crate::traits::{BatchExecutor, ReasoningEngine};

#[derive(Debug, Default, Clone, Copy)]
pub struct SequentialExecutor;

impl SequentialExecutor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl BatchExecutor for SequentialExecutor {
    async fn execute(
        &self,
        engine: Arc<dyn ReasoningEngine>,
        descriptors: Vec<ReasoningConfig>,
        mut aggregator: BatchAggregator,
    ) -> BatchReport {
        let total = descriptors.len();
        BatchStarted {
            strategy: self.name(),
            graph_count: total,
            max_concurrency: self.max_concurrency(),
        }
        .log();

        for (index, descriptor) in descriptors.iter().enumerate() {
            let position = index + 1;
            let item = BatchItemStarted {
                position,
                total,
                graph: descriptor.graph_name(),
            };
            item.log();

            let outcome = engine
                .invoke(descriptor)
                .instrument(item.span("batch_item"))
                .await;
            aggregator.fold(position, descriptor, outcome).await;
        }

        aggregator.finish(self.name())
    }

    fn name(&self) -> &'static str {
        "Sequential"
    }

    fn max_concurrency(&self) -> usize {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::{ScriptedEngine, ScriptedResponse};
    use std::time::Duration;

    const ROYALTY: &str = r#"{"success":true,"new_triples":[{"subject":"Louis_XIV","predicate":"child_of","object":"Louis_XIII"}],"graphs":{"statistics":{"initial_triples":100,"enriched_triples":101,"predictions_added":1}},"sparql_queries":[],"summary":{"total_predictions":1,"queries_executed":0,"processing_successful":true}}"#;
    const FAMILY: &str = r#"{"success":true,"new_triples":[{"subject":"Ann","predicate":"sibling_of","object":"Bob"},{"subject":"Bob","predicate":"sibling_of","object":"Ann"}],"sparql_queries":[{"query":"SELECT ?a ?b WHERE { ?a <parent> ?p . ?b <parent> ?p }","execution_time":0.5,"result_count":2,"timestamp":"t"}],"summary":{"total_predictions":2,"queries_executed":1,"processing_successful":true}}"#;

    fn descriptor(graph: &str) -> ReasoningConfig {
        ReasoningConfig::new("http://example.org/", graph, "r.csv", "d.nt", graph, 0.7)
    }

    #[tokio::test]
    async fn test_empty_batch_launches_nothing() {
        let engine = Arc::new(ScriptedEngine::new().fallback(ScriptedResponse::stdout(ROYALTY)));

        let report = SequentialExecutor::new()
            .execute(engine.clone(), vec![], BatchAggregator::new(None))
            .await;

        assert_eq!(report.totals.attempted, 0);
        assert_eq!(report.totals.successful, 0);
        assert_eq!(report.totals.total_predictions, 0);
        assert_eq!(report.totals.total_queries, 0);
        assert_eq!(engine.invocation_count(), 0);
    }

    #[tokio::test]
    async fn test_failures_do_not_abort_batch() {
        let engine = Arc::new(
            ScriptedEngine::new()
                .respond("FrenchRoyalty", ScriptedResponse::stdout(ROYALTY))
                .respond(
                    "Broken",
                    ScriptedResponse::exit(1, r#"{"success":false,"error":"missing rules file"}"#),
                )
                .respond("Missing", ScriptedResponse::unlaunchable())
                .respond("Garbled", ScriptedResponse::stdout("not json"))
                .respond("Family", ScriptedResponse::stdout(FAMILY)),
        );
        let batch = ["FrenchRoyalty", "Broken", "Missing", "Garbled", "Family"]
            .into_iter()
            .map(descriptor)
            .collect();

        let report = SequentialExecutor::new()
            .execute(engine.clone(), batch, BatchAggregator::new(None))
            .await;

        assert_eq!(
            engine.invocations(),
            vec!["FrenchRoyalty", "Broken", "Missing", "Garbled", "Family"]
        );
        assert_eq!(report.totals.attempted, 5);
        assert_eq!(report.totals.successful, 2);
        assert_eq!(report.totals.total_predictions, 3);
        assert_eq!(report.totals.total_queries, 1);
        let kinds: Vec<&str> = report.failures.iter().map(|f| f.kind).collect();
        assert_eq!(kinds, vec!["reported_failure", "launch", "deserialization"]);
        assert_eq!(report.predictions[0].subject, "Louis_XIV");
        assert_eq!(report.predictions[2].subject, "Bob");
    }

    #[tokio::test]
    async fn test_never_overlaps_invocations() {
        let engine = Arc::new(ScriptedEngine::new().fallback(
            ScriptedResponse::stdout(ROYALTY).with_delay(Duration::from_millis(20)),
        ));
        let batch = (0..4).map(|i| descriptor(&format!("G{i}"))).collect();

        let report = SequentialExecutor::new()
            .execute(engine.clone(), batch, BatchAggregator::new(None))
            .await;

        assert_eq!(report.totals.successful, 4);
        assert_eq!(engine.peak_concurrency(), 1);
    }

    #[tokio::test]
    async fn test_batch_of_one_french_royalty() {
        let engine = Arc::new(
            ScriptedEngine::new().respond("FrenchRoyalty", ScriptedResponse::stdout(ROYALTY)),
        );
        let dir = tempfile::tempdir().unwrap();
        let persister = crate::persist::ResultPersister::in_directory(dir.path());

        let report = SequentialExecutor::new()
            .execute(
                engine,
                vec![descriptor("FrenchRoyalty")],
                BatchAggregator::new(Some(persister)),
            )
            .await;

        assert_eq!(report.totals.attempted, 1);
        assert_eq!(report.totals.successful, 1);
        assert_eq!(report.totals.total_predictions, 1);
        assert_eq!(report.persisted.len(), 1);
        assert!(report.failures.is_empty());
    }

    #[tokio::test]
    async fn test_repeated_graph_name_persists_every_success() {
        let engine =
            Arc::new(ScriptedEngine::new().respond("Family", ScriptedResponse::stdout(FAMILY)));
        let dir = tempfile::tempdir().unwrap();
        let persister = crate::persist::ResultPersister::in_directory(dir.path());

        let report = SequentialExecutor::new()
            .execute(
                engine,
                vec![descriptor("Family"), descriptor("Family")],
                BatchAggregator::new(Some(persister)),
            )
            .await;

        assert_eq!(report.totals.successful, 2);
        assert_eq!(report.persisted.len(), 2);
        assert_ne!(report.persisted[0], report.persisted[1]);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
    }
}
