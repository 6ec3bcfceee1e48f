// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Single-graph mode: one invocation, the full result handed back to the
//! caller, and a `full_results_<timestamp>.json` file on success.

use std::path::PathBuf;

use crate::config::ReasoningConfig;
use crate::errors::DispatchError;
use crate::model::ReasoningResult;
use crate::observability::messages::persist::{ResultPersistFailed, ResultPersisted};
use crate::observability::messages::StructuredLog;
use crate::persist::ResultPersister;
use crate::traits::ReasoningEngine;

#[derive(Debug)]
pub struct SingleRun {
    pub result: ReasoningResult,
    /// `None` when persistence is disabled or the write failed.
    pub persisted_to: Option<PathBuf>,
}

/// Run one descriptor. A failed write of the result file is logged and does
/// not turn a successful invocation into an error.
pub async fn run_single(
    engine: &dyn ReasoningEngine,
    descriptor: &ReasoningConfig,
    persister: Option<&ResultPersister>,
) -> Result<SingleRun, DispatchError> {
    let graph = descriptor.graph_name();
    let result = engine.invoke(descriptor).await?;

    let persisted_to = persister.and_then(|persister| match persister.persist_single(&result) {
        Ok(path) => {
            ResultPersisted { graph, path: &path }.log();
            Some(path)
        }
        Err(error) => {
            ResultPersistFailed { graph, error: &error }.log();
            None
        }
    });

    Ok(SingleRun {
        result,
        persisted_to,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::{ScriptedEngine, ScriptedResponse};
    use crate::persist::load_result;

    const ROYALTY: &str = r#"{"success":true,"execution_time":2.5,"new_triples":[{"subject":"Louis_XIV","predicate":"child_of","object":"Louis_XIII"}],"sparql_queries":[{"query":"SELECT ?x WHERE { ?x <child_of> ?y }","execution_time":0.1,"result_count":1,"timestamp":"t"}],"summary":{"total_predictions":1,"queries_executed":1,"processing_successful":true}}"#;

    fn descriptor() -> ReasoningConfig {
        ReasoningConfig::new(
            "http://FrenchRoyalty.org/",
            "FrenchRoyalty",
            "french_royalty.csv",
            "french_royalty.nt",
            "FrenchRoyalty",
            0.7,
        )
        .with_skip_validation(true)
    }

    #[tokio::test]
    async fn test_success_is_persisted_as_full_results() {
        let engine = ScriptedEngine::new().respond("FrenchRoyalty", ScriptedResponse::stdout(ROYALTY));
        let dir = tempfile::tempdir().unwrap();
        let persister = ResultPersister::in_directory(dir.path());

        let run = run_single(&engine, &descriptor(), Some(&persister)).await.unwrap();

        assert!(run.result.success);
        assert_eq!(run.result.new_triple_count(), 1);
        let path = run.persisted_to.unwrap();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("full_results_"));
        assert!(name.ends_with(".json"));
        assert_eq!(load_result(&path).unwrap(), run.result);
    }

    #[tokio::test]
    async fn test_failure_writes_nothing() {
        let engine = ScriptedEngine::new().respond(
            "FrenchRoyalty",
            ScriptedResponse::exit(1, r#"{"success":false,"error":"rules file not found"}"#),
        );
        let dir = tempfile::tempdir().unwrap();
        let persister = ResultPersister::in_directory(dir.path());

        let err = run_single(&engine, &descriptor(), Some(&persister))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "reported_failure");
        assert!(err.to_string().contains("rules file not found"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_persistence_disabled() {
        let engine = ScriptedEngine::new().fallback(ScriptedResponse::stdout(ROYALTY));

        let run = run_single(&engine, &descriptor(), None).await.unwrap();

        assert!(run.persisted_to.is_none());
        assert_eq!(engine.invocation_count(), 1);
    }
}
