// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The Result Model: everything one engine invocation reports.
//!
//! Field names and nesting follow the engine's response document exactly, so
//! the same types deserialize engine output and serialize persisted results.
//! All fields except `success` fall back to defaults because a failing engine
//! emits only `success`, `error`, `traceback` and `timestamp`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::graph::{GraphSet, Triple};

/// Tabular projection of the predictions.
///
/// Duplicates `new_triples` for display and analysis; it is not a separate
/// source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionsTable {
    #[serde(default)]
    pub columns: Vec<String>,
    /// One JSON object per row, keyed by column name.
    #[serde(default)]
    pub data: Vec<Map<String, Value>>,
    /// `[rows, cols]`
    #[serde(default)]
    pub shape: [usize; 2],
    #[serde(default)]
    pub dtypes: BTreeMap<String, String>,
}

impl Default for PredictionsTable {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            data: Vec::new(),
            shape: [0, 0],
            dtypes: BTreeMap::new(),
        }
    }
}

impl PredictionsTable {
    pub fn rows(&self) -> usize {
        self.shape[0]
    }
}

/// One SPARQL query the engine executed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRecord {
    pub query: String,
    /// Seconds.
    #[serde(default)]
    pub execution_time: f64,
    #[serde(default)]
    pub result_count: usize,
    #[serde(default)]
    pub timestamp: String,
}

/// Engine-reported totals. May disagree with the observable counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    #[serde(default)]
    pub total_predictions: usize,
    #[serde(default)]
    pub queries_executed: usize,
    #[serde(default)]
    pub processing_successful: bool,
}

/// Files the engine wrote on its side of the process boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputFiles {
    #[serde(default)]
    pub predictions_folder: String,
    #[serde(default)]
    pub enriched_kg_path: String,
    #[serde(default)]
    pub log_file: String,
}

/// Complete outcome of one engine invocation.
///
/// Created once from the engine's output and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasoningResult {
    pub success: bool,
    /// Seconds, as measured by the engine.
    #[serde(default)]
    pub execution_time: f64,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub predictions_dataframe: PredictionsTable,
    #[serde(default)]
    pub new_triples: Vec<Triple>,
    #[serde(default)]
    pub graphs: GraphSet,
    #[serde(default)]
    pub sparql_queries: Vec<QueryRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_files: Option<OutputFiles>,
    #[serde(default)]
    pub summary: RunSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traceback: Option<String>,
}

/// Difference between what the engine's summary claims and what the result
/// actually contains. Both sides are kept; nothing is reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryDiscrepancy {
    pub reported_predictions: usize,
    pub observed_predictions: usize,
    pub reported_queries: usize,
    pub observed_queries: usize,
}

impl SummaryDiscrepancy {
    pub fn predictions_differ(&self) -> bool {
        self.reported_predictions != self.observed_predictions
    }

    pub fn queries_differ(&self) -> bool {
        self.reported_queries != self.observed_queries
    }
}

impl ReasoningResult {
    /// A failed result as the engine would report it.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            execution_time: 0.0,
            timestamp: String::new(),
            predictions_dataframe: PredictionsTable::default(),
            new_triples: Vec::new(),
            graphs: GraphSet::default(),
            sparql_queries: Vec::new(),
            output_files: None,
            summary: RunSummary::default(),
            error: Some(message.into()),
            traceback: None,
        }
    }

    /// Parse an engine response document.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    pub fn new_triple_count(&self) -> usize {
        self.new_triples.len()
    }

    pub fn query_count(&self) -> usize {
        self.sparql_queries.len()
    }

    /// Sum of result rows over every recorded query.
    pub fn total_query_results(&self) -> usize {
        self.sparql_queries.iter().map(|q| q.result_count).sum()
    }

    /// Error text, or an empty string when the engine gave none.
    pub fn error_message(&self) -> &str {
        self.error.as_deref().unwrap_or("")
    }

    /// `Some` when the engine's summary disagrees with the observable counts.
    pub fn summary_discrepancy(&self) -> Option<SummaryDiscrepancy> {
        let discrepancy = SummaryDiscrepancy {
            reported_predictions: self.summary.total_predictions,
            observed_predictions: self.new_triple_count(),
            reported_queries: self.summary.queries_executed,
            observed_queries: self.query_count(),
        };

        if discrepancy.predictions_differ() || discrepancy.queries_differ() {
            Some(discrepancy)
        } else {
            None
        }
    }
}
