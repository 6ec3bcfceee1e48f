// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Operator-facing summaries of results and batches.
//!
//! Everything here reads a [`ReasoningResult`] or [`BatchReport`] and never
//! changes it. Rendering cannot fail beyond the formatter's own errors.

use std::fmt::{Display, Formatter};

use crate::config::consts::PREVIEW_TRIPLE_COUNT;
use crate::engine::BatchReport;
use crate::model::{GraphStatistics, QueryRecord, ReasoningResult, SummaryDiscrepancy, Triple};

const RULE_WIDTH: usize = 50;

/// Derived view over one result.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultDigest<'a> {
    /// `None` when the table has no rows.
    pub shape: Option<[usize; 2]>,
    pub columns: &'a [String],
    pub preview: &'a [Triple],
    /// Predictions not shown in `preview`.
    pub remaining: usize,
    pub statistics: GraphStatistics,
    pub query_count: usize,
    pub total_query_results: usize,
    pub sample_query: Option<&'a QueryRecord>,
    pub execution_time: f64,
    pub discrepancy: Option<SummaryDiscrepancy>,
}

impl<'a> From<&'a ReasoningResult> for ResultDigest<'a> {
    fn from(result: &'a ReasoningResult) -> Self {
        let table = &result.predictions_dataframe;
        let shown = result.new_triples.len().min(PREVIEW_TRIPLE_COUNT);

        Self {
            shape: (table.rows() > 0).then_some(table.shape),
            columns: &table.columns,
            preview: &result.new_triples[..shown],
            remaining: result.new_triples.len() - shown,
            statistics: result.graphs.statistics,
            query_count: result.query_count(),
            total_query_results: result.total_query_results(),
            sample_query: result.sparql_queries.first(),
            execution_time: result.execution_time,
            discrepancy: result.summary_discrepancy(),
        }
    }
}

impl ResultDigest<'_> {
    /// Non-blank lines of the sample query, trimmed.
    pub fn sample_query_lines(&self) -> Vec<&str> {
        self.sample_query
            .map(|q| {
                q.query
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Display for ResultDigest<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        writeln!(f, "📊 FULL DATA ANALYSIS")?;
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;

        writeln!(f, "\n📋 Predictions DataFrame:")?;
        if let Some([rows, cols]) = self.shape {
            writeln!(f, "   Shape: {}x{}", rows, cols)?;
        }
        writeln!(f, "   Columns: [{}]", self.columns.join(" "))?;

        if self.preview.is_empty() {
            writeln!(f, "\n⚠️  No predictions generated")?;
        } else {
            writeln!(f, "\n🔮 Sample Predictions (first {}):", PREVIEW_TRIPLE_COUNT)?;
            for triple in self.preview {
                writeln!(f, "   {} -[{}]-> {}", triple.subject, triple.predicate, triple.object)?;
            }
            if self.remaining > 0 {
                writeln!(f, "   ... and {} more predictions", self.remaining)?;
            }
        }

        writeln!(f, "\n📈 Graph Statistics:")?;
        writeln!(f, "   Initial triples: {}", self.statistics.initial_triples)?;
        writeln!(f, "   Enriched triples: {}", self.statistics.enriched_triples)?;
        writeln!(f, "   New predictions: {}", self.statistics.predictions_added)?;

        writeln!(f, "\n🔍 SPARQL Queries:")?;
        writeln!(f, "   Total executed: {}", self.query_count)?;
        writeln!(f, "   Total results: {}", self.total_query_results)?;
        if let Some(query) = self.sample_query {
            writeln!(f, "\n   Sample query:")?;
            for line in self.sample_query_lines() {
                writeln!(f, "     {}", line)?;
            }
            writeln!(
                f,
                "   Results: {}, Time: {:.3}s",
                query.result_count, query.execution_time
            )?;
        }

        if let Some(d) = self.discrepancy {
            writeln!(f, "\n⚠️  Engine summary disagrees with result contents:")?;
            writeln!(
                f,
                "   Predictions: reported {}, observed {}",
                d.reported_predictions, d.observed_predictions
            )?;
            writeln!(
                f,
                "   Queries: reported {}, observed {}",
                d.reported_queries, d.observed_queries
            )?;
        }

        writeln!(f, "\n⏱️  Performance:")?;
        write!(f, "   Execution time: {:.2} seconds", self.execution_time)
    }
}

impl Display for BatchReport {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        writeln!(f, "📊 Aggregate Results:")?;
        writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;
        writeln!(f, "   Strategy: {}", self.strategy)?;
        writeln!(
            f,
            "   Successful KGs: {}/{}",
            self.totals.successful, self.totals.attempted
        )?;
        writeln!(f, "   Total predictions: {}", self.totals.total_predictions)?;
        writeln!(f, "   Total queries: {}", self.totals.total_queries)?;
        write!(f, "   Duration: {:.2?}", self.duration)?;

        if !self.persisted.is_empty() {
            write!(f, "\n\n💾 Result files:")?;
            for path in &self.persisted {
                write!(f, "\n   {}", path.display())?;
            }
        }

        if !self.failures.is_empty() {
            write!(f, "\n\n❌ Failed KGs:")?;
            for failure in &self.failures {
                write!(
                    f,
                    "\n   [{}] {} ({}): {}",
                    failure.position, failure.graph, failure.kind, failure.message
                )?;
            }
        }

        for failure in &self.persist_failures {
            write!(
                f,
                "\n   ⚠️  [{}] {} results not saved: {}",
                failure.position, failure.graph, failure.message
            )?;
        }

        Ok(())
    }
}
