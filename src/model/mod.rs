// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod graph;
mod result;

pub use graph::{GraphSet, GraphSnapshot, GraphStatistics, Triple, OBJECT_TYPE_LITERAL};
pub use result::{
    OutputFiles, PredictionsTable, QueryRecord, ReasoningResult, RunSummary, SummaryDiscrepancy,
};
