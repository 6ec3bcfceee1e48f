// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::ReasoningConfig;
use crate::engine::{BatchAggregator, BatchReport};
use crate::traits::ReasoningEngine;

#[async_trait]
pub trait BatchExecutor: Send + Sync {
    /// Dispatch every descriptor through `engine` and fold each outcome into
    /// `aggregator` in input order.
    ///
    /// - `engine`: shared engine capability, invoked once per descriptor
    /// - `descriptors`: the batch, in the order results must be folded
    /// - `aggregator`: owns totals, predictions and persistence
    ///
    /// A batch cannot fail as a whole: per-item errors are recorded in the
    /// returned report.
    async fn execute(
        &self,
        engine: Arc<dyn ReasoningEngine>,
        descriptors: Vec<ReasoningConfig>,
        aggregator: BatchAggregator,
    ) -> BatchReport;

    /// Strategy name for logs.
    fn name(&self) -> &'static str;

    /// Upper bound on simultaneous engine invocations.
    fn max_concurrency(&self) -> usize;
}
