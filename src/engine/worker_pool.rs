// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Bounded pool of concurrent engine processes with an ordered fold.
//!
//! Every descriptor gets its own task; a semaphore caps how many of them hold
//! an engine process at once. The control task awaits the join handles in
//! input order and folds each outcome as soon as it and all earlier ones are
//! ready, so totals, predictions and result files follow input order even
//! when invocations finish out of order.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::Instrument;

use crate::config::ReasoningConfig;
use crate::engine::{BatchAggregator, BatchReport};
use crate::errors::DispatchError;
use crate::observability::messages::batch::{BatchItemStarted, BatchStarted};
use crate::observability::messages::StructuredLog;
use crate::traits::{BatchExecutor, ReasoningEngine};

#[derive(Debug, Clone, Copy)]
pub struct WorkerPoolExecutor {
    max_concurrency: usize,
}

impl WorkerPoolExecutor {
    /// A pool of `max_concurrency` slots; zero is raised to one.
    pub fn new(max_concurrency: usize) -> Self {
        Self {
            max_concurrency: max_concurrency.max(1),
        }
    }
}

#[async_trait]
impl BatchExecutor for WorkerPoolExecutor {
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
            max_concurrency: self.max_concurrency,
        }
        .log();

        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let mut tasks = Vec::with_capacity(total);

        for (index, descriptor) in descriptors.into_iter().enumerate() {
            let position = index + 1;
            let engine = engine.clone();
            let semaphore = semaphore.clone();
            let task_descriptor = descriptor.clone();
            let span = BatchItemStarted {
                position,
                total,
                graph: descriptor.graph_name(),
            }
            .span("batch_item");

            let task = tokio::spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(e) => {
                        return Err(DispatchError::Aborted {
                            graph: task_descriptor.graph_name().to_string(),
                            reason: format!("worker pool closed: {}", e),
                        })
                    }
                };

                BatchItemStarted {
                    position,
                    total,
                    graph: task_descriptor.graph_name(),
                }
                .log();

                engine.invoke(&task_descriptor).await
            }
            .instrument(span));

            tasks.push((descriptor, task));
        }

        for (index, (descriptor, task)) in tasks.into_iter().enumerate() {
            let outcome = match task.await {
                Ok(outcome) => outcome,
                Err(join_error) => Err(DispatchError::Aborted {
                    graph: descriptor.graph_name().to_string(),
                    reason: format!("Task join error: {}", join_error),
                }),
            };
            aggregator.fold(index + 1, &descriptor, outcome).await;
        }

        aggregator.finish(self.name())
    }

    fn name(&self) -> &'static str {
        "WorkerPool"
    }

    fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }
}
