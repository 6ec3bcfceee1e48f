// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::{BatchConfig, Strategy};
use crate::engine::sequential::SequentialExecutor;
use crate::engine::worker_pool::WorkerPoolExecutor;
use crate::traits::BatchExecutor;

/// Factory for creating batch executors from configuration
pub struct ExecutorFactory;

impl ExecutorFactory {
    /// Create a batch executor based on the configuration strategy
    pub fn from_config(cfg: &BatchConfig) -> Box<dyn BatchExecutor> {
        Self::for_strategy(cfg.strategy, cfg.executor_options.resolved_concurrency())
    }

    pub fn for_strategy(strategy: Strategy, max_concurrency: usize) -> Box<dyn BatchExecutor> {
        match strategy {
            Strategy::Sequential => Box::new(SequentialExecutor::new()),
            Strategy::WorkerPool => Box::new(WorkerPoolExecutor::new(max_concurrency)),
        }
    }
}
