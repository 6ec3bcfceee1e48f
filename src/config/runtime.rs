// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::backends::SubprocessEngine;
use crate::config::BatchConfig;
use crate::engine::factory::ExecutorFactory;
use crate::persist::ResultPersister;
use crate::traits::{BatchExecutor, ReasoningEngine};

/// Batch runtime builder - wires the engine transport, executor and result
/// persister from one configuration.
///
/// # Examples
///
/// ```
/// use kg_dispatch::config::{BatchConfig, RuntimeBuilder, Strategy};
///
/// let config = BatchConfig {
///     engine: Default::default(),
///     strategy: Strategy::WorkerPool,
///     executor_options: kg_dispatch::config::ExecutorOptions { max_concurrency: Some(2) },
///     output: Default::default(),
///     graphs: vec![],
/// };
///
/// let (engine, executor, persister) = RuntimeBuilder::from_config(&config);
///
/// assert_eq!(engine.name(), "subprocess");
/// assert_eq!(executor.max_concurrency(), 2);
/// assert!(persister.is_some());
/// ```
pub struct RuntimeBuilder;

impl RuntimeBuilder {
    /// Build the batch runtime.
    ///
    /// Returns the subprocess engine, the executor for the configured strategy
    /// and, unless persistence is switched off, a persister rooted at the
    /// configured output directory.
    pub fn from_config(
        cfg: &BatchConfig,
    ) -> (
        Arc<dyn ReasoningEngine>,
        Box<dyn BatchExecutor>,
        Option<ResultPersister>,
    ) {
        let engine: Arc<dyn ReasoningEngine> = Arc::new(SubprocessEngine::from_config(&cfg.engine));
        let executor = ExecutorFactory::from_config(cfg);
        let persister = cfg
            .output
            .persist
            .then(|| ResultPersister::new(cfg.output.directory.clone()));
        (engine, executor, persister)
    }
}
