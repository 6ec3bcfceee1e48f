// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod aggregator;
pub mod factory;
pub mod sequential;
pub mod single;
pub mod worker_pool;

pub use aggregator::{BatchAggregator, BatchFailure, BatchReport, BatchTotals, PersistFailure};
pub use factory::ExecutorFactory;
pub use sequential::SequentialExecutor;
pub use single::{run_single, SingleRun};
pub use worker_pool::WorkerPoolExecutor;
