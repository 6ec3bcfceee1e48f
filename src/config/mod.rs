// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod descriptor;
mod loader;
mod runtime;
mod validation;

pub mod consts;

pub use descriptor::ReasoningConfig;
pub use loader::{
    load_and_validate_config, load_config, BatchConfig, EngineConfig, ExecutorOptions,
    OutputConfig, Strategy,
};
pub use runtime::RuntimeBuilder;
pub use validation::validate_batch_config;
