// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;   // engine transports
pub mod config;     // batch config + descriptors
pub mod engine;     // batch executors + aggregation
pub mod errors;     // error handling
pub mod model;      // engine result document
pub mod observability;
pub mod persist;    // result files
pub mod report;     // console summaries
pub mod traits;     // unified abstractions
