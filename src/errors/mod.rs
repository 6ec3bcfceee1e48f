// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod dispatch;
mod persist;

pub use config::{ConfigError, ValidationError};
pub use dispatch::DispatchError;
pub use persist::PersistError;
