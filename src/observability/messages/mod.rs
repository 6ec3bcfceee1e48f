// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! # Organization
//!
//! * `dispatch` - one engine invocation: launch, exit, parse, timeout
//! * `batch` - batch lifecycle and per-item outcomes
//! * `persist` - result file writes
//! * `validation` - configuration issues

use tracing::Span;

pub mod batch;
pub mod dispatch;
pub mod persist;
pub mod validation;

/// A log message that knows its own level and structured fields.
pub trait StructuredLog {
    /// Emit the message as a tracing event.
    fn log(&self);

    /// Build a span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
