// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Every diagnostic and operational log line in the crate is a typed message
//! struct with a `Display` implementation. Call sites build the struct and call
//! [`messages::StructuredLog::log`], which emits the event at the right level
//! with structured fields attached, so message wording lives in one place.
//!
//! # Usage
//!
//! ```rust
//! use kg_dispatch::observability::messages::dispatch::InvocationStarted;
//! use kg_dispatch::observability::messages::StructuredLog;
//!
//! let msg = InvocationStarted {
//!     graph: "FrenchRoyalty",
//!     engine: "subprocess",
//! };
//!
//! msg.log();
//! ```

pub mod messages;
