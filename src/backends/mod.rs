// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Reasoning engine transports.
//!
//! Every transport implements [`ReasoningEngine`](crate::traits::ReasoningEngine)
//! and hands its captured output to [`response::decode_response`], so the
//! parse and failure rules are identical across transports.
//!
//! ## Subprocess
//! The production transport: the engine runs as a child process that reads
//! one request document on stdin and writes one response document on stdout.
//!
//! ## Stub
//! Scripted in-memory engine for tests and examples: canned output per graph,
//! optional delays, invocation and concurrency tracking.

pub mod response;
pub mod stub;
pub mod subprocess;

pub use response::{decode_response, EngineOutput};
pub use stub::{ScriptedEngine, ScriptedResponse};
pub use subprocess::SubprocessEngine;
