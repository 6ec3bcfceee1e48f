// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! In-memory engine that replays canned engine output.
//!
//! Responses go through the same [`decode_response`] policy as the subprocess
//! engine, so tests exercise the real parse rules without spawning processes.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::backends::response::{decode_response, EngineOutput};
use crate::config::ReasoningConfig;
use crate::errors::DispatchError;
use crate::model::ReasoningResult;
use crate::traits::ReasoningEngine;

/// What the scripted engine does for one graph.
#[derive(Debug, Clone)]
pub struct ScriptedResponse {
    output: EngineOutput,
    delay: Option<Duration>,
    unlaunchable: bool,
}

impl ScriptedResponse {
    /// Clean exit printing `stdout`.
    pub fn stdout(stdout: impl Into<String>) -> Self {
        Self::exit(0, stdout)
    }

    pub fn exit(exit_code: i32, stdout: impl Into<String>) -> Self {
        let stdout: String = stdout.into();
        Self {
            output: EngineOutput::new(exit_code, stdout, Vec::<u8>::new()),
            delay: None,
            unlaunchable: false,
        }
    }

    /// Behaves like an engine binary that does not exist.
    pub fn unlaunchable() -> Self {
        Self {
            output: EngineOutput::default(),
            delay: None,
            unlaunchable: true,
        }
    }

    pub fn with_stderr(mut self, stderr: impl Into<String>) -> Self {
        self.output.stderr = stderr.into().into_bytes();
        self
    }

    /// Hold the invocation open for `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// Engine keyed by graph name. Unknown graphs get the fallback response, or
/// empty output when there is none.
#[derive(Default)]
pub struct ScriptedEngine {
    responses: HashMap<String, ScriptedResponse>,
    fallback: Option<ScriptedResponse>,
    invocations: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, graph: impl Into<String>, response: ScriptedResponse) -> Self {
        self.responses.insert(graph.into(), response);
        self
    }

    pub fn fallback(mut self, response: ScriptedResponse) -> Self {
        self.fallback = Some(response);
        self
    }

    /// Graph names in the order invocations started.
    pub fn invocations(&self) -> Vec<String> {
        self.invocations
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    pub fn invocation_count(&self) -> usize {
        self.invocations().len()
    }

    /// Highest number of invocations that were running at the same time.
    pub fn peak_concurrency(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReasoningEngine for ScriptedEngine {
    async fn invoke(&self, descriptor: &ReasoningConfig) -> Result<ReasoningResult, DispatchError> {
        let graph = descriptor.graph_name();
        if let Ok(mut calls) = self.invocations.lock() {
            calls.push(graph.to_string());
        }

        let response = self
            .responses
            .get(graph)
            .or(self.fallback.as_ref())
            .cloned()
            .unwrap_or_else(|| ScriptedResponse::stdout(""));

        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(running, Ordering::SeqCst);

        if let Some(delay) = response.delay {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if response.unlaunchable {
            return Err(DispatchError::Launch {
                graph: graph.to_string(),
                program: "scripted".to_string(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "scripted launch failure",
                ),
            });
        }

        decode_response(graph, response.output)
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}
