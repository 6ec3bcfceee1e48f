// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Reasoning engine driven as a child process.
//!
//! One call owns one child for its whole life: spawn, write the request to
//! stdin, close stdin, drain stdout and stderr concurrently, wait for exit.
//! With a timeout configured, expiry drops the child, which kills it
//! (`kill_on_drop`), and the call yields [`DispatchError::Timeout`].

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::Instrument;

use crate::backends::response::{decode_response, EngineOutput};
use crate::config::{EngineConfig, ReasoningConfig};
use crate::errors::DispatchError;
use crate::model::ReasoningResult;
use crate::observability::messages::dispatch::{
    EngineExited, InvocationStarted, InvocationTimedOut, RequestNotConsumed,
};
use crate::observability::messages::StructuredLog;
use crate::traits::ReasoningEngine;

/// Launches `program args...` once per invocation.
#[derive(Debug, Clone)]
pub struct SubprocessEngine {
    program: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
    env: BTreeMap<String, String>,
    timeout: Option<Duration>,
}

impl SubprocessEngine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
            env: BTreeMap::new(),
            timeout: None,
        }
    }

    pub fn from_config(cfg: &EngineConfig) -> Self {
        Self {
            program: cfg.command.clone(),
            args: cfg.args.clone(),
            working_dir: cfg.working_dir.clone(),
            env: cfg.env.clone(),
            timeout: cfg.timeout(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Spawn the engine, feed it `request`, and collect its output.
    async fn run_process(&self, graph: &str, request: Vec<u8>) -> Result<EngineOutput, DispatchError> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .envs(&self.env)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        let mut child = command.spawn().map_err(|source| DispatchError::Launch {
            graph: graph.to_string(),
            program: self.program.clone(),
            source,
        })?;

        let mut stdin = child.stdin.take().ok_or_else(|| DispatchError::Transport {
            graph: graph.to_string(),
            source: std::io::Error::new(ErrorKind::Other, "engine stdin was not captured"),
        })?;

        // stdin is dropped (closed) as soon as the request is written so the
        // engine sees end-of-input.
        let feed = async move {
            let written = stdin.write_all(&request).await;
            drop(stdin);
            written
        };
        let run = async move { tokio::join!(feed, child.wait_with_output()) };

        let started = Instant::now();
        let (fed, waited) = match self.timeout {
            Some(timeout) => match tokio::time::timeout(timeout, run).await {
                Ok(finished) => finished,
                Err(_) => {
                    InvocationTimedOut { graph, timeout }.log();
                    return Err(DispatchError::Timeout {
                        graph: graph.to_string(),
                        timeout,
                    });
                }
            },
            None => run.await,
        };

        if let Err(error) = fed {
            if error.kind() == ErrorKind::BrokenPipe {
                RequestNotConsumed {
                    graph,
                    error: &error,
                }
                .log();
            } else {
                return Err(DispatchError::Transport {
                    graph: graph.to_string(),
                    source: error,
                });
            }
        }

        let output = EngineOutput::from(waited.map_err(|source| DispatchError::Transport {
            graph: graph.to_string(),
            source,
        })?);

        EngineExited {
            graph,
            exit_code: output.exit_code,
            stdout_bytes: output.stdout.len(),
            stderr_bytes: output.stderr.len(),
            duration: started.elapsed(),
        }
        .log();

        Ok(output)
    }
}

#[async_trait]
impl ReasoningEngine for SubprocessEngine {
    async fn invoke(&self, descriptor: &ReasoningConfig) -> Result<ReasoningResult, DispatchError> {
        let graph = descriptor.graph_name();
        let started = InvocationStarted {
            graph,
            engine: self.name(),
        };
        started.log();

        async {
            let request = descriptor
                .to_request_json()
                .map_err(|source| DispatchError::Serialization {
                    graph: graph.to_string(),
                    source,
                })?;

            let output = self.run_process(graph, request).await?;
            decode_response(graph, output)
        }
        .instrument(started.span("engine_invocation"))
        .await
    }

    fn name(&self) -> &'static str {
        "subprocess"
    }
}
