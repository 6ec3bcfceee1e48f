// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for a single engine invocation.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// Engine invocation started for one knowledge graph.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use kg_dispatch::observability::messages::dispatch::InvocationStarted;
///
/// let msg = InvocationStarted {
///     graph: "FrenchRoyalty",
///     engine: "subprocess",
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct InvocationStarted<'a> {
    pub graph: &'a str,
    pub engine: &'a str,
}

impl Display for InvocationStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Processing {} with full data capture via {} engine",
            self.graph, self.engine
        )
    }
}

impl StructuredLog for InvocationStarted<'_> {
    fn log(&self) {
        tracing::info!(graph = self.graph, engine = self.engine, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "invocation",
            span_name = name,
            graph = self.graph,
            engine = self.engine,
        )
    }
}

/// Engine process exited and its output was read.
///
/// # Log Level
/// `debug!` - Routine detail
pub struct EngineExited<'a> {
    pub graph: &'a str,
    pub exit_code: Option<i32>,
    pub stdout_bytes: usize,
    pub stderr_bytes: usize,
    pub duration: Duration,
}

impl Display for EngineExited<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Engine for '{}' exited with {}: stdout={} bytes, stderr={} bytes, duration={:?}",
            self.graph,
            describe_exit(self.exit_code),
            self.stdout_bytes,
            self.stderr_bytes,
            self.duration
        )
    }
}

impl StructuredLog for EngineExited<'_> {
    fn log(&self) {
        tracing::debug!(
            graph = self.graph,
            exit_code = self.exit_code,
            stdout_bytes = self.stdout_bytes,
            stderr_bytes = self.stderr_bytes,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "engine_exited",
            span_name = name,
            graph = self.graph,
            exit_code = self.exit_code,
            duration = ?self.duration,
        )
    }
}

/// Engine exited abnormally. stderr is included for the operator; it is
/// never parsed.
///
/// # Log Level
/// `warn!` - Degraded but recoverable
///
/// # Example
/// ```
/// use kg_dispatch::observability::messages::dispatch::EngineExitedAbnormally;
///
/// let msg = EngineExitedAbnormally {
///     graph: "FrenchRoyalty",
///     exit_code: Some(1),
///     stderr: "Traceback (most recent call last): ...",
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct EngineExitedAbnormally<'a> {
    pub graph: &'a str,
    pub exit_code: Option<i32>,
    pub stderr: &'a str,
}

impl Display for EngineExitedAbnormally<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Engine for '{}' exited with {}",
            self.graph,
            describe_exit(self.exit_code)
        )?;
        if !self.stderr.trim().is_empty() {
            write!(f, "\nEngine stderr:\n{}", self.stderr.trim_end())?;
        }
        Ok(())
    }
}

impl StructuredLog for EngineExitedAbnormally<'_> {
    fn log(&self) {
        tracing::warn!(
            graph = self.graph,
            exit_code = self.exit_code,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "engine_exited_abnormally",
            span_name = name,
            graph = self.graph,
            exit_code = self.exit_code,
        )
    }
}

/// The engine closed its stdin before reading the whole request.
///
/// # Log Level
/// `warn!` - Degraded but recoverable
pub struct RequestNotConsumed<'a> {
    pub graph: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for RequestNotConsumed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Engine for '{}' stopped reading its request early: {}",
            self.graph, self.error
        )
    }
}

impl StructuredLog for RequestNotConsumed<'_> {
    fn log(&self) {
        tracing::warn!(graph = self.graph, error = %self.error, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "request_not_consumed",
            span_name = name,
            graph = self.graph,
            error = %self.error,
        )
    }
}

/// Invocation exceeded its timeout; the child process is being killed.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct InvocationTimedOut<'a> {
    pub graph: &'a str,
    pub timeout: Duration,
}

impl Display for InvocationTimedOut<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Engine for '{}' exceeded {:?}; killing process",
            self.graph, self.timeout
        )
    }
}

impl StructuredLog for InvocationTimedOut<'_> {
    fn log(&self) {
        tracing::error!(
            graph = self.graph,
            timeout_secs = self.timeout.as_secs(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "invocation_timed_out",
            span_name = name,
            graph = self.graph,
            timeout = ?self.timeout,
        )
    }
}

/// The engine's summary block disagrees with what its result contains.
///
/// # Log Level
/// `warn!` - Both values are kept, nothing is reconciled
pub struct SummaryMismatch<'a> {
    pub graph: &'a str,
    pub reported_predictions: usize,
    pub observed_predictions: usize,
    pub reported_queries: usize,
    pub observed_queries: usize,
}

impl Display for SummaryMismatch<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Engine summary for '{}' disagrees with result contents: predictions reported={} observed={}, queries reported={} observed={}",
            self.graph,
            self.reported_predictions,
            self.observed_predictions,
            self.reported_queries,
            self.observed_queries
        )
    }
}

impl StructuredLog for SummaryMismatch<'_> {
    fn log(&self) {
        tracing::warn!(
            graph = self.graph,
            reported_predictions = self.reported_predictions,
            observed_predictions = self.observed_predictions,
            reported_queries = self.reported_queries,
            observed_queries = self.observed_queries,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "summary_mismatch",
            span_name = name,
            graph = self.graph,
        )
    }
}

fn describe_exit(exit_code: Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abnormal_exit_includes_stderr() {
        let msg = EngineExitedAbnormally {
            graph: "FrenchRoyalty",
            exit_code: Some(1),
            stderr: "FileNotFoundError: french_royalty.csv\n",
        };

        let text = msg.to_string();
        assert!(text.contains("exit code 1"));
        assert!(text.contains("FileNotFoundError: french_royalty.csv"));
    }

    #[test]
    fn test_abnormal_exit_without_stderr() {
        let msg = EngineExitedAbnormally {
            graph: "Family",
            exit_code: None,
            stderr: "  \n",
        };

        assert_eq!(
            msg.to_string(),
            "Engine for 'Family' exited with no exit code (terminated by signal)"
        );
    }
}
