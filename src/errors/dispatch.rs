// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors from a single engine invocation.
//!
//! Every variant is scoped to one knowledge graph. The batch aggregator logs
//! and records them and moves on; only a batch of one surfaces them directly.

use std::time::Duration;
use thiserror::Error;

use crate::model::ReasoningResult;

#[derive(Error, Debug)]
pub enum DispatchError {
    /// The descriptor could not be encoded as a request document.
    #[error("Failed to serialize request for '{graph}': {source}")]
    Serialization {
        graph: String,
        source: serde_json::Error,
    },

    /// The engine process could not be started.
    #[error("Failed to launch engine '{program}' for '{graph}': {source}")]
    Launch {
        graph: String,
        program: String,
        source: std::io::Error,
    },

    /// The engine's stdin could not be written or its outputs could not be read.
    #[error("Engine I/O failed for '{graph}': {source}")]
    Transport {
        graph: String,
        source: std::io::Error,
    },

    /// The engine did not finish in time and was killed.
    #[error("Engine timed out after {timeout:?} for '{graph}'")]
    Timeout { graph: String, timeout: Duration },

    /// stdout was empty or not a response document. The raw bytes are kept.
    #[error(
        "Failed to parse engine output for '{graph}': {source}\nRaw output: {}",
        String::from_utf8_lossy(.raw_output)
    )]
    Deserialization {
        graph: String,
        source: serde_json::Error,
        raw_output: Vec<u8>,
        stderr: String,
    },

    /// The engine answered with `success: false`. The parsed result is kept
    /// for diagnostics.
    #[error("Processing failed for '{graph}': {message}")]
    ReportedFailure {
        graph: String,
        message: String,
        exit_code: Option<i32>,
        stderr: String,
        result: Box<ReasoningResult>,
    },

    /// The task driving the invocation panicked or was cancelled.
    #[error("Invocation for '{graph}' aborted: {reason}")]
    Aborted { graph: String, reason: String },
}

impl DispatchError {
    /// Graph name of the failed invocation.
    pub fn graph(&self) -> &str {
        match self {
            DispatchError::Serialization { graph, .. }
            | DispatchError::Launch { graph, .. }
            | DispatchError::Transport { graph, .. }
            | DispatchError::Timeout { graph, .. }
            | DispatchError::Deserialization { graph, .. }
            | DispatchError::ReportedFailure { graph, .. }
            | DispatchError::Aborted { graph, .. } => graph,
        }
    }

    /// Short machine-friendly label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            DispatchError::Serialization { .. } => "serialization",
            DispatchError::Launch { .. } => "launch",
            DispatchError::Transport { .. } => "transport",
            DispatchError::Timeout { .. } => "timeout",
            DispatchError::Deserialization { .. } => "deserialization",
            DispatchError::ReportedFailure { .. } => "reported_failure",
            DispatchError::Aborted { .. } => "aborted",
        }
    }

    /// Partially parsed result, only present for engine-reported failures.
    pub fn result(&self) -> Option<&ReasoningResult> {
        match self {
            DispatchError::ReportedFailure { result, .. } => Some(result.as_ref()),
            _ => None,
        }
    }

    pub fn into_result(self) -> Option<ReasoningResult> {
        match self {
            DispatchError::ReportedFailure { result, .. } => Some(*result),
            _ => None,
        }
    }

    /// Engine diagnostic output captured before the failure, if any.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            DispatchError::Deserialization { stderr, .. }
            | DispatchError::ReportedFailure { stderr, .. } => {
                Some(stderr.as_str()).filter(|s| !s.trim().is_empty())
            }
            _ => None,
        }
    }

    pub fn raw_output(&self) -> Option<&[u8]> {
        match self {
            DispatchError::Deserialization { raw_output, .. } => Some(raw_output.as_slice()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialization_message_carries_raw_output() {
        let source = serde_json::from_slice::<serde_json::Value>(b"Traceback: boom").unwrap_err();
        let err = DispatchError::Deserialization {
            graph: "Family".to_string(),
            source,
            raw_output: b"Traceback: boom".to_vec(),
            stderr: String::new(),
        };

        let message = err.to_string();
        assert!(message.contains("Family"));
        assert!(message.contains("Raw output: Traceback: boom"));
        assert_eq!(err.raw_output(), Some(&b"Traceback: boom"[..]));
        assert!(err.stderr().is_none());
        assert!(err.result().is_none());
    }

    #[test]
    fn test_reported_failure_keeps_result() {
        let err = DispatchError::ReportedFailure {
            graph: "FrenchRoyalty".to_string(),
            message: "missing rules file".to_string(),
            exit_code: Some(1),
            stderr: "ERROR - missing rules file\n".to_string(),
            result: Box::new(ReasoningResult::failure("missing rules file")),
        };

        assert_eq!(err.kind(), "reported_failure");
        assert!(err.to_string().contains("missing rules file"));
        assert_eq!(err.stderr(), Some("ERROR - missing rules file\n"));
        let result = err.into_result().unwrap();
        assert!(!result.success);
    }
}
