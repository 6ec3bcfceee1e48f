// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Turning captured engine output into a Result Model.
//!
//! The rules, in order:
//!
//! 1. stdout is parsed whatever the exit status, because the engine reports
//!    structured failures on non-zero exits too.
//! 2. Empty or malformed stdout is a [`DispatchError::Deserialization`] that
//!    keeps the raw bytes.
//! 3. A parsed `success: false` is a [`DispatchError::ReportedFailure`] whose
//!    message is the engine's `error` text and which keeps the parsed result.
//! 4. Anything else is `Ok`. An abnormal exit with `success: true` is logged.
//!
//! stderr is never parsed. It is logged on abnormal exits and attached to
//! errors for the operator.

use crate::errors::DispatchError;
use crate::model::ReasoningResult;
use crate::observability::messages::dispatch::{EngineExitedAbnormally, SummaryMismatch};
use crate::observability::messages::StructuredLog;

/// Used when the engine reports failure but leaves `error` empty.
pub const UNSPECIFIED_ENGINE_ERROR: &str = "engine reported failure without an error message";

/// Everything captured from one finished engine run.
#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub exited_cleanly: bool,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl EngineOutput {
    pub fn new(exit_code: i32, stdout: impl Into<Vec<u8>>, stderr: impl Into<Vec<u8>>) -> Self {
        Self {
            exit_code: Some(exit_code),
            exited_cleanly: exit_code == 0,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }
}

impl From<std::process::Output> for EngineOutput {
    fn from(output: std::process::Output) -> Self {
        Self {
            exit_code: output.status.code(),
            exited_cleanly: output.status.success(),
            stdout: output.stdout,
            stderr: output.stderr,
        }
    }
}

/// Apply the parse policy to one engine run's output.
pub fn decode_response(graph: &str, output: EngineOutput) -> Result<ReasoningResult, DispatchError> {
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !output.exited_cleanly {
        EngineExitedAbnormally {
            graph,
            exit_code: output.exit_code,
            stderr: &stderr,
        }
        .log();
    }

    let result = match ReasoningResult::from_json_slice(&output.stdout) {
        Ok(result) => result,
        Err(source) => {
            return Err(DispatchError::Deserialization {
                graph: graph.to_string(),
                source,
                raw_output: output.stdout,
                stderr,
            })
        }
    };

    if !result.success {
        let message = match result.error.as_deref() {
            Some(error) if !error.trim().is_empty() => error.to_string(),
            _ => UNSPECIFIED_ENGINE_ERROR.to_string(),
        };
        return Err(DispatchError::ReportedFailure {
            graph: graph.to_string(),
            message,
            exit_code: output.exit_code,
            stderr,
            result: Box::new(result),
        });
    }

    if let Some(discrepancy) = result.summary_discrepancy() {
        SummaryMismatch {
            graph,
            reported_predictions: discrepancy.reported_predictions,
            observed_predictions: discrepancy.observed_predictions,
            reported_queries: discrepancy.reported_queries,
            observed_queries: discrepancy.observed_queries,
        }
        .log();
    }

    Ok(result)
}
