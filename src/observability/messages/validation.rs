// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for configuration validation.

use crate::errors::ValidationError;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A validation issue; logged at `warn!` for warnings, `error!` otherwise.
///
/// # Example
/// ```
/// use kg_dispatch::errors::ValidationError;
/// use kg_dispatch::observability::messages::validation::ValidationIssueReported;
///
/// let issue = ValidationError::DuplicateGraphName {
///     graph_name: "Family".to_string(),
/// };
/// let msg = ValidationIssueReported { issue: &issue };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct ValidationIssueReported<'a> {
    pub issue: &'a ValidationError,
}

impl Display for ValidationIssueReported<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let label = if self.issue.is_warning() {
            "Validation warning"
        } else {
            "Validation error"
        };
        write!(f, "{}: {}", label, self.issue)
    }
}

impl StructuredLog for ValidationIssueReported<'_> {
    fn log(&self) {
        if self.issue.is_warning() {
            tracing::warn!(issue = %self.issue, "{}", self);
        } else {
            tracing::error!(issue = %self.issue, "{}", self);
        }
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::WARN,
            "validation_issue",
            span_name = name,
            issue = %self.issue,
        )
    }
}
