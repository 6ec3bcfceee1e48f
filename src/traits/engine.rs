// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::config::ReasoningConfig;
use crate::errors::DispatchError;
use crate::model::ReasoningResult;

/// The reasoning engine seen as an opaque capability.
///
/// One call is one complete engine run for one knowledge graph. The transport
/// behind it (subprocess, RPC, in-process) is invisible to the batch layer.
#[async_trait]
pub trait ReasoningEngine: Send + Sync {
    /// Run the engine for `descriptor`.
    ///
    /// `Ok` always carries a result with `success == true`. When the engine
    /// itself reports a failure the parsed result rides along inside
    /// [`DispatchError::ReportedFailure`].
    async fn invoke(&self, descriptor: &ReasoningConfig) -> Result<ReasoningResult, DispatchError>;

    fn name(&self) -> &'static str;
}
