// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::PathBuf;
use thiserror::Error;

/// Errors writing or re-reading a persisted result document
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("Failed to encode result for {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl PersistError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            PersistError::Encode { path, .. }
            | PersistError::Write { path, .. }
            | PersistError::Read { path, .. }
            | PersistError::Decode { path, .. } => path,
        }
    }
}
