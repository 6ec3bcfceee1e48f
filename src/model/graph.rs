// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! RDF-level values reported by the reasoning engine: triples, graph
//! snapshots and the before/after statistics block.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Object type tag the engine uses for literal objects.
pub const OBJECT_TYPE_LITERAL: &str = "literal";

/// One RDF statement.
///
/// Duplicates are allowed; uniqueness is the engine's business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: String,
    /// `"literal"` or `"uri"` when the engine tags the object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,
}

impl Triple {
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
            object_type: None,
        }
    }

    pub fn with_object_type(mut self, object_type: impl Into<String>) -> Self {
        self.object_type = Some(object_type.into());
        self
    }

    /// True only when the engine explicitly tagged the object as a literal.
    pub fn is_literal(&self) -> bool {
        self.object_type.as_deref() == Some(OBJECT_TYPE_LITERAL)
    }
}

/// A view of a graph at one point in time.
///
/// `total_triples` counts the whole graph, so it may exceed `triples.len()`
/// when the engine truncated the snapshot to `limited_to` triples.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    #[serde(default)]
    pub triples: Vec<Triple>,
    #[serde(default)]
    pub total_triples: usize,
    #[serde(default)]
    pub namespaces: BTreeMap<String, String>,
    /// `None` (serialized as `null`) means the snapshot is unlimited.
    #[serde(default)]
    pub limited_to: Option<usize>,
}

impl GraphSnapshot {
    /// Whether the snapshot holds fewer triples than the graph it was taken from.
    pub fn is_truncated(&self) -> bool {
        self.triples.len() < self.total_triples
    }
}

/// Engine-reported graph growth. Authoritative: never recomputed from the
/// snapshots because this crate does not parse RDF.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStatistics {
    #[serde(default)]
    pub initial_triples: usize,
    #[serde(default)]
    pub enriched_triples: usize,
    #[serde(default)]
    pub predictions_added: usize,
}

/// The `graphs` block of a response document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSet {
    #[serde(default)]
    pub initial: GraphSnapshot,
    #[serde(default)]
    pub enriched: GraphSnapshot,
    #[serde(default)]
    pub statistics: GraphStatistics,
}
