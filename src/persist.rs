// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Result Persister: write-once JSON documents, one per invocation.
//!
//! Documents use the engine's response schema with 2-space indentation so
//! downstream tooling can parse them exactly like engine output. Timestamped
//! files are never overwritten: when the name is taken, a `_2`, `_3`, ...
//! suffix is added before the extension.

use chrono::{DateTime, Local};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::config::consts::RESULT_TIMESTAMP_FORMAT;
use crate::errors::PersistError;
use crate::model::ReasoningResult;

/// Names and writes result files under an optional directory.
#[derive(Debug, Clone, Default)]
pub struct ResultPersister {
    directory: Option<PathBuf>,
}

impl ResultPersister {
    /// `None` writes into the current directory.
    pub fn new(directory: Option<PathBuf>) -> Self {
        Self { directory }
    }

    pub fn in_directory(directory: impl Into<PathBuf>) -> Self {
        Self::new(Some(directory.into()))
    }

    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    /// Write `result` to exactly `path`, creating parent directories.
    /// Returns the number of bytes written.
    pub fn persist(&self, result: &ReasoningResult, path: &Path) -> Result<usize, PersistError> {
        let buffer = encode(result, path)?;
        create_parent(path)?;

        fs::write(path, &buffer).map_err(|source| PersistError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(buffer.len())
    }

    /// Write `result` to `path`, or to the first free `<stem>_<n>.<ext>`
    /// next to it. Returns the path actually written.
    pub fn persist_new(
        &self,
        result: &ReasoningResult,
        path: &Path,
    ) -> Result<PathBuf, PersistError> {
        let buffer = encode(result, path)?;
        create_parent(path)?;

        let mut candidate = path.to_path_buf();
        let mut attempt = 1;
        loop {
            match OpenOptions::new().write(true).create_new(true).open(&candidate) {
                Ok(mut file) => {
                    file.write_all(&buffer).map_err(|source| PersistError::Write {
                        path: candidate.clone(),
                        source,
                    })?;
                    return Ok(candidate);
                }
                Err(error) if error.kind() == ErrorKind::AlreadyExists => {
                    attempt += 1;
                    candidate = numbered(path, attempt);
                }
                Err(source) => {
                    return Err(PersistError::Write {
                        path: candidate,
                        source,
                    })
                }
            }
        }
    }

    /// `results_<graph>_<YYYYMMDD_HHMMSS>.json` for one batch item.
    pub fn persist_for_graph(
        &self,
        result: &ReasoningResult,
        graph: &str,
    ) -> Result<PathBuf, PersistError> {
        self.persist_new(result, &self.graph_result_path(graph, Local::now()))
    }

    /// `full_results_<YYYYMMDD_HHMMSS>.json` for a batch of one.
    pub fn persist_single(&self, result: &ReasoningResult) -> Result<PathBuf, PersistError> {
        self.persist_new(result, &self.single_result_path(Local::now()))
    }

    pub fn graph_result_path(&self, graph: &str, at: DateTime<Local>) -> PathBuf {
        self.resolve(format!(
            "results_{}_{}.json",
            filename_safe(graph),
            at.format(RESULT_TIMESTAMP_FORMAT)
        ))
    }

    pub fn single_result_path(&self, at: DateTime<Local>) -> PathBuf {
        self.resolve(format!(
            "full_results_{}.json",
            at.format(RESULT_TIMESTAMP_FORMAT)
        ))
    }

    fn resolve(&self, filename: String) -> PathBuf {
        match &self.directory {
            Some(directory) => directory.join(filename),
            None => PathBuf::from(filename),
        }
    }
}

fn encode(result: &ReasoningResult, path: &Path) -> Result<Vec<u8>, PersistError> {
    serde_json::to_vec_pretty(result).map_err(|source| PersistError::Encode {
        path: path.to_path_buf(),
        source,
    })
}

fn create_parent(path: &Path) -> Result<(), PersistError> {
    match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => fs::create_dir_all(parent).map_err(|source| PersistError::Write {
            path: path.to_path_buf(),
            source,
        }),
        None => Ok(()),
    }
}

/// `dir/name.json` -> `dir/name_<n>.json`.
fn numbered(path: &Path, n: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let filename = match path.extension() {
        Some(ext) => format!("{}_{}.{}", stem, n, ext.to_string_lossy()),
        None => format!("{}_{}", stem, n),
    };
    path.with_file_name(filename)
}

/// Path separators in a graph name would move the file elsewhere.
fn filename_safe(graph: &str) -> String {
    graph
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect()
}

/// Re-read a persisted result document.
pub fn load_result<P: AsRef<Path>>(path: P) -> Result<ReasoningResult, PersistError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| PersistError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| PersistError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const FULL_RESPONSE: &str = r#"{
  "success": true,
  "execution_time": 12.5,
  "timestamp": "2025-03-01T10:15:30.123456",
  "predictions_dataframe": {
    "columns": ["subject", "predicate", "object", "pca_confidence"],
    "data": [{"subject": "Louis_XIV", "predicate": "child_of", "object": "Louis_XIII", "pca_confidence": 0.75}],
    "shape": [1, 4],
    "dtypes": {"subject": "object", "predicate": "object", "object": "object", "pca_confidence": "float64"}
  },
  "new_triples": [{"subject": "Louis_XIV", "predicate": "child_of", "object": "Louis_XIII"}],
  "graphs": {
    "initial": {
      "triples": [{"subject": "http://FrenchRoyalty.org/Louis_XIII", "predicate": "http://FrenchRoyalty.org/spouse", "object": "http://FrenchRoyalty.org/Anne", "object_type": "uri"}],
      "total_triples": 100,
      "namespaces": {"fr": "http://FrenchRoyalty.org/"},
      "limited_to": 100
    },
    "enriched": {"triples": [], "total_triples": 101, "namespaces": {}, "limited_to": null},
    "statistics": {"initial_triples": 100, "enriched_triples": 101, "predictions_added": 1}
  },
  "sparql_queries": [
    {"query": "SELECT ?x WHERE {\n  ?x <http://FrenchRoyalty.org/child_of> ?y .\n}", "execution_time": 0.25, "result_count": 7, "timestamp": "2025-03-01T10:15:20"}
  ],
  "output_files": {"predictions_folder": "FrenchRoyalty/predictions", "enriched_kg_path": "FrenchRoyalty_EnrichedKG/FrenchRoyalty_Enriched_KG.nt", "log_file": "logs/full_data_20250301-101518.log"},
  "summary": {"total_predictions": 1, "queries_executed": 1, "processing_successful": true}
}"#;

    fn full_result() -> ReasoningResult {
        ReasoningResult::from_json_slice(FULL_RESPONSE.as_bytes()).unwrap()
    }

    #[test]
    fn test_round_trip_preserves_every_field() {
        let dir = tempfile::tempdir().unwrap();
        let persister = ResultPersister::in_directory(dir.path());
        let original = full_result();

        let path = persister.persist_for_graph(&original, "FrenchRoyalty").unwrap();
        let reloaded = load_result(&path).unwrap();

        assert_eq!(reloaded, original);
        assert_eq!(reloaded.predictions_dataframe.shape, [1, 4]);
        assert_eq!(reloaded.graphs.initial.limited_to, Some(100));
        assert_eq!(reloaded.graphs.enriched.limited_to, None);
    }

    #[test]
    fn test_written_document_is_indented_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");

        let bytes = ResultPersister::default().persist(&full_result(), &path).unwrap();
        let text = fs::read_to_string(&path).unwrap();

        assert_eq!(bytes, text.len());
        assert!(text.starts_with("{\n  \"success\": true,\n  \"execution_time\": 12.5,"));
        assert!(text.contains("\"limited_to\": null"));
        assert!(!text.contains("\"error\""));
    }

    #[test]
    fn test_failed_result_keeps_error_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("failed.json");
        let failed = ReasoningResult::failure("missing rules file");

        ResultPersister::default().persist(&failed, &path).unwrap();
        let reloaded = load_result(&path).unwrap();

        assert_eq!(reloaded, failed);
        assert_eq!(reloaded.error.as_deref(), Some("missing rules file"));
    }

    #[test]
    fn test_filenames() {
        let at = Local.with_ymd_and_hms(2025, 3, 1, 9, 5, 7).unwrap();
        let persister = ResultPersister::in_directory("out");

        assert_eq!(
            persister.graph_result_path("FrenchRoyalty", at),
            PathBuf::from("out/results_FrenchRoyalty_20250301_090507.json")
        );
        assert_eq!(
            persister.single_result_path(at),
            PathBuf::from("out/full_results_20250301_090507.json")
        );
        assert_eq!(
            ResultPersister::default().graph_result_path("a/b", at),
            PathBuf::from("results_a_b_20250301_090507.json")
        );
    }

    #[test]
    fn test_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let persister = ResultPersister::in_directory(dir.path().join("nested").join("results"));

        let path = persister.persist_single(&full_result()).unwrap();

        assert!(path.exists());
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("full_results_"));
    }

    #[test]
    fn test_write_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"not a directory").unwrap();

        let err = ResultPersister::in_directory(&blocker)
            .persist_for_graph(&full_result(), "Family")
            .unwrap_err();

        assert!(matches!(err, PersistError::Write { .. }));
        assert!(err.path().starts_with(&blocker));
    }

    #[test]
    fn test_load_rejects_non_result_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bogus.json");
        fs::write(&path, b"{\"KG\": \"Family\"}").unwrap();

        assert!(matches!(load_result(&path), Err(PersistError::Decode { .. })));
    }

    #[test]
    fn test_taken_name_gets_numbered_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let persister = ResultPersister::in_directory(dir.path());
        let at = Local.with_ymd_and_hms(2025, 3, 1, 9, 5, 7).unwrap();
        let path = persister.graph_result_path("Family", at);
        let mut second = full_result();
        second.execution_time = 99.0;

        let first_path = persister.persist_new(&full_result(), &path).unwrap();
        let second_path = persister.persist_new(&second, &path).unwrap();
        let third_path = persister.persist_new(&full_result(), &path).unwrap();

        assert_eq!(first_path, path);
        assert_eq!(second_path, dir.path().join("results_Family_20250301_090507_2.json"));
        assert_eq!(third_path, dir.path().join("results_Family_20250301_090507_3.json"));
        assert_eq!(load_result(&first_path).unwrap(), full_result());
        assert_eq!(load_result(&second_path).unwrap().execution_time, 99.0);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 3);
    }

    #[test]
    fn test_same_graph_twice_keeps_both_results() {
        let dir = tempfile::tempdir().unwrap();
        let persister = ResultPersister::in_directory(dir.path());

        let first = persister.persist_for_graph(&full_result(), "Family").unwrap();
        let second = persister.persist_for_graph(&full_result(), "Family").unwrap();

        assert_ne!(first, second);
        assert!(first.exists());
        assert!(second.exists());
    }
}
