// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};

/// Per-knowledge-graph job handed to the reasoning engine.
///
/// Serialized field names are the engine's request schema. Values are passed
/// through verbatim: the prefix may carry an intentional typo to match the RDF
/// data, paths are opaque and the threshold is not range-checked. Fields are
/// private so a descriptor cannot change once built.
///
/// # Example
/// ```yaml
/// prefix: "http://FrenchRoyalty.org/"
/// KG: FrenchRoyalty
/// rules_file: french_royalty.csv
/// rdf_file: french_royalty.nt
/// constraints_folder: FrenchRoyalty
/// pca_threshold: 0.7
/// skip_validation: true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasoningConfig {
    prefix: String,
    #[serde(rename = "KG")]
    graph_name: String,
    #[serde(rename = "rules_file")]
    rules_path: String,
    #[serde(rename = "rdf_file")]
    rdf_path: String,
    #[serde(rename = "constraints_folder")]
    constraints_dir: String,
    pca_threshold: f64,
    #[serde(default, skip_serializing_if = "is_false")]
    skip_validation: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl ReasoningConfig {
    pub fn new(
        prefix: impl Into<String>,
        graph_name: impl Into<String>,
        rules_path: impl Into<String>,
        rdf_path: impl Into<String>,
        constraints_dir: impl Into<String>,
        pca_threshold: f64,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            graph_name: graph_name.into(),
            rules_path: rules_path.into(),
            rdf_path: rdf_path.into(),
            constraints_dir: constraints_dir.into(),
            pca_threshold,
            skip_validation: false,
        }
    }

    pub fn with_skip_validation(mut self, skip_validation: bool) -> Self {
        self.skip_validation = skip_validation;
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Correlation key for filenames and logs.
    pub fn graph_name(&self) -> &str {
        &self.graph_name
    }

    pub fn rules_path(&self) -> &str {
        &self.rules_path
    }

    pub fn rdf_path(&self) -> &str {
        &self.rdf_path
    }

    pub fn constraints_dir(&self) -> &str {
        &self.constraints_dir
    }

    pub fn pca_threshold(&self) -> f64 {
        self.pca_threshold
    }

    pub fn skip_validation(&self) -> bool {
        self.skip_validation
    }

    /// Encode as the request document written to the engine's stdin.
    pub fn to_request_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn french_royalty() -> ReasoningConfig {
        ReasoningConfig::new(
            "http://FrenchRoyalty.org/",
            "FrenchRoyalty",
            "french_royalty.csv",
            "french_royalty.nt",
            "FrenchRoyalty",
            0.7,
        )
    }

    #[test]
    fn test_request_uses_engine_field_names() {
        let config = french_royalty().with_skip_validation(true);
        let request: Value = serde_json::from_slice(&config.to_request_json().unwrap()).unwrap();

        assert_eq!(request["prefix"], "http://FrenchRoyalty.org/");
        assert_eq!(request["KG"], "FrenchRoyalty");
        assert_eq!(request["rules_file"], "french_royalty.csv");
        assert_eq!(request["rdf_file"], "french_royalty.nt");
        assert_eq!(request["constraints_folder"], "FrenchRoyalty");
        assert_eq!(request["pca_threshold"], 0.7);
        assert_eq!(request["skip_validation"], true);
    }

    #[test]
    fn test_skip_validation_omitted_when_false() {
        let request: Value =
            serde_json::from_slice(&french_royalty().to_request_json().unwrap()).unwrap();

        assert!(request.get("skip_validation").is_none());
    }

    #[test]
    fn test_yaml_descriptor_defaults_skip_validation() {
        let yaml = r#"
prefix: "http://Famliy.org/"
KG: Family
rules_file: family.csv
rdf_file: family.nt
constraints_folder: Family
pca_threshold: 1.5
"#;
        let config: ReasoningConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.graph_name(), "Family");
        // passed through verbatim, typo and out-of-range threshold included
        assert_eq!(config.prefix(), "http://Famliy.org/");
        assert_eq!(config.pca_threshold(), 1.5);
        assert!(!config.skip_validation());
    }
}
