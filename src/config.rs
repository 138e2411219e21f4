//! Configuration for the demo generator and the metadata uploader
//!
//! The original tools read counts, value pools and endpoints from top-of-file
//! constants. Here they are explicit structures with named fields, validated
//! before use and passed into the procedures.

use crate::models::Classifier;
use serde_json::json;
use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::path::PathBuf;

/// Error type for configuration validation
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid generator configuration: {0}")]
    InvalidGenerator(String),
    #[error("Invalid upload configuration: {0}")]
    InvalidUpload(String),
}

/// Parameters of the relational demo generator.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Number of studies to generate.
    pub studies: usize,
    /// Number of data objects to generate.
    pub data_objects: usize,
    /// Size of the shared topic pool.
    pub topics: usize,
    /// Distinct topics sampled per study (without replacement).
    pub topics_per_study: usize,
    /// Distinct studies sampled per data object (without replacement).
    pub studies_per_data_object: usize,
    /// Inclusive range for `publication_year`.
    pub year_range: RangeInclusive<u16>,
    pub study_types: Vec<String>,
    pub access_types: Vec<String>,
    pub publishers: Vec<String>,
    pub object_statuses: Vec<String>,
    pub object_type_names: Vec<String>,
    pub identifier_types: Vec<String>,
    pub topic_values: Vec<String>,
    pub topic_source_types: Vec<Classifier>,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            studies: 40,
            data_objects: 100,
            topics: 30,
            topics_per_study: 2,
            studies_per_data_object: 2,
            year_range: 2005..=2023,
            study_types: strings(&["interventional", "observational", "expanded access"]),
            access_types: strings(&["public", "restricted", "on request"]),
            publishers: strings(&["ClinicalTrials.gov", "EUCTR", "ISRCTN", "WHO ICTRP"]),
            object_statuses: strings(&["active", "archived", "embargoed"]),
            object_type_names: strings(&[
                "Journal article",
                "Study protocol",
                "Dataset",
                "Statistical analysis plan",
                "Clinical study report",
            ]),
            identifier_types: strings(&["registry id", "founder id"]),
            topic_values: strings(&[
                "diabetes",
                "asthma",
                "hypertension",
                "oncology",
                "cardiology",
                "neurology",
                "immunology",
                "rare diseases",
            ]),
            topic_source_types: vec![
                Classifier::new(11, "MeSH"),
                Classifier::new(14, "custom"),
            ],
        }
    }
}

impl GeneratorConfig {
    /// Check internal consistency of counts and pools.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.topics_per_study > self.topics {
            return Err(ConfigError::InvalidGenerator(format!(
                "topics_per_study ({}) exceeds topic pool size ({})",
                self.topics_per_study, self.topics
            )));
        }
        if self.studies_per_data_object > self.studies {
            return Err(ConfigError::InvalidGenerator(format!(
                "studies_per_data_object ({}) exceeds study count ({})",
                self.studies_per_data_object, self.studies
            )));
        }
        if self.year_range.is_empty() {
            return Err(ConfigError::InvalidGenerator(
                "year_range is empty".to_string(),
            ));
        }
        for (name, pool_len) in [
            ("study_types", self.study_types.len()),
            ("access_types", self.access_types.len()),
            ("publishers", self.publishers.len()),
            ("object_statuses", self.object_statuses.len()),
            ("object_type_names", self.object_type_names.len()),
            ("topic_values", self.topic_values.len()),
            ("topic_source_types", self.topic_source_types.len()),
        ] {
            if pool_len == 0 {
                return Err(ConfigError::InvalidGenerator(format!(
                    "value pool {} is empty",
                    name
                )));
            }
        }
        Ok(())
    }
}

/// Destination of the generated documents.
#[derive(Debug, Clone)]
pub struct IndexTarget {
    /// Base URL of the document index, e.g. "http://localhost:9200".
    pub host: String,
    pub study_index: String,
    pub data_object_index: String,
    /// Document type segment of the upload path.
    pub type_name: String,
    /// Optional field-mapping bodies, keyed by index name. A mapping PUT is
    /// issued only for index names present here.
    pub mappings: HashMap<String, serde_json::Value>,
}

impl Default for IndexTarget {
    fn default() -> Self {
        let mut mappings = HashMap::new();
        // Nested-field hints; without them the index flattens the topic and
        // identifier objects and per-entry queries stop matching.
        mappings.insert(
            "studies".to_string(),
            json!({
                "mappings": {
                    "doc": {
                        "properties": {
                            "study_topics": { "type": "nested" },
                            "study_identifiers": { "type": "nested" }
                        }
                    }
                }
            }),
        );
        Self {
            host: "http://localhost:9200".to_string(),
            study_index: "studies".to_string(),
            data_object_index: "data_objects".to_string(),
            type_name: "doc".to_string(),
            mappings,
        }
    }
}

/// Parameters of the metadata uploader, mirroring the five positional CLI
/// arguments plus the local directory the source files live under.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Provider host (IP address or domain).
    pub provider: String,
    /// Space name supported by the provider.
    pub space: String,
    /// Access token, passed through as `X-Auth-Token`.
    pub token: String,
    /// Maximum number of files to upload per source directory.
    pub limit: usize,
    /// Destination directory in the space; removed and recreated on each run.
    pub directory: String,
    /// Local directory containing the `studies` and `data_objects` sources.
    pub base_dir: PathBuf,
}

impl UploadConfig {
    pub fn new(
        provider: impl Into<String>,
        space: impl Into<String>,
        token: impl Into<String>,
        limit: usize,
        directory: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            space: space.into(),
            token: token.into(),
            limit,
            directory: directory.into(),
            base_dir: PathBuf::from("."),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("provider", &self.provider),
            ("space", &self.space),
            ("directory", &self.directory),
        ] {
            if value.is_empty() {
                return Err(ConfigError::InvalidUpload(format!(
                    "{} must not be empty",
                    name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_generator_config_is_valid() {
        assert!(GeneratorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_oversized_study_sample_rejected() {
        let config = GeneratorConfig {
            studies: 1,
            studies_per_data_object: 2,
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidGenerator(_))
        ));
    }

    #[test]
    fn test_oversized_topic_sample_rejected() {
        let config = GeneratorConfig {
            topics: 1,
            topics_per_study: 3,
            ..GeneratorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_pool_rejected() {
        let config = GeneratorConfig {
            publishers: Vec::new(),
            ..GeneratorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_mapping_only_covers_study_index() {
        let target = IndexTarget::default();
        assert!(target.mappings.contains_key("studies"));
        assert!(!target.mappings.contains_key("data_objects"));
    }

    #[test]
    fn test_upload_config_rejects_empty_space() {
        let config = UploadConfig::new("172.17.0.16", "", "token", 10, "demo");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidUpload(_))
        ));
    }
}
