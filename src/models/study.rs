//! Study model

use super::topic::StudyTopic;
use serde::{Deserialize, Serialize};

/// A typed external identifier attached to a study (registry id, founder id).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudyIdentifier {
    pub identifier_type: String,
    pub identifier_value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Study {
    /// Unique within a run, sequential from 0.
    pub id: u64,
    pub display_title: String,
    #[serde(default)]
    pub study_topics: Vec<StudyTopic>,
    pub study_type: String,
    pub access_type: String,
    pub publisher: String,
    pub publication_year: u16,
    #[serde(default)]
    pub study_identifiers: Vec<StudyIdentifier>,
    /// Ids of linked data objects. Derived from data-object sampling: a data
    /// object appears here exactly when this study appears in its
    /// `related_studies`.
    #[serde(default)]
    pub linked_data_objects: Vec<u64>,
}
