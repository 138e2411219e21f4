//! Data object model

use super::classifier::Classifier;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataObject {
    /// Unique within a run, sequential from 0.
    pub id: u64,
    pub object_type: Classifier,
    pub description: String,
    pub access_type: String,
    pub publication_year: u16,
    pub object_status: String,
    pub url: String,
    /// Ids of related studies: a fixed-size distinct sample of all study ids.
    #[serde(default)]
    pub related_studies: Vec<u64>,
}
