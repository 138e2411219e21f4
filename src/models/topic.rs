//! Study topic model

use super::classifier::Classifier;
use serde::{Deserialize, Serialize};

/// A topic from the shared pool, referenced by studies.
///
/// The pool is generated once per run; studies embed the pool entries they
/// sample so each serialized document stays self-contained.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudyTopic {
    pub id: u64,
    pub topic_source_type: Classifier,
    pub topic_value: String,
}
