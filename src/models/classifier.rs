//! Categorized id/name pairs used by several models

use serde::{Deserialize, Serialize};

/// A categorized value, e.g. a data-object type or a topic source type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Classifier {
    pub id: u64,
    pub name: String,
}

impl Classifier {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
