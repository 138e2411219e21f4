//! Models module
//!
//! Defines the document shapes uploaded to the index: studies, data objects
//! and the shared topic pool. All models serialize 1:1 to the JSON documents
//! the catalogue frontend queries.

pub mod classifier;
pub mod data_object;
pub mod study;
pub mod topic;

pub use classifier::Classifier;
pub use data_object::DataObject;
pub use study::{Study, StudyIdentifier};
pub use topic::StudyTopic;
