//! Demo Seeder - demo dataset synthesis and bulk upload for study catalogues
//!
//! Provides two independent procedures:
//! - Relational demo generation: randomized `Study`/`DataObject`/`StudyTopic`
//!   records with a consistent many-to-many relation, uploaded one document
//!   at a time to an Elasticsearch-like index
//! - Metadata upload: pre-existing per-entity JSON files, patched with a run
//!   of synthetic relation ids and pushed concurrently to a CDMI container

pub mod cdmi;
pub mod cli;
pub mod config;
pub mod generator;
pub mod index;
pub mod metadata;
pub mod models;

// Re-export commonly used types
pub use cdmi::{CdmiClient, CdmiError};
pub use config::{ConfigError, GeneratorConfig, IndexTarget, UploadConfig};
pub use generator::{DemoDataset, GeneratorError};
pub use index::{DocumentOutcome, IndexClient, IndexError};
pub use metadata::{MetadataError, MetadataUploader, ObjectOutcome};

// Re-export models
pub use models::{Classifier, DataObject, Study, StudyIdentifier, StudyTopic};
