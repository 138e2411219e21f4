//! Metadata uploader
//!
//! Reads per-entity JSON files from the fixed `studies` and `data_objects`
//! source directories, extends each record's relation list with a run of 19
//! synthetic ids, recreates the destination CDMI container and uploads the
//! records. All uploads within one source directory run concurrently (one
//! task per file) and the whole batch is joined before the next directory
//! starts; per-file results are collected as [`ObjectOutcome`]s.

use crate::cdmi::{CdmiClient, CdmiError};
use crate::config::{ConfigError, UploadConfig};
use serde_json::Value;
use std::cmp::Ordering;
use std::iter::Peekable;
use std::path::{Path, PathBuf};
use std::str::Chars;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Fixed source directory names, uploaded in this order.
pub const SOURCE_DIRS: [&str; 2] = ["studies", "data_objects"];

/// Synthetic entries appended after the first relation-list entry.
const SYNTHETIC_RELATIONS: i64 = 19;

/// Error type for metadata upload operations
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Cdmi(#[from] CdmiError),
    #[error("Failed to read {0}: {1}")]
    FileRead(PathBuf, String),
    #[error("Failed to parse {0}: {1}")]
    FileParse(PathBuf, String),
    #[error("Record in {0} has no relation entry to extend from")]
    EmptyRelationList(PathBuf),
}

/// Result of one object upload attempt.
#[derive(Debug, Clone)]
pub struct ObjectOutcome {
    pub file: String,
    pub status: Option<u16>,
    pub error: Option<String>,
}

impl ObjectOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none() && self.status.is_some_and(|s| (200..300).contains(&s))
    }

    fn failed(file: String, error: impl ToString) -> Self {
        Self {
            file,
            status: None,
            error: Some(error.to_string()),
        }
    }
}

/// Compare strings treating maximal digit runs by numeric value, so
/// `"file2"` sorts before `"file10"`.
///
/// Runs that differ only in leading zeros compare by run length, keeping the
/// ordering total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut a_chars = a.chars().peekable();
    let mut b_chars = b.chars().peekable();
    loop {
        match (a_chars.peek().copied(), b_chars.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let a_run = take_digit_run(&mut a_chars);
                let b_run = take_digit_run(&mut b_chars);
                let a_value = a_run.trim_start_matches('0');
                let b_value = b_run.trim_start_matches('0');
                let ordering = a_value
                    .len()
                    .cmp(&b_value.len())
                    .then_with(|| a_value.cmp(b_value))
                    .then_with(|| a_run.len().cmp(&b_run.len()));
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            (Some(x), Some(y)) => {
                let ordering = x.cmp(&y);
                if ordering != Ordering::Equal {
                    return ordering;
                }
                a_chars.next();
                b_chars.next();
            }
        }
    }
}

fn take_digit_run(chars: &mut Peekable<Chars>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.peek().copied()
        && c.is_ascii_digit()
    {
        run.push(c);
        chars.next();
    }
    run
}

/// Extend the record's relation list with synthetic ids.
///
/// Studies get 19 ascending ids after the first `linked_data_objects` entry;
/// anything else gets 19 descending ids after the first `related_studies`
/// entry. A missing or empty list is reported as
/// [`MetadataError::EmptyRelationList`] rather than panicking.
pub fn extend_relations(record: &mut Value, path: &Path) -> Result<(), MetadataError> {
    let is_study = record.get("object_type").and_then(Value::as_str) == Some("study");
    let (field, step) = if is_study {
        ("linked_data_objects", 1i64)
    } else {
        ("related_studies", -1i64)
    };

    let relations = record
        .get_mut(field)
        .and_then(Value::as_array_mut)
        .ok_or_else(|| MetadataError::EmptyRelationList(path.to_path_buf()))?;
    let start_id = relations
        .first()
        .and_then(|entry| entry.get("id"))
        .and_then(Value::as_i64)
        .ok_or_else(|| MetadataError::EmptyRelationList(path.to_path_buf()))?;

    for i in 1..=SYNTHETIC_RELATIONS {
        relations.push(serde_json::json!({ "id": start_id + step * i }));
    }
    Ok(())
}

/// List a source directory, order filenames naturally, take the first
/// `limit`. A missing directory yields an empty batch.
///
/// Only the top level is listed; subdirectories are ignored. Source
/// directories hold one JSON file per entity and nothing below that.
pub async fn select_files(dir: &Path, limit: usize) -> Result<Vec<PathBuf>, MetadataError> {
    if !dir.is_dir() {
        warn!(dir = %dir.display(), "source directory not found, skipping");
        return Ok(Vec::new());
    }

    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| MetadataError::FileRead(dir.to_path_buf(), e.to_string()))?;
    let mut names: Vec<String> = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| MetadataError::FileRead(dir.to_path_buf(), e.to_string()))?
    {
        if entry
            .file_type()
            .await
            .map_err(|e| MetadataError::FileRead(entry.path(), e.to_string()))?
            .is_file()
        {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    names.sort_by(|a, b| natural_cmp(a, b));
    names.truncate(limit);
    Ok(names.into_iter().map(|name| dir.join(name)).collect())
}

async fn load_record(path: &Path) -> Result<Value, MetadataError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| MetadataError::FileRead(path.to_path_buf(), e.to_string()))?;
    serde_json::from_str(&content)
        .map_err(|e| MetadataError::FileParse(path.to_path_buf(), e.to_string()))
}

/// Runs the whole upload procedure: container recreate, then one concurrent
/// upload batch per source directory.
pub struct MetadataUploader {
    client: Arc<CdmiClient>,
    config: UploadConfig,
}

impl MetadataUploader {
    pub fn new(config: UploadConfig) -> Result<Self, MetadataError> {
        config.validate()?;
        let client = CdmiClient::new(&config.provider, config.token.clone())?;
        Ok(Self {
            client: Arc::new(client),
            config,
        })
    }

    /// Execute the upload, returning one outcome per attempted file.
    ///
    /// Unreadable or unparsable input files abort the run; a record whose
    /// relation list cannot be extended is recorded as a failed outcome and
    /// the run continues.
    pub async fn run(&self) -> Result<Vec<ObjectOutcome>, MetadataError> {
        self.client
            .delete_container(&self.config.space, &self.config.directory)
            .await;
        self.client
            .create_container(&self.config.space, &self.config.directory)
            .await?;

        let mut outcomes = Vec::new();
        for source in SOURCE_DIRS {
            outcomes.extend(self.upload_source(source).await?);
        }
        Ok(outcomes)
    }

    /// Upload one source directory as a single concurrent batch.
    ///
    /// Every selected file is read and its relation list extended before any
    /// upload task spawns, so an unparsable file aborts the batch with no
    /// uploads attempted and never cancels in-flight requests.
    pub async fn upload_source(&self, source: &str) -> Result<Vec<ObjectOutcome>, MetadataError> {
        let files = select_files(&self.config.base_dir.join(source), self.config.limit).await?;
        info!(source, files = files.len(), "uploading metadata batch");

        let mut outcomes = Vec::new();
        let mut prepared = Vec::with_capacity(files.len());
        for path in files {
            let filename = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            let mut record = load_record(&path).await?;
            match extend_relations(&mut record, &path) {
                Ok(()) => prepared.push((filename, record)),
                Err(e) => {
                    warn!(file = %filename, error = %e, "record skipped");
                    outcomes.push(ObjectOutcome::failed(filename, e));
                }
            }
        }

        let mut tasks: JoinSet<ObjectOutcome> = JoinSet::new();
        for (filename, record) in prepared {
            let client = Arc::clone(&self.client);
            let space = self.config.space.clone();
            let directory = self.config.directory.clone();
            tasks.spawn(async move {
                match client
                    .put_object(&space, &directory, &filename, &record)
                    .await
                {
                    Ok(status) => ObjectOutcome {
                        file: filename,
                        status: Some(status),
                        error: None,
                    },
                    Err(e) => ObjectOutcome::failed(filename, e),
                }
            });
        }

        // Join the whole batch before the next source directory starts.
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => {
                    if !outcome.succeeded() {
                        warn!(file = %outcome.file, status = ?outcome.status, "object upload failed");
                    }
                    outcomes.push(outcome);
                }
                Err(e) => warn!(error = %e, "upload task aborted"),
            }
        }
        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    mod natural_cmp_tests {
        use super::*;

        #[test]
        fn test_numeric_runs_compare_by_value() {
            let mut names = vec!["f1", "f10", "f2"];
            names.sort_by(|a, b| natural_cmp(a, b));
            assert_eq!(names, vec!["f1", "f2", "f10"]);
        }

        #[test]
        fn test_plain_strings_compare_lexically() {
            assert_eq!(natural_cmp("abc", "abd"), Ordering::Less);
            assert_eq!(natural_cmp("abc", "abc"), Ordering::Equal);
            assert_eq!(natural_cmp("b", "ab"), Ordering::Greater);
        }

        #[test]
        fn test_prefix_sorts_first() {
            assert_eq!(natural_cmp("file", "file1"), Ordering::Less);
            assert_eq!(natural_cmp("file2x", "file2"), Ordering::Greater);
        }

        #[test]
        fn test_leading_zeros_break_ties_by_run_length() {
            assert_eq!(natural_cmp("f007", "f7"), Ordering::Greater);
            assert_eq!(natural_cmp("f007", "f007"), Ordering::Equal);
            assert_eq!(natural_cmp("f08", "f9"), Ordering::Less);
        }
    }

    mod extend_relations_tests {
        use super::*;

        #[test]
        fn test_study_extension_ascends() {
            let mut record = json!({
                "object_type": "study",
                "linked_data_objects": [{ "id": 5 }]
            });
            extend_relations(&mut record, Path::new("study_0.json")).unwrap();

            let ids: Vec<i64> = record["linked_data_objects"]
                .as_array()
                .unwrap()
                .iter()
                .map(|entry| entry["id"].as_i64().unwrap())
                .collect();
            assert_eq!(ids, (5..=24).collect::<Vec<i64>>());
        }

        #[test]
        fn test_data_object_extension_descends() {
            let mut record = json!({
                "object_type": "data_object",
                "related_studies": [{ "id": 5 }]
            });
            extend_relations(&mut record, Path::new("do_0.json")).unwrap();

            let ids: Vec<i64> = record["related_studies"]
                .as_array()
                .unwrap()
                .iter()
                .map(|entry| entry["id"].as_i64().unwrap())
                .collect();
            assert_eq!(ids, (-14..=5).rev().collect::<Vec<i64>>());
        }

        #[test]
        fn test_empty_list_reports_instead_of_panicking() {
            let mut record = json!({
                "object_type": "study",
                "linked_data_objects": []
            });
            let result = extend_relations(&mut record, Path::new("study_1.json"));
            assert!(matches!(result, Err(MetadataError::EmptyRelationList(_))));
        }

        #[test]
        fn test_missing_list_reports_instead_of_panicking() {
            let mut record = json!({ "object_type": "data_object" });
            let result = extend_relations(&mut record, Path::new("do_1.json"));
            assert!(matches!(result, Err(MetadataError::EmptyRelationList(_))));
        }

        #[test]
        fn test_existing_entries_are_preserved() {
            let mut record = json!({
                "object_type": "study",
                "linked_data_objects": [{ "id": 3, "title": "kept" }, { "id": 9 }]
            });
            extend_relations(&mut record, Path::new("study_2.json")).unwrap();

            let relations = record["linked_data_objects"].as_array().unwrap();
            assert_eq!(relations.len(), 21);
            assert_eq!(relations[0]["title"], "kept");
            assert_eq!(relations[1]["id"], 9);
            assert_eq!(relations[2]["id"], 4);
            assert_eq!(relations[20]["id"], 22);
        }
    }

    mod select_files_tests {
        use super::*;

        #[tokio::test]
        async fn test_selection_is_naturally_ordered_and_limited() {
            let dir = tempfile::tempdir().unwrap();
            for name in ["f10.json", "f1.json", "f2.json", "f30.json", "f4.json"] {
                std::fs::write(dir.path().join(name), "{}").unwrap();
            }

            let selected = select_files(dir.path(), 3).await.unwrap();
            let names: Vec<&str> = selected
                .iter()
                .map(|p| p.file_name().unwrap().to_str().unwrap())
                .collect();
            assert_eq!(names, vec!["f1.json", "f2.json", "f4.json"]);
        }

        #[tokio::test]
        async fn test_subdirectories_are_not_descended_into() {
            let dir = tempfile::tempdir().unwrap();
            std::fs::write(dir.path().join("study_1.json"), "{}").unwrap();
            let nested = dir.path().join("nested");
            std::fs::create_dir(&nested).unwrap();
            std::fs::write(nested.join("study_2.json"), "{}").unwrap();

            let selected = select_files(dir.path(), 10).await.unwrap();
            let names: Vec<&str> = selected
                .iter()
                .map(|p| p.file_name().unwrap().to_str().unwrap())
                .collect();
            assert_eq!(names, vec!["study_1.json"]);
        }

        #[tokio::test]
        async fn test_missing_directory_yields_empty_batch() {
            let selected = select_files(Path::new("no/such/dir"), 5).await.unwrap();
            assert!(selected.is_empty());
        }
    }
}
