//! Document index client
//!
//! Pushes serialized records to an Elasticsearch-like HTTP API, one PUT per
//! document at `/{index}/{type}/{id}/_create`. Uploads run sequentially with
//! no retry; each request's result is captured as a [`DocumentOutcome`]
//! instead of aborting the run, so a failed upload leaves the index partially
//! populated and the caller holds the full outcome list.

use crate::config::IndexTarget;
use crate::generator::DemoDataset;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Error type for index operations
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Index request failed: {0}")]
    RequestFailed(String),
}

/// Result of one document upload attempt.
#[derive(Debug, Clone)]
pub struct DocumentOutcome {
    pub index: String,
    pub id: u64,
    /// HTTP status, when a response was received at all.
    pub status: Option<u16>,
    pub error: Option<String>,
}

impl DocumentOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none() && self.status.is_some_and(|s| (200..300).contains(&s))
    }
}

/// Client for the document-index HTTP API
pub struct IndexClient {
    host: String,
    client: reqwest::Client,
}

impl IndexClient {
    /// Create a new index client.
    ///
    /// # Arguments
    ///
    /// * `host` - Base URL of the index, e.g. "http://localhost:9200"
    pub fn new(host: impl Into<String>) -> Self {
        let host = host.into();
        Self {
            host: host.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn document_url(&self, index: &str, type_name: &str, id: u64) -> String {
        format!("{}/{}/{}/{}/_create", self.host, index, type_name, id)
    }

    /// Establish field-mapping metadata for an index.
    pub async fn put_mapping(
        &self,
        index: &str,
        body: &serde_json::Value,
    ) -> Result<(), IndexError> {
        let url = format!("{}/{}", self.host, index);
        let response = self
            .client
            .put(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| IndexError::NetworkError(format!("Failed to put mapping: {}", e)))?;

        if !response.status().is_success() {
            return Err(IndexError::RequestFailed(format!(
                "Mapping request for {} returned {}",
                index,
                response.status()
            )));
        }
        debug!(index, "index mapping created");
        Ok(())
    }

    /// Upload one record as a document, returning the HTTP status.
    ///
    /// A non-success status is not an error here; the caller decides what a
    /// rejected document means.
    pub async fn create_document<T: Serialize>(
        &self,
        index: &str,
        type_name: &str,
        id: u64,
        record: &T,
    ) -> Result<u16, IndexError> {
        let url = self.document_url(index, type_name, id);
        let response = self
            .client
            .put(&url)
            .json(record)
            .send()
            .await
            .map_err(|e| IndexError::NetworkError(format!("Failed to create document: {}", e)))?;

        Ok(response.status().as_u16())
    }

    /// Upload a whole dataset, studies first, one document at a time.
    ///
    /// Mapping PUTs are issued up front for index names with a configured
    /// mapping body. Failures are logged and collected, never fatal.
    pub async fn upload_dataset(
        &self,
        dataset: &DemoDataset,
        target: &IndexTarget,
    ) -> Vec<DocumentOutcome> {
        for index in [&target.study_index, &target.data_object_index] {
            if let Some(mapping) = target.mappings.get(index)
                && let Err(e) = self.put_mapping(index, mapping).await
            {
                warn!(index = %index, error = %e, "index mapping not established");
            }
        }

        let mut outcomes = Vec::with_capacity(dataset.studies.len() + dataset.data_objects.len());
        for study in &dataset.studies {
            outcomes.push(
                self.upload_record(&target.study_index, &target.type_name, study.id, study)
                    .await,
            );
        }
        for data_object in &dataset.data_objects {
            outcomes.push(
                self.upload_record(
                    &target.data_object_index,
                    &target.type_name,
                    data_object.id,
                    data_object,
                )
                .await,
            );
        }

        let failed = outcomes.iter().filter(|o| !o.succeeded()).count();
        info!(
            total = outcomes.len(),
            failed, "dataset upload finished"
        );
        outcomes
    }

    async fn upload_record<T: Serialize>(
        &self,
        index: &str,
        type_name: &str,
        id: u64,
        record: &T,
    ) -> DocumentOutcome {
        match self.create_document(index, type_name, id, record).await {
            Ok(status) => {
                if !(200..300).contains(&status) {
                    warn!(index, id, status, "document rejected by index");
                }
                DocumentOutcome {
                    index: index.to_string(),
                    id,
                    status: Some(status),
                    error: None,
                }
            }
            Err(e) => {
                warn!(index, id, error = %e, "document upload failed");
                DocumentOutcome {
                    index: index.to_string(),
                    id,
                    status: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_url_shape() {
        let client = IndexClient::new("http://localhost:9200");
        assert_eq!(
            client.document_url("studies", "doc", 17),
            "http://localhost:9200/studies/doc/17/_create"
        );
    }

    #[test]
    fn test_trailing_host_slash_is_normalized() {
        let client = IndexClient::new("http://localhost:9200/");
        assert_eq!(
            client.document_url("data_objects", "doc", 0),
            "http://localhost:9200/data_objects/doc/0/_create"
        );
    }

    #[test]
    fn test_outcome_success_requires_2xx() {
        let outcome = |status: Option<u16>, error: Option<&str>| DocumentOutcome {
            index: "studies".to_string(),
            id: 1,
            status,
            error: error.map(str::to_string),
        };
        assert!(outcome(Some(201), None).succeeded());
        assert!(!outcome(Some(409), None).succeeded());
        assert!(!outcome(None, Some("connection refused")).succeeded());
    }
}
