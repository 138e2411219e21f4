//! CDMI object store client
//!
//! Container and object operations against a CDMI 1.1.1 HTTP endpoint.
//! Every request carries `X-Auth-Token` and the specification-version
//! header; container paths end in `/`. The store typically runs behind a
//! self-signed certificate, so TLS verification is disabled.

use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

pub const CDMI_SPECIFICATION_VERSION: &str = "1.1.1";

const CONTAINER_CONTENT_TYPE: &str = "application/cdmi-container";
const OBJECT_CONTENT_TYPE: &str = "application/cdmi-object";

/// Error type for CDMI operations
#[derive(Debug, thiserror::Error)]
pub enum CdmiError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Container operation failed: {0}")]
    ContainerError(String),
}

/// Client for a CDMI-style object/container HTTP API
pub struct CdmiClient {
    base_url: String,
    token: String,
    client: reqwest::Client,
}

impl CdmiClient {
    /// Create a client for `https://{provider}/cdmi`.
    pub fn new(provider: &str, token: impl Into<String>) -> Result<Self, CdmiError> {
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(|e| CdmiError::ClientBuild(e.to_string()))?;
        Ok(Self {
            base_url: format!("https://{}/cdmi", provider),
            token: token.into(),
            client,
        })
    }

    fn container_url(&self, space: &str, directory: &str) -> String {
        format!("{}/{}/{}/", self.base_url, space, directory)
    }

    fn object_url(&self, space: &str, directory: &str, filename: &str) -> String {
        format!("{}/{}/{}/{}", self.base_url, space, directory, filename)
    }

    fn request(
        &self,
        method: Method,
        url: &str,
        content_type: &'static str,
    ) -> reqwest::RequestBuilder {
        self.client
            .request(method, url)
            .header("X-Auth-Token", &self.token)
            .header(
                "X-CDMI-Specification-Version",
                CDMI_SPECIFICATION_VERSION,
            )
            .header(CONTENT_TYPE, content_type)
    }

    /// Delete a container. Absence of the container (or any other failure)
    /// is tolerated: the next step recreates it anyway.
    pub async fn delete_container(&self, space: &str, directory: &str) {
        let url = self.container_url(space, directory);
        match self
            .request(Method::DELETE, &url, CONTAINER_CONTENT_TYPE)
            .send()
            .await
        {
            Ok(response) => debug!(url = %url, status = %response.status(), "container delete"),
            Err(e) => debug!(url = %url, error = %e, "container delete failed, ignored"),
        }
    }

    /// (Re)create a container as empty.
    pub async fn create_container(&self, space: &str, directory: &str) -> Result<(), CdmiError> {
        let url = self.container_url(space, directory);
        let response = self
            .request(Method::PUT, &url, CONTAINER_CONTENT_TYPE)
            .send()
            .await
            .map_err(|e| CdmiError::NetworkError(format!("Failed to create container: {}", e)))?;

        if !response.status().is_success() {
            return Err(CdmiError::ContainerError(format!(
                "Container create at {} returned {}",
                url,
                response.status()
            )));
        }
        debug!(url = %url, "container created");
        Ok(())
    }

    /// Upload one record as an object with embedded metadata, returning the
    /// HTTP status. The body wraps the record as
    /// `{"metadata": {"onedata_json": <record>}}`.
    pub async fn put_object(
        &self,
        space: &str,
        directory: &str,
        filename: &str,
        record: &serde_json::Value,
    ) -> Result<u16, CdmiError> {
        let url = self.object_url(space, directory, filename);
        let body = serde_json::json!({ "metadata": { "onedata_json": record } });
        let response = self
            .request(Method::PUT, &url, OBJECT_CONTENT_TYPE)
            .body(body.to_string())
            .send()
            .await
            .map_err(|e| CdmiError::NetworkError(format!("Failed to put object: {}", e)))?;

        Ok(response.status().as_u16())
    }
}
