//! User-directory HTTP client.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use super::dto::UserDto;
use crate::domain::entities::UserRecord;
use crate::domain::errors::DirectoryError;
use crate::domain::ports::UserDirectoryPort;

/// Default directory endpoint.
pub const DEFAULT_BASE_URL: &str = "https://665621609f970b3b36c4625e.mockapi.io";

const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// Directory client backed by `reqwest`.
pub struct HttpUserDirectory {
    client: Client,
    base_url: String,
}

impl HttpUserDirectory {
    /// Creates a client for the default endpoint.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new() -> Result<Self, DirectoryError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a client for a custom endpoint.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, DirectoryError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                DirectoryError::unexpected(format!("failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn map_request_error(error: &reqwest::Error) -> DirectoryError {
        if error.is_timeout() {
            DirectoryError::network("request timed out")
        } else if error.is_connect() {
            DirectoryError::network("failed to connect to the directory")
        } else {
            DirectoryError::network(error.to_string())
        }
    }
}

#[async_trait]
impl UserDirectoryPort for HttpUserDirectory {
    async fn fetch_users(&self, limit: Option<u32>) -> Result<Vec<UserRecord>, DirectoryError> {
        let mut url = format!("{}/users", self.base_url);
        if let Some(limit) = limit {
            url.push_str(&format!("?limit={limit}"));
        }

        debug!(%url, "Fetching directory users");

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!(error = %e, "Directory request failed");
            Self::map_request_error(&e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Directory returned a non-success status");
            return Err(DirectoryError::status(
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown"),
            ));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| DirectoryError::decode(e.to_string()))?;

        // The endpoint occasionally answers with an error object instead of
        // the expected array; coerce anything non-array to an empty list.
        let Some(entries) = body.as_array() else {
            warn!("Directory response was not an array; treating as empty");
            return Ok(Vec::new());
        };

        let users: Vec<UserDto> = serde_json::from_value(serde_json::Value::Array(entries.clone()))
            .map_err(|e| DirectoryError::decode(e.to_string()))?;

        debug!(count = users.len(), "Directory users fetched");

        Ok(users.into_iter().map(UserRecord::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        assert!(HttpUserDirectory::new().is_ok());
    }

    #[test]
    fn test_custom_base_url() {
        let client = HttpUserDirectory::with_base_url("http://localhost:9000");
        assert!(client.is_ok());
    }
}
