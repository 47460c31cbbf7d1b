//! HTTP client for JSON collection endpoints.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, trace};

use innkeep_core::record::Record;
use innkeep_core::{LoadError, StoreError, parse_collection};

use crate::endpoint::Endpoint;

fn transport(err: reqwest::Error) -> LoadError {
    LoadError::Transport {
        message: err.to_string(),
    }
}

/// Thin wrapper over [`reqwest::Client`] speaking the collection protocol.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("innkeep/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();

        Self { client }
    }

    /// Wrap an existing client, e.g. one with custom timeouts.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// GET the collection at `endpoint`.
    #[instrument(skip(self), fields(endpoint = %endpoint))]
    pub async fn fetch_collection(&self, endpoint: &Endpoint) -> Result<Vec<Record>, LoadError> {
        debug!("Fetching collection");

        let response = self
            .client
            .get(endpoint.as_url().clone())
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        trace!(status = %status, "collection response");
        if !status.is_success() {
            return Err(LoadError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(transport)?;
        parse_collection(&body)
    }

    /// POST one record body to `endpoint` and return the stored record.
    #[instrument(skip(self, body), fields(endpoint = %endpoint))]
    pub async fn post_record<B>(&self, endpoint: &Endpoint, body: &B) -> Result<Record, StoreError>
    where
        B: Serialize + ?Sized,
    {
        debug!("Posting record");

        let response = self
            .client
            .post(endpoint.as_url().clone())
            .json(body)
            .send()
            .await
            .map_err(|e| StoreError::from(transport(e)))?;

        let status = response.status();
        trace!(status = %status, "append response");
        if !status.is_success() {
            return Err(StoreError::Http {
                status: status.as_u16(),
            });
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| StoreError::Malformed {
                message: e.to_string(),
            })?;

        Record::from_value(value).map_err(|e| StoreError::Malformed {
            message: e.to_string(),
        })
    }
}
