//! Record store over a remote collection.

use async_trait::async_trait;
use tracing::debug;

use innkeep_core::{Error, Fields, Record, RecordStore, Result, StoreError};

use crate::client::HttpClient;
use crate::endpoint::Endpoint;

/// `GET` lists, `POST` appends.
///
/// The server owns the id policy, so an append without an id is sent as
/// is and the returned record carries whatever id the server picked.
#[derive(Debug, Clone)]
pub struct HttpRecordStore {
    client: HttpClient,
    endpoint: Endpoint,
}

impl HttpRecordStore {
    pub fn new(endpoint: Endpoint) -> Self {
        Self::with_client(HttpClient::new(), endpoint)
    }

    pub fn with_client(client: HttpClient, endpoint: Endpoint) -> Self {
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn list(&self) -> Result<Vec<Record>> {
        self.client
            .fetch_collection(&self.endpoint)
            .await
            .map_err(|e| Error::Store(StoreError::from(e)))
    }

    async fn append(&self, fields: Fields) -> Result<Record> {
        let record = self.client.post_record(&self.endpoint, &fields).await?;
        debug!(id = %record.id(), endpoint = %self.endpoint, "Appended remote record");
        Ok(record)
    }
}
