//! Loader over a remote collection.

use async_trait::async_trait;

use innkeep_core::{LoadError, Record, RecordLoader};

use crate::client::HttpClient;
use crate::endpoint::Endpoint;

/// Loads the initial collection with a single GET.
#[derive(Debug, Clone)]
pub struct HttpLoader {
    client: HttpClient,
    endpoint: Endpoint,
}

impl HttpLoader {
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
impl RecordLoader for HttpLoader {
    async fn load(&self) -> Result<Vec<Record>, LoadError> {
        self.client.fetch_collection(&self.endpoint).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use innkeep_core::{ListViewEngine, QueryDescriptor, Schema};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn engine_initializes_from_remote_collection() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/booking"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "name": "John Doe", "room": "Deluxe", "date": "2024-03-15", "status": "Confirmed"},
                {"id": 2, "name": "Jane Smith", "room": "Suite", "date": "2024-03-16", "status": "Pending"}
            ])))
            .mount(&server)
            .await;

        let loader = HttpLoader::new(
            Endpoint::new(format!("{}/api/booking", server.uri())).unwrap(),
        );
        let mut engine = ListViewEngine::new(Schema::booking());
        assert_eq!(engine.initialize_from(&loader).await.unwrap(), 2);

        let view = engine
            .query(&QueryDescriptor::new().status("Pending"))
            .unwrap();
        assert_eq!(view.total_matching(), 1);
        assert_eq!(view.records()[0].get_str("name"), Some("Jane Smith"));
    }

    #[tokio::test]
    async fn malformed_payload_leaves_engine_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let loader = HttpLoader::new(Endpoint::new(server.uri()).unwrap());
        let mut engine = ListViewEngine::new(Schema::booking());
        let err = engine.initialize_from(&loader).await.unwrap_err();

        assert!(matches!(err, innkeep_core::Error::Load(LoadError::Malformed { .. })));
        assert!(engine.is_empty());
        assert_eq!(engine.query(&QueryDescriptor::new()).unwrap().total_pages(), 1);
    }
}
