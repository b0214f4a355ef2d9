//! Common test utilities for integration tests.

use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};
use wristband_client::RallyClient;

/// Start a mock rally server that accepts every POST with a success reply.
pub async fn mock_rally_server() -> MockServer {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "registered_at": "2024-01-01T10:00:00.000000",
            "finished_at": "2024-01-01T10:30:00.000000"
        })))
        .mount(&mock_server)
        .await;

    mock_server
}

/// Create a rally client configured for a mock server.
pub fn test_rally_client(mock_server: &MockServer) -> RallyClient {
    RallyClient::new(mock_server.uri()).unwrap()
}
