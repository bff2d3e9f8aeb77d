use crate::bridge::messages::{BridgeError, GeneratorReply};
use crate::bridge::traits::GeneratorService;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tokio::time::timeout;
use tracing::info;
use url::Url;

/// HTTP client for the external response generator service.
///
/// Both calls are bounded: the liveness probe by `probe_timeout`, the query by
/// `query_timeout`. A timeout is reported as [`BridgeError::Timeout`] and is
/// treated by callers exactly like any other failure.
pub struct HttpGenerator {
    client: Client,
    base_url: String,
    probe_timeout: Duration,
    query_timeout: Duration,
}

impl HttpGenerator {
    pub fn new(base_url: Url, probe_timeout: Duration, query_timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            probe_timeout,
            query_timeout,
        }
    }
}

#[async_trait]
impl GeneratorService for HttpGenerator {
    async fn probe(&self) -> Result<(), BridgeError> {
        let endpoint = format!("{}/health", self.base_url);
        let request_future = self.client.get(&endpoint).send();

        let res = timeout(self.probe_timeout, request_future).await??;

        if !res.status().is_success() {
            return Err(BridgeError::Malformed(format!(
                "Health check returned status {}",
                res.status()
            )));
        }
        Ok(())
    }

    async fn query(&self, message: &str) -> Result<GeneratorReply, BridgeError> {
        info!("Querying generator ({} chars)", message.len());

        let endpoint = format!("{}/rag/query", self.base_url);
        let payload = serde_json::json!({ "message": message });
        let request_future = self.client.post(&endpoint).json(&payload).send();

        let res = timeout(self.query_timeout, request_future).await??;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(BridgeError::Malformed(format!(
                "Query failed with status {}: {}",
                status, body
            )));
        }

        let reply = res
            .json::<GeneratorReply>()
            .await
            .map_err(|e| BridgeError::Malformed(e.to_string()))?;
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn generator(uri: &str) -> HttpGenerator {
        HttpGenerator::new(
            Url::parse(uri).unwrap(),
            Duration::from_millis(500),
            Duration::from_millis(500),
        )
    }

    #[tokio::test]
    async fn test_probe_success() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "healthy"})))
            .mount(&mock_server)
            .await;

        let result = generator(&mock_server.uri()).probe().await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_probe_server_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let result = generator(&mock_server.uri()).probe().await;
        assert!(matches!(result, Err(BridgeError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_probe_timeout_is_failure() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&mock_server)
            .await;

        let result = generator(&mock_server.uri()).probe().await;
        assert!(matches!(result, Err(BridgeError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_query_success_passes_fields_through() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rag/query"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "response": "Deep breathing can help with anxiety.",
                "distress_detected": false,
                "context_used": true,
                "relevant_topics": ["anxiety"]
            })))
            .mount(&mock_server)
            .await;

        let reply = generator(&mock_server.uri())
            .query("I feel a bit nervous")
            .await
            .unwrap();

        assert_eq!(reply.response, "Deep breathing can help with anxiety.");
        assert!(reply.context_used);
        assert_eq!(reply.relevant_topics, vec!["anxiety"]);
    }

    #[tokio::test]
    async fn test_query_server_error_is_malformed() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rag/query"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&mock_server)
            .await;

        let result = generator(&mock_server.uri()).query("hello").await;
        assert!(matches!(result, Err(BridgeError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_query_unparseable_body_is_malformed() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rag/query"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let result = generator(&mock_server.uri()).query("hello").await;
        assert!(matches!(result, Err(BridgeError::Malformed(_))));
    }
}
