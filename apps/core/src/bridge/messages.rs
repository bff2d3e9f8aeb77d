use serde::{Deserialize, Serialize};

/// Defines errors that can occur while talking to the external generator.
///
/// These never reach API callers: the dispatch bridge converts every one of
/// them into a locally synthesized response.
#[derive(Debug, thiserror::Error, Serialize, Clone)]
pub enum BridgeError {
    /// The generator could not be reached (connect/network failure).
    #[error("Generator unreachable: {0}")]
    Unreachable(String),
    /// The generator did not answer within the bounded timeout.
    #[error("Generator timed out: {0}")]
    Timeout(String),
    /// The generator answered with a non-success status or an unparseable body.
    #[error("Malformed generator response: {0}")]
    Malformed(String),
}

impl From<tokio::time::error::Elapsed> for BridgeError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        BridgeError::Timeout(format!("Generator call timed out: {}", err))
    }
}

impl From<reqwest::Error> for BridgeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BridgeError::Timeout(err.to_string())
        } else if err.is_connect() || err.is_request() {
            BridgeError::Unreachable(err.to_string())
        } else {
            BridgeError::Malformed(err.to_string())
        }
    }
}

/// The generator's answer to a query, as it appears on the wire.
///
/// Only `response` is required; the remaining fields default so a minimal
/// payload still normalizes cleanly.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorReply {
    pub response: String,
    #[serde(default)]
    pub distress_detected: bool,
    #[serde(default)]
    pub context_used: bool,
    #[serde(default)]
    pub relevant_topics: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_defaults_for_minimal_payload() {
        let reply: GeneratorReply =
            serde_json::from_str(r#"{"response": "Hi!", "distress_detected": false}"#).unwrap();

        assert_eq!(reply.response, "Hi!");
        assert!(!reply.distress_detected);
        assert!(!reply.context_used);
        assert!(reply.relevant_topics.is_empty());
    }

    #[test]
    fn test_reply_full_payload() {
        let reply: GeneratorReply = serde_json::from_str(
            r#"{"response": "ok", "distress_detected": true, "context_used": true, "relevant_topics": ["anxiety", "stress"]}"#,
        )
        .unwrap();

        assert!(reply.distress_detected);
        assert!(reply.context_used);
        assert_eq!(reply.relevant_topics, vec!["anxiety", "stress"]);
    }
}
