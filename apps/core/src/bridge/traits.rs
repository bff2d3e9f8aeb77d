use crate::bridge::messages::{BridgeError, GeneratorReply};
use async_trait::async_trait;

/// Defines the public interface of the external response generator.
///
/// This trait abstracts the concrete HTTP client, allowing the health monitor
/// and dispatch bridge to be exercised against mock generators in tests.
#[async_trait]
pub trait GeneratorService: Send + Sync + 'static {
    /// Performs a bounded liveness check against the generator.
    async fn probe(&self) -> Result<(), BridgeError>;

    /// Sends a user message to the generator and returns its reply.
    async fn query(&self, message: &str) -> Result<GeneratorReply, BridgeError>;
}
