use crate::bridge::health::HealthMonitor;
use crate::bridge::messages::GeneratorReply;
use crate::bridge::traits::GeneratorService;
use crate::brain::Synthesizer;
use crate::models::{GeneratedResponse, UserMessage};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Routes messages to the external generator or the local synthesizer.
///
/// `respond` never fails: the whole point of the bridge is availability
/// despite downstream failure. Every failed generator call flips the shared
/// health state so concurrent and subsequent requests skip the dead service.
pub struct DispatchBridge {
    generator: Arc<dyn GeneratorService>,
    monitor: HealthMonitor,
    synthesizer: Synthesizer,
}

impl DispatchBridge {
    pub fn new(
        generator: Arc<dyn GeneratorService>,
        monitor: HealthMonitor,
        synthesizer: Synthesizer,
    ) -> Self {
        Self {
            generator,
            monitor,
            synthesizer,
        }
    }

    /// Read-only view of the monitor, for the service health endpoint.
    pub fn health(&self) -> &HealthMonitor {
        &self.monitor
    }

    /// Produces a normalized response for the message.
    ///
    /// 1. UNHEALTHY state triggers one on-demand probe; still UNHEALTHY means
    ///    synthesis without attempting the real call.
    /// 2. Otherwise the generator is queried with a bounded timeout.
    /// 3. Success normalizes the reply with `degraded = false`.
    /// 4. Any failure marks the state UNHEALTHY immediately and synthesizes.
    ///
    /// No retries beyond the single on-demand probe.
    #[instrument(skip_all, fields(identity = %msg.identity, locale = %msg.locale.as_tag()))]
    pub async fn respond(&self, msg: &UserMessage) -> GeneratedResponse {
        if !self.monitor.snapshot().reachable && !self.monitor.ensure_fresh().await {
            info!("Generator unhealthy, synthesizing locally");
            return self.synthesizer.synthesize(msg);
        }

        match self.generator.query(&msg.text).await {
            Ok(reply) => normalize(reply),
            Err(e) => {
                warn!("Generator query failed, falling back: {}", e);
                self.monitor.mark_unreachable();
                self.synthesizer.synthesize(msg)
            }
        }
    }
}

fn normalize(reply: GeneratorReply) -> GeneratedResponse {
    GeneratedResponse {
        text: reply.response,
        distress_detected: reply.distress_detected,
        context_used: reply.context_used,
        relevant_topics: reply.relevant_topics,
        degraded: false,
    }
}
