//! Bridge Tests
//!
//! End-to-end dispatch behavior against a wiremock generator: degradation,
//! health-state transitions and recovery, exactly as a real deployment would
//! see them over HTTP.

use crate::brain::{ResponseBank, Synthesizer};
use crate::bridge::{DispatchBridge, GeneratorService, HealthMonitor, HttpGenerator};
use crate::models::{Locale, RiskTier, UserMessage};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RECHECK_WINDOW: Duration = Duration::from_secs(60);

fn build_bridge(uri: &str) -> (DispatchBridge, HealthMonitor) {
    let generator: Arc<dyn GeneratorService> = Arc::new(HttpGenerator::new(
        Url::parse(uri).unwrap(),
        Duration::from_millis(500),
        Duration::from_millis(500),
    ));
    // Long recheck window: once a probe fails, subsequent dispatches must
    // trust the known-bad state instead of probing again.
    let monitor = HealthMonitor::new(generator.clone(), Duration::from_secs(300), RECHECK_WINDOW);
    let bridge = DispatchBridge::new(
        generator,
        monitor.clone(),
        Synthesizer::new(ResponseBank::new()),
    );
    (bridge, monitor)
}

fn message(text: &str, locale: Locale) -> UserMessage {
    UserMessage {
        text: text.to_string(),
        locale,
        identity: "anon_bridge".to_string(),
    }
}

async fn mount_healthy(server: &MockServer, reply: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "healthy"})))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rag/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply))
        .mount(server)
        .await;
}

async fn mount_dead(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rag/query"))
        .respond_with(ResponseTemplate::new(503))
        .mount(server)
        .await;
}

/// The three configured HIGH/en candidates, resolved through pinned selectors.
fn high_en_candidates() -> Vec<String> {
    (0..3)
        .map(|i| {
            ResponseBank::with_selector(Box::new(move |_| i))
                .select(Locale::En, RiskTier::High)
                .to_string()
        })
        .collect()
}

#[tokio::test]
async fn test_unreachable_generator_high_tier_scenario() {
    // High-tier message while the generator is unreachable.
    let server = MockServer::start().await;
    mount_dead(&server).await;
    let (bridge, _) = build_bridge(&server.uri());

    let response = bridge
        .respond(&message("I want to end it all", Locale::En))
        .await;

    assert!(response.degraded);
    assert!(response.distress_detected);
    assert!(!response.context_used);
    assert!(high_en_candidates().iter().any(|c| *c == response.text));
}

#[tokio::test]
async fn test_healthy_generator_bn_scenario() {
    // Plain greeting in Bengali with a healthy generator.
    let server = MockServer::start().await;
    mount_healthy(&server, json!({"response": "Hi!", "distress_detected": false})).await;
    let (bridge, _) = build_bridge(&server.uri());

    let response = bridge.respond(&message("hello", Locale::Bn)).await;

    assert_eq!(response.text, "Hi!");
    assert!(!response.distress_detected);
    assert!(!response.degraded);
}

#[tokio::test]
async fn test_passthrough_of_context_fields() {
    let server = MockServer::start().await;
    mount_healthy(
        &server,
        json!({
            "response": "Mindfulness can help here.",
            "distress_detected": false,
            "context_used": true,
            "relevant_topics": ["mindfulness", "stress"]
        }),
    )
    .await;
    let (bridge, _) = build_bridge(&server.uri());

    let response = bridge
        .respond(&message("how do I handle stress?", Locale::En))
        .await;

    assert!(!response.degraded);
    assert!(response.context_used);
    assert_eq!(response.relevant_topics, vec!["mindfulness", "stress"]);
}

#[tokio::test]
async fn test_one_failure_flips_state_and_later_dispatches_skip_the_call() {
    let server = MockServer::start().await;
    mount_healthy(&server, json!({"response": "ok"})).await;
    let (bridge, monitor) = build_bridge(&server.uri());

    // Warm up: generator seen alive.
    monitor.probe_once().await;
    assert!(monitor.snapshot().reachable);
    let warm = bridge.respond(&message("hello", Locale::En)).await;
    assert!(!warm.degraded);

    // Generator dies mid-flight.
    server.reset().await;
    mount_dead(&server).await;

    let failed = bridge.respond(&message("hello again", Locale::En)).await;
    assert!(failed.degraded);
    assert!(!monitor.snapshot().reachable);
    assert_eq!(monitor.snapshot().consecutive_failures, 1);

    // Subsequent dispatches inside the recheck window go straight to
    // synthesis: no probe, no query hits the wire.
    let requests_after_failure = server.received_requests().await.unwrap().len();
    let skipped = bridge.respond(&message("still there?", Locale::En)).await;
    assert!(skipped.degraded);
    assert_eq!(
        server.received_requests().await.unwrap().len(),
        requests_after_failure
    );
}

#[tokio::test]
async fn test_successful_probe_restores_real_dispatch() {
    let server = MockServer::start().await;
    mount_dead(&server).await;
    let (bridge, monitor) = build_bridge(&server.uri());

    let degraded = bridge.respond(&message("hello", Locale::En)).await;
    assert!(degraded.degraded);

    // Generator comes back; the next (simulated periodic) probe notices.
    server.reset().await;
    mount_healthy(&server, json!({"response": "back online"})).await;
    assert!(monitor.probe_once().await);

    let recovered = bridge.respond(&message("hello", Locale::En)).await;
    assert!(!recovered.degraded);
    assert_eq!(recovered.text, "back online");
}

#[tokio::test]
async fn test_malformed_reply_degrades_like_any_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rag/query"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;
    let (bridge, monitor) = build_bridge(&server.uri());
    monitor.probe_once().await;

    let response = bridge.respond(&message("hello", Locale::En)).await;

    assert!(response.degraded);
    assert!(!monitor.snapshot().reachable);
}

#[tokio::test]
async fn test_respond_never_fails_for_any_input() {
    let server = MockServer::start().await;
    mount_dead(&server).await;
    let (bridge, _) = build_bridge(&server.uri());

    let inputs = [
        String::new(),
        " ".to_string(),
        "I am overwhelmed ".repeat(50_000),
        "�invalid utf noise ���".to_string(),
    ];
    for text in inputs {
        let response = bridge.respond(&message(&text, Locale::Ta)).await;
        assert!(!response.text.is_empty());
        assert!(response.degraded);
    }
}

#[tokio::test]
async fn test_concurrent_dispatches_observe_consistent_state() {
    let server = MockServer::start().await;
    mount_dead(&server).await;
    let (bridge, monitor) = build_bridge(&server.uri());
    let bridge = Arc::new(bridge);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let bridge = bridge.clone();
            tokio::spawn(async move {
                bridge
                    .respond(&message(&format!("message {}", i), Locale::En))
                    .await
            })
        })
        .collect();

    for handle in handles {
        let response = handle.await.unwrap();
        assert!(response.degraded);
        assert!(!response.text.is_empty());
    }
    assert!(!monitor.snapshot().reachable);
}
