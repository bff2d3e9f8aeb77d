//! Tracing initialization.
//!
//! Emits bunyan-formatted JSON lines to stdout, filtered by `RUST_LOG`
//! (falling back to `info` for this crate).

use tracing::subscriber::set_global_default;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry};

/// Installs the global tracing subscriber. Call once, before any span is created.
pub fn init(service_name: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,saathi_core=info"));
    let formatting_layer = BunyanFormattingLayer::new(service_name.into(), std::io::stdout);
    let subscriber = Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer);

    // A second init (e.g. from tests) is not fatal.
    if set_global_default(subscriber).is_err() {
        tracing::debug!("Tracing subscriber was already installed");
    }
}
