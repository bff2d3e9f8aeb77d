// Saathi Backend Entry Point
// The resilience bridge between the chat UI and the response generator

mod brain;
mod bridge;
mod config;
mod database;
mod error;
mod models;
mod preflight;
mod rate_limiter;
mod routes;
mod telemetry;

#[cfg(test)]
mod tests;

use brain::{ResponseBank, Synthesizer};
use bridge::{DispatchBridge, GeneratorService, HealthMonitor, HttpGenerator};
use config::AppConfig;
use rate_limiter::SharedRateLimiter;
use routes::AppState;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    telemetry::init("saathi-core");

    let config = AppConfig::from_env()?;
    info!("Generator endpoint: {}", config.generator_url);

    let pool = database::init_db(&config.db_path).await?;

    let generator: Arc<dyn GeneratorService> = Arc::new(HttpGenerator::new(
        config.generator_url.clone(),
        config.probe_timeout,
        config.query_timeout,
    ));
    let monitor = HealthMonitor::new(
        generator.clone(),
        config.probe_interval,
        config.probe_recheck,
    );
    let bank = ResponseBank::new();

    // Bank completeness is fatal here; a dead generator is not.
    let report = preflight::run_preflight_checks(&bank, &pool, &monitor).await;
    if !report.ready_to_start {
        anyhow::bail!("Preflight failed: {}", report.summary);
    }

    let _probe_task = monitor.spawn_background();

    let bridge = Arc::new(DispatchBridge::new(
        generator,
        monitor,
        Synthesizer::new(bank),
    ));
    let state = AppState {
        bridge,
        pool,
        limiter: SharedRateLimiter::new(config.rate_limit, config.rate_window),
    };

    let app = routes::router(state);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Server running on {}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
