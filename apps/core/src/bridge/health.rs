use crate::bridge::traits::GeneratorService;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{info, warn};

/// Snapshot of the generator's observed health.
///
/// Owned exclusively by the [`HealthMonitor`]; everyone else sees clones.
#[derive(Debug, Clone, Serialize)]
pub struct HealthState {
    /// Whether the last probe (or dispatch) found the generator reachable.
    pub reachable: bool,
    /// When the last probe completed. `None` until the first probe runs.
    pub last_checked_at: Option<DateTime<Utc>>,
    /// Probe/dispatch failures since the last successful probe.
    pub consecutive_failures: u32,
}

/// Two-state health machine over the external generator.
///
/// Starts UNHEALTHY until the first probe succeeds, so the bridge never
/// trusts a generator it has not seen alive. Transitions:
/// HEALTHY→UNHEALTHY on probe failure or dispatch failure,
/// UNHEALTHY→HEALTHY on probe success only.
#[derive(Clone)]
pub struct HealthMonitor {
    state: Arc<Mutex<HealthState>>,
    generator: Arc<dyn GeneratorService>,
    probe_interval: Duration,
    probe_recheck: Duration,
}

impl HealthMonitor {
    pub fn new(
        generator: Arc<dyn GeneratorService>,
        probe_interval: Duration,
        probe_recheck: Duration,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(HealthState {
                reachable: false,
                last_checked_at: None,
                consecutive_failures: 0,
            })),
            generator,
            probe_interval,
            probe_recheck,
        }
    }

    /// Returns a consistent copy of the current health state.
    pub fn snapshot(&self) -> HealthState {
        self.state
            .lock()
            .expect("health state lock poisoned")
            .clone()
    }

    /// Pessimistically marks the generator unreachable after a failed
    /// dispatch, without waiting for the next probe tick.
    pub fn mark_unreachable(&self) {
        let mut state = self.state.lock().expect("health state lock poisoned");
        state.reachable = false;
        state.consecutive_failures += 1;
    }

    /// Runs a single probe and updates the state. Probe errors are logged
    /// and swallowed; they only ever update the health state.
    pub async fn probe_once(&self) -> bool {
        let result = self.generator.probe().await;
        let now = Utc::now();

        let mut state = self.state.lock().expect("health state lock poisoned");
        state.last_checked_at = Some(now);
        match result {
            Ok(()) => {
                if !state.reachable {
                    info!("Generator health check: recovered");
                }
                state.reachable = true;
                state.consecutive_failures = 0;
            }
            Err(e) => {
                warn!("Generator health check failed: {}", e);
                state.reachable = false;
                state.consecutive_failures += 1;
            }
        }
        state.reachable
    }

    /// On-demand check used by the dispatch path when the state is
    /// UNHEALTHY: probes once if no probe ran within the recheck window,
    /// letting the bridge recover within a single request instead of waiting
    /// for the next tick. Returns whether the generator is now reachable.
    pub async fn ensure_fresh(&self) -> bool {
        let snapshot = self.snapshot();
        if snapshot.reachable {
            return true;
        }

        let recently_checked = snapshot.last_checked_at.is_some_and(|at| {
            let age = Utc::now().signed_duration_since(at);
            age.to_std().map(|d| d < self.probe_recheck).unwrap_or(true)
        });
        if recently_checked {
            return false;
        }

        self.probe_once().await
    }

    /// Spawns the periodic probe loop. Runs for the lifetime of the process.
    pub fn spawn_background(&self) -> tokio::task::JoinHandle<()> {
        let monitor = self.clone();
        tokio::spawn(async move {
            info!(
                "Health monitor started (interval {:?})",
                monitor.probe_interval
            );
            let mut ticker = tokio::time::interval(monitor.probe_interval);
            loop {
                ticker.tick().await;
                monitor.probe_once().await;
            }
        })
    }
}
