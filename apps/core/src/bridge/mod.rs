//! # Bridge Module
//!
//! The resilience bridge between the chat API and the external response
//! generator. The generator is useful but optional: when it is degraded or
//! absent, dispatch falls back to locally synthesized responses and the user
//! never sees an error.
//!
//! ## Components
//! - `messages`: bridge error types and the generator wire reply
//! - `traits`: the `GeneratorService` seam (mockable in tests)
//! - `generator`: reqwest-backed `GeneratorService` implementation
//! - `health`: two-state health monitor with a periodic probe task
//! - `dispatch`: the never-failing `respond` entry point

pub mod dispatch;
pub mod generator;
pub mod health;
pub mod messages;
pub mod traits;

pub use dispatch::DispatchBridge;
pub use generator::HttpGenerator;
pub use health::{HealthMonitor, HealthState};
pub use traits::GeneratorService;
