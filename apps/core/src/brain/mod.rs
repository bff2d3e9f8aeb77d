//! # Brain Module
//!
//! Fast, non-LLM analysis and synthesis for Saathi.
//! Everything here is local data and keyword matching - no network, no failure modes.
//!
//! ## Components
//! - `risk`: distress tier classification using ordered keyword lists
//! - `bank`: locale- and tier-keyed candidate response texts
//! - `synthesizer`: builds the degraded fallback response from the two above

pub mod bank;
pub mod risk;
pub mod synthesizer;

pub use bank::ResponseBank;
pub use risk::RiskClassifier;
pub use synthesizer::Synthesizer;
