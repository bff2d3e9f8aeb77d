//! Test Module
//!
//! Comprehensive test suite for the Saathi backend.
//!
//! ## Test Categories
//! - `brain_tests`: risk classification, response bank, local synthesis
//! - `bridge_tests`: health monitoring, dispatch and degradation against a mock generator
//! - `database_tests`: append-only chat history persistence
//! - `routes_tests`: HTTP surface behavior, end to end through the router

pub mod bridge_tests;
pub mod database_tests;
