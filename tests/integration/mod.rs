//! Integration tests for metrics-relay
//!
//! These tests run the agent's delivery path against a real server.

pub mod database_tests;
pub mod delivery_tests;
pub mod persistence_tests;
