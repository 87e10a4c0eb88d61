//! Meal Gateway: LLM-backed calorie and protein estimation
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod llm;
pub mod estimator;
pub mod server;
