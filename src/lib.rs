//! Celebration — rotating Slack status loop
//!
//! Library crate exposing all modules for use by integration tests
//! and the two binaries (`celebration`, `slack_update`).

pub mod cli;
pub mod config;
pub mod content;
pub mod engine;
pub mod logging;
pub mod status;
pub mod types;
