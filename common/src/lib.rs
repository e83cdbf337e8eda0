//! Configuration and progress reporting shared across the workspace.

pub mod config;
pub mod progress;
