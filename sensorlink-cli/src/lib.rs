//! Library entry for sensorlink-cli used by integration tests and embedding.

pub mod commands;
pub mod config;
pub mod serial;
pub mod sink;

// Re-export commands for convenience
pub use commands::*;

// Re-export commonly used items
pub use crate::commands::listen::{run_receiver, LoopOptions};
pub use crate::config::GatewayConfig;
pub use crate::sink::{HttpSink, JsonLinesSink};
