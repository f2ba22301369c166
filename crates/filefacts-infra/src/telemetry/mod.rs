//! Telemetry initialization
//!
//! Installs the global `tracing` subscriber. Output format follows `LOG_FORMAT`.

mod init_basic;

pub use init_basic::{init_telemetry, shutdown_telemetry};
