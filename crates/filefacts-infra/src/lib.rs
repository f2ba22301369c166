//! Filefacts Infrastructure Library
//!
//! Outbound clients and process setup shared by the worker and the HTTP shell:
//! - Metadata sink (meta-core writes)
//! - Callback delivery
//! - Telemetry initialization

#[cfg(feature = "callback")]
pub mod callback;

#[cfg(feature = "meta-sink")]
pub mod meta_sink;

#[cfg(feature = "observability-basic")]
pub mod telemetry;

// Re-export commonly used types
#[cfg(feature = "callback")]
pub use callback::{CallbackClient, CallbackError};

#[cfg(feature = "meta-sink")]
pub use meta_sink::{MetaCoreSink, MetadataSink, SinkError};

#[cfg(feature = "observability-basic")]
pub use telemetry::{init_telemetry, shutdown_telemetry};
