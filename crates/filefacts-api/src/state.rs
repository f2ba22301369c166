use filefacts_core::models::Manifest;
use filefacts_core::{AccessBackend, Config};
use filefacts_worker::Dispatcher;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

/// Task name published in the manifest.
pub const TASK_NAME: &str = "file-info";

/// Shared application state
pub struct AppState {
    pub config: Config,
    pub dispatcher: Dispatcher,
    pub manifest: Manifest,
    /// Settings pushed by the orchestrator through `/configure`. Reported only; they
    /// never change the active access provider.
    pub orchestrator_settings: RwLock<Option<Map<String, Value>>>,
}

impl AppState {
    pub fn new(config: Config, dispatcher: Dispatcher) -> Self {
        Self {
            config,
            dispatcher,
            manifest: Manifest::new(TASK_NAME, env!("CARGO_PKG_VERSION")),
            orchestrator_settings: RwLock::new(None),
        }
    }

    pub fn backend(&self) -> AccessBackend {
        self.dispatcher.processor().access().backend_type()
    }
}
