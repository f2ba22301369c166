//! Application setup and initialization
//!
//! Everything main.rs needs to go from a loaded [`Config`] to a serving router.

pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::{Context, Result};
use filefacts_core::Config;
use filefacts_infra::{CallbackClient, MetaCoreSink};
use filefacts_processing::Classifier;
use filefacts_storage::create_file_access;
use filefacts_worker::{Dispatcher, TaskProcessor};
use std::sync::Arc;

/// Initialize the entire application
pub fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    filefacts_infra::init_telemetry(config.log_format)
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment,
        backend = %config.access_backend(),
        "Configuration loaded and validated successfully"
    );

    let state = build_state(config.clone())?;
    let router = routes::setup_routes(&config, state.clone());

    Ok((state, router))
}

/// Build the shared state: access provider, classifier, outbound clients, dispatcher.
pub fn build_state(config: Config) -> Result<Arc<AppState>> {
    let access = create_file_access(&config).context("Failed to create file access provider")?;
    let sink = MetaCoreSink::from_config(&config)?;
    let callback = CallbackClient::from_config(&config)?;

    let processor = TaskProcessor::new(
        access,
        Classifier::new(config.image_policy),
        Arc::new(sink),
        config.sniff_bytes,
    );
    let dispatcher = Dispatcher::new(
        Arc::new(processor),
        Arc::new(callback),
        config.max_concurrent_tasks,
    );

    Ok(Arc::new(AppState::new(config, dispatcher)))
}
