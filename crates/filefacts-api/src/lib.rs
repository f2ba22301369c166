//! Filefacts API Library
//!
//! The HTTP shell around the worker: health and manifest endpoints, orchestrator
//! configuration, and task intake.

pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
