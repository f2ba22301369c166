//! Filefacts Core Library
//!
//! This crate provides the domain models, error types and configuration shared by
//! every filefacts component: the access providers, the classifier, the metadata
//! sink, the task processor and the HTTP shell.

pub mod access_backend;
pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use access_backend::AccessBackend;
pub use config::{Config, ImagePolicy, LogFormat, MetaCoreWriteMode};
pub use error::{AppError, ErrorMetadata, LogLevel};
