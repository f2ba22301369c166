//! Filefacts Processing Library
//!
//! File classification: extension and MIME category tables ([`classifier`]) and
//! content signature detection ([`sniff`]). Everything here is pure and synchronous;
//! the task processor feeds it bytes obtained from a file access provider.

pub mod classifier;
pub mod sniff;

pub use classifier::{Classification, Classifier, FALLBACK_MIME_TYPE};
pub use sniff::{detect_mime, mime_from_extension};
