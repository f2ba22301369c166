//! Filefacts Worker Library
//!
//! The task processor (stat, sniff, classify, persist) and the dispatcher that runs it
//! in the background and reports each outcome to the task's callback URL.

pub mod context;
pub mod dispatch;
pub mod processor;

pub use context::OutcomeReporter;
pub use dispatch::Dispatcher;
pub use processor::TaskProcessor;
