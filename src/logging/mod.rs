//! Structured logging and observability for Portico.

pub mod structured;

pub use structured::{init_logging, LoggingGuard};
