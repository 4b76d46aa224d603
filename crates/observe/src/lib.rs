//! This crate is intended to contain code that is required to provide or
//! improve the observability of a system. That includes initialization logic
//! for logging.
pub mod tracing;
