//! Observability setup for rakkchat.

pub mod tracing_setup;
