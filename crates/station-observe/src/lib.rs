//! Observability setup for Station.

pub mod tracing_setup;
