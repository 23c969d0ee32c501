//! Business logic and repository trait definitions for Station.
//!
//! This crate defines the "ports" (store traits) that the infrastructure
//! layer implements, plus the three coordinated pieces of the hub: the
//! notification hub, the liveness monitor, and the chat service. It depends
//! only on `station-types` -- never on `station-infra` or any IO crate.

pub mod chat;
pub mod hub;
pub mod liveness;
pub mod repository;
