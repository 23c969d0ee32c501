//! Shared domain types for Station.
//!
//! This crate contains the core domain types used across the Station hub:
//! Agent, ChatMessage, StationEvent, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror, url.

pub mod agent;
pub mod chat;
pub mod config;
pub mod error;
pub mod event;
