//! Infrastructure implementations for Station.
//!
//! Concrete adapters behind the station-core traits: the JSON-file agent
//! registry, the reqwest liveness prober, and the JSONL chat log.

pub mod chatlog;
pub mod jsonfile;
pub mod probe;
