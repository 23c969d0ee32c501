//! CLI command definitions for the `station` binary.
//!
//! Uses clap derive macros for argument parsing. Environment variable
//! fallbacks mirror the hub's original deployment knobs
//! (`STATION_DATA_FILE`, `STATION_PING_INTERVAL_SECONDS`).

pub mod agents;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Agent service-discovery and liveness hub.
#[derive(Parser)]
#[command(name = "station", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the hub: HTTP API, WebSocket fan-out, and the liveness monitor.
    Serve {
        /// Bind address.
        #[arg(long, env = "STATION_HOST")]
        host: Option<String>,

        /// Bind port.
        #[arg(long, env = "STATION_PORT")]
        port: Option<u16>,

        /// Agent registry file.
        #[arg(long, env = "STATION_DATA_FILE")]
        data_file: Option<PathBuf>,

        /// Seconds between liveness sweeps.
        #[arg(long, env = "STATION_PING_INTERVAL_SECONDS")]
        ping_interval: Option<u64>,

        /// Per-probe timeout in seconds.
        #[arg(long, env = "STATION_PROBE_TIMEOUT_SECONDS")]
        probe_timeout: Option<u64>,

        /// TOML config file (CLI flags and env vars take precedence).
        #[arg(long, default_value = "station.toml")]
        config: PathBuf,

        /// Bridge tracing spans to OpenTelemetry (stdout exporter).
        #[arg(long)]
        otel: bool,
    },

    /// List registered agents straight from the data file.
    Agents {
        /// Filter by status: active|inactive.
        #[arg(long)]
        status: Option<String>,

        /// Agent registry file.
        #[arg(long, env = "STATION_DATA_FILE")]
        data_file: Option<PathBuf>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
