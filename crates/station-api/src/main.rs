//! Station CLI and hub entry point.
//!
//! Binary name: `station`
//!
//! Parses CLI arguments, loads configuration, then either runs the hub
//! (HTTP API + WebSocket fan-out + liveness monitor) or dispatches to a
//! one-shot command.

mod cli;
mod http;
mod state;

use std::path::Path;

use clap::Parser;
use clap_complete::generate;
use console::style;
use tracing_subscriber::EnvFilter;

use station_core::liveness::LivenessMonitor;
use station_infra::probe::HttpProber;
use station_types::config::StationConfig;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need tracing or app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "station", &mut std::io::stdout());
        return Ok(());
    }

    // Set up tracing: the OTel bridge when serving with --otel, otherwise
    // a plain fmt subscriber driven by the verbosity flags.
    if matches!(&cli.command, Commands::Serve { otel: true, .. }) {
        station_observe::tracing_setup::init_tracing(true)
            .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;
    } else {
        let filter = match cli.verbose {
            0 if cli.quiet => "error",
            0 => "warn",
            1 => "info,station=debug",
            _ => "trace",
        };
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(filter))
            .with_target(false)
            .init();
    }

    match cli.command {
        Commands::Serve {
            host,
            port,
            data_file,
            ping_interval,
            probe_timeout,
            config,
            otel: _,
        } => {
            let mut station_config = load_config(&config)?;
            if let Some(host) = host {
                station_config.host = host;
            }
            if let Some(port) = port {
                station_config.port = port;
            }
            if let Some(data_file) = data_file {
                station_config.data_file = data_file;
            }
            if let Some(ping_interval) = ping_interval {
                station_config.ping_interval_secs = ping_interval;
            }
            if let Some(probe_timeout) = probe_timeout {
                station_config.probe_timeout_secs = probe_timeout;
            }

            serve(station_config).await?;
            station_observe::tracing_setup::shutdown_tracing();
        }

        Commands::Agents { status, data_file } => {
            let data_file = data_file.unwrap_or_else(|| StationConfig::default().data_file);
            cli::agents::list_agents(&data_file, status, cli.json).await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}

/// Read `station.toml` if present; otherwise fall back to defaults.
fn load_config(path: &Path) -> anyhow::Result<StationConfig> {
    if path.exists() {
        let raw = std::fs::read_to_string(path)?;
        let config = toml::from_str(&raw)?;
        tracing::info!(path = %path.display(), "loaded configuration file");
        Ok(config)
    } else {
        Ok(StationConfig::default())
    }
}

/// Run the hub until Ctrl+C / SIGTERM.
async fn serve(config: StationConfig) -> anyhow::Result<()> {
    if config.probe_timeout_secs >= config.ping_interval_secs {
        tracing::warn!(
            probe_timeout_secs = config.probe_timeout_secs,
            ping_interval_secs = config.ping_interval_secs,
            "probe timeout should be shorter than the ping interval; a stuck agent will delay each sweep"
        );
    }

    let state = AppState::init(config.clone()).await?;

    // The liveness monitor runs for the lifetime of the process on its own
    // task; it shares the store and hub with the request handlers.
    let prober = HttpProber::new(config.probe_timeout())?;
    let monitor = LivenessMonitor::new(
        state.store.clone(),
        prober,
        state.hub.clone(),
        config.ping_interval(),
    );
    tokio::spawn(monitor.run());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    println!(
        "  {} Station hub listening on {}",
        style("⚡").bold(),
        style(format!("http://{addr}")).cyan()
    );
    println!(
        "  {} registry: {}  probe every {}s",
        style("•").dim(),
        style(config.data_file.display()).dim(),
        config.ping_interval_secs
    );
    println!("  {}", style("Press Ctrl+C to stop").dim());

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    println!("\n  Server stopped.");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
