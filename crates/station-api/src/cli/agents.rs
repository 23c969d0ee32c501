//! Agent listing CLI command.

use anyhow::Result;
use chrono::{DateTime, Utc};
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use station_core::repository::agent::AgentStore;
use station_infra::jsonfile::JsonFileAgentStore;
use station_types::agent::AgentStatus;

/// List registered agents from the data file, as a table or JSON.
pub async fn list_agents(
    data_file: &std::path::Path,
    status: Option<String>,
    json: bool,
) -> Result<()> {
    let status_filter = match status {
        Some(s) => Some(s.parse::<AgentStatus>().map_err(|e| anyhow::anyhow!(e))?),
        None => None,
    };

    let store = JsonFileAgentStore::open(data_file).await?;
    let mut agents = store.list().await?;
    if let Some(status) = status_filter {
        agents.retain(|a| a.status == status);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&agents)?);
        return Ok(());
    }

    if agents.is_empty() {
        println!();
        println!(
            "  {} No agents registered. Agents register themselves via {}",
            style("i").blue().bold(),
            style("POST /agent").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Id").fg(Color::White),
        Cell::new("Name").fg(Color::White),
        Cell::new("Endpoint").fg(Color::White),
        Cell::new("Status").fg(Color::White),
        Cell::new("Last Seen").fg(Color::White),
    ]);

    for agent in &agents {
        let status_cell = match agent.status {
            AgentStatus::Active => Cell::new("● active").fg(Color::Green),
            AgentStatus::Inactive => Cell::new("○ inactive").fg(Color::DarkGrey),
        };

        let last_seen = match &agent.last_seen_at {
            Some(dt) => format_relative_time(dt),
            None => "never".to_string(),
        };

        table.add_row(vec![
            Cell::new(&agent.id).fg(Color::Cyan),
            Cell::new(&agent.name),
            Cell::new(&agent.endpoint),
            status_cell,
            Cell::new(last_seen).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} agent{}",
        style(agents.len()).bold(),
        if agents.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

fn format_relative_time(dt: &DateTime<Utc>) -> String {
    let elapsed = Utc::now().signed_duration_since(*dt);
    let secs = elapsed.num_seconds().max(0);
    if secs < 60 {
        format!("{secs}s ago")
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else if secs < 86400 {
        format!("{}h ago", secs / 3600)
    } else {
        dt.format("%Y-%m-%d").to_string()
    }
}
