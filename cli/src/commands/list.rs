//! List command - show listening ports on a remote host.

use anyhow::Result;
use portscout_core::{ConfigStore, Port, PortDiscovery, SortPriority};

pub async fn run(host: &str, port_filter: Option<Port>, name_filter: Option<String>, json: bool) -> Result<()> {
    let store = ConfigStore::new()?;
    let options = store.load().await?.scan_options();
    let channel = store.channel_for(host).await?;

    let outcome = PortDiscovery::new(channel).with_options(options).scan().await?;
    let tool_unavailable = outcome.is_tool_unavailable();
    let mut ports = outcome.into_records();

    // Apply filters
    if let Some(p) = port_filter {
        ports.retain(|record| record.port == p);
    }
    if let Some(ref name) = name_filter {
        let name_lower = name.to_lowercase();
        ports.retain(|record| {
            record
                .process_name
                .as_deref()
                .is_some_and(|n| n.to_lowercase().contains(&name_lower))
        });
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&ports)?);
        return Ok(());
    }

    if tool_unavailable {
        println!("No port scanning tool (lsof, ss, netstat) is available on {}.", host);
        return Ok(());
    }

    if ports.is_empty() {
        println!("No listening ports found on {}.", host);
        return Ok(());
    }

    // Table header
    println!("{:<6} {:<40} {:<20} PRIORITY", "PORT", "ADDRESS", "PROCESS");
    println!("{}", "-".repeat(80));

    for record in &ports {
        let priority = match record.sort_priority() {
            SortPriority::CommonPort => "dev port",
            SortPriority::DevTool => "dev tool",
            SortPriority::Other => "-",
        };

        let address = truncate(&record.address, 40);
        let process = truncate(record.process_name.as_deref().unwrap_or("-"), 20);

        println!("{:<6} {:<40} {:<20} {}", record.port, address, process, priority);
    }

    println!("\nTotal: {} ports", ports.len());
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max - 1).collect();
        format!("{}…", head)
    }
}
