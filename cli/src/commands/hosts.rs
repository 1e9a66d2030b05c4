//! Hosts commands - manage saved ssh destinations.

use anyhow::Result;
use portscout_core::{ConfigStore, HostProfile};

pub async fn add(
    name: String,
    destination: String,
    ssh_port: Option<u16>,
    identity: Option<String>,
    options: Vec<String>,
) -> Result<()> {
    let store = ConfigStore::new()?;

    let mut profile = HostProfile::new(name, destination);
    profile.port = ssh_port;
    profile.identity_file = identity;
    profile.ssh_options = options;

    let summary = format!("{} ({})", profile.name, profile.destination);
    store.add_host(profile).await?;
    println!("Saved host {}", summary);
    Ok(())
}

pub async fn remove(name: &str) -> Result<()> {
    let store = ConfigStore::new()?;
    store.remove_host(name).await?;
    println!("Removed host {}", name);
    Ok(())
}

pub async fn list(json: bool) -> Result<()> {
    let store = ConfigStore::new()?;
    let hosts = store.get_hosts().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&hosts)?);
        return Ok(());
    }

    if hosts.is_empty() {
        println!("No saved hosts.");
        return Ok(());
    }

    for host in &hosts {
        match host.port {
            Some(port) => println!("{:<16} {} (port {})", host.name, host.destination, port),
            None => println!("{:<16} {}", host.name, host.destination),
        }
    }
    Ok(())
}
