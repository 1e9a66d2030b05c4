//! Config command - show the stored configuration.

use anyhow::Result;
use portscout_core::ConfigStore;

pub async fn show(json: bool) -> Result<()> {
    let store = ConfigStore::new()?;
    let config = store.load().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    println!("Config file:       {}", store.path().display());
    println!("Command timeout:   {}s", config.command_timeout);
    println!("/proc/net fallback: {}", if config.proc_net_fallback { "on" } else { "off" });
    println!("Saved hosts:       {}", config.hosts.len());
    Ok(())
}
