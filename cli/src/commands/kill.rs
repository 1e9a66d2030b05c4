//! Kill command - terminate the process listening on a remote port.

use anyhow::{bail, Result};
use portscout_core::{ConfigStore, Error, Port, ProcessTerminator};

pub async fn run(host: &str, port: Port) -> Result<()> {
    let store = ConfigStore::new()?;
    let channel = store.channel_for(host).await?;

    match ProcessTerminator::new(channel).kill_process(port).await {
        Ok(()) => {
            println!("Killed process on {}:{}", host, port);
            Ok(())
        }
        Err(Error::ProcessNotFound { port }) => {
            bail!("No process found listening on port {} on {}", port, host)
        }
        Err(e) => Err(e.into()),
    }
}
