//! Example: Scan and display listening ports on a remote host.
//!
//! Usage: cargo run --example scan_ports -- user@host

use portscout_core::{PortDiscovery, ScanOutcome, SshChannel, SshTarget};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let Some(destination) = std::env::args().nth(1) else {
        eprintln!("usage: scan_ports <ssh destination>");
        std::process::exit(2);
    };

    println!("Scanning ports on {}...\n", destination);

    let discovery = PortDiscovery::new(SshChannel::new(SshTarget::new(destination)));

    match discovery.scan().await {
        Ok(ScanOutcome::ToolUnavailable) => {
            println!("No port scanning tool available on the remote host.");
        }
        Ok(ScanOutcome::Listeners(ports)) => {
            if ports.is_empty() {
                println!("No listening ports found.");
                return;
            }

            println!("{}", table_row("PORT", "PROCESS", "ADDRESS", "PRIORITY"));
            println!("{}", "-".repeat(70));

            for record in &ports {
                println!(
                    "{}",
                    table_row(
                        &record.port.to_string(),
                        record.process_name.as_deref().unwrap_or("-"),
                        &record.address,
                        &format!("{:?}", record.sort_priority()),
                    )
                );
            }

            println!("\nTotal: {} ports", ports.len());
        }
        Err(e) => {
            eprintln!("Error scanning ports: {}", e);
            std::process::exit(1);
        }
    }
}

/// One line of the output table; the header uses the same layout.
fn table_row(port: &str, process: &str, address: &str, priority: &str) -> String {
    format!("{:<6} {:<20} {:<20} {}", port, process, address, priority)
}
