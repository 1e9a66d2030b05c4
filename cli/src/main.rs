//! PortScout CLI - Find and kill listeners on remote hosts
//!
//! A command-line tool for listing listening ports over ssh, killing the
//! process behind a port, and managing saved hosts.

mod commands;

use clap::{ArgAction, Parser, Subcommand};
use portscout_core::Port;
use tracing::Level;

#[derive(Parser)]
#[command(name = "portscout")]
#[command(author, version, about = "Find and kill listeners on remote hosts")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// More diagnostics on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// List listening ports on a remote host
    #[command(alias = "ls")]
    List {
        /// Saved host name or ssh destination
        host: String,

        /// Filter by port number
        #[arg(short, long)]
        port: Option<Port>,

        /// Filter by process name
        #[arg(short = 'n', long)]
        name: Option<String>,
    },

    /// Kill the process listening on a remote port
    Kill {
        /// Saved host name or ssh destination
        host: String,

        /// Port number to kill
        port: Port,
    },

    /// Manage saved hosts
    Hosts {
        #[command(subcommand)]
        action: HostsAction,
    },

    /// Show current configuration
    Config,
}

#[derive(Subcommand)]
enum HostsAction {
    /// Save a host
    Add {
        /// Name to refer to the host by
        name: String,
        /// ssh destination, e.g. user@example.com
        destination: String,
        /// sshd port
        #[arg(long)]
        ssh_port: Option<u16>,
        /// Private key file
        #[arg(short, long)]
        identity: Option<String>,
        /// Extra ssh option (repeatable), e.g. -o StrictHostKeyChecking=accept-new
        #[arg(short = 'o', long = "option")]
        options: Vec<String>,
    },
    /// Remove a saved host
    #[command(alias = "rm")]
    Remove { name: String },
    /// List saved hosts
    #[command(alias = "ls")]
    List,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::List { host, port, name } => {
            commands::list::run(&host, port, name, cli.json).await?;
        }
        Commands::Kill { host, port } => {
            commands::kill::run(&host, port).await?;
        }
        Commands::Hosts { action } => match action {
            HostsAction::Add {
                name,
                destination,
                ssh_port,
                identity,
                options,
            } => commands::hosts::add(name, destination, ssh_port, identity, options).await?,
            HostsAction::Remove { name } => commands::hosts::remove(&name).await?,
            HostsAction::List => commands::hosts::list(cli.json).await?,
        },
        Commands::Config => {
            commands::config::show(cli.json).await?;
        }
    }

    Ok(())
}
