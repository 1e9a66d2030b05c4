//! Remote channel over the system `ssh` client.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::domain::RemotePlatform;
use crate::error::ChannelError;
use crate::ports::RemoteChannel;

/// Default paths to search for ssh.
const SSH_PATHS: &[&str] = &[
    "/usr/bin/ssh",          // System
    "/opt/homebrew/bin/ssh", // Apple Silicon
    "/usr/local/bin/ssh",    // Intel Mac / Homebrew
];

/// Exit code ssh uses for its own (connection) errors.
const SSH_CONNECTION_ERROR: i32 = 255;

/// Timeout for a single remote command.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(15);

/// Where and how to connect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshTarget {
    /// `host` or `user@host`.
    pub destination: String,
    /// Remote sshd port, if not the default.
    pub port: Option<u16>,
    /// Private key passed with `-i`.
    pub identity_file: Option<PathBuf>,
    /// Extra `-o` options, e.g. "StrictHostKeyChecking=accept-new".
    pub options: Vec<String>,
}

impl SshTarget {
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            port: None,
            identity_file: None,
            options: Vec::new(),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_identity_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.identity_file = Some(path.into());
        self
    }

    pub fn with_option(mut self, option: impl Into<String>) -> Self {
        self.options.push(option.into());
        self
    }
}

/// A [`RemoteChannel`] that runs each command through a fresh `ssh`
/// invocation. Connection reuse is left to the user's ssh config
/// (e.g. `ControlMaster`).
pub struct SshChannel {
    ssh_path: PathBuf,
    target: SshTarget,
    timeout: Duration,
}

impl SshChannel {
    /// Create a channel, searching for the ssh binary.
    pub fn new(target: SshTarget) -> Self {
        Self {
            ssh_path: find_executable(SSH_PATHS).unwrap_or_else(|| PathBuf::from("ssh")),
            target,
            timeout: DEFAULT_COMMAND_TIMEOUT,
        }
    }

    /// Use a specific ssh binary.
    pub fn with_ssh_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ssh_path = path.into();
        self
    }

    /// Bound every remote command by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn target(&self) -> &SshTarget {
        &self.target
    }

    /// Arguments passed to ssh for one remote command.
    fn build_args(&self, command: &str) -> Vec<String> {
        let mut args = vec!["-o".to_string(), "BatchMode=yes".to_string()];

        if let Some(port) = self.target.port {
            args.push("-p".to_string());
            args.push(port.to_string());
        }

        if let Some(identity) = &self.target.identity_file {
            args.push("-i".to_string());
            args.push(identity.to_string_lossy().into_owned());
        }

        for option in &self.target.options {
            args.push("-o".to_string());
            args.push(option.clone());
        }

        args.push(self.target.destination.clone());
        args.push("--".to_string());
        args.push(command.to_string());
        args
    }

    async fn run(&self, command: &str) -> Result<String, ChannelError> {
        debug!(destination = %self.target.destination, command = command, "Running remote command");

        let result = timeout(
            self.timeout,
            Command::new(&self.ssh_path)
                .args(self.build_args(command))
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .kill_on_drop(true)
                .output(),
        )
        .await;

        let output = match result {
            Ok(output) => output?,
            Err(_) => {
                warn!(destination = %self.target.destination, timeout = ?self.timeout, "Remote command timed out");
                return Err(ChannelError::Timeout(self.timeout));
            }
        };

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        match output.status.code() {
            Some(0) => {
                debug!(destination = %self.target.destination, bytes = output.stdout.len(), "Remote command finished");
                String::from_utf8(output.stdout)
                    .map_err(|e| ChannelError::InvalidOutput(format!("Invalid UTF-8 in output: {}", e)))
            }
            Some(SSH_CONNECTION_ERROR) => Err(ChannelError::Disconnected(stderr)),
            code => Err(ChannelError::CommandFailed { code, stderr }),
        }
    }
}

impl RemoteChannel for SshChannel {
    /// Runs `uname -sm`, e.g. "Darwin arm64" becomes os "darwin", arch "arm64".
    async fn remote_platform(&self) -> Result<RemotePlatform, ChannelError> {
        let output = self.run("uname -sm").await?;
        parse_uname(&output)
    }

    async fn execute(&self, command: &str) -> Result<String, ChannelError> {
        self.run(command).await
    }
}

fn parse_uname(output: &str) -> Result<RemotePlatform, ChannelError> {
    let mut parts = output.split_whitespace();

    let os = parts
        .next()
        .ok_or_else(|| ChannelError::InvalidOutput("Empty uname output".to_string()))?;

    Ok(RemotePlatform {
        os: os.to_lowercase(),
        arch: parts.next().map(str::to_string),
    })
}

/// Finds an executable in the given paths.
fn find_executable(paths: &[&str]) -> Option<PathBuf> {
    paths.iter().map(PathBuf::from).find(|p| p.exists())
}
