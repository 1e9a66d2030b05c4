//! Error types for the portscout-core library.

use std::time::Duration;

use thiserror::Error;

/// Result type alias for portscout operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures reported by a remote command channel.
///
/// These are never produced by the core itself; they travel from the
/// channel to the caller unchanged inside [`Error::Channel`].
#[derive(Error, Debug)]
pub enum ChannelError {
    /// The channel process could not be started or talked to.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The remote command did not finish in time.
    #[error("Remote command timed out after {0:?}")]
    Timeout(Duration),

    /// The connection to the remote host dropped or could not be established.
    #[error("Remote host unreachable: {0}")]
    Disconnected(String),

    /// The remote command itself exited unsuccessfully.
    #[error("Remote command failed (exit code {code:?}): {stderr}")]
    CommandFailed { code: Option<i32>, stderr: String },

    /// The command produced output the channel could not decode.
    #[error("Invalid command output: {0}")]
    InvalidOutput(String),
}

/// Errors that can occur during remote port discovery and process termination.
#[derive(Error, Debug)]
pub enum Error {
    /// The remote channel failed (platform probe or command execution).
    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    /// No process owning the port could be found or signaled.
    #[error("No process found listening on port {port}")]
    ProcessNotFound { port: u16 },

    /// A value could not be used as a TCP port.
    #[error("Invalid port: {0}")]
    InvalidPort(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns true if this error came from the remote channel.
    pub fn is_channel_failure(&self) -> bool {
        matches!(self, Error::Channel(_))
    }
}
