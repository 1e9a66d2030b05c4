//! Kill-by-port service.

use crate::adapters::TracingSink;
use crate::domain::Port;
use crate::error::{Error, Result};
use crate::killer::{kill_command, KillReport};
use crate::ports::{DiagnosticSink, RemoteChannel};

/// Terminates the remote process listening on a port.
pub struct ProcessTerminator<C, S = TracingSink> {
    channel: C,
    sink: S,
}

impl<C: RemoteChannel> ProcessTerminator<C> {
    /// Create a terminator logging through `tracing`.
    pub fn new(channel: C) -> Self {
        Self::with_sink(channel, TracingSink)
    }
}

impl<C: RemoteChannel, S: DiagnosticSink> ProcessTerminator<C, S> {
    /// Create a terminator with a custom diagnostic sink.
    pub fn with_sink(channel: C, sink: S) -> Self {
        Self { channel, sink }
    }

    /// Send a termination signal to whatever owns `port`.
    ///
    /// One remote command, no retry. Returns [`Error::ProcessNotFound`]
    /// unless the remote pipeline reports `KILLED`.
    pub async fn kill_process(&self, port: Port) -> Result<()> {
        let platform = self.channel.remote_platform().await?;
        let command = kill_command(platform.family(), port);

        self.sink.debug(&format!("Killing process on port {} with: {}", port, command));

        let output = self.channel.execute(&command).await?;

        match KillReport::from_output(&output) {
            KillReport::Killed => {
                self.sink.info(&format!("Killed process on port {}", port));
                Ok(())
            }
            KillReport::NotFound => {
                self.sink.warn(&format!(
                    "Could not kill process on port {}: {}",
                    port,
                    output.trim()
                ));
                Err(Error::ProcessNotFound { port: port.get() })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio_test::{assert_err, assert_ok};

    use super::*;
    use crate::adapters::{MemorySink, NoopSink};
    use crate::application::test_support::ScriptedChannel;
    use crate::error::ChannelError;
    use crate::ports::DiagnosticLevel;

    fn port(n: u16) -> Port {
        Port::new(n).unwrap()
    }

    #[tokio::test]
    async fn test_kill_success_on_linux() {
        let channel = ScriptedChannel::new("linux").respond("KILLED\n");
        let terminator = ProcessTerminator::with_sink(&channel, NoopSink);

        assert_ok!(terminator.kill_process(port(3000)).await);
        assert!(channel.commands()[0].starts_with("pid=$(fuser 3000/tcp"));
    }

    #[tokio::test]
    async fn test_kill_success_on_darwin() {
        let channel = ScriptedChannel::new("darwin").respond("KILLED");
        let terminator = ProcessTerminator::with_sink(&channel, NoopSink);

        assert_ok!(terminator.kill_process(port(5173)).await);
        assert!(channel.commands()[0].starts_with("pid=$(lsof -ti tcp:5173"));
    }

    #[tokio::test]
    async fn test_not_found_is_error() {
        let sink = MemorySink::new();
        let channel = ScriptedChannel::new("linux").respond("NOT_FOUND\n");
        let terminator = ProcessTerminator::with_sink(&channel, &sink);

        let err = assert_err!(terminator.kill_process(port(8080)).await);
        assert!(matches!(err, Error::ProcessNotFound { port: 8080 }));
        assert_eq!(sink.messages(DiagnosticLevel::Warn).len(), 1);
    }

    #[tokio::test]
    async fn test_unexpected_output_is_not_found() {
        let channel = ScriptedChannel::new("linux").respond("sh: fuser: command not found\n");
        let terminator = ProcessTerminator::with_sink(&channel, NoopSink);

        let err = assert_err!(terminator.kill_process(port(4200)).await);
        assert!(matches!(err, Error::ProcessNotFound { port: 4200 }));
    }

    #[tokio::test]
    async fn test_channel_failure_is_not_process_not_found() {
        let channel = ScriptedChannel::new("linux").fail(ChannelError::Disconnected("broken pipe".into()));
        let terminator = ProcessTerminator::with_sink(&channel, NoopSink);

        let err = assert_err!(terminator.kill_process(port(9000)).await);
        assert!(err.is_channel_failure());
    }
}
