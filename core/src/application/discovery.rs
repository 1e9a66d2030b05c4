//! Remote listening-port discovery service.

use crate::adapters::TracingSink;
use crate::domain::{rank_records, PortRecord};
use crate::error::Result;
use crate::ports::{DiagnosticSink, RemoteChannel};
use crate::scanner::{ScanOptions, ScanStrategy};

/// Result of one discovery pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// A scanning tool ran; records are ranked (possibly empty).
    Listeners(Vec<PortRecord>),
    /// No scanning tool could run on the remote host.
    ToolUnavailable,
}

impl ScanOutcome {
    /// Collapse into a plain list; an unavailable tool yields no records.
    pub fn into_records(self) -> Vec<PortRecord> {
        match self {
            ScanOutcome::Listeners(records) => records,
            ScanOutcome::ToolUnavailable => Vec::new(),
        }
    }

    pub fn is_tool_unavailable(&self) -> bool {
        matches!(self, ScanOutcome::ToolUnavailable)
    }
}

/// Discovers listening TCP ports on the host behind a [`RemoteChannel`].
///
/// Each call probes the platform, runs one fallback command chain and
/// parses whatever came back. Nothing is cached between calls.
pub struct PortDiscovery<C, S = TracingSink> {
    channel: C,
    sink: S,
    options: ScanOptions,
}

impl<C: RemoteChannel> PortDiscovery<C> {
    /// Create a discovery service logging through `tracing`.
    pub fn new(channel: C) -> Self {
        Self::with_sink(channel, TracingSink)
    }
}

impl<C: RemoteChannel, S: DiagnosticSink> PortDiscovery<C, S> {
    /// Create a discovery service with a custom diagnostic sink.
    pub fn with_sink(channel: C, sink: S) -> Self {
        Self {
            channel,
            sink,
            options: ScanOptions::default(),
        }
    }

    /// Replace the scan options.
    pub fn with_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    /// Scan the remote host, telling "no tool" apart from "no listeners".
    ///
    /// Channel failures (platform probe or command execution) are returned
    /// as errors; nothing is retried.
    pub async fn scan(&self) -> Result<ScanOutcome> {
        let platform = self.channel.remote_platform().await?;
        let strategy = ScanStrategy::for_family(platform.family(), &self.options);
        let command = strategy.command();

        self.sink.debug(&format!(
            "Scanning {} host with: {}",
            strategy.family(),
            command
        ));

        let output = self.channel.execute(&command).await?;

        if ScanStrategy::is_unavailable(&output) {
            let tried: Vec<&str> = strategy.probes().iter().map(|t| t.name()).collect();
            self.sink.warn(&format!(
                "No port scanning tool available on remote host (tried: {})",
                tried.join(", ")
            ));
            return Ok(ScanOutcome::ToolUnavailable);
        }

        let mut records = strategy.parse(&output);
        rank_records(&mut records);

        self.sink.info(&format!("Found {} listening ports", records.len()));
        Ok(ScanOutcome::Listeners(records))
    }

    /// List listening ports, ranked by priority then port.
    ///
    /// An empty list means either no listeners or no usable scanning tool;
    /// use [`scan`](Self::scan) to tell the two apart.
    pub async fn list_listening_ports(&self) -> Result<Vec<PortRecord>> {
        Ok(self.scan().await?.into_records())
    }
}

#[cfg(test)]
mod tests {
    use tokio_test::{assert_err, assert_ok};

    use super::*;
    use crate::adapters::{MemorySink, NoopSink};
    use crate::application::test_support::ScriptedChannel;
    use crate::domain::{Port, SortPriority};
    use crate::error::{ChannelError, Error};
    use crate::ports::DiagnosticLevel;

    const SS_OUTPUT: &str = r#"State  Recv-Q Send-Q Local Address:Port Peer Address:Port Process
LISTEN 0      128          0.0.0.0:22        0.0.0.0:*    users:(("sshd",pid=812,fd=3))
LISTEN 0      511          0.0.0.0:443       0.0.0.0:*    users:(("nginx",pid=900,fd=6))
LISTEN 0      4096       127.0.0.1:9229      0.0.0.0:*    users:(("node",pid=1234,fd=20))
LISTEN 0      4096       127.0.0.1:3000      0.0.0.0:*    users:(("node",pid=1234,fd=19))
LISTEN 0      4096            [::]:3000         [::]:*    users:(("node",pid=1234,fd=21))
"#;

    #[tokio::test]
    async fn test_linux_scan_is_ranked() {
        let channel = ScriptedChannel::new("linux").respond(SS_OUTPUT);
        let discovery = PortDiscovery::with_sink(&channel, NoopSink);

        let records = assert_ok!(discovery.list_listening_ports().await);
        let ports: Vec<u16> = records.iter().map(|r| r.port.get()).collect();
        assert_eq!(ports, vec![3000, 9229, 22, 443]);
        assert_eq!(records[0].sort_priority(), SortPriority::CommonPort);
        assert_eq!(records[1].sort_priority(), SortPriority::DevTool);

        assert_eq!(
            channel.commands(),
            vec!["ss -tlnp 2>/dev/null || netstat -tlnp 2>/dev/null || echo SCAN_FAILED".to_string()]
        );
    }

    #[tokio::test]
    async fn test_darwin_scan_uses_lsof() {
        let output = "COMMAND PID USER FD TYPE DEVICE SIZE/OFF NODE NAME
nginx 999 root 6u IPv4 0x0 0t0 TCP *:443 (LISTEN)
";
        let channel = ScriptedChannel::new("darwin").respond(output);
        let discovery = PortDiscovery::with_sink(&channel, NoopSink);

        let records = assert_ok!(discovery.list_listening_ports().await);
        assert_eq!(
            records,
            vec![PortRecord::new(Port::new(443).unwrap(), Some("nginx".into()), "0.0.0.0")]
        );
        assert!(channel.commands()[0].starts_with("lsof -iTCP -sTCP:LISTEN -P -n"));
    }

    #[tokio::test]
    async fn test_sentinel_yields_empty_list_and_warning() {
        let sink = MemorySink::new();
        let channel = ScriptedChannel::new("linux").respond("SCAN_FAILED\n");
        let discovery = PortDiscovery::with_sink(&channel, &sink);

        let records = assert_ok!(discovery.list_listening_ports().await);
        assert!(records.is_empty());

        let warnings = sink.messages(DiagnosticLevel::Warn);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("ss, netstat"));
        assert!(sink.messages(DiagnosticLevel::Info).is_empty());
    }

    #[tokio::test]
    async fn test_scan_distinguishes_tool_unavailable() {
        let channel = ScriptedChannel::new("linux").respond("SCAN_FAILED").respond("");
        let discovery = PortDiscovery::with_sink(&channel, NoopSink);

        assert_eq!(assert_ok!(discovery.scan().await), ScanOutcome::ToolUnavailable);
        assert_eq!(assert_ok!(discovery.scan().await), ScanOutcome::Listeners(Vec::new()));
    }

    #[tokio::test]
    async fn test_count_is_logged() {
        let sink = MemorySink::new();
        let channel = ScriptedChannel::new("linux").respond(SS_OUTPUT);
        let discovery = PortDiscovery::with_sink(&channel, &sink);

        assert_ok!(discovery.scan().await);
        assert_eq!(sink.messages(DiagnosticLevel::Info), vec!["Found 4 listening ports".to_string()]);
    }

    #[tokio::test]
    async fn test_platform_failure_propagates() {
        let channel = ScriptedChannel::unreachable();
        let discovery = PortDiscovery::with_sink(&channel, NoopSink);

        let err = assert_err!(discovery.list_listening_ports().await);
        assert!(matches!(err, Error::Channel(ChannelError::Disconnected(_))));
        assert!(channel.commands().is_empty());
    }

    #[tokio::test]
    async fn test_execute_failure_propagates() {
        let channel = ScriptedChannel::new("linux").fail(ChannelError::Timeout(std::time::Duration::from_secs(15)));
        let discovery = PortDiscovery::with_sink(&channel, NoopSink);

        let err = assert_err!(discovery.scan().await);
        assert!(matches!(err, Error::Channel(ChannelError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_proc_net_option_extends_chain() {
        let proc_net = "  sl  local_address rem_address   st tx_queue rx_queue
   0: 0100007F:1F90 00000000:0000 0A 00000000:00000000 00:00000000 00000000 0 0 1 1
";
        let channel = ScriptedChannel::new("linux").respond(proc_net);
        let discovery = PortDiscovery::with_sink(&channel, NoopSink)
            .with_options(ScanOptions { proc_net_fallback: true });

        let records = assert_ok!(discovery.list_listening_ports().await);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].port.get(), 8080);
        assert!(channel.commands()[0].contains("/proc/net/tcp"));
    }
}
