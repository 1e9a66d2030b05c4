//! Listening-port scanning: tool commands and output parsers.
//!
//! Everything here is pure. A [`ScanStrategy`] turns a platform family into
//! one shell command (an ordered `||` chain of tool probes ending in the
//! sentinel) and knows which parser reads the captured output.

mod linux;
mod lsof;
mod netstat;
mod proc_net;
mod ss;
mod utils;

use crate::domain::{PlatformFamily, PortRecord};

pub use linux::parse_linux_output;
pub use lsof::parse_lsof_output;
pub use netstat::parse_netstat_line;
pub use proc_net::parse_proc_net_line;
pub use ss::parse_ss_line;
pub use utils::{Utils, WILDCARD_ADDRESS};

/// Marker printed instead of tool output when every probe failed.
pub const SCAN_SENTINEL: &str = "SCAN_FAILED";

/// A remote introspection tool that can list listening sockets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Lsof,
    Ss,
    Netstat,
    ProcNet,
}

impl Tool {
    /// Shell command for this probe. Each one silences its own stderr and
    /// exits non-zero when the tool is missing or fails.
    ///
    /// Flags explained:
    /// - lsof: -iTCP TCP only, -sTCP:LISTEN listening only, -P/-n numeric ports and hosts
    /// - ss/netstat: -t TCP, -l listening, -n numeric, -p owning process
    pub fn command(self) -> &'static str {
        match self {
            Tool::Lsof => "lsof -iTCP -sTCP:LISTEN -P -n 2>/dev/null",
            Tool::Ss => "ss -tlnp 2>/dev/null",
            Tool::Netstat => "netstat -tlnp 2>/dev/null",
            Tool::ProcNet => "{ cat /proc/net/tcp && { cat /proc/net/tcp6 || :; }; } 2>/dev/null",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Tool::Lsof => "lsof",
            Tool::Ss => "ss",
            Tool::Netstat => "netstat",
            Tool::ProcNet => "/proc/net/tcp",
        }
    }
}

/// Tunables for building a scan strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Read `/proc/net/tcp` when neither `ss` nor `netstat` is available.
    pub proc_net_fallback: bool,
}

/// Ordered tool probes plus the parser for one platform family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanStrategy {
    family: PlatformFamily,
    probes: Vec<Tool>,
}

impl ScanStrategy {
    /// Build the strategy for a platform family.
    pub fn for_family(family: PlatformFamily, options: &ScanOptions) -> Self {
        let probes = match family {
            PlatformFamily::Darwin => vec![Tool::Lsof],
            PlatformFamily::LinuxLike if options.proc_net_fallback => {
                vec![Tool::Ss, Tool::Netstat, Tool::ProcNet]
            }
            PlatformFamily::LinuxLike => vec![Tool::Ss, Tool::Netstat],
        };

        Self { family, probes }
    }

    pub fn family(&self) -> PlatformFamily {
        self.family
    }

    /// Probes in the order they are tried.
    pub fn probes(&self) -> &[Tool] {
        &self.probes
    }

    /// The full fallback chain as a single shell command.
    ///
    /// e.g. `ss -tlnp 2>/dev/null || netstat -tlnp 2>/dev/null || echo SCAN_FAILED`
    pub fn command(&self) -> String {
        let sentinel = format!("echo {}", SCAN_SENTINEL);
        let mut parts: Vec<&str> = self.probes.iter().map(|tool| tool.command()).collect();
        parts.push(&sentinel);
        parts.join(" || ")
    }

    /// True if captured output means no probe succeeded.
    pub fn is_unavailable(output: &str) -> bool {
        output.contains(SCAN_SENTINEL)
    }

    /// Parse captured output with this family's parser.
    pub fn parse(&self, output: &str) -> Vec<PortRecord> {
        match self.family {
            PlatformFamily::Darwin => parse_lsof_output(output),
            PlatformFamily::LinuxLike => parse_linux_output(output),
        }
    }
}
