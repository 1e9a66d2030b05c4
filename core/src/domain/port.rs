//! Port and listening-socket domain models.

use std::fmt;
use std::num::NonZeroU16;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

// ============================================================================
// Port
// ============================================================================

/// A TCP port number in the range 1..=65535.
///
/// Every port that reaches a remote command string goes through this type,
/// so only validated integers are ever interpolated into shell text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Port(NonZeroU16);

impl Port {
    /// Create a port, rejecting zero.
    pub fn new(port: u16) -> Option<Self> {
        NonZeroU16::new(port).map(Self)
    }

    /// Parse a port from command output.
    ///
    /// Accepts only decimal integers strictly between 0 and 65536.
    pub fn parse(text: &str) -> Option<Self> {
        let value: u32 = text.parse().ok()?;
        u16::try_from(value).ok().and_then(Self::new)
    }

    /// The raw port number.
    pub fn get(self) -> u16 {
        self.0.get()
    }
}

impl TryFrom<u16> for Port {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| Error::InvalidPort(value.to_string()))
    }
}

impl From<Port> for u16 {
    fn from(port: Port) -> Self {
        port.get()
    }
}

impl FromStr for Port {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s.trim()).ok_or_else(|| Error::InvalidPort(s.to_string()))
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// SortPriority
// ============================================================================

/// Ports commonly used by local development servers.
pub const COMMON_DEV_PORTS: [u16; 8] = [3000, 3005, 8000, 8080, 5173, 4200, 5000, 9000];

/// Process name fragments that identify development tooling.
pub const DEV_TOOL_KEYWORDS: [&str; 8] = ["node", "python", "bun", "npm", "yarn", "vite", "next", "nuxt"];

/// Ranking class of a listening port. Lower sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortPriority {
    /// Port is one of [`COMMON_DEV_PORTS`].
    CommonPort = 0,
    /// Process name matches one of [`DEV_TOOL_KEYWORDS`].
    DevTool = 1,
    /// Everything else.
    Other = 2,
}

impl SortPriority {
    /// Classify a port and its (optional) owning process name.
    pub fn classify(port: Port, process_name: Option<&str>) -> Self {
        if COMMON_DEV_PORTS.contains(&port.get()) {
            return SortPriority::CommonPort;
        }

        if let Some(name) = process_name {
            let name = name.to_lowercase();
            if DEV_TOOL_KEYWORDS.iter().any(|k| name.contains(k)) {
                return SortPriority::DevTool;
            }
        }

        SortPriority::Other
    }

    /// Numeric rank (0 is most relevant).
    pub fn rank(self) -> u8 {
        self as u8
    }
}

// ============================================================================
// PortRecord
// ============================================================================

/// One listening endpoint observed on the remote host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortRecord {
    /// The listening port. Unique within one scan result.
    pub port: Port,
    /// Owning process name, if the tool reported it.
    #[serde(rename = "process", default, skip_serializing_if = "Option::is_none")]
    pub process_name: Option<String>,
    /// Bound address, a literal IP or "0.0.0.0" for the wildcard.
    pub address: String,
}

impl PortRecord {
    /// Create a new record.
    pub fn new(port: Port, process_name: Option<String>, address: impl Into<String>) -> Self {
        Self {
            port,
            process_name,
            address: address.into(),
        }
    }

    /// Ranking class of this record.
    pub fn sort_priority(&self) -> SortPriority {
        SortPriority::classify(self.port, self.process_name.as_deref())
    }
}

impl fmt::Display for PortRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.process_name {
            Some(name) => write!(f, "{}:{} ({})", self.address, self.port, name),
            None => write!(f, "{}:{}", self.address, self.port),
        }
    }
}

/// Sort records by priority, then by port number.
pub fn rank_records(records: &mut [PortRecord]) {
    records.sort_by_key(|r| (r.sort_priority(), r.port));
}

// ============================================================================
// Tests
// ============================================================================
