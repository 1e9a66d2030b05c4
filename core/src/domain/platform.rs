//! Remote platform identification.

use serde::{Deserialize, Serialize};

/// Platform information reported by the remote channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemotePlatform {
    /// Kernel/OS identifier, e.g. "darwin" or "linux".
    pub os: String,
    /// Machine architecture, when the channel reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arch: Option<String>,
}

impl RemotePlatform {
    /// Create a platform description with just an OS identifier.
    pub fn new(os: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: None,
        }
    }

    /// The tooling family used to scan and kill on this platform.
    pub fn family(&self) -> PlatformFamily {
        PlatformFamily::from_os(&self.os)
    }
}

/// Which set of introspection tools a remote host offers.
///
/// Only macOS is singled out; every other OS is assumed to carry
/// Linux/BSD style tooling (`ss`, `netstat`, `fuser`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlatformFamily {
    /// macOS: `lsof`.
    Darwin,
    /// Anything else: `ss`, then `netstat`.
    LinuxLike,
}

impl PlatformFamily {
    /// Map an OS identifier to a tooling family.
    pub fn from_os(os: &str) -> Self {
        if os.trim().eq_ignore_ascii_case("darwin") {
            PlatformFamily::Darwin
        } else {
            PlatformFamily::LinuxLike
        }
    }
}

impl std::fmt::Display for PlatformFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlatformFamily::Darwin => write!(f, "darwin"),
            PlatformFamily::LinuxLike => write!(f, "linux-like"),
        }
    }
}
