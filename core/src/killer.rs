//! Kill-by-port command protocol.
//!
//! The remote side resolves the PID owning a port and signals it in one
//! pipeline, then reports back with a single word:
//! - `KILLED` when a PID was found and `kill` succeeded
//! - `NOT_FOUND` otherwise

use crate::domain::{PlatformFamily, Port};

/// Printed by the pipeline when the owning process was signaled.
pub const KILLED_MARKER: &str = "KILLED";

/// Printed by the pipeline when no process could be signaled.
pub const NOT_FOUND_MARKER: &str = "NOT_FOUND";

/// Build the remote kill pipeline for a port.
///
/// `port` is a validated [`Port`], so the interpolated text is always a
/// plain integer.
pub fn kill_command(family: PlatformFamily, port: Port) -> String {
    let resolve_pid = match family {
        PlatformFamily::Darwin => format!("lsof -ti tcp:{} 2>/dev/null | head -n 1", port),
        PlatformFamily::LinuxLike => format!("fuser {}/tcp 2>/dev/null | awk '{{print $1}}'", port),
    };

    format!(
        "pid=$({}); if [ -n \"$pid\" ] && kill \"$pid\" 2>/dev/null; then echo {}; else echo {}; fi",
        resolve_pid, KILLED_MARKER, NOT_FOUND_MARKER
    )
}

/// Result reported by the kill pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillReport {
    Killed,
    NotFound,
}

impl KillReport {
    /// Interpret captured pipeline output. Only an exact `KILLED` (after
    /// trimming) counts as success.
    pub fn from_output(output: &str) -> Self {
        if output.trim() == KILLED_MARKER {
            KillReport::Killed
        } else {
            KillReport::NotFound
        }
    }
}
