//! Parser for the Linux fallback chain (`ss`, `netstat`, `/proc/net/tcp`).
//!
//! The captured text comes from whichever tool in the chain succeeded, so
//! every line is offered to each line parser in turn.

use std::collections::HashSet;

use crate::domain::{Port, PortRecord};

use super::netstat::parse_netstat_line;
use super::proc_net::parse_proc_net_line;
use super::ss::parse_ss_line;

/// Parse Linux tool output into port records, first record per port wins.
pub fn parse_linux_output(output: &str) -> Vec<PortRecord> {
    let mut records = Vec::new();
    let mut seen: HashSet<Port> = HashSet::new();

    for line in output.lines() {
        if line.trim().is_empty() || is_header(line) {
            continue;
        }

        let parsed = parse_ss_line(line)
            .or_else(|| parse_netstat_line(line))
            .or_else(|| parse_proc_net_line(line));

        if let Some(record) = parsed {
            if seen.insert(record.port) {
                records.push(record);
            }
        }
    }

    records
}

fn is_header(line: &str) -> bool {
    line.contains("State") || line.contains("Proto") || line.starts_with("Netid")
}
