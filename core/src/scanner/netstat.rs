//! Line parser for `netstat -tlnp` output.

use crate::domain::PortRecord;

use super::utils::Utils;

/// Column holding the local address:port pair.
const LOCAL_ADDRESS_COLUMN: usize = 3;

/// Parse one netstat line.
///
/// Expected netstat output format:
/// ```text
/// Proto Recv-Q Send-Q Local Address           Foreign Address         State       PID/Program name
/// tcp        0      0 0.0.0.0:8080            0.0.0.0:*               LISTEN      5678/python3
/// ```
pub fn parse_netstat_line(line: &str) -> Option<PortRecord> {
    if !line.starts_with("tcp") || !line.contains("LISTEN") {
        return None;
    }

    let components: Vec<&str> = line.split_whitespace().collect();
    if components.len() <= LOCAL_ADDRESS_COLUMN {
        return None;
    }

    let (address, port) = Utils::split_address(components[LOCAL_ADDRESS_COLUMN])?;

    // PID/Program name, or "-" without privileges
    let process_name = components
        .last()
        .and_then(|last| last.split_once('/'))
        .map(|(_, name)| name.to_string())
        .filter(|name| !name.is_empty());

    Some(PortRecord::new(
        port,
        process_name,
        Utils::normalize_netstat_address(address),
    ))
}
