//! Parser for macOS `lsof -iTCP -sTCP:LISTEN -P -n` output.

use std::collections::HashSet;

use crate::domain::{Port, PortRecord};

use super::utils::Utils;

/// Index of the NAME column in lsof's default layout.
const NAME_COLUMN: usize = 8;

/// Parse lsof output into port records.
///
/// Expected lsof output format:
/// ```text
/// COMMAND    PID  USER   FD   TYPE             DEVICE SIZE/OFF NODE NAME
/// node     34805  code   19u  IPv6 0x3d8015e195af1f3f      0t0  TCP [::1]:3000 (LISTEN)
/// ```
///
/// Lines that are not in LISTEN state, are truncated, or carry an invalid
/// port are skipped. The first line seen for a port wins.
pub fn parse_lsof_output(output: &str) -> Vec<PortRecord> {
    let mut records = Vec::new();
    let mut seen: HashSet<Port> = HashSet::new();

    for line in output.lines() {
        if let Some(record) = parse_lsof_line(line) {
            if seen.insert(record.port) {
                records.push(record);
            }
        }
    }

    records
}

fn parse_lsof_line(line: &str) -> Option<PortRecord> {
    if line.starts_with("COMMAND") || !line.contains("(LISTEN)") {
        return None;
    }

    // COMMAND PID USER FD TYPE DEVICE SIZE/OFF NODE NAME
    let components: Vec<&str> = line.split_whitespace().collect();
    if components.len() <= NAME_COLUMN {
        return None;
    }

    let process_name = unescape_process_name(components[0]);

    // DEVICE is a hex id and never the address column
    let name = components[NAME_COLUMN..]
        .iter()
        .find(|c| c.contains(':') && !c.starts_with("0x"))?;

    let (address, port) = Utils::split_address(name)?;

    Some(PortRecord::new(
        port,
        Some(process_name),
        Utils::normalize_address(address),
    ))
}

/// lsof escapes unprintable bytes in COMMAND as `\xNN`.
fn unescape_process_name(raw: &str) -> String {
    raw.replace("\\x20", " ").replace("\\x2f", "/")
}
