//! Line parser for `ss -tlnp` output.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::PortRecord;

use super::utils::Utils;

fn users_regex() -> &'static Regex {
    static USERS: OnceLock<Regex> = OnceLock::new();
    USERS.get_or_init(|| Regex::new(r#"users:\(\("([^"]*)""#).unwrap())
}

/// Parse one ss line.
///
/// Expected ss output format:
/// ```text
/// State      Recv-Q     Send-Q              Local Address:Port          Peer Address:Port     Process
/// LISTEN     0          4096           [::ffff:127.0.0.1]:63342                    *:*         users:(("rustrover",pid=53561,fd=54))
/// ```
///
/// `LISTEN` must sit in the state column (first, or second after a Netid
/// column); netstat rows carry it further right and are left alone.
pub fn parse_ss_line(line: &str) -> Option<PortRecord> {
    let components: Vec<&str> = line.split_whitespace().collect();

    let state = match components.first() {
        Some(&"LISTEN") => 0,
        _ if components.get(1) == Some(&"LISTEN") => 1,
        _ => return None,
    };

    // Local address comes before the peer address, so the first valid pair wins
    let (address, port) = components[state + 1..]
        .iter()
        .find_map(|c| Utils::split_address(c))?;

    let process_name = users_regex()
        .captures(line)
        .map(|caps| caps[1].to_string())
        .filter(|name| !name.is_empty());

    Some(PortRecord::new(
        port,
        process_name,
        Utils::normalize_address(address),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ss_line() {
        let record = parse_ss_line(
            r#"LISTEN 0 4096 127.0.0.1:3000 0.0.0.0:* users:(("node",pid=1234,fd=19))"#,
        )
        .unwrap();

        assert_eq!(record.port.get(), 3000);
        assert_eq!(record.address, "127.0.0.1");
        assert_eq!(record.process_name.as_deref(), Some("node"));
    }

    #[test]
    fn test_ipv6_and_wildcards() {
        let record = parse_ss_line(
            r#"LISTEN 0 50 [::ffff:127.0.0.1]:80 *:* users:(("nginx",pid=55316,fd=6))"#,
        )
        .unwrap();
        assert_eq!(record.address, "::ffff:127.0.0.1");
        assert_eq!(record.port.get(), 80);

        let record = parse_ss_line("LISTEN 0 128 [::]:22 [::]:*").unwrap();
        assert_eq!(record.address, "0.0.0.0");
        assert_eq!(record.process_name, None);

        let record = parse_ss_line("LISTEN 0 128 *:5432 *:*").unwrap();
        assert_eq!(record.address, "0.0.0.0");
        assert_eq!(record.port.get(), 5432);
    }

    #[test]
    fn test_netid_column() {
        let record = parse_ss_line(
            r#"tcp   LISTEN 0      511          0.0.0.0:5173      0.0.0.0:*    users:(("vite",pid=77,fd=21))"#,
        )
        .unwrap();
        assert_eq!(record.port.get(), 5173);
        assert_eq!(record.process_name.as_deref(), Some("vite"));
    }

    #[test]
    fn test_rejects_other_lines() {
        assert!(parse_ss_line("ESTAB 0 0 10.0.0.2:22 10.0.0.9:51515").is_none());
        assert!(parse_ss_line("tcp 0 0 0.0.0.0:8080 0.0.0.0:* LISTEN 5678/python3").is_none());
        assert!(parse_ss_line("LISTEN 0 128 127.0.0.1:0 0.0.0.0:*").is_none());
        assert!(parse_ss_line("LISTEN 0 128").is_none());
        assert!(parse_ss_line("").is_none());
    }

    #[test]
    fn test_out_of_range_local_port_falls_through() {
        // An invalid local port does not stop the column scan
        let record = parse_ss_line("LISTEN 0 128 127.0.0.1:70000 10.0.0.1:8443").unwrap();
        assert_eq!(record.port.get(), 8443);
    }
}
