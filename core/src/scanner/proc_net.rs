//! Line parser for `/proc/net/tcp` and `/proc/net/tcp6`.
//!
//! Used when neither `ss` nor `netstat` is installed. The kernel table has
//! no process names, so records from here never carry one.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::domain::{Port, PortRecord};

use super::utils::WILDCARD_ADDRESS;

/// Kernel socket state code for LISTEN.
const TCP_LISTEN: &str = "0A";

/// Parse one `/proc/net/tcp{,6}` row.
///
/// Format of /proc/net/tcp:
/// ```text
///   sl  local_address rem_address   st tx_queue rx_queue ...
///    0: 0100007F:0BB8 00000000:0000 0A 00000000:00000000 ...
/// ```
/// The address is hex in host byte order (little-endian 32-bit words).
pub fn parse_proc_net_line(line: &str) -> Option<PortRecord> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 4 || !fields[0].ends_with(':') || fields[3] != TCP_LISTEN {
        return None;
    }

    let (address, port) = fields[1].split_once(':')?;
    let port = u16::from_str_radix(port, 16).ok().and_then(Port::new)?;
    let address = decode_address(address)?;

    let address = if address.is_unspecified() {
        WILDCARD_ADDRESS.to_string()
    } else {
        address.to_string()
    };

    Some(PortRecord::new(port, None, address))
}

fn decode_address(hex: &str) -> Option<IpAddr> {
    match hex.len() {
        8 => {
            let word = u32::from_str_radix(hex, 16).ok()?;
            Some(IpAddr::V4(Ipv4Addr::from(word.to_le_bytes())))
        }
        32 => {
            let mut octets = [0u8; 16];
            for (i, chunk) in octets.chunks_exact_mut(4).enumerate() {
                let word = u32::from_str_radix(hex.get(i * 8..i * 8 + 8)?, 16).ok()?;
                chunk.copy_from_slice(&word.to_le_bytes());
            }
            Some(IpAddr::V6(Ipv6Addr::from(octets)))
        }
        _ => None,
    }
}
