use crate::domain::Port;

/// Address used for every wildcard form ("*", "[::]", "::", empty).
pub const WILDCARD_ADDRESS: &str = "0.0.0.0";

pub struct Utils;

impl Utils {
    /// Split an `address:port` column at its last colon.
    ///
    /// The port is always the suffix after the final colon, which keeps
    /// bracketed IPv6 forms intact:
    /// - IPv4: "127.0.0.1:3000" or "*:8080"
    /// - IPv6: "\[::1]:3000" or "\[fe80::1]:8080"
    ///
    /// Returns `None` unless the suffix is a valid port.
    pub fn split_address(column: &str) -> Option<(&str, Port)> {
        let (address, port) = column.rsplit_once(':')?;
        Some((address, Port::parse(port)?))
    }

    /// Normalize an lsof/ss address: wildcards become "0.0.0.0",
    /// IPv6 brackets are stripped.
    pub fn normalize_address(address: &str) -> String {
        match address {
            "*" | "[::]" | "" => WILDCARD_ADDRESS.to_string(),
            other => other.replace(['[', ']'], ""),
        }
    }

    /// Normalize a netstat address. netstat never brackets IPv6, so only
    /// the wildcard forms are rewritten.
    pub fn normalize_netstat_address(address: &str) -> String {
        match address {
            "0.0.0.0" | "::" => WILDCARD_ADDRESS.to_string(),
            other => other.to_string(),
        }
    }
}
