//! Hostname resolution helper.
//!
//! A small network utility that ships with the library but is independent
//! of the configuration tree; nothing else here performs network I/O.

use std::io;
use std::net::{IpAddr, ToSocketAddrs};

use crate::Error;

/// Resolves `host` through the system resolver and returns its addresses,
/// deduplicated in resolver order.
pub fn resolve_domain_name(host: &str) -> Result<Vec<IpAddr>, Error> {
    let addrs = (host, 0u16).to_socket_addrs().map_err(|source| Error::Resolve {
        host: host.to_string(),
        source,
    })?;

    let mut ips: Vec<IpAddr> = Vec::new();
    for addr in addrs {
        if !ips.contains(&addr.ip()) {
            ips.push(addr.ip());
        }
    }

    if ips.is_empty() {
        return Err(Error::Resolve {
            host: host.to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "no addresses found"),
        });
    }
    Ok(ips)
}
