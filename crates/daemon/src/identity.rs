// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Caller identity from connection addresses.
//!
//! Workers are identified by their IPv4 address. IPv4-mapped IPv6
//! addresses (the usual form on a dual-stack listener) are unwrapped
//! to their IPv4 text; any other IPv6 form is rejected before it can
//! reach the coordinator.

use std::net::{IpAddr, Ipv6Addr};

use thiserror::Error;

/// Identity errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("cannot handle IPv6 address {0}")]
    UnsupportedIpv6(Ipv6Addr),
}

/// Normalize a connection's source address to the registry identity.
pub fn normalize(addr: IpAddr) -> Result<String, IdentityError> {
    match addr {
        IpAddr::V4(v4) => Ok(v4.to_string()),
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => Ok(v4.to_string()),
            None => Err(IdentityError::UnsupportedIpv6(v6)),
        },
    }
}

#[cfg(test)]
#[path = "identity_tests.rs"]
mod tests;
