// bgpd: a simplified BGP-style path-vector router
// Copyright 2025-2026 the bgpd developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! CIDR prefix arithmetic.
//!
//! Announcements carry a prefix as two dotted-quad fields (`network`,
//! `netmask`); internally a prefix is a single [`Ipv4Net`]. The helpers here
//! cover what the wire representation needs on top of [`ipnet`]: mask
//! validation, the pair-of-adjacent-prefixes test used by the aggregator, and
//! moving a mask boundary by one bit.

use ipnet::Ipv4Net;
use std::net::Ipv4Addr;
use thiserror::Error;

/// Error returned when a `(network, netmask)` pair cannot form a prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParsePrefixError {
    /// The netmask has a zero bit above a one bit.
    #[error("netmask {0} is not a contiguous-ones mask")]
    NonContiguousMask(Ipv4Addr),
}

/// Number of leading one bits in a mask. Only meaningful for contiguous
/// masks; validate with [`is_contiguous`] first.
pub fn mask_len(mask: Ipv4Addr) -> u8 {
    u32::from(mask).leading_ones() as u8
}

/// Check that all one bits of the mask are high-order.
pub fn is_contiguous(mask: Ipv4Addr) -> bool {
    let m = u32::from(mask);
    m.count_ones() == m.leading_ones()
}

/// The contiguous mask with the given number of leading ones.
pub fn mask_from_len(len: u8) -> Ipv4Addr {
    if len == 0 {
        Ipv4Addr::UNSPECIFIED
    } else {
        let len = len.min(32);
        Ipv4Addr::from(u32::MAX << (32 - len))
    }
}

/// The mask one bit shorter (the lowest one bit cleared). This is the mask
/// of the prefix two merged siblings collapse into.
pub fn widen(mask: Ipv4Addr) -> Ipv4Addr {
    match mask_len(mask) {
        0 => mask,
        len => mask_from_len(len - 1),
    }
}

/// Build a prefix from the wire fields. The mask must be contiguous; host
/// bits of the network address are truncated away.
pub fn from_parts(network: Ipv4Addr, netmask: Ipv4Addr) -> Result<Ipv4Net, ParsePrefixError> {
    if !is_contiguous(netmask) {
        return Err(ParsePrefixError::NonContiguousMask(netmask));
    }
    let net = Ipv4Net::with_netmask(network, netmask)
        .map_err(|_| ParsePrefixError::NonContiguousMask(netmask))?;
    Ok(net.trunc())
}

/// True iff the prefix covers the address.
pub fn covers(net: Ipv4Net, addr: Ipv4Addr) -> bool {
    net.contains(&addr)
}

/// The other half of the prefix's parent: same length, lowest network bit
/// flipped. `None` for the zero-length prefix, which has no sibling.
pub fn sibling(net: Ipv4Net) -> Option<Ipv4Net> {
    let len = net.prefix_len();
    if len == 0 {
        return None;
    }
    let flip = 1u32 << (32 - len);
    let addr = Ipv4Addr::from(u32::from(net.network()) ^ flip);
    Ipv4Net::new(addr, len).ok()
}

/// If `a` and `b` are an adjacent pair (equal length, equal except in the
/// lowest network bit), return the combined prefix under the widened mask.
pub fn merge_adjacent(a: Ipv4Net, b: Ipv4Net) -> Option<Ipv4Net> {
    if a.netmask() != b.netmask() || a.prefix_len() == 0 || a.network() == b.network() {
        return None;
    }
    let wide = widen(a.netmask());
    let wide_a = from_parts(a.network(), wide).ok()?;
    let wide_b = from_parts(b.network(), wide).ok()?;
    (wide_a == wide_b).then_some(wide_a)
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ip(s: &str) -> Ipv4Addr {
        s.parse().unwrap()
    }

    fn net(s: &str) -> Ipv4Net {
        s.parse().unwrap()
    }

    #[test]
    fn test_mask_len() {
        assert_eq!(mask_len(ip("0.0.0.0")), 0);
        assert_eq!(mask_len(ip("255.0.0.0")), 8);
        assert_eq!(mask_len(ip("255.255.254.0")), 23);
        assert_eq!(mask_len(ip("255.255.255.255")), 32);
    }

    #[test]
    fn test_contiguous() {
        assert!(is_contiguous(ip("0.0.0.0")));
        assert!(is_contiguous(ip("255.255.192.0")));
        assert!(!is_contiguous(ip("255.0.255.0")));
        assert!(!is_contiguous(ip("0.255.0.0")));
    }

    #[test]
    fn test_widen() {
        assert_eq!(widen(ip("255.255.255.0")), ip("255.255.254.0"));
        assert_eq!(widen(ip("255.255.255.255")), ip("255.255.255.254"));
        assert_eq!(widen(ip("128.0.0.0")), ip("0.0.0.0"));
        assert_eq!(widen(ip("0.0.0.0")), ip("0.0.0.0"));
        assert_eq!(mask_from_len(0), ip("0.0.0.0"));
        assert_eq!(mask_from_len(32), ip("255.255.255.255"));
    }

    #[test]
    fn test_from_parts() {
        assert_eq!(
            from_parts(ip("192.168.0.0"), ip("255.255.255.0")),
            Ok(net("192.168.0.0/24"))
        );
        // host bits are truncated away
        assert_eq!(
            from_parts(ip("192.168.0.77"), ip("255.255.255.0")),
            Ok(net("192.168.0.0/24"))
        );
        assert_eq!(
            from_parts(ip("10.0.0.0"), ip("255.0.255.0")),
            Err(ParsePrefixError::NonContiguousMask(ip("255.0.255.0")))
        );
    }

    #[test]
    fn test_covers() {
        assert!(covers(net("192.168.4.0/24"), ip("192.168.4.5")));
        assert!(!covers(net("192.168.4.0/24"), ip("192.168.5.5")));
        assert!(covers(net("0.0.0.0/0"), ip("8.8.8.8")));
    }

    #[test]
    fn test_sibling() {
        assert_eq!(sibling(net("192.168.0.0/24")), Some(net("192.168.1.0/24")));
        assert_eq!(sibling(net("192.168.1.0/24")), Some(net("192.168.0.0/24")));
        assert_eq!(sibling(net("128.0.0.0/1")), Some(net("0.0.0.0/1")));
        assert_eq!(sibling(net("0.0.0.0/0")), None);
    }

    #[test]
    fn test_merge_adjacent() {
        assert_eq!(
            merge_adjacent(net("192.168.0.0/24"), net("192.168.1.0/24")),
            Some(net("192.168.0.0/23"))
        );
        // argument order does not matter
        assert_eq!(
            merge_adjacent(net("192.168.1.0/24"), net("192.168.0.0/24")),
            Some(net("192.168.0.0/23"))
        );
        // equal halves of different parents
        assert_eq!(merge_adjacent(net("192.168.1.0/24"), net("192.168.2.0/24")), None);
        // different lengths never merge
        assert_eq!(merge_adjacent(net("192.168.0.0/24"), net("192.168.1.0/25")), None);
        // a prefix does not merge with itself
        assert_eq!(merge_adjacent(net("192.168.0.0/24"), net("192.168.0.0/24")), None);
    }
}
