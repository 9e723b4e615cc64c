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

//! Module containing all type definitions

use crate::policy::{ParseRelationError, Relation};
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;
use std::str::FromStr;
use thiserror::Error;

pub mod prefix;

/// AS Number
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ASN(pub u32);

impl std::fmt::Display for ASN {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AS{}", self.0)
    }
}

impl From<u32> for ASN {
    fn from(x: u32) -> Self {
        Self(x)
    }
}

impl From<usize> for ASN {
    fn from(x: usize) -> Self {
        Self(x as u32)
    }
}

impl From<i32> for ASN {
    fn from(x: i32) -> Self {
        Self(x as u32)
    }
}

/// Derive our own endpoint address on a link from the neighbor's endpoint.
///
/// The test harness names each channel after the neighbor's endpoint, which
/// ends in `.2`; our side of the same link is the address with the final
/// octet replaced by `1`. All messages the router originates (no-route
/// replies, re-advertisements) use this as their source. The convention is
/// confined to this helper so a different link-addressing scheme only has to
/// change one place.
pub fn local_endpoint(neighbor: Ipv4Addr) -> Ipv4Addr {
    let [a, b, c, _] = neighbor.octets();
    Ipv4Addr::new(a, b, c, 1)
}

/// One neighbor link as given on the command line: `<endpoint>-<relation>`,
/// e.g. `10.0.0.2-cust`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    /// The neighbor's endpoint address (also the channel name).
    pub endpoint: Ipv4Addr,
    /// Business relationship on this link.
    pub relation: Relation,
}

impl FromStr for Neighbor {
    type Err = ParseNeighborError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (endpoint, relation) = s
            .rsplit_once('-')
            .ok_or_else(|| ParseNeighborError::MissingRelation(s.to_string()))?;
        Ok(Self {
            endpoint: endpoint.parse()?,
            relation: relation.parse()?,
        })
    }
}

impl std::fmt::Display for Neighbor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.endpoint, self.relation)
    }
}

/// Error returned when parsing a neighbor specification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseNeighborError {
    /// The token has no `-<relation>` suffix.
    #[error("`{0}` is missing the `-<relation>` suffix")]
    MissingRelation(String),
    /// The endpoint is not a dotted-quad address.
    #[error("invalid endpoint address: {0}")]
    Endpoint(#[from] std::net::AddrParseError),
    /// The relation is not one of `cust`, `peer`, `prov`.
    #[error("{0}")]
    Relation(#[from] ParseRelationError),
}

/// Router Errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// A selected route names a peer we have no link to. Routes are only ever
    /// created from link ingresses, so hitting this means the table was
    /// corrupted.
    #[error("route references unknown peer {0}")]
    UnknownPeer(Ipv4Addr),
}
