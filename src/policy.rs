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

//! Business-relationship policy.
//!
//! Each link is classified as customer, peer, or provider. Traffic and
//! route announcements cross the router only when at least one of the two
//! links involved is a customer link; peer-to-peer, peer-to-provider, and
//! provider-to-provider transit is refused. The same predicate governs the
//! data plane and the control plane.

use std::str::FromStr;
use thiserror::Error;

/// Business relationship of a neighbor. Relations never travel over the
/// wire; they enter through the command line (`FromStr`) only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// The neighbor is our customer.
    Cust,
    /// The neighbor is a settlement-free peer.
    Peer,
    /// The neighbor is our provider.
    Prov,
}

impl Relation {
    /// returns true if the neighbor is a customer
    pub fn is_customer(&self) -> bool {
        matches!(self, Self::Cust)
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Relation::Cust => write!(f, "cust"),
            Relation::Peer => write!(f, "peer"),
            Relation::Prov => write!(f, "prov"),
        }
    }
}

impl FromStr for Relation {
    type Err = ParseRelationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cust" => Ok(Relation::Cust),
            "peer" => Ok(Relation::Peer),
            "prov" => Ok(Relation::Prov),
            _ => Err(ParseRelationError(s.to_string())),
        }
    }
}

/// Error returned when parsing a relation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{0}` is not a relation (expected `cust`, `peer`, or `prov`)")]
pub struct ParseRelationError(pub String);

/// returns a bool which tells whether traffic (or an announcement) entering
/// on a link with relation `ingress` may leave on a link with relation
/// `egress`. The same rule governs the data plane and re-advertisement.
#[inline(always)]
pub fn transit_allowed(ingress: Relation, egress: Relation) -> bool {
    ingress.is_customer() || egress.is_customer()
}
