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

//! Route entries and best-route selection.

use crate::types::ASN;
use ipnet::Ipv4Net;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::net::Ipv4Addr;

/// Origin class of a route.
///
/// Only the relative ranking matters for selection: `IGP ≻ EGP ≻ UNK`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Origin {
    /// Learned from an interior gateway protocol.
    Igp,
    /// Learned from an exterior gateway protocol.
    Egp,
    /// Unknown provenance.
    Unk,
}

impl Origin {
    fn rank(&self) -> u8 {
        match self {
            Origin::Igp => 2,
            Origin::Egp => 1,
            Origin::Unk => 0,
        }
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Origin::Igp => write!(f, "IGP"),
            Origin::Egp => write!(f, "EGP"),
            Origin::Unk => write!(f, "UNK"),
        }
    }
}

/// A route announced by a neighbor and currently believed valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// The announced prefix (host bits truncated).
    pub net: Ipv4Net,
    /// Endpoint of the neighbor that announced the route.
    pub peer: Ipv4Addr,
    /// LOCAL-PREF; higher is preferred.
    pub local_pref: u32,
    /// Whether the route originated at the announcing router.
    pub self_origin: bool,
    /// AS-PATH traversed by the announcement; our ASN is appended on
    /// re-advertisement.
    pub as_path: Vec<ASN>,
    /// Origin class.
    pub origin: Origin,
}

impl Route {
    /// True iff both entries carry identical attributes (everything except
    /// the prefix itself). Two adjacent entries with identical attributes
    /// are merge candidates for the aggregator.
    pub fn same_attributes(&self, other: &Self) -> bool {
        self.peer == other.peer
            && self.local_pref == other.local_pref
            && self.self_origin == other.self_origin
            && self.origin == other.origin
            && self.as_path == other.as_path
    }

    /// Compare two candidate routes for the same destination. The five
    /// tie-break rules form one total preference order:
    ///
    /// 1. highest `local_pref`,
    /// 2. self-originated wins,
    /// 3. shortest AS path,
    /// 4. best origin class (`IGP ≻ EGP ≻ UNK`),
    /// 5. lowest peer address.
    ///
    /// Rule 5 makes the order total over entries from distinct peers, so a
    /// maximum is unique.
    pub fn cmp_preference(&self, other: &Self) -> Ordering {
        match self.local_pref.cmp(&other.local_pref) {
            Ordering::Equal => {}
            o => return o,
        }

        match self.self_origin.cmp(&other.self_origin) {
            Ordering::Equal => {}
            o => return o,
        }

        match self.as_path.len().cmp(&other.as_path.len()) {
            Ordering::Equal => {}
            Ordering::Greater => return Ordering::Less,
            Ordering::Less => return Ordering::Greater,
        }

        match self.origin.rank().cmp(&other.origin.rank()) {
            Ordering::Equal => {}
            o => return o,
        }

        match self.peer.cmp(&other.peer) {
            Ordering::Equal => Ordering::Equal,
            Ordering::Greater => Ordering::Less,
            Ordering::Less => Ordering::Greater,
        }
    }

    /// Pick the most preferred route among candidates.
    pub fn best<'a, I>(candidates: I) -> Option<&'a Route>
    where
        I: IntoIterator<Item = &'a Route>,
    {
        candidates
            .into_iter()
            .max_by(|a, b| a.cmp_preference(b))
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} via {} (lp {}, path {:?}, {})",
            self.net,
            self.peer,
            self.local_pref,
            self.as_path.iter().map(|a| a.0).collect::<Vec<_>>(),
            self.origin,
        )
    }
}
