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

//! The announcement history.
//!
//! Aggregation is lossy, so a revoked prefix cannot be carved back out of an
//! aggregate. The history is the ground truth instead: every `update` and
//! `revoke` is logged in arrival order, revoked `(peer, prefix)` tuples are
//! collected in a side set, and the forwarding table can be rebuilt at any
//! time by replaying the surviving updates. The log is never pruned.

use crate::msg::RouteAttrs;
use crate::route::Route;
use ipnet::Ipv4Net;
use std::collections::HashSet;
use std::net::Ipv4Addr;

/// One received announcement, retained in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Announcement {
    /// An `update` message.
    Update {
        /// The link the update arrived on.
        src: Ipv4Addr,
        /// The payload as received.
        attrs: RouteAttrs,
    },
    /// A `revoke` message.
    Revoke {
        /// The link the revoke arrived on.
        src: Ipv4Addr,
        /// The revoked prefixes.
        prefixes: Vec<Ipv4Net>,
    },
}

/// Append-only log of announcements plus the derived revocation set.
#[derive(Debug, Clone, Default)]
pub struct History {
    log: Vec<Announcement>,
    revoked: HashSet<(Ipv4Addr, Ipv4Net)>,
}

impl History {
    /// Append an `update` to the log.
    pub fn record_update(&mut self, src: Ipv4Addr, attrs: RouteAttrs) {
        self.log.push(Announcement::Update { src, attrs });
    }

    /// Append a `revoke` to the log and mark its `(peer, prefix)` tuples as
    /// nullified. The tuples stay in force for all later rebuilds.
    pub fn record_revoke(&mut self, src: Ipv4Addr, prefixes: Vec<Ipv4Net>) {
        for net in &prefixes {
            self.revoked.insert((src, *net));
        }
        self.log.push(Announcement::Revoke { src, prefixes });
    }

    /// Replay the updates that are not nullified, in arrival order. This is
    /// the input to a table rebuild.
    pub fn live_routes(&self) -> impl Iterator<Item = Route> + '_ {
        self.log.iter().filter_map(move |announcement| match announcement {
            Announcement::Update { src, attrs } => {
                let route = attrs.to_route(*src).ok()?;
                (!self.revoked.contains(&(*src, route.net))).then_some(route)
            }
            Announcement::Revoke { .. } => None,
        })
    }

    /// All logged announcements, oldest first.
    pub fn log(&self) -> &[Announcement] {
        &self.log
    }

    /// Number of logged announcements.
    pub fn len(&self) -> usize {
        self.log.len()
    }

    /// True before the first announcement arrives.
    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }
}
