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

//! The forwarding table.
//!
//! Entries live in a prefix trie keyed by their CIDR prefix; all entries for
//! the same prefix (at most one per announcing peer) share a trie node.
//! Lookup is longest-prefix match over the trie followed
//! by the five-step selection in [`Route::cmp_preference`].
//!
//! Insertion aggregates eagerly: whenever the sibling prefix holds an entry
//! with identical attributes, the two merge into their common supernet, and
//! the merge cascades as long as the next sibling matches. Aggregates are
//! never split in place; revocation rebuilds the whole table from the
//! announcement history.

use crate::route::Route;
use crate::types::prefix;
use ipnet::Ipv4Net;
use itertools::Itertools;
use prefix_trie::PrefixMap;
use std::fmt;
use std::net::Ipv4Addr;

/// The forwarding table: active routes under eager aggregation.
#[derive(Clone)]
pub struct Rib {
    routes: PrefixMap<Ipv4Net, Vec<Route>>,
}

impl Default for Rib {
    fn default() -> Self {
        Self::new()
    }
}

impl Rib {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            routes: PrefixMap::new(),
        }
    }

    /// Insert a route.
    ///
    /// Any existing entry with the same `(prefix, peer)` is replaced first
    /// (a re-announcement supersedes the old attributes). Afterwards the
    /// entry is merged with its sibling prefix as long as an equivalent
    /// entry exists there; each merge shortens the mask by one bit, so the
    /// cascade terminates.
    pub fn insert(&mut self, route: Route) {
        let mut route = route;
        self.remove_entry(route.net, route.peer);
        while let Some(wider) = self.merge_sibling(&route) {
            log::debug!("aggregating {} and its sibling into {}", route.net, wider.net);
            route = wider;
        }
        match self.routes.get_mut(&route.net) {
            Some(entries) => entries.push(route),
            None => {
                self.routes.insert(route.net, vec![route]);
            }
        }
    }

    /// Try to merge `route` with an equivalent entry at its sibling prefix.
    /// On success the sibling entry is removed and the combined entry is
    /// returned; the supernet position is cleared of any same-peer entry so
    /// the combined entry replaces it like any re-announcement.
    fn merge_sibling(&mut self, route: &Route) -> Option<Route> {
        let sibling = prefix::sibling(route.net)?;
        let wider = prefix::merge_adjacent(route.net, sibling)?;
        let entries = self.routes.get_mut(&sibling)?;
        let pos = entries.iter().position(|e| e.same_attributes(route))?;
        entries.remove(pos);
        if entries.is_empty() {
            self.routes.remove(&sibling);
        }
        let mut merged = route.clone();
        merged.net = wider;
        self.remove_entry(merged.net, merged.peer);
        Some(merged)
    }

    /// Remove the entry announced by `peer` for exactly `net`, if any.
    fn remove_entry(&mut self, net: Ipv4Net, peer: Ipv4Addr) {
        if let Some(entries) = self.routes.get_mut(&net) {
            entries.retain(|e| e.peer != peer);
            if entries.is_empty() {
                self.routes.remove(&net);
            }
        }
    }

    /// Longest-prefix match for `dst`, then the five-step selection among
    /// the entries at that prefix. Policy is the caller's concern.
    pub fn best_route(&self, dst: Ipv4Addr) -> Option<&Route> {
        let (_, entries) = self.routes.get_lpm(&Ipv4Net::from(dst))?;
        Route::best(entries)
    }

    /// Drop all entries and replay `live` through the normal insertion
    /// protocol, so aggregation reforms where it is still valid.
    pub fn rebuild(&mut self, live: impl IntoIterator<Item = Route>) {
        self.routes = PrefixMap::new();
        for route in live {
            self.insert(route);
        }
    }

    /// Iterate over all entries in prefix order.
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter().flat_map(|(_, entries)| entries.iter())
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// True iff the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl fmt::Debug for Rib {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl fmt::Display for Rib {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "(empty)");
        }
        write!(f, "{}", self.iter().map(Route::to_string).join("\n"))
    }
}
