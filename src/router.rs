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

//! The routing core.
//!
//! [`Router`] owns the forwarding table, the announcement history and the
//! link relations, and dispatches one message at a time. It performs no I/O:
//! [`Router::handle_message`] returns the messages to transmit, each tagged
//! with the link it must leave on. The event loop in the binary feeds frames
//! in and writes the returned messages out.

use crate::history::History;
use crate::msg::{Body, Message, PrefixSpec, RouteAttrs, TableRow};
use crate::policy::{transit_allowed, Relation};
use crate::rib::Rib;
use crate::types::{local_endpoint, Neighbor, RouterError, ASN};
use std::collections::HashMap;
use std::net::Ipv4Addr;

/// A message scheduled for transmission, tagged with the egress link.
pub type Outbound = (Ipv4Addr, Message);

/// The dispatcher: applies announcements, forwards data, answers dumps.
#[derive(Debug, Clone)]
pub struct Router {
    asn: ASN,
    links: HashMap<Ipv4Addr, Relation>,
    rib: Rib,
    history: History,
}

impl Router {
    /// Create a router with its own AS number and one entry per link.
    pub fn new(asn: ASN, neighbors: impl IntoIterator<Item = Neighbor>) -> Self {
        Self {
            asn,
            links: neighbors
                .into_iter()
                .map(|n| (n.endpoint, n.relation))
                .collect(),
            rib: Rib::new(),
            history: History::default(),
        }
    }

    /// Our AS number.
    pub fn asn(&self) -> ASN {
        self.asn
    }

    /// The current forwarding table.
    pub fn rib(&self) -> &Rib {
        &self.rib
    }

    /// The announcement history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Dispatch one message received on the link to `ingress`.
    ///
    /// Returns the messages to send in response. Messages from unknown
    /// links, messages with unusable prefixes, and payload types we never
    /// receive (`table`, `no route`) are dropped without a reply.
    pub fn handle_message(
        &mut self,
        ingress: Ipv4Addr,
        message: Message,
    ) -> Result<Vec<Outbound>, RouterError> {
        let Some(&ingress_rel) = self.links.get(&ingress) else {
            log::warn!("message received on unknown link {ingress}; dropped");
            return Ok(Vec::new());
        };
        log::trace!("link {ingress}: {message:?}");

        let Message { src, dst, body } = message;
        match body {
            Body::Update(attrs) => Ok(self.handle_update(ingress, ingress_rel, attrs)),
            Body::Revoke(prefixes) => Ok(self.handle_revoke(ingress, ingress_rel, prefixes)),
            Body::Data(payload) => self.handle_data(ingress, ingress_rel, src, dst, payload),
            Body::Dump(_) => Ok(self.handle_dump(ingress, src, dst)),
            Body::NoRoute(_) | Body::Table(_) => {
                log::debug!("ignoring unsolicited reply from {ingress}");
                Ok(Vec::new())
            }
        }
    }

    /// Log the update, insert it through the aggregator, and re-advertise a
    /// copy (with our ASN appended to the path, at most once) to every other
    /// link the policy permits.
    fn handle_update(
        &mut self,
        ingress: Ipv4Addr,
        ingress_rel: Relation,
        attrs: RouteAttrs,
    ) -> Vec<Outbound> {
        let route = match attrs.to_route(ingress) {
            Ok(route) => route,
            Err(e) => {
                log::debug!("skipping update from {ingress}: {e}");
                return Vec::new();
            }
        };
        self.history.record_update(ingress, attrs.clone());
        self.rib.insert(route);
        log::debug!("table after update from {ingress}:\n{}", self.rib);

        // The propagated payload is a copy; amending the path in place would
        // corrupt the logged original.
        let mut forwarded = attrs;
        if !forwarded.as_path.contains(&self.asn) {
            forwarded.as_path.push(self.asn);
        }
        self.propagate(ingress, ingress_rel, |src, dst| Message {
            src,
            dst,
            body: Body::Update(forwarded.clone()),
        })
    }

    /// Log the revoke, rebuild the table from the surviving history, and
    /// propagate the unchanged prefix list to every permitted link.
    fn handle_revoke(
        &mut self,
        ingress: Ipv4Addr,
        ingress_rel: Relation,
        prefixes: Vec<PrefixSpec>,
    ) -> Vec<Outbound> {
        let mut nets = Vec::with_capacity(prefixes.len());
        for spec in &prefixes {
            match spec.to_net() {
                Ok(net) => nets.push(net),
                Err(e) => {
                    log::debug!("skipping revoke from {ingress}: {e}");
                    return Vec::new();
                }
            }
        }
        self.history.record_revoke(ingress, nets);
        self.rib.rebuild(self.history.live_routes());
        log::debug!("table after revoke from {ingress}:\n{}", self.rib);

        self.propagate(ingress, ingress_rel, |src, dst| Message {
            src,
            dst,
            body: Body::Revoke(prefixes.clone()),
        })
    }

    /// Forward a data packet along the best permissible route, or answer
    /// with `no route` on the ingress link.
    fn handle_data(
        &mut self,
        ingress: Ipv4Addr,
        ingress_rel: Relation,
        src: Ipv4Addr,
        dst: Ipv4Addr,
        payload: serde_json::Value,
    ) -> Result<Vec<Outbound>, RouterError> {
        let no_route = |reason: &str| {
            log::debug!("no route for {src} -> {dst}: {reason}");
            vec![(ingress, Message::no_route(local_endpoint(ingress), src))]
        };

        let Some(route) = self.rib.best_route(dst) else {
            return Ok(no_route("no covering prefix"));
        };
        let egress = route.peer;
        let egress_rel = *self
            .links
            .get(&egress)
            .ok_or(RouterError::UnknownPeer(egress))?;
        if !transit_allowed(ingress_rel, egress_rel) {
            return Ok(no_route("transit denied"));
        }

        Ok(vec![(
            egress,
            Message {
                src,
                dst,
                body: Body::Data(payload),
            },
        )])
    }

    /// Answer a `dump` with the current table, envelope addresses swapped.
    fn handle_dump(&self, ingress: Ipv4Addr, src: Ipv4Addr, dst: Ipv4Addr) -> Vec<Outbound> {
        let rows: Vec<TableRow> = self.rib.iter().map(TableRow::from).collect();
        vec![(
            ingress,
            Message {
                src: dst,
                dst: src,
                body: Body::Table(rows),
            },
        )]
    }

    /// One copy of a control message for every other link the policy allows,
    /// addressed from our local endpoint on that link.
    fn propagate(
        &self,
        ingress: Ipv4Addr,
        ingress_rel: Relation,
        mut make: impl FnMut(Ipv4Addr, Ipv4Addr) -> Message,
    ) -> Vec<Outbound> {
        self.links
            .iter()
            .filter(|&(&neighbor, &relation)| {
                neighbor != ingress && transit_allowed(ingress_rel, relation)
            })
            .map(|(&neighbor, _)| (neighbor, make(local_endpoint(neighbor), neighbor)))
            .collect()
    }
}
