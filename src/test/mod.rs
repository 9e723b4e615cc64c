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

use crate::msg::{Body, Empty, Message, PrefixSpec, RouteAttrs};
use crate::policy::Relation;
use crate::route::{Origin, Route};
use crate::router::{Outbound, Router};
use crate::types::{local_endpoint, Neighbor, ASN};
use std::net::Ipv4Addr;

fn ip(s: &str) -> Ipv4Addr {
    s.parse().unwrap()
}

fn router(asn: u32, neighbors: &[(&str, Relation)]) -> Router {
    Router::new(
        ASN(asn),
        neighbors.iter().map(|&(endpoint, relation)| Neighbor {
            endpoint: ip(endpoint),
            relation,
        }),
    )
}

fn attrs(network: &str, netmask: &str) -> RouteAttrs {
    RouteAttrs {
        network: ip(network),
        netmask: ip(netmask),
        localpref: 100,
        self_origin: false,
        as_path: vec![ASN(1)],
        origin: Origin::Igp,
    }
}

fn route(net: &str, peer: &str) -> Route {
    Route {
        net: net.parse().unwrap(),
        peer: ip(peer),
        local_pref: 100,
        self_origin: false,
        as_path: vec![ASN(1)],
        origin: Origin::Igp,
    }
}

fn update(from: &str, attrs: RouteAttrs) -> Message {
    Message {
        src: ip(from),
        dst: local_endpoint(ip(from)),
        body: Body::Update(attrs),
    }
}

fn revoke(from: &str, prefixes: &[(&str, &str)]) -> Message {
    Message {
        src: ip(from),
        dst: local_endpoint(ip(from)),
        body: Body::Revoke(
            prefixes
                .iter()
                .map(|&(network, netmask)| PrefixSpec {
                    network: ip(network),
                    netmask: ip(netmask),
                })
                .collect(),
        ),
    }
}

fn data(src: &str, dst: &str) -> Message {
    Message {
        src: ip(src),
        dst: ip(dst),
        body: Body::Data(serde_json::json!({"payload": [1, 2, 3]})),
    }
}

fn dump(from: &str) -> Message {
    Message {
        src: ip(from),
        dst: local_endpoint(ip(from)),
        body: Body::Dump(Empty {}),
    }
}

/// The set of links a batch of outbound messages leaves on.
fn egresses(outbound: &[Outbound]) -> std::collections::HashSet<Ipv4Addr> {
    outbound.iter().map(|(egress, _)| *egress).collect()
}

/// All table entries, sorted for comparison.
fn table(router: &Router) -> Vec<Route> {
    let mut entries: Vec<Route> = router.rib().iter().cloned().collect();
    entries.sort_by(|a, b| (a.net, a.peer).cmp(&(b.net, b.peer)));
    entries
}

mod test_rib;
