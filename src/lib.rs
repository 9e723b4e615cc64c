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

#![deny(missing_docs, missing_debug_implementations)]

//! # bgpd
//!
//! A simplified BGP-style path-vector router. It maintains a forwarding
//! table from `update`/`revoke` announcements received over point-to-point
//! sequenced-packet links, forwards `data` packets along the best route,
//! honors customer/peer/provider policy, and answers `dump` requests with a
//! table snapshot.
//!
//! The library is the routing core and performs no I/O. All state lives in
//! [`router::Router`]; one call to [`router::Router::handle_message`]
//! consumes one received frame and returns the frames to transmit, each
//! tagged with its egress link. The binary (`src/main.rs`) owns the sockets
//! and the poll loop.
//!
//! Three structural decisions shape the core:
//!
//! - **Eager aggregation** ([`rib`]): adjacent prefixes with identical
//!   attributes merge into their supernet on insertion, cascading upwards.
//! - **History as ground truth** ([`history`]): every announcement is
//!   logged; a `revoke` rebuilds the table by replaying the surviving
//!   updates, which disaggregates exactly as far as still valid.
//! - **One policy predicate** ([`policy`]): data forwarding and
//!   re-advertisement are both allowed iff at least one side of the transit
//!   is a customer link.
//!
//! ## Example
//!
//! ```
//! use bgpd::msg::{Body, Message, RouteAttrs};
//! use bgpd::policy::Relation;
//! use bgpd::route::Origin;
//! use bgpd::router::Router;
//! use bgpd::types::{Neighbor, ASN};
//! use std::net::Ipv4Addr;
//!
//! let customer: Ipv4Addr = "10.0.1.2".parse().unwrap();
//! let peer: Ipv4Addr = "10.0.2.2".parse().unwrap();
//! let mut router = Router::new(
//!     ASN(3),
//!     vec![
//!         Neighbor { endpoint: customer, relation: Relation::Cust },
//!         Neighbor { endpoint: peer, relation: Relation::Peer },
//!     ],
//! );
//!
//! // An update from the customer is re-advertised to the peer, with our
//! // ASN appended to the path.
//! let update = Message {
//!     src: customer,
//!     dst: "10.0.1.1".parse().unwrap(),
//!     body: Body::Update(RouteAttrs {
//!         network: "192.168.0.0".parse().unwrap(),
//!         netmask: "255.255.0.0".parse().unwrap(),
//!         localpref: 100,
//!         self_origin: false,
//!         as_path: vec![ASN(7)],
//!         origin: Origin::Igp,
//!     }),
//! };
//! let out = router.handle_message(customer, update).unwrap();
//! assert_eq!(out.len(), 1);
//! let (egress, message) = &out[0];
//! assert_eq!(*egress, peer);
//! match &message.body {
//!     Body::Update(attrs) => assert_eq!(attrs.as_path, vec![ASN(7), ASN(3)]),
//!     _ => unreachable!(),
//! }
//! ```

pub mod history;
pub mod link;
pub mod msg;
pub mod policy;
pub mod prelude;
pub mod rib;
pub mod route;
pub mod router;
pub mod types;

#[cfg(test)]
mod test;
