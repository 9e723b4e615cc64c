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

//! The JSON message schema exchanged over the links.
//!
//! Every frame is one UTF-8 JSON object `{src, dst, type, msg}`. The wire
//! field names (`localpref`, `selfOrigin`, `ASPath`, the `no route` type
//! tag) are fixed by the protocol; the Rust structs rename them to the usual
//! conventions.

use crate::route::{Origin, Route};
use crate::types::prefix::{self, ParsePrefixError};
use crate::types::ASN;
use ipnet::Ipv4Net;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;
use thiserror::Error;

/// Error produced when a frame cannot be decoded or encoded.
#[derive(Debug, Error)]
pub enum MessageError {
    /// The frame is not a valid message object.
    #[error("malformed message: {0}")]
    Json(#[from] serde_json::Error),
}

/// A framed message: envelope addresses plus a typed payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Sender address. For `data` packets this is the original source, not
    /// necessarily a neighbor endpoint.
    pub src: Ipv4Addr,
    /// Receiver address. For `data` packets this is the final destination.
    pub dst: Ipv4Addr,
    /// The `type`/`msg` pair.
    #[serde(flatten)]
    pub body: Body,
}

impl Message {
    /// Parse one frame.
    pub fn decode(frame: &[u8]) -> Result<Self, MessageError> {
        Ok(serde_json::from_slice(frame)?)
    }

    /// Serialize into one frame.
    pub fn encode(&self) -> Result<Vec<u8>, MessageError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// The reply sent when a `data` packet cannot be forwarded.
    pub fn no_route(src: Ipv4Addr, dst: Ipv4Addr) -> Self {
        Self {
            src,
            dst,
            body: Body::NoRoute(Empty {}),
        }
    }
}

/// Type-dependent message payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "msg", rename_all = "lowercase")]
pub enum Body {
    /// Announce a route.
    Update(RouteAttrs),
    /// Withdraw previously announced prefixes.
    Revoke(Vec<PrefixSpec>),
    /// User traffic; the payload is opaque and forwarded verbatim.
    Data(serde_json::Value),
    /// Reply to an unforwardable `data` packet.
    #[serde(rename = "no route")]
    NoRoute(Empty),
    /// Request a forwarding-table dump.
    Dump(Empty),
    /// Forwarding-table dump reply.
    Table(Vec<TableRow>),
}

/// An empty `msg` payload (`{}`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Empty {}

/// Attribute block of an `update` message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteAttrs {
    /// Network address of the announced prefix.
    pub network: Ipv4Addr,
    /// Netmask of the announced prefix (contiguous ones).
    pub netmask: Ipv4Addr,
    /// LOCAL-PREF; higher is preferred.
    pub localpref: u32,
    /// Whether the route originated at the announcing router.
    #[serde(rename = "selfOrigin")]
    pub self_origin: bool,
    /// ASNs the announcement traversed.
    #[serde(rename = "ASPath")]
    pub as_path: Vec<ASN>,
    /// Origin class.
    pub origin: Origin,
}

impl RouteAttrs {
    /// Build the table entry for this announcement as received from `peer`.
    /// Fails on a non-contiguous netmask.
    pub fn to_route(&self, peer: Ipv4Addr) -> Result<Route, ParsePrefixError> {
        Ok(Route {
            net: prefix::from_parts(self.network, self.netmask)?,
            peer,
            local_pref: self.localpref,
            self_origin: self.self_origin,
            as_path: self.as_path.clone(),
            origin: self.origin,
        })
    }
}

/// One `{network, netmask}` pair in a `revoke` payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixSpec {
    /// Network address of the revoked prefix.
    pub network: Ipv4Addr,
    /// Netmask of the revoked prefix.
    pub netmask: Ipv4Addr,
}

impl PrefixSpec {
    /// The revoked prefix. Fails on a non-contiguous netmask.
    pub fn to_net(&self) -> Result<Ipv4Net, ParsePrefixError> {
        prefix::from_parts(self.network, self.netmask)
    }
}

/// One row of a `table` reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Network address of the entry.
    pub network: Ipv4Addr,
    /// Netmask of the entry.
    pub netmask: Ipv4Addr,
    /// Neighbor the entry was learned from.
    pub peer: Ipv4Addr,
}

impl From<&Route> for TableRow {
    fn from(route: &Route) -> Self {
        Self {
            network: route.net.network(),
            netmask: route.net.netmask(),
            peer: route.peer,
        }
    }
}
