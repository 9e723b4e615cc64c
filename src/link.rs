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

//! Point-to-point links to the neighboring routers.
//!
//! Each link is a `SOCK_SEQPACKET` Unix-domain socket whose filesystem name
//! is the neighbor's endpoint address. One `recv` yields exactly one framed
//! message; messages never span frames.

use crate::msg::{Message, MessageError};
use crate::policy::Relation;
use crate::types::Neighbor;
use nix::sys::socket::{
    connect, recv, send, socket, AddressFamily, MsgFlags, SockFlag, SockType, UnixAddr,
};
use std::net::Ipv4Addr;
use std::os::fd::{AsFd, AsRawFd, BorrowedFd, OwnedFd};
use thiserror::Error;

/// Largest frame accepted from a link.
pub const MAX_FRAME: usize = 65535;

/// Transport failure on a link.
#[derive(Debug, Error)]
pub enum LinkError {
    /// A socket operation failed.
    #[error("socket error on link {link}: {source}")]
    Io {
        /// The link's neighbor endpoint.
        link: Ipv4Addr,
        /// The underlying errno.
        #[source]
        source: nix::Error,
    },
    /// The neighbor closed the channel (zero-byte read).
    #[error("link {0} hung up")]
    HangUp(Ipv4Addr),
    /// A message could not be serialized for transmission.
    #[error(transparent)]
    Message(#[from] MessageError),
}

/// One bidirectional channel to a neighbor.
#[derive(Debug)]
pub struct Link {
    /// The neighbor's endpoint address.
    pub neighbor: Ipv4Addr,
    /// Business relationship on this link.
    pub relation: Relation,
    sock: OwnedFd,
}

impl Link {
    /// Connect to the neighbor's sequenced-packet socket.
    pub fn connect(spec: &Neighbor) -> Result<Self, LinkError> {
        let io = |source| LinkError::Io {
            link: spec.endpoint,
            source,
        };
        let sock = socket(
            AddressFamily::Unix,
            SockType::SeqPacket,
            SockFlag::empty(),
            None,
        )
        .map_err(io)?;
        let addr = UnixAddr::new(spec.endpoint.to_string().as_str()).map_err(io)?;
        connect(sock.as_raw_fd(), &addr).map_err(io)?;
        Ok(Self {
            neighbor: spec.endpoint,
            relation: spec.relation,
            sock,
        })
    }

    /// Borrow the socket for poll registration.
    pub fn fd(&self) -> BorrowedFd<'_> {
        self.sock.as_fd()
    }

    /// Send one framed message.
    pub fn send(&self, message: &Message) -> Result<(), LinkError> {
        let frame = message.encode()?;
        send(self.sock.as_raw_fd(), &frame, MsgFlags::empty()).map_err(|source| LinkError::Io {
            link: self.neighbor,
            source,
        })?;
        Ok(())
    }

    /// Receive one frame into `buf` and return its length. A zero-byte read
    /// means the neighbor hung up.
    pub fn recv(&self, buf: &mut [u8]) -> Result<usize, LinkError> {
        let n = recv(self.sock.as_raw_fd(), buf, MsgFlags::empty()).map_err(|source| {
            LinkError::Io {
                link: self.neighbor,
                source,
            }
        })?;
        if n == 0 {
            return Err(LinkError::HangUp(self.neighbor));
        }
        Ok(n)
    }
}
