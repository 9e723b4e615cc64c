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

//! The `bgpd` binary: argument parsing, link setup, and the event loop.
//!
//! The loop is single-threaded and cooperative: `poll(2)` over all link
//! sockets with a short timeout (so a signal is noticed promptly), then each
//! readable link is drained of exactly one frame and the dispatcher's
//! replies are sent before the next frame is read.

use bgpd::link::{Link, LinkError, MAX_FRAME};
use bgpd::msg::Message;
use bgpd::router::Router;
use bgpd::types::{Neighbor, ASN};
use clap::Parser;
use log::{debug, error, info};
use nix::errno::Errno;
use nix::poll::{poll, PollFd, PollFlags};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Poll timeout; bounds how long a pending shutdown signal can go unnoticed.
const POLL_TIMEOUT_MS: u8 = 100;

/// A simplified BGP-style path-vector router.
#[derive(Debug, Parser)]
#[command(name = "bgpd")]
struct Args {
    /// Our autonomous-system number.
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    asn: u32,
    /// Neighbor links, each as `<endpoint>-<cust|peer|prov>`.
    #[arg(required = true)]
    neighbors: Vec<Neighbor>,
}

fn main() {
    pretty_env_logger::init();
    let args = Args::parse();

    let term = Arc::new(AtomicBool::new(false));
    for sig in [signal_hook::consts::SIGINT, signal_hook::consts::SIGTERM] {
        if let Err(e) = signal_hook::flag::register(sig, Arc::clone(&term)) {
            error!("cannot register signal handler: {e}");
        }
    }

    let mut links = Vec::with_capacity(args.neighbors.len());
    for spec in &args.neighbors {
        match Link::connect(spec) {
            Ok(link) => {
                info!("connected to {} ({})", link.neighbor, link.relation);
                links.push(link);
            }
            Err(e) => {
                error!("cannot bring up link {spec}: {e}");
                std::process::exit(1);
            }
        }
    }

    let mut router = Router::new(ASN(args.asn), args.neighbors.iter().copied());
    info!("{} up with {} links", router.asn(), links.len());

    run(&mut router, &links, &term);
    info!("terminating");
}

/// The event loop. Returns on signal, peer hangup, or transport failure.
fn run(router: &mut Router, links: &[Link], term: &AtomicBool) {
    let mut buf = vec![0u8; MAX_FRAME];

    while !term.load(Ordering::Relaxed) {
        let raw_fds: Vec<_> = links.iter().map(|link| link.fd()).collect();
        let mut fds: Vec<PollFd> = raw_fds
            .iter()
            .map(|fd| PollFd::new(fd, PollFlags::POLLIN))
            .collect();
        match poll(&mut fds, POLL_TIMEOUT_MS as i32) {
            Ok(0) => continue,
            Ok(_) => {}
            Err(Errno::EINTR) => continue,
            Err(e) => {
                error!("poll failed: {e}");
                return;
            }
        }
        let ready: Vec<usize> = fds
            .iter()
            .enumerate()
            .filter(|(_, fd)| {
                fd.revents()
                    .map(|r| r.intersects(PollFlags::POLLIN | PollFlags::POLLHUP | PollFlags::POLLERR))
                    .unwrap_or(false)
            })
            .map(|(i, _)| i)
            .collect();
        drop(fds);

        for i in ready {
            let link = &links[i];
            let n = match link.recv(&mut buf) {
                Ok(n) => n,
                Err(LinkError::HangUp(peer)) => {
                    info!("{peer} hung up; shutting down");
                    return;
                }
                Err(e) => {
                    error!("{e}");
                    return;
                }
            };
            let message = match Message::decode(&buf[..n]) {
                Ok(message) => message,
                Err(e) => {
                    debug!("dropping frame from {}: {e}", link.neighbor);
                    continue;
                }
            };
            let outbound = match router.handle_message(link.neighbor, message) {
                Ok(outbound) => outbound,
                Err(e) => {
                    error!("{e}");
                    return;
                }
            };
            for (egress, reply) in outbound {
                let Some(out) = links.iter().find(|l| l.neighbor == egress) else {
                    error!("no link for egress {egress}");
                    return;
                };
                if let Err(e) = out.send(&reply) {
                    error!("{e}");
                    return;
                }
            }
        }
    }
}
