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

//! Tests for the forwarding table: longest-prefix match, the five-step
//! selection, and eager aggregation.

use super::*;
use crate::history::History;
use crate::rib::Rib;
use ipnet::Ipv4Net;
use pretty_assertions::assert_eq;

fn net(s: &str) -> Ipv4Net {
    s.parse().unwrap()
}

#[test]
fn test_longest_prefix_match() {
    let mut rib = Rib::new();
    rib.insert(route("192.168.0.0/16", "10.0.0.2"));
    rib.insert(route("192.168.4.0/24", "10.0.1.2"));

    assert_eq!(rib.best_route(ip("192.168.4.5")).unwrap().peer, ip("10.0.1.2"));
    assert_eq!(rib.best_route(ip("192.168.9.9")).unwrap().peer, ip("10.0.0.2"));
    assert_eq!(rib.best_route(ip("10.1.2.3")), None);
}

#[test]
fn test_reannouncement_replaces() {
    let mut rib = Rib::new();
    let mut first = route("172.16.0.0/16", "10.0.0.2");
    first.local_pref = 50;
    rib.insert(first.clone());
    // identical re-announcement leaves the table unchanged
    rib.insert(first.clone());
    assert_eq!(rib.len(), 1);

    // a re-announcement with new attributes supersedes the old entry
    let mut second = first;
    second.local_pref = 200;
    rib.insert(second);
    assert_eq!(rib.len(), 1);
    assert_eq!(rib.best_route(ip("172.16.1.1")).unwrap().local_pref, 200);
}

#[test]
fn test_selection_localpref() {
    let mut rib = Rib::new();
    let mut low = route("172.16.0.0/16", "10.0.1.2");
    low.local_pref = 50;
    rib.insert(low);
    rib.insert(route("172.16.0.0/16", "10.0.0.2"));

    assert_eq!(rib.best_route(ip("172.16.1.1")).unwrap().peer, ip("10.0.0.2"));
}

#[test]
fn test_selection_self_origin() {
    let mut rib = Rib::new();
    rib.insert(route("172.16.0.0/16", "10.0.0.2"));
    let mut own = route("172.16.0.0/16", "10.0.1.2");
    own.self_origin = true;
    rib.insert(own);

    assert_eq!(rib.best_route(ip("172.16.1.1")).unwrap().peer, ip("10.0.1.2"));
}

#[test]
fn test_selection_path_length() {
    let mut rib = Rib::new();
    let mut long = route("172.16.0.0/16", "10.0.0.2");
    long.as_path = vec![ASN(1), ASN(2), ASN(3)];
    rib.insert(long);
    let mut short = route("172.16.0.0/16", "10.0.1.2");
    short.as_path = vec![ASN(4)];
    rib.insert(short);

    assert_eq!(rib.best_route(ip("172.16.1.1")).unwrap().peer, ip("10.0.1.2"));
}

#[test]
fn test_selection_origin_class() {
    let mut rib = Rib::new();
    let mut egp = route("172.16.0.0/16", "10.0.0.2");
    egp.origin = Origin::Egp;
    rib.insert(egp);
    let mut unk = route("172.16.0.0/16", "10.0.1.2");
    unk.origin = Origin::Unk;
    rib.insert(unk);
    let mut igp = route("172.16.0.0/16", "10.0.2.2");
    igp.origin = Origin::Igp;
    rib.insert(igp);

    assert_eq!(rib.best_route(ip("172.16.1.1")).unwrap().peer, ip("10.0.2.2"));
}

#[test]
fn test_selection_lowest_peer() {
    let mut rib = Rib::new();
    rib.insert(route("172.16.0.0/16", "10.0.5.2"));
    rib.insert(route("172.16.0.0/16", "10.0.0.2"));
    rib.insert(route("172.16.0.0/16", "10.0.3.2"));

    assert_eq!(rib.best_route(ip("172.16.1.1")).unwrap().peer, ip("10.0.0.2"));
}

#[test]
fn test_aggregation_pair() {
    let mut rib = Rib::new();
    rib.insert(route("192.168.0.0/24", "10.0.0.2"));
    rib.insert(route("192.168.1.0/24", "10.0.0.2"));

    let entries: Vec<_> = rib.iter().collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].net, net("192.168.0.0/23"));
    // the merged entry still covers both halves
    assert_eq!(rib.best_route(ip("192.168.0.7")).unwrap().peer, ip("10.0.0.2"));
    assert_eq!(rib.best_route(ip("192.168.1.7")).unwrap().peer, ip("10.0.0.2"));
    // and nothing more
    assert_eq!(rib.best_route(ip("192.168.2.7")), None);
}

#[test]
fn test_aggregation_cascade() {
    let mut rib = Rib::new();
    for prefix in [
        "192.168.0.0/24",
        "192.168.1.0/24",
        "192.168.2.0/24",
        "192.168.3.0/24",
    ] {
        rib.insert(route(prefix, "10.0.0.2"));
    }

    let entries: Vec<_> = rib.iter().collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].net, net("192.168.0.0/22"));
}

#[test]
fn test_no_aggregation_across_peers() {
    let mut rib = Rib::new();
    rib.insert(route("192.168.0.0/24", "10.0.0.2"));
    rib.insert(route("192.168.1.0/24", "10.0.1.2"));
    assert_eq!(rib.len(), 2);
}

#[test]
fn test_no_aggregation_on_attribute_mismatch() {
    let mut rib = Rib::new();
    rib.insert(route("192.168.0.0/24", "10.0.0.2"));
    let mut other = route("192.168.1.0/24", "10.0.0.2");
    other.local_pref = 150;
    rib.insert(other);
    assert_eq!(rib.len(), 2);

    // non-adjacent equal halves of different parents never merge
    let mut rib = Rib::new();
    rib.insert(route("192.168.1.0/24", "10.0.0.2"));
    rib.insert(route("192.168.2.0/24", "10.0.0.2"));
    assert_eq!(rib.len(), 2);
}

#[test]
fn test_merge_replaces_existing_aggregate() {
    let mut rib = Rib::new();
    let mut old = route("192.168.0.0/23", "10.0.0.2");
    old.local_pref = 50;
    rib.insert(old);

    let mut half = route("192.168.0.0/24", "10.0.0.2");
    half.local_pref = 200;
    rib.insert(half.clone());
    let mut other = route("192.168.1.0/24", "10.0.0.2");
    other.local_pref = 200;
    rib.insert(other);

    // the freshly merged /23 supersedes the stale one from the same peer
    let entries: Vec<_> = rib.iter().collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].net, net("192.168.0.0/23"));
    assert_eq!(entries[0].local_pref, 200);
}

#[test]
fn test_rebuild_disaggregates() {
    let mut history = History::default();
    history.record_update(ip("10.0.0.2"), attrs("192.168.0.0", "255.255.255.0"));
    history.record_update(ip("10.0.0.2"), attrs("192.168.1.0", "255.255.255.0"));

    let mut rib = Rib::new();
    rib.rebuild(history.live_routes());
    assert_eq!(rib.len(), 1);

    // revoking one half leaves the other as a standalone /24
    history.record_revoke(ip("10.0.0.2"), vec![net("192.168.1.0/24")]);
    rib.rebuild(history.live_routes());
    let entries: Vec<_> = rib.iter().collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].net, net("192.168.0.0/24"));
    assert_eq!(rib.best_route(ip("192.168.1.5")), None);
}

#[test]
fn test_revocation_matches_peer() {
    let mut history = History::default();
    history.record_update(ip("10.0.0.2"), attrs("192.168.0.0", "255.255.255.0"));
    history.record_update(ip("10.0.1.2"), attrs("192.168.0.0", "255.255.255.0"));
    // a revoke from one peer must not nullify the other peer's update
    history.record_revoke(ip("10.0.0.2"), vec![net("192.168.0.0/24")]);

    let mut rib = Rib::new();
    rib.rebuild(history.live_routes());
    let entries: Vec<_> = rib.iter().collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].peer, ip("10.0.1.2"));
}

#[test]
fn test_rebuild_is_deterministic() {
    let mut history = History::default();
    for (peer, network) in [
        ("10.0.0.2", "192.168.0.0"),
        ("10.0.1.2", "192.168.0.0"),
        ("10.0.0.2", "192.168.1.0"),
    ] {
        history.record_update(ip(peer), attrs(network, "255.255.255.0"));
    }

    let mut a = Rib::new();
    a.rebuild(history.live_routes());
    let mut b = Rib::new();
    b.rebuild(history.live_routes());

    let rows_a: Vec<_> = a.iter().cloned().collect();
    let rows_b: Vec<_> = b.iter().cloned().collect();
    assert_eq!(rows_a, rows_b);
}
