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

//! Convenience re-export of common members.

pub use crate::link::{Link, LinkError};
pub use crate::msg::{Body, Message, PrefixSpec, RouteAttrs, TableRow};
pub use crate::policy::Relation;
pub use crate::rib::Rib;
pub use crate::route::{Origin, Route};
pub use crate::router::{Outbound, Router};
pub use crate::types::{local_endpoint, Neighbor, RouterError, ASN};
