//! `ct-routing`: waypoint graph, routing, and route-context resolution.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`waypoint`] | `Waypoint` (A–J), fixed coordinates, `CraneZone` table      |
//! | [`network`]  | `WaypointNetwork` (CSR + R-tree), `WaypointNetworkBuilder`  |
//! | [`router`]   | `Router` trait, `Route`, `DijkstraRouter`, `shortest_path`  |
//! | [`context`]  | `RouteStart`, start/end lookup tables, `RoutePlanner`       |
//! | [`error`]    | `RoutingError`, `RoutingResult<T>`                          |
//!
//! Every routing error is a configuration defect: the topology is static and
//! callers only ask for pairs that are meant to be connected.

pub mod context;
pub mod error;
pub mod network;
pub mod router;
pub mod waypoint;


pub use context::{end_waypoint, inbound_start, resolve_destination, RoutePlanner, RouteStart};
pub use error::{RoutingError, RoutingResult};
pub use network::{WaypointNetwork, WaypointNetworkBuilder};
pub use router::{shortest_path, DijkstraRouter, Route, Router};
pub use waypoint::{CraneZone, Waypoint};
