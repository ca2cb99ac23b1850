//! Where a route starts, where it ends, and checking that the two agree with
//! the crane the AGV is sent to.
//!
//! Three kinds of start exist:
//!
//! | Start                      | Waypoint                                 |
//! |----------------------------|------------------------------------------|
//! | empty AGV                  | nearest waypoint to the AGV's position   |
//! | carrying inbound container | the arrival berth of its transport type  |
//! | lifted from storage        | the storage crane's waypoint             |
//!
//! The end is always derived from the destination crane and, for storage
//! cranes, the container's departure type (which picks the west or east end
//! of the yard).

use ct_core::{CraneKind, Position, Side, TransportType};
use tracing::debug;

use crate::{DijkstraRouter, Route, Router, RoutingError, RoutingResult, Waypoint, WaypointNetwork};

// ── Route start ───────────────────────────────────────────────────────────────

/// What the AGV is doing when a route is requested.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RouteStart {
    /// Not carrying anything; starts from wherever it stands.
    Empty(Position),

    /// Carrying a container just taken off a transporter of this type.
    Inbound(TransportType),

    /// Carrying a container lifted out of the yard at this waypoint.
    FromStorage(Waypoint),
}

/// Berth waypoint where containers of `arrival` are handed to an AGV.
pub fn inbound_start(arrival: TransportType) -> Waypoint {
    match arrival {
        TransportType::Sea         => Waypoint::A,
        TransportType::InlandWater => Waypoint::B,
        TransportType::Rail        => Waypoint::G,
        TransportType::Road        => Waypoint::I,
    }
}

/// Waypoint that serves a crane of `kind` on `side` for a container leaving
/// by `departure`.
pub fn end_waypoint(kind: CraneKind, side: Side, departure: TransportType) -> Waypoint {
    match kind {
        CraneKind::DockingCraneSea    => Waypoint::A,
        CraneKind::DockingCraneInland => Waypoint::B,
        CraneKind::TrainCrane         => Waypoint::G,
        CraneKind::TruckCrane         => Waypoint::I,
        CraneKind::StorageCrane => match (side, departure.is_waterborne()) {
            (Side::North, true)  => Waypoint::C,
            (Side::South, true)  => Waypoint::D,
            (Side::North, false) => Waypoint::E,
            (Side::South, false) => Waypoint::F,
        },
    }
}

/// Check that a route ending at `end` reaches a crane of `kind` on `side`.
pub fn resolve_destination(end: Waypoint, kind: CraneKind, side: Side) -> RoutingResult<()> {
    let zone = end.crane_zone().ok_or(RoutingError::Unmapped(end))?;
    if zone.admits(kind, side) {
        Ok(())
    } else {
        Err(RoutingError::ZoneMismatch { waypoint: end, kind })
    }
}

// ── RoutePlanner ──────────────────────────────────────────────────────────────

/// Bundles the network with a [`Router`] and applies the lookup tables.
pub struct RoutePlanner<R: Router = DijkstraRouter> {
    network: WaypointNetwork,
    router:  R,
}

impl RoutePlanner<DijkstraRouter> {
    /// The fixed terminal topology with Dijkstra routing.
    pub fn terminal() -> Self {
        Self::new(WaypointNetwork::terminal(), DijkstraRouter)
    }
}

impl<R: Router> RoutePlanner<R> {
    pub fn new(network: WaypointNetwork, router: R) -> Self {
        Self { network, router }
    }

    pub fn network(&self) -> &WaypointNetwork {
        &self.network
    }

    /// Resolve the start waypoint for `start`.
    pub fn start_waypoint(&self, start: RouteStart) -> RoutingResult<Waypoint> {
        match start {
            RouteStart::Empty(pos)       => self.network.snap(pos).ok_or(RoutingError::EmptyNetwork),
            RouteStart::Inbound(arrival) => Ok(inbound_start(arrival)),
            RouteStart::FromStorage(w)   => Ok(w),
        }
    }

    /// Plan a route from `start` to the crane of `kind` on `side`, for a
    /// container leaving by `departure`.
    pub fn plan(
        &self,
        start:     RouteStart,
        kind:      CraneKind,
        side:      Side,
        departure: TransportType,
    ) -> RoutingResult<Route> {
        let from = self.start_waypoint(start)?;
        let to   = end_waypoint(kind, side, departure);
        let route = self.router.route(&self.network, from, to)?;
        debug!(route = %route.letters(), cost = route.total_cost, %kind, "planned route");
        Ok(route)
    }
}
