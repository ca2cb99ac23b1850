//! Routing trait and default Dijkstra implementation.
//!
//! The controller calls routing through the [`Router`] trait so tests can
//! substitute a scripted router.  The default [`DijkstraRouter`] is a plain
//! binary-heap Dijkstra; ties are broken on waypoint order, so repeated
//! queries always return the same path.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::{RoutingError, RoutingResult, Waypoint, WaypointNetwork};

// ── Route ─────────────────────────────────────────────────────────────────────

/// An ordered waypoint path, start and end included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub waypoints:  Vec<Waypoint>,
    pub total_cost: u32,
}

impl Route {
    /// First waypoint.
    pub fn start(&self) -> Option<Waypoint> {
        self.waypoints.first().copied()
    }

    /// Last waypoint.
    pub fn end(&self) -> Option<Waypoint> {
        self.waypoints.last().copied()
    }

    /// `true` if start and end coincide.
    pub fn is_trivial(&self) -> bool {
        self.waypoints.len() <= 1
    }

    /// Comma-separated letter sequence, e.g. `"A,C,E"`.
    pub fn letters(&self) -> String {
        let mut out = String::with_capacity(self.waypoints.len() * 2);
        for (i, w) in self.waypoints.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push(w.letter());
        }
        out
    }

    /// Parse a [`letters`](Self::letters) string back into a route with
    /// unknown cost.
    pub fn from_letters(s: &str) -> RoutingResult<Route> {
        let waypoints = s
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| {
                let mut chars = p.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Waypoint::from_letter(c),
                    (Some(c), Some(_)) => Err(RoutingError::UnknownLetter(c)),
                    (None, _) => Err(RoutingError::EmptyRoute),
                }
            })
            .collect::<RoutingResult<Vec<_>>>()?;
        if waypoints.is_empty() {
            return Err(RoutingError::EmptyRoute);
        }
        Ok(Route { waypoints, total_cost: 0 })
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing engine.
pub trait Router: Send + Sync {
    /// Compute a path from `from` to `to`.  `from == to` yields a one-waypoint
    /// route rather than an error.
    fn route(&self, network: &WaypointNetwork, from: Waypoint, to: Waypoint) -> RoutingResult<Route>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Standard Dijkstra over the CSR waypoint graph.
#[derive(Clone, Copy, Debug, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(&self, network: &WaypointNetwork, from: Waypoint, to: Waypoint) -> RoutingResult<Route> {
        shortest_path(network, from, to)
    }
}

/// Minimum-cost path from `from` to `to`.
pub fn shortest_path(network: &WaypointNetwork, from: Waypoint, to: Waypoint) -> RoutingResult<Route> {
    if from == to {
        return Ok(Route { waypoints: vec![from], total_cost: 0 });
    }

    let n = Waypoint::COUNT;
    let mut dist      = vec![u32::MAX; n];
    let mut prev_edge = vec![usize::MAX; n];

    dist[from.index()] = 0;

    // Min-heap on (cost, waypoint); the waypoint component makes ties
    // deterministic.
    let mut heap: BinaryHeap<Reverse<(u32, Waypoint)>> = BinaryHeap::new();
    heap.push(Reverse((0, from)));

    while let Some(Reverse((cost, node))) = heap.pop() {
        if node == to {
            return Ok(reconstruct(network, &prev_edge, to, cost));
        }

        // Stale entry.
        if cost > dist[node.index()] {
            continue;
        }

        for edge in network.out_edges(node) {
            let neighbor = network.edge_to[edge];
            let new_cost = cost.saturating_add(network.edge_cost[edge]);

            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()]      = new_cost;
                prev_edge[neighbor.index()] = edge;
                heap.push(Reverse((new_cost, neighbor)));
            }
        }
    }

    Err(RoutingError::NoRoute { from, to })
}

fn reconstruct(network: &WaypointNetwork, prev_edge: &[usize], to: Waypoint, total_cost: u32) -> Route {
    let mut waypoints = vec![to];
    let mut cur = to;
    loop {
        let e = prev_edge[cur.index()];
        if e == usize::MAX {
            break;
        }
        cur = network.edge_from[e];
        waypoints.push(cur);
    }
    waypoints.reverse();
    Route { waypoints, total_cost }
}
