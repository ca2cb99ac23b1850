//! Waypoint graph representation and builder.
//!
//! # Data layout
//!
//! Outgoing lanes are stored in **Compressed Sparse Row (CSR)** format.
//! Given a waypoint `w`, its outgoing lanes occupy the index range:
//!
//! ```text
//! node_out_start[w] .. node_out_start[w + 1]
//! ```
//!
//! of the `edge_from`/`edge_to`/`edge_cost` arrays, which are sorted by
//! source waypoint.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps a floor position to the nearest waypoint.
//! It is used to decide which zone a parked AGV stands in.

use std::ops::Range;

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use ct_core::Position;

use crate::Waypoint;

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct WaypointEntry {
    point:    [f32; 2],
    waypoint: Waypoint,
}

impl RTreeObject for WaypointEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for WaypointEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── WaypointNetwork ───────────────────────────────────────────────────────────

/// Directed waypoint graph in CSR format plus a spatial index for snapping.
///
/// Build with [`WaypointNetworkBuilder`] or take the fixed terminal layout
/// from [`WaypointNetwork::terminal`].
pub struct WaypointNetwork {
    /// CSR row pointer, length `Waypoint::COUNT + 1`.
    pub node_out_start: Vec<u32>,

    /// Source waypoint of each lane.
    pub edge_from: Vec<Waypoint>,

    /// Destination waypoint of each lane.
    pub edge_to: Vec<Waypoint>,

    /// Traversal cost of each lane.  Positive, not necessarily uniform.
    pub edge_cost: Vec<u32>,

    spatial_idx: RTree<WaypointEntry>,
}

impl WaypointNetwork {
    /// The terminal's fixed topology.
    ///
    /// | Lane  | Cost | Direction |
    /// |-------|------|-----------|
    /// | A–B   | 4    | both      |
    /// | A–C   | 2    | both      |
    /// | B–D   | 2    | both      |
    /// | C–D   | 3    | both      |
    /// | E–F   | 3    | both      |
    /// | E–G   | 2    | both      |
    /// | F–H   | 2    | both      |
    /// | G–H   | 4    | both      |
    /// | E–I   | 3    | both      |
    /// | F–J   | 3    | both      |
    /// | I–J   | 4    | both      |
    /// | C→E   | 5    | one-way   |
    /// | F→D   | 5    | one-way   |
    pub fn terminal() -> Self {
        use Waypoint::*;

        let mut b = WaypointNetworkBuilder::new();
        b.add_lane(A, B, 4);
        b.add_lane(A, C, 2);
        b.add_lane(B, D, 2);
        b.add_lane(C, D, 3);
        b.add_lane(E, F, 3);
        b.add_lane(E, G, 2);
        b.add_lane(F, H, 2);
        b.add_lane(G, H, 4);
        b.add_lane(E, I, 3);
        b.add_lane(F, J, 3);
        b.add_lane(I, J, 4);
        b.add_one_way(C, E, 5);
        b.add_one_way(F, D, 5);
        b.build()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    /// Index range of the outgoing lanes of `w`.
    #[inline]
    pub fn out_edges(&self, w: Waypoint) -> Range<usize> {
        let start = self.node_out_start[w.index()] as usize;
        let end   = self.node_out_start[w.index() + 1] as usize;
        start..end
    }

    #[inline]
    pub fn out_degree(&self, w: Waypoint) -> usize {
        self.out_edges(w).len()
    }

    /// The waypoint nearest to `pos`.  `None` only for a network built
    /// without any positioned waypoints.
    pub fn snap(&self, pos: Position) -> Option<Waypoint> {
        self.spatial_idx
            .nearest_neighbor(&[pos.x, pos.y])
            .map(|e| e.waypoint)
    }
}

// ── WaypointNetworkBuilder ────────────────────────────────────────────────────

/// Construct a [`WaypointNetwork`] incrementally, then call
/// [`build`](Self::build).
///
/// All ten waypoints always exist; the builder only collects lanes.
///
/// ```
/// use ct_routing::{Waypoint, WaypointNetworkBuilder};
///
/// let mut b = WaypointNetworkBuilder::new();
/// b.add_lane(Waypoint::A, Waypoint::B, 4);
/// let net = b.build();
/// assert_eq!(net.edge_count(), 2); // bidirectional
/// ```
pub struct WaypointNetworkBuilder {
    raw_edges: Vec<RawEdge>,
    snappable: Vec<Waypoint>,
}

struct RawEdge {
    from: Waypoint,
    to:   Waypoint,
    cost: u32,
}

impl WaypointNetworkBuilder {
    pub fn new() -> Self {
        Self { raw_edges: Vec::new(), snappable: Waypoint::ALL.to_vec() }
    }

    /// Add a lane usable only from `from` to `to`.
    pub fn add_one_way(&mut self, from: Waypoint, to: Waypoint, cost: u32) {
        self.raw_edges.push(RawEdge { from, to, cost });
    }

    /// Add a lane usable in both directions.
    pub fn add_lane(&mut self, a: Waypoint, b: Waypoint, cost: u32) {
        self.add_one_way(a, b, cost);
        self.add_one_way(b, a, cost);
    }

    /// Restrict the spatial index to `waypoints` (all by default).
    pub fn snappable(&mut self, waypoints: &[Waypoint]) {
        self.snappable = waypoints.to_vec();
    }

    /// Consume the builder and produce a [`WaypointNetwork`].
    pub fn build(self) -> WaypointNetwork {
        let node_count = Waypoint::COUNT;

        // Stable sort keeps insertion order among lanes of the same source,
        // which keeps Dijkstra's tie-breaking reproducible.
        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from);

        let edge_from: Vec<Waypoint> = raw.iter().map(|e| e.from).collect();
        let edge_to:   Vec<Waypoint> = raw.iter().map(|e| e.to).collect();
        let edge_cost: Vec<u32>      = raw.iter().map(|e| e.cost).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }

        let entries: Vec<WaypointEntry> = self
            .snappable
            .iter()
            .map(|&w| {
                let p = w.position();
                WaypointEntry { point: [p.x, p.y], waypoint: w }
            })
            .collect();

        WaypointNetwork {
            node_out_start,
            edge_from,
            edge_to,
            edge_cost,
            spatial_idx: RTree::bulk_load(entries),
        }
    }
}

impl Default for WaypointNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
