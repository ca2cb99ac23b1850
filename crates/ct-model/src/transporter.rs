//! Transporters and the container-to-transporter distribution.
//!
//! # Distribution
//!
//! Due containers are partitioned by arrival type, then bucketed by spawn
//! slot.  One transporter "layer" is peeled off every bucket per round:
//!
//! ```text
//! slot (0,0,0): [c1, c4]      layer 0 → T0 = {c1, c2, c3}
//! slot (1,0,0): [c2]          layer 1 → T1 = {c4}
//! slot (2,0,0): [c3]
//! ```
//!
//! So the transporter count for a type equals the largest bucket, no
//! transporter holds two containers for the same slot, and no transporter is
//! left empty.

use std::collections::{BTreeMap, VecDeque};

use ct_core::{Container, ContainerNumber, GridPoint, MessageId, Tick, TransportType, TransporterId};

use crate::{ModelError, ModelResult};

// ── Stage ─────────────────────────────────────────────────────────────────────

/// Where a transporter is in its visit.  Advanced only by acknowledgement
/// handlers and the dispatcher.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TransporterStage {
    /// CREATE sent, not yet acknowledged.
    Announced,
    /// Known to the client, waiting for a free depot.
    Idle,
    /// Depot assigned, ARRIVE in flight.
    Arriving,
    /// At its depot, no AGV dispatched yet.
    AwaitingAgv,
    /// At least one AGV job dispatched.
    Transferring,
    /// DEPART in flight.
    AwaitingDepart,
}

impl TransporterStage {
    pub fn as_str(self) -> &'static str {
        match self {
            TransporterStage::Announced      => "announced",
            TransporterStage::Idle           => "idle",
            TransporterStage::Arriving       => "arriving",
            TransporterStage::AwaitingAgv    => "awaiting_agv",
            TransporterStage::Transferring   => "transferring",
            TransporterStage::AwaitingDepart => "awaiting_depart",
        }
    }

    /// `true` while the transporter sits at a depot and can be served.
    pub fn is_docked(self) -> bool {
        matches!(self, TransporterStage::AwaitingAgv | TransporterStage::Transferring)
    }
}

/// Whether the transporter brings containers in or takes them away.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Direction {
    Delivery,
    Pickup,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Delivery => "delivery",
            Direction::Pickup   => "pickup",
        }
    }
}

// ── Transporter ───────────────────────────────────────────────────────────────

/// A truck, train, or ship visiting the terminal.
#[derive(Debug, Clone)]
pub struct Transporter {
    pub id:                 TransporterId,
    pub kind:               TransportType,
    pub direction:          Direction,
    /// Exclusive upper corner of the cargo grid.
    pub bounds:             GridPoint,
    pub stage:              TransporterStage,
    pub depot:              Option<usize>,
    /// Correlation id of the CREATE/ARRIVE/DEPART currently unacknowledged.
    pub processing_message: Option<MessageId>,
    /// Earliest tick the dispatcher may hand out the next AGV job.
    pub next_dispatch:      Tick,

    slots:    BTreeMap<GridPoint, Container>,
    /// Containers a pickup is expected to take away, in loading order.
    manifest: Vec<ContainerNumber>,
    /// Containers not yet handed to an AGV job.
    pending:  VecDeque<ContainerNumber>,
    /// Manifest entries given up on because storage no longer had them.
    abandoned: usize,
}

impl Transporter {
    /// A transporter arriving loaded with `containers`.
    ///
    /// Unload order is ascending departure date, ties by container number.
    pub fn delivery(id: TransporterId, kind: TransportType, containers: Vec<Container>) -> Self {
        let bounds = grid_bounds(containers.iter().map(|c| c.spawn));

        let mut order: Vec<&Container> = containers.iter().collect();
        order.sort_by_key(|c| (c.departure_date, c.number));
        let pending = order.iter().map(|c| c.number).collect();

        let slots = containers.into_iter().map(|c| (c.spawn, c)).collect();

        Self {
            id,
            kind,
            direction: Direction::Delivery,
            bounds,
            stage: TransporterStage::Announced,
            depot: None,
            processing_message: None,
            next_dispatch: Tick::ZERO,
            slots,
            manifest: Vec::new(),
            pending,
            abandoned: 0,
        }
    }

    /// An empty transporter coming to collect `manifest` from storage.
    pub fn pickup(id: TransporterId, kind: TransportType, manifest: Vec<ContainerNumber>) -> Self {
        let bounds = GridPoint::new(manifest.len().clamp(1, u16::MAX as usize) as u16, 1, 1);
        Self {
            id,
            kind,
            direction: Direction::Pickup,
            bounds,
            stage: TransporterStage::Announced,
            depot: None,
            processing_message: None,
            next_dispatch: Tick::ZERO,
            slots: BTreeMap::new(),
            pending: manifest.iter().copied().collect(),
            manifest,
            abandoned: 0,
        }
    }

    /// Containers currently aboard, in slot order.
    pub fn containers(&self) -> impl Iterator<Item = &Container> {
        self.slots.values()
    }

    pub fn load_len(&self) -> usize {
        self.slots.len()
    }

    pub fn manifest(&self) -> &[ContainerNumber] {
        &self.manifest
    }

    /// Next container to hand to an AGV job, without removing it.
    pub fn peek_pending(&self) -> Option<ContainerNumber> {
        self.pending.front().copied()
    }

    /// Remove the container returned by [`peek_pending`](Self::peek_pending)
    /// once its job has been dispatched.
    pub fn pop_pending(&mut self) -> Option<ContainerNumber> {
        self.pending.pop_front()
    }

    pub fn holds(&self, number: ContainerNumber) -> bool {
        self.slots.values().any(|c| c.number == number)
    }

    /// Take `number` off the load.
    pub fn take(&mut self, number: ContainerNumber) -> ModelResult<Container> {
        let slot = self
            .slots
            .iter()
            .find(|(_, c)| c.number == number)
            .map(|(slot, _)| *slot)
            .ok_or(ModelError::ContainerNotFound { transporter: self.id, container: number })?;
        self.slots
            .remove(&slot)
            .ok_or(ModelError::ContainerNotFound { transporter: self.id, container: number })
    }

    /// Put `container` aboard a pickup in the slot reserved for it by the
    /// manifest.
    pub fn place(&mut self, container: Container) -> ModelResult<GridPoint> {
        let no_room = ModelError::NoRoom { transporter: self.id, container: container.number };
        let index = self
            .manifest
            .iter()
            .position(|n| *n == container.number)
            .ok_or_else(|| no_room.clone())?;
        let slot = GridPoint::new(index as u16, 0, 0);
        if self.slots.contains_key(&slot) {
            return Err(no_room);
        }
        self.slots.insert(slot, container);
        Ok(slot)
    }

    /// Give up on a manifest entry that can no longer be collected.
    /// Returns `false` if `number` is not on the manifest.
    pub fn abandon(&mut self, number: ContainerNumber) -> bool {
        if self.direction != Direction::Pickup || !self.manifest.contains(&number) {
            return false;
        }
        self.pending.retain(|n| *n != number);
        self.abandoned += 1;
        true
    }

    /// `true` once nothing is left to transfer: a delivery is empty, a pickup
    /// holds its whole manifest (less anything abandoned).
    pub fn is_complete(&self) -> bool {
        match self.direction {
            Direction::Delivery => self.slots.is_empty() && self.pending.is_empty(),
            Direction::Pickup   => self.slots.len() + self.abandoned >= self.manifest.len(),
        }
    }

    /// `true` if no message is in flight and the transporter is waiting for a
    /// depot.
    pub fn ready_for_depot(&self) -> bool {
        self.stage == TransporterStage::Idle && self.processing_message.is_none() && self.depot.is_none()
    }
}

fn grid_bounds(points: impl Iterator<Item = GridPoint>) -> GridPoint {
    points.fold(GridPoint::new(0, 0, 0), |b, p| {
        GridPoint::new(
            b.x.max(p.x.saturating_add(1)),
            b.y.max(p.y.saturating_add(1)),
            b.z.max(p.z.saturating_add(1)),
        )
    })
}

// ── Distribution ──────────────────────────────────────────────────────────────

/// Group `containers` into transporter loads.
///
/// Returns `(type, load)` pairs in [`TransportType::ALL`] order, layer by
/// layer within a type.  Every input container appears in exactly one load,
/// and no load is empty or holds two containers for the same slot.
pub fn distribute(containers: Vec<Container>) -> Vec<(TransportType, Vec<Container>)> {
    let mut by_type: [BTreeMap<GridPoint, VecDeque<Container>>; 4] = Default::default();
    for c in containers {
        by_type[c.arrival_type.index()].entry(c.spawn).or_default().push_back(c);
    }

    let mut loads = Vec::new();
    for kind in TransportType::ALL {
        let buckets = &mut by_type[kind.index()];
        let layers = buckets.values().map(VecDeque::len).max().unwrap_or(0);

        for _ in 0..layers {
            let load: Vec<Container> = buckets.values_mut().filter_map(VecDeque::pop_front).collect();
            if !load.is_empty() {
                loads.push((kind, load));
            }
        }
    }
    loads
}
