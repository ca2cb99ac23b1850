//! `TerminalModel`: owns every entity pool and answers allocation queries.
//!
//! The controller holds exactly one `TerminalModel` and mutates it from its
//! tick thread only; nothing in here is shared or locked.

use std::collections::BTreeMap;

use tracing::{debug, info};

use ct_core::{
    AgvId, Container, CraneId, CraneKind, CraneRef, PerTransport, SimDate, TerminalConfig,
    TransportType, TransporterId,
};
use ct_routing::Waypoint;
use ct_schedule::ContainerBacklog;

use crate::{distribute, Agv, Crane, CranePool, Depots, ModelError, ModelResult, Storage, Transporter};

pub struct TerminalModel {
    pub backlog:  ContainerBacklog,
    pub depots:   Depots,
    pub cranes:   CranePool,
    pub agvs:     Vec<Agv>,
    pub storage:  Storage,

    transporters:     BTreeMap<TransporterId, Transporter>,
    next_transporter: u32,
    pickup_capacity:  PerTransport<u16>,
}

impl TerminalModel {
    /// Build every pool from `config`.  AGVs start parked round-robin on the
    /// waypoints.
    pub fn new(config: &TerminalConfig, backlog: ContainerBacklog) -> Self {
        let agvs = (0..config.agv_count)
            .map(|i| {
                let parked = Waypoint::ALL[i as usize % Waypoint::COUNT];
                Agv::new(AgvId(i), parked.position())
            })
            .collect();

        Self {
            backlog,
            depots: Depots::new(&config.depots),
            cranes: CranePool::new(&config.cranes),
            agvs,
            storage: Storage::new(),
            transporters: BTreeMap::new(),
            next_transporter: 0,
            pickup_capacity: config.pickup_capacity,
        }
    }

    // ── Backlog & spawning ────────────────────────────────────────────────────

    /// Remove and return every backlog container that arrives before `now`.
    pub fn due_containers(&mut self, now: SimDate) -> Vec<Container> {
        self.backlog.due(now)
    }

    /// Distribute `containers` onto new delivery transporters.  Returns their
    /// ids in creation order.
    pub fn spawn_deliveries(&mut self, containers: Vec<Container>) -> Vec<TransporterId> {
        distribute(containers)
            .into_iter()
            .map(|(kind, load)| {
                let id = self.mint_transporter_id();
                let t = Transporter::delivery(id, kind, load);
                info!(transporter = %id, %kind, containers = t.load_len(), "delivery spawned");
                self.transporters.insert(id, t);
                id
            })
            .collect()
    }

    /// Create pickup transporters for every stored container whose departure
    /// date is before `now`, at most `pickup_capacity` per transporter.
    /// Every collected container is reserved for exactly one pickup.
    pub fn spawn_pickups(&mut self, now: SimDate) -> Vec<TransporterId> {
        let mut spawned = Vec::new();
        for (kind, numbers) in self.storage.due_for_departure(now) {
            let capacity = self.pickup_capacity.get(kind).max(1) as usize;
            for chunk in numbers.chunks(capacity) {
                let manifest: Vec<_> = chunk.iter().copied().filter(|n| self.storage.reserve(*n)).collect();
                if manifest.is_empty() {
                    continue;
                }
                let id = self.mint_transporter_id();
                info!(transporter = %id, %kind, containers = manifest.len(), "pickup spawned");
                self.transporters.insert(id, Transporter::pickup(id, kind, manifest));
                spawned.push(id);
            }
        }
        spawned
    }

    fn mint_transporter_id(&mut self) -> TransporterId {
        let id = TransporterId(self.next_transporter);
        self.next_transporter += 1;
        id
    }

    // ── Transporters ──────────────────────────────────────────────────────────

    pub fn transporter(&self, id: TransporterId) -> ModelResult<&Transporter> {
        self.transporters.get(&id).ok_or(ModelError::UnknownTransporter(id))
    }

    pub fn transporter_mut(&mut self, id: TransporterId) -> ModelResult<&mut Transporter> {
        self.transporters.get_mut(&id).ok_or(ModelError::UnknownTransporter(id))
    }

    pub fn transporters(&self) -> impl Iterator<Item = &Transporter> {
        self.transporters.values()
    }

    pub fn transporter_ids(&self) -> Vec<TransporterId> {
        self.transporters.keys().copied().collect()
    }

    pub fn transporter_count(&self) -> usize {
        self.transporters.len()
    }

    /// Remove a departed transporter and free its depot.
    pub fn remove_transporter(&mut self, id: TransporterId) -> ModelResult<Transporter> {
        let t = self.transporters.remove(&id).ok_or(ModelError::UnknownTransporter(id))?;
        if let Some(depot) = t.depot {
            self.depots.release(t.kind, depot);
        }
        Ok(t)
    }

    // ── Depots ────────────────────────────────────────────────────────────────

    /// Empty depot indices for `kind`, lowest first.
    pub fn free_depots(&self, kind: TransportType) -> Vec<usize> {
        self.depots.free(kind)
    }

    /// Put `id` in depot `index` of its own type.
    pub fn assign_depot(&mut self, id: TransporterId, index: usize) -> ModelResult<()> {
        let kind = self.transporter(id)?.kind;
        self.depots.occupy(kind, index, id)?;
        self.transporter_mut(id)?.depot = Some(index);
        debug!(transporter = %id, %kind, depot = index, "depot assigned");
        Ok(())
    }

    // ── Cranes ────────────────────────────────────────────────────────────────

    pub fn find_crane(&self, kind: CraneKind, id: CraneId) -> Option<&Crane> {
        self.cranes.find_crane(kind, id)
    }

    pub fn find_available_crane(&self, kind: CraneKind) -> Option<CraneRef> {
        self.cranes.find_available_crane(kind)
    }

    // ── AGVs ──────────────────────────────────────────────────────────────────

    /// An idle AGV, preferring one that last served `location`.
    pub fn find_available_agv(&self, location: TransportType) -> Option<AgvId> {
        let mut fallback = None;
        for agv in self.agvs.iter().filter(|a| a.is_available()) {
            if agv.last_served == Some(location) {
                return Some(agv.id);
            }
            fallback.get_or_insert(agv.id);
        }
        fallback
    }

    pub fn agv(&self, id: AgvId) -> ModelResult<&Agv> {
        self.agvs.get(id.index()).ok_or(ModelError::UnknownAgv(id))
    }

    pub fn agv_mut(&mut self, id: AgvId) -> ModelResult<&mut Agv> {
        self.agvs.get_mut(id.index()).ok_or(ModelError::UnknownAgv(id))
    }
}
