//! Crane kinds and references.
//!
//! Crane kinds are a closed tag; everything that depends on the kind (which
//! transport type it serves, its wire label, its pool) dispatches on the tag
//! through the tables below instead of comparing type names.

use serde::{Deserialize, Serialize};

use crate::{CraneId, TransportType};

/// Which end of the storage yard (or which berth) a crane works on.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub enum Side {
    North,
    South,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Side::North => "north",
            Side::South => "south",
        }
    }
}

/// The five crane kinds found in the terminal.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub enum CraneKind {
    TruckCrane,
    TrainCrane,
    DockingCraneInland,
    DockingCraneSea,
    StorageCrane,
}

impl CraneKind {
    /// All kinds in pool-declaration order.
    pub const ALL: [CraneKind; 5] = [
        CraneKind::TruckCrane,
        CraneKind::TrainCrane,
        CraneKind::DockingCraneInland,
        CraneKind::DockingCraneSea,
        CraneKind::StorageCrane,
    ];

    /// Position in [`ALL`](Self::ALL).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            CraneKind::TruckCrane         => 0,
            CraneKind::TrainCrane         => 1,
            CraneKind::DockingCraneInland => 2,
            CraneKind::DockingCraneSea    => 3,
            CraneKind::StorageCrane       => 4,
        }
    }

    /// The crane kind that unloads and loads transporters of type `t`.
    pub fn serving(t: TransportType) -> CraneKind {
        match t {
            TransportType::Road        => CraneKind::TruckCrane,
            TransportType::Rail        => CraneKind::TrainCrane,
            TransportType::InlandWater => CraneKind::DockingCraneInland,
            TransportType::Sea         => CraneKind::DockingCraneSea,
        }
    }

    /// The transport type this kind serves; `None` for storage cranes.
    pub fn serves(self) -> Option<TransportType> {
        match self {
            CraneKind::TruckCrane         => Some(TransportType::Road),
            CraneKind::TrainCrane         => Some(TransportType::Rail),
            CraneKind::DockingCraneInland => Some(TransportType::InlandWater),
            CraneKind::DockingCraneSea    => Some(TransportType::Sea),
            CraneKind::StorageCrane       => None,
        }
    }

    /// Stable snake-case name used in snapshot rows.
    pub fn as_str(self) -> &'static str {
        match self {
            CraneKind::TruckCrane         => "truck_crane",
            CraneKind::TrainCrane         => "train_crane",
            CraneKind::DockingCraneInland => "docking_crane_inland",
            CraneKind::DockingCraneSea    => "docking_crane_sea",
            CraneKind::StorageCrane       => "storage_crane",
        }
    }

    /// Label understood by the visualization client.  Both docking kinds are
    /// rendered by the same model.
    pub fn wire_label(self) -> &'static str {
        match self {
            CraneKind::TruckCrane                                   => "TruckCrane",
            CraneKind::TrainCrane                                   => "TrainCrane",
            CraneKind::DockingCraneInland | CraneKind::DockingCraneSea => "DockingCrane",
            CraneKind::StorageCrane                                 => "StorageCrane",
        }
    }
}

impl std::fmt::Display for CraneKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// Fully qualified crane identity: ids are only unique within a kind.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub struct CraneRef {
    pub kind: CraneKind,
    pub id:   CraneId,
}

impl CraneRef {
    #[inline]
    pub fn new(kind: CraneKind, id: CraneId) -> Self {
        Self { kind, id }
    }
}

impl std::fmt::Display for CraneRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.kind, self.id)
    }
}
