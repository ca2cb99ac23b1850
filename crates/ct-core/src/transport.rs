//! Transport type shared by containers, transporters, depots and cranes.
//!
//! The four variants are a closed set; per-type pools (depots, pickup
//! capacities) are plain arrays indexed with [`TransportType::index`].

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CtError;

/// The kind of vehicle a container arrives or departs with.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportType {
    /// Truck.
    Road,
    /// Train.
    Rail,
    /// Inland barge.
    InlandWater,
    /// Sea vessel.
    Sea,
}

impl TransportType {
    /// All variants in declaration order.  Spawning and depot assignment walk
    /// types in this order.
    pub const ALL: [TransportType; 4] = [
        TransportType::Road,
        TransportType::Rail,
        TransportType::InlandWater,
        TransportType::Sea,
    ];

    /// Position in [`ALL`](Self::ALL); index into per-type arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            TransportType::Road        => 0,
            TransportType::Rail        => 1,
            TransportType::InlandWater => 2,
            TransportType::Sea         => 3,
        }
    }

    /// Human-readable label, used in logs and snapshot rows.
    pub fn as_str(self) -> &'static str {
        match self {
            TransportType::Road        => "road",
            TransportType::Rail        => "rail",
            TransportType::InlandWater => "inland",
            TransportType::Sea         => "sea",
        }
    }

    /// Label understood by the visualization client.
    pub fn wire_label(self) -> &'static str {
        match self {
            TransportType::Road        => "vrachtauto",
            TransportType::Rail        => "trein",
            TransportType::InlandWater => "binnenschip",
            TransportType::Sea         => "zeeschip",
        }
    }

    /// `true` for the two vessel types that berth at the dock.
    #[inline]
    pub fn is_waterborne(self) -> bool {
        matches!(self, TransportType::InlandWater | TransportType::Sea)
    }
}

impl FromStr for TransportType {
    type Err = CtError;

    /// Accepts both the plain labels and the client's wire labels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "road" | "truck" | "vrachtauto"         => Ok(TransportType::Road),
            "rail" | "train" | "trein"              => Ok(TransportType::Rail),
            "inland" | "inland_water" | "binnenschip" => Ok(TransportType::InlandWater),
            "sea" | "zeeschip"                      => Ok(TransportType::Sea),
            other => Err(CtError::Parse(format!("unknown transport type {other:?}"))),
        }
    }
}

impl std::fmt::Display for TransportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
