//! The ten named waypoints of the terminal and their fixed lookup tables.
//!
//! ```text
//!                      I (road north)
//!                      |
//!  A ── C ═══════════> E ── G      north lane, C → E one-way
//!  |    |              |    |
//!  B ── D <═══════════ F ── H      south lane, F → D one-way
//!                      |
//!                      J (road south)
//! ```
//!
//! The dock is on the west (A sea berth, B inland berth), the rail
//! terminal on the east, the storage yard between C/D and E/F.

use ct_core::{CraneKind, Position, Side};

use crate::RoutingError;

/// A node of the terminal routing graph.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum Waypoint {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
}

/// The crane a waypoint gives access to.  For transporter-side kinds the
/// side is informational; storage cranes are matched on it.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct CraneZone {
    pub kind: CraneKind,
    pub side: Side,
}

impl CraneZone {
    /// `true` if a crane of `kind` working on `side` is reached through this
    /// zone.
    pub fn admits(self, kind: CraneKind, side: Side) -> bool {
        match kind {
            CraneKind::StorageCrane => self.kind == kind && self.side == side,
            _                       => self.kind == kind,
        }
    }
}

impl Waypoint {
    pub const COUNT: usize = 10;

    pub const ALL: [Waypoint; Self::COUNT] = [
        Waypoint::A,
        Waypoint::B,
        Waypoint::C,
        Waypoint::D,
        Waypoint::E,
        Waypoint::F,
        Waypoint::G,
        Waypoint::H,
        Waypoint::I,
        Waypoint::J,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn from_index(i: usize) -> Option<Waypoint> {
        Self::ALL.get(i).copied()
    }

    pub fn letter(self) -> char {
        (b'A' + self as u8) as char
    }

    pub fn from_letter(c: char) -> Result<Waypoint, RoutingError> {
        let upper = c.to_ascii_uppercase();
        if !upper.is_ascii_uppercase() {
            return Err(RoutingError::UnknownLetter(c));
        }
        Self::from_index((upper as u8 - b'A') as usize).ok_or(RoutingError::UnknownLetter(c))
    }

    /// Fixed floor position in metres.
    pub fn position(self) -> Position {
        let (x, y) = match self {
            Waypoint::A => (0.0, 300.0),
            Waypoint::B => (0.0, 100.0),
            Waypoint::C => (150.0, 300.0),
            Waypoint::D => (150.0, 100.0),
            Waypoint::E => (450.0, 300.0),
            Waypoint::F => (450.0, 100.0),
            Waypoint::G => (600.0, 300.0),
            Waypoint::H => (600.0, 100.0),
            Waypoint::I => (500.0, 400.0),
            Waypoint::J => (500.0, 0.0),
        };
        Position::new(x, y)
    }

    /// Which crane an AGV ending its route here is delivered to.  H and J
    /// are parking areas and map to nothing.
    pub fn crane_zone(self) -> Option<CraneZone> {
        let zone = |kind, side| Some(CraneZone { kind, side });
        match self {
            Waypoint::A => zone(CraneKind::DockingCraneSea, Side::North),
            Waypoint::B => zone(CraneKind::DockingCraneInland, Side::South),
            Waypoint::C => zone(CraneKind::StorageCrane, Side::North),
            Waypoint::D => zone(CraneKind::StorageCrane, Side::South),
            Waypoint::E => zone(CraneKind::StorageCrane, Side::North),
            Waypoint::F => zone(CraneKind::StorageCrane, Side::South),
            Waypoint::G => zone(CraneKind::TrainCrane, Side::North),
            Waypoint::I => zone(CraneKind::TruckCrane, Side::North),
            Waypoint::H | Waypoint::J => None,
        }
    }
}

impl std::fmt::Display for Waypoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}
