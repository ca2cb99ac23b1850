//! Routing error type.

use thiserror::Error;

use ct_core::CraneKind;

use crate::Waypoint;

/// Errors produced by `ct-routing`.  All of them mean the static topology or
/// its lookup tables are broken.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoutingError {
    #[error("no route from {from} to {to}")]
    NoRoute { from: Waypoint, to: Waypoint },

    #[error("waypoint {0} has no crane zone")]
    Unmapped(Waypoint),

    #[error("waypoint {waypoint} does not serve {kind}")]
    ZoneMismatch { waypoint: Waypoint, kind: CraneKind },

    #[error("unknown waypoint letter {0:?}")]
    UnknownLetter(char),

    #[error("route is empty")]
    EmptyRoute,

    #[error("waypoint network has no nodes")]
    EmptyNetwork,
}

pub type RoutingResult<T> = Result<T, RoutingError>;
