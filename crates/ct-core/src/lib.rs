//! `ct-core`: foundational types for the container terminal controller.
//!
//! This crate is a dependency of every other `ct-*` crate.  It has no `ct-*`
//! dependencies and only small external ones (`thiserror`, `serde`, `toml`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`ids`]         | `TransporterId`, `CraneId`, `AgvId`, `ContainerNumber`, `MessageId` |
//! | [`transport`]   | `TransportType` enum and per-type lookup table             |
//! | [`crane`]       | `CraneKind`, `CraneRef`, `Side`                            |
//! | [`grid`]        | `GridPoint` (container slot), `Position` (terminal floor)  |
//! | [`container`]   | `Container`                                                |
//! | [`time`]        | `SimDate`, `SimClock`, `Tick`                              |
//! | [`config`]      | `TerminalConfig` and its TOML loader                       |
//! | [`error`]       | `CtError`, `CtResult`                                      |

pub mod config;
pub mod container;
pub mod crane;
pub mod error;
pub mod grid;
pub mod ids;
pub mod time;
pub mod transport;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{CranePoolSizes, PerTransport, TerminalConfig};
pub use container::Container;
pub use crane::{CraneKind, CraneRef, Side};
pub use error::{CtError, CtResult};
pub use grid::{GridPoint, Position};
pub use ids::{AgvId, ContainerNumber, CraneId, MessageId, TransporterId};
pub use time::{SimClock, SimDate, Tick};
pub use transport::TransportType;
