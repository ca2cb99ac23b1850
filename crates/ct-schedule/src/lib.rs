//! `ct-schedule`: the container backlog and its CSV loader.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`backlog`] | `ContainerBacklog` (`BTreeMap<SimDate, Vec<Container>>`)   |
//! | [`loader`]  | `load_containers_csv`, `load_containers_reader`            |
//! | [`error`]   | `ScheduleError`, `ScheduleResult<T>`                       |
//!
//! # Release model (summary)
//!
//! The backlog is filled once at startup.  On every spawn interval the
//! controller calls:
//!
//! ```text
//! backlog.due(now)   // every container with arrival_date < now, exactly once
//! ```
//!
//! Containers come out ordered by arrival date, then in load order.

pub mod backlog;
pub mod error;
pub mod loader;

#[cfg(test)]
mod tests;

pub use backlog::ContainerBacklog;
pub use error::{ScheduleError, ScheduleResult};
pub use loader::{load_containers_csv, load_containers_reader};
