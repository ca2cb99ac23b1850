//! `ct-model`: the entity registry.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`transporter`] | `Transporter`, `TransporterStage`, `Direction`, `distribute` |
//! | [`depot`]       | `Depots` (per-type slot arrays)                           |
//! | [`crane`]       | `Crane`, `CranePool`                                      |
//! | [`agv`]         | `Agv`, `AgvStage`, `Job`, `Leg`                           |
//! | [`storage`]     | `Storage`, `StoredContainer`                              |
//! | [`model`]       | `TerminalModel` (owns every pool) and allocation queries  |
//! | [`error`]       | `ModelError`, `ModelResult<T>`                            |
//!
//! # Allocation misses
//!
//! Every allocator returns `Option`.  `None` means "nothing free right now"
//! and is the normal outcome under contention; the controller retries on a
//! later tick.  Only lookups by identity that must succeed return
//! [`ModelError`].

pub mod agv;
pub mod crane;
pub mod depot;
pub mod error;
pub mod model;
pub mod storage;
pub mod transporter;


pub use agv::{Agv, AgvStage, Job, Leg};
pub use crane::{Crane, CranePool};
pub use depot::Depots;
pub use error::{ModelError, ModelResult};
pub use model::TerminalModel;
pub use storage::{Storage, StoredContainer};
pub use transporter::{distribute, Direction, Transporter, TransporterStage};
