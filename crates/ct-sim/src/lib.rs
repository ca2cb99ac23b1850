//! `ct-sim`: the terminal controller.
//!
//! # Tick phases
//!
//! ```text
//! every tick:
//!   ① Clock     advance the simulated date by wall time × speed.
//!   ② Spawn     once per spawn interval, due containers become delivery
//!               transporters and due stored containers become pickups;
//!               each is announced with CREATE.
//!   ③ Speed     once per announce interval, SPEED with the current
//!               multiplier and date.
//!   ④ Depots    every idle transporter takes the lowest free depot of its
//!               type and is sent ARRIVE.
//!   ⑤ Acks      drain the client's acknowledgements, match each to its
//!               in-flight message and apply it (see `handlers`).
//!   ⑥ Dispatch  retry AGVs waiting for a crane, then hand out AGV jobs to
//!               docked transporters.
//! ```
//!
//! Nothing moves on its own: every state change after ② is triggered by an
//! acknowledgement, so a client that stops acknowledging freezes the terminal
//! without losing state.
//!
//! # Errors
//!
//! Only broken routing tables (an unreachable waypoint, a route ending away
//! from its crane) stop the controller.  Malformed or unknown acknowledgements,
//! stale references and store failures are logged and skipped.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ct_core::TerminalConfig;
//! use ct_routing::DijkstraRouter;
//! use ct_sim::{ControllerBuilder, NoopObserver};
//! use ct_store::NoopStore;
//! use ct_transport::TcpTransport;
//!
//! let config = TerminalConfig::default();
//! let transport = TcpTransport::bind(&config.bind_addr)?;
//! let mut controller = ControllerBuilder::new(config, transport, DijkstraRouter, NoopStore)
//!     .build()?;
//! controller.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod controller;
pub mod error;
pub mod observer;

mod dispatch;
mod handlers;
mod snapshot;


pub use builder::ControllerBuilder;
pub use controller::{Controller, StopHandle};
pub use error::{SimError, SimResult};
pub use observer::{ControllerObserver, NoopObserver, TickStats};
