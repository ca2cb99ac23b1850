//! Fluent builder for constructing a [`Controller`].

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use ct_core::{SimClock, TerminalConfig, Tick};
use ct_model::TerminalModel;
use ct_protocol::MessagePool;
use ct_routing::{RoutePlanner, Router, WaypointNetwork};
use ct_schedule::ContainerBacklog;
use ct_store::SnapshotStore;
use ct_transport::Transport;

use crate::{Controller, SimResult, TickStats};

/// Fluent builder for [`Controller<R, S, T>`].
///
/// # Required inputs
///
/// - [`TerminalConfig`]: pools, depots, intervals, epoch and speed
/// - `T: Transport`: the client connection (TCP or loopback)
/// - `R: Router`: the routing algorithm (e.g. [`ct_routing::DijkstraRouter`])
/// - `S: SnapshotStore`: where snapshots go (e.g. [`ct_store::NoopStore`])
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                          |
/// |-----------------|----------------------------------|
/// | `.backlog(b)`   | Empty `ContainerBacklog`         |
/// | `.network(n)`   | `WaypointNetwork::terminal()`    |
///
/// # Example
///
/// ```rust,ignore
/// let mut controller = ControllerBuilder::new(config, transport, DijkstraRouter, NoopStore)
///     .backlog(load_containers_csv(path)?)
///     .build()?;
/// controller.run(&mut NoopObserver)?;
/// ```
pub struct ControllerBuilder<R: Router, S: SnapshotStore, T: Transport> {
    config:    TerminalConfig,
    transport: T,
    router:    R,
    store:     S,
    backlog:   Option<ContainerBacklog>,
    network:   Option<WaypointNetwork>,
}

impl<R: Router, S: SnapshotStore, T: Transport> ControllerBuilder<R, S, T> {
    /// Create a builder with all required inputs.
    pub fn new(config: TerminalConfig, transport: T, router: R, store: S) -> Self {
        Self { config, transport, router, store, backlog: None, network: None }
    }

    /// Containers due to arrive over the run.
    pub fn backlog(mut self, backlog: ContainerBacklog) -> Self {
        self.backlog = Some(backlog);
        self
    }

    /// Replace the terminal's waypoint graph, e.g. with a test topology.
    /// Crane zones stay tied to the fixed waypoint letters.
    pub fn network(mut self, network: WaypointNetwork) -> Self {
        self.network = Some(network);
        self
    }

    /// Validate the configuration and assemble the controller.
    ///
    /// # Errors
    ///
    /// [`SimError::Config`][crate::SimError::Config] if the configuration is
    /// rejected by [`TerminalConfig::validate`].
    pub fn build(self) -> SimResult<Controller<R, S, T>> {
        self.config.validate()?;

        let backlog = self.backlog.unwrap_or_default();
        let network = self.network.unwrap_or_else(WaypointNetwork::terminal);
        let model   = TerminalModel::new(&self.config, backlog);
        let clock   = SimClock::new(self.config.epoch, self.config.initial_speed);

        Ok(Controller {
            clock,
            model,
            pool:          MessagePool::new(),
            tick:          Tick::ZERO,
            planner:       RoutePlanner::new(network, self.router),
            store:         self.store,
            transport:     self.transport,
            stats:         TickStats::default(),
            running:       Arc::new(AtomicBool::new(true)),
            last_spawn:    None,
            last_announce: None,
            last_speed:    None,
            store_errors:  0,
            config:        self.config,
        })
    }
}
