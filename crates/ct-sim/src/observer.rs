//! Controller observer trait for progress reporting and data collection.

use ct_core::{SimDate, Tick};

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickStats {
    pub tick:              Tick,
    pub now:               SimDate,
    /// Transporters created this tick (deliveries and pickups).
    pub spawned:           usize,
    /// Depots assigned (ARRIVE messages sent).
    pub arrivals:          usize,
    /// AGV jobs dispatched.
    pub dispatched:        usize,
    /// Acknowledgements matched to an in-flight message.
    pub acks:              usize,
    /// Acknowledgements dropped as malformed or unknown.
    pub rejected_acks:     usize,
    /// Allocations that found no free depot, crane or AGV.
    pub allocation_misses: usize,
    pub messages_sent:     usize,
    /// Transporters removed after their DEPART acknowledgement.
    pub departed:          usize,
}

/// Callbacks invoked by [`Controller::run`][crate::Controller::run] at key
/// points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct Progress;
///
/// impl ControllerObserver for Progress {
///     fn on_tick_end(&mut self, tick: Tick, stats: &TickStats) {
///         if stats.departed > 0 {
///             println!("tick {tick}: {} transporters left", stats.departed);
///         }
///     }
/// }
/// ```
pub trait ControllerObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick.
    fn on_tick_end(&mut self, _tick: Tick, _stats: &TickStats) {}

    /// Called once when the loop ends, for whatever reason.
    fn on_stop(&mut self, _final_tick: Tick) {}
}

/// A [`ControllerObserver`] that does nothing.
pub struct NoopObserver;

impl ControllerObserver for NoopObserver {}
