//! The [`Controller`] struct and its tick loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use ct_core::{MessageId, SimClock, SimDate, TerminalConfig, Tick, TransporterId};
use ct_model::{TerminalModel, TransporterStage};
use ct_protocol::{parse_ack, Message, MessagePool, Processor};
use ct_routing::{RoutePlanner, Router};
use ct_store::SnapshotStore;
use ct_transport::Transport;

use crate::{ControllerObserver, SimResult, TickStats};

// ── StopHandle ────────────────────────────────────────────────────────────────

/// Cloneable handle that ends [`Controller::run`] from another thread.
#[derive(Clone, Debug)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

// ── Controller ────────────────────────────────────────────────────────────────

/// The terminal controller.
///
/// Create via [`ControllerBuilder`][crate::ControllerBuilder].  Drive with
/// [`run`](Self::run) against a live client, or step it deterministically
/// with [`tick_with_elapsed`](Self::tick_with_elapsed).
pub struct Controller<R: Router, S: SnapshotStore, T: Transport> {
    /// Validated configuration the controller was built from.
    pub config: TerminalConfig,

    /// Simulated date and speed multiplier.
    pub clock: SimClock,

    /// Transporters, depots, cranes, AGVs and the storage yard.
    pub model: TerminalModel,

    /// Messages sent and not yet acknowledged.
    pub pool: MessagePool,

    /// Index of the tick about to run.
    pub tick: Tick,

    pub(crate) planner:   RoutePlanner<R>,
    pub(crate) store:     S,
    pub(crate) transport: T,
    pub(crate) stats:     TickStats,

    pub(crate) running:       Arc<AtomicBool>,
    pub(crate) last_spawn:    Option<SimDate>,
    pub(crate) last_announce: Option<SimDate>,
    /// Newest SPEED sent; older SPEED acknowledgements do not touch the clock.
    pub(crate) last_speed:    Option<MessageId>,
    pub(crate) store_errors:  u64,
}

impl<R: Router, S: SnapshotStore, T: Transport> Controller<R, S, T> {
    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn planner(&self) -> &RoutePlanner<R> {
        &self.planner
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Snapshot writes that failed so far.
    pub fn store_errors(&self) -> u64 {
        self.store_errors
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle(Arc::clone(&self.running))
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Change the speed multiplier and announce it immediately.
    pub fn set_speed(&mut self, speed: f32) {
        self.clock.set_speed(speed);
        info!(speed = self.clock.speed(), "speed changed");
        self.announce_speed();
    }

    // ── Run loop ──────────────────────────────────────────────────────────────

    /// Tick at the configured interval until stopped or the client hangs up.
    ///
    /// Non-fatal errors are logged and the loop carries on; a fatal error
    /// (broken routing tables) stops the controller and is returned.  The
    /// store is finished and the transport shut down in every case.
    pub fn run<O: ControllerObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let interval = self.config.tick_interval();
        if self.tick == Tick::ZERO {
            // Wall time spent between build and run does not count.
            self.clock.initialize(self.config.epoch);
        }
        info!(
            epoch = %self.clock.now(),
            speed = self.clock.speed(),
            interval_ms = self.config.tick_interval_ms,
            "controller started"
        );

        let mut outcome = Ok(());
        while self.is_running() && self.transport.is_connected() {
            let started = Instant::now();
            observer.on_tick_start(self.tick);

            match self.tick() {
                Ok(stats) => observer.on_tick_end(stats.tick, &stats),
                Err(e) if e.is_fatal() => {
                    error!(error = %e, tick = %self.tick, "controller stopping");
                    outcome = Err(e);
                    break;
                }
                Err(e) => warn!(error = %e, tick = %self.tick, "tick failed"),
            }

            sleep_remaining(started, interval);
        }

        self.shutdown();
        observer.on_stop(self.tick);
        outcome
    }

    /// Stop the loop, finish the store and close the connection.  Idempotent.
    pub fn shutdown(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Err(e) = self.store.finish() {
            warn!(error = %e, "could not finish snapshot store");
        }
        self.transport.shutdown();
        info!(
            tick = %self.tick,
            now = %self.clock.now(),
            in_flight = self.pool.len(),
            "controller stopped"
        );
    }

    /// Run one tick, advancing the clock by the wall time since the last call.
    pub fn tick(&mut self) -> SimResult<TickStats> {
        self.clock.advance();
        self.process_tick()
    }

    /// Run one tick as if `wall` had elapsed since the previous one.
    pub fn tick_with_elapsed(&mut self, wall: Duration) -> SimResult<TickStats> {
        self.clock.advance_by(wall);
        self.process_tick()
    }

    // ── Tick phases ───────────────────────────────────────────────────────────

    fn process_tick(&mut self) -> SimResult<TickStats> {
        let now = self.clock.now();
        self.stats = TickStats { tick: self.tick, now, ..TickStats::default() };

        let spawned = self.spawn_phase(now);
        self.contain("spawn", spawned)?;
        self.announce_phase(now);
        let arrived = self.depot_phase();
        self.contain("depot", arrived)?;
        let acked = self.ack_phase();
        self.contain("ack", acked)?;
        let dispatched = self.dispatch_phase();
        self.contain("dispatch", dispatched)?;

        self.tick = self.tick + 1;
        Ok(self.stats)
    }

    /// Pass fatal errors up; log the rest so later phases still run.
    pub(crate) fn contain(&self, phase: &'static str, result: SimResult<()>) -> SimResult<()> {
        match result {
            Err(e) if !e.is_fatal() => {
                warn!(error = %e, phase, tick = %self.tick, "phase step failed");
                Ok(())
            }
            other => other,
        }
    }

    /// Turn due containers into delivery transporters and due stored
    /// containers into pickups, then announce each with CREATE.
    fn spawn_phase(&mut self, now: SimDate) -> SimResult<()> {
        if !interval_elapsed(self.last_spawn, now, self.config.spawn_interval_ms) {
            return Ok(());
        }
        self.last_spawn = Some(now);

        let due = self.model.due_containers(now);
        let mut spawned = if due.is_empty() { Vec::new() } else { self.model.spawn_deliveries(due) };
        spawned.extend(self.model.spawn_pickups(now));

        for id in spawned {
            let announced = self.announce_transporter(id);
            self.contain("spawn", announced)?;
        }
        Ok(())
    }

    fn announce_transporter(&mut self, id: TransporterId) -> SimResult<()> {
        let t = self.model.transporter(id)?;
        let message = Message::Create {
            transporter: id,
            kind:        t.kind,
            containers:  t.containers().cloned().collect(),
        };
        let message_id = self.send(message);
        self.model.transporter_mut(id)?.processing_message = Some(message_id);
        self.stats.spawned += 1;
        Ok(())
    }

    fn announce_phase(&mut self, now: SimDate) {
        if interval_elapsed(self.last_announce, now, self.config.speed_announce_interval_ms) {
            self.announce_speed();
        }
    }

    fn announce_speed(&mut self) {
        let now = self.clock.now();
        self.last_announce = Some(now);
        let id = self.send(Message::Speed { speed: self.clock.speed(), date: now });
        self.last_speed = Some(id);
    }

    /// Give every idle transporter the lowest free depot of its type.
    fn depot_phase(&mut self) -> SimResult<()> {
        for id in self.model.transporter_ids() {
            let arrived = self.send_to_depot(id);
            self.contain("depot", arrived)?;
        }
        Ok(())
    }

    fn send_to_depot(&mut self, id: TransporterId) -> SimResult<()> {
        let t = self.model.transporter(id)?;
        if !t.ready_for_depot() {
            return Ok(());
        }
        let kind = t.kind;
        let Some(depot) = self.model.depots.first_free(kind) else {
            self.stats.allocation_misses += 1;
            debug!(transporter = %id, %kind, "no free depot");
            return Ok(());
        };

        self.model.assign_depot(id, depot)?;
        let message_id = self.send(Message::Arrive { transporter: id, kind, depot });
        let t = self.model.transporter_mut(id)?;
        t.stage = TransporterStage::Arriving;
        t.processing_message = Some(message_id);
        self.stats.arrivals += 1;
        self.snapshot_transporter(id);
        Ok(())
    }

    /// Match every complete inbound line to its pending message and apply the
    /// acknowledgement.
    fn ack_phase(&mut self) -> SimResult<()> {
        while let Some(line) = self.transport.poll_inbound() {
            let acked = parse_ack(&line).and_then(|id| self.pool.acknowledge(id).map(|m| (id, m)));
            let (id, message) = match acked {
                Ok(pair) => pair,
                Err(e) => {
                    warn!(error = %e, "dropping acknowledgement");
                    self.stats.rejected_acks += 1;
                    continue;
                }
            };

            self.stats.acks += 1;
            debug!(message = %id, kind = %message.kind(), "acknowledged");
            self.clear_in_flight(id, message.processor());
            match self.on_acknowledged(id, message) {
                Ok(()) => {}
                Err(e) if e.is_fatal() => {
                    error!(error = %e, message = %id, "fatal error while applying acknowledgement");
                    return Err(e);
                }
                Err(e) => warn!(error = %e, message = %id, "acknowledgement not applied"),
            }
        }
        Ok(())
    }

    /// Mark the entity that owned `id` as no longer waiting on it.  A newer
    /// message in flight for the same entity is left alone.
    fn clear_in_flight(&mut self, id: MessageId, processor: Processor) {
        let slot = match processor {
            Processor::Transporter(t) => self.model.transporter_mut(t).ok().map(|t| &mut t.processing_message),
            Processor::Agv(a)         => self.model.agv_mut(a).ok().map(|a| &mut a.processing_message),
            Processor::Crane(c)       => self.model.cranes.get_mut(c).ok().map(|c| &mut c.processing_message),
            Processor::Controller     => None,
        };
        if let Some(slot) = slot {
            if *slot == Some(id) {
                *slot = None;
            }
        }
    }

    // ── Outbound ──────────────────────────────────────────────────────────────

    /// Register `message` in the pool and queue its wire form.
    pub(crate) fn send(&mut self, message: Message) -> MessageId {
        let kind = message.kind();
        let (id, line) = self.pool.send(message);
        if let Err(e) = self.transport.enqueue_outbound(line) {
            warn!(error = %e, message = %id, %kind, "could not queue message");
        }
        self.stats.messages_sent += 1;
        debug!(message = %id, %kind, "sent");
        id
    }
}

fn interval_elapsed(last: Option<SimDate>, now: SimDate, interval_ms: i64) -> bool {
    match last {
        Some(last) => now.millis_since(last) >= interval_ms,
        None       => true,
    }
}

fn sleep_remaining(started: Instant, interval: Duration) {
    let spent = started.elapsed();
    if spent < interval {
        thread::sleep(interval - spent);
    }
}
