//! In-memory transport.
//!
//! Clones share the same queues, so a test keeps one handle to play the
//! client while the controller owns the other.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::{Transport, TransportError, TransportResult};

#[derive(Clone)]
pub struct LoopbackTransport {
    inbound_tx:  Sender<String>,
    inbound_rx:  Receiver<String>,
    outbound_tx: Sender<String>,
    outbound_rx: Receiver<String>,
    connected:   Arc<AtomicBool>,
}

impl LoopbackTransport {
    /// A connected loopback.
    pub fn new() -> Self {
        let (inbound_tx, inbound_rx) = unbounded();
        let (outbound_tx, outbound_rx) = unbounded();
        Self {
            inbound_tx,
            inbound_rx,
            outbound_tx,
            outbound_rx,
            connected: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Deliver `line` to the controller as if the client had sent it.
    pub fn push_inbound(&self, line: impl Into<String>) {
        // Both channel ends live in `self`, so the send cannot fail.
        let _ = self.inbound_tx.send(line.into());
    }

    /// Everything the controller has sent since the last drain, in order.
    pub fn drain_outbound(&self) -> Vec<String> {
        self.outbound_rx.try_iter().collect()
    }

    /// Simulate the client hanging up.
    pub fn disconnect(&self) {
        self.connected.store(false, Ordering::SeqCst);
    }
}

impl Default for LoopbackTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for LoopbackTransport {
    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn enqueue_outbound(&self, line: String) -> TransportResult<()> {
        if !self.is_connected() {
            return Err(TransportError::Closed);
        }
        self.outbound_tx.send(line).map_err(|_| TransportError::Closed)
    }

    fn poll_inbound(&self) -> Option<String> {
        self.inbound_rx.try_recv().ok()
    }

    fn shutdown(&self) {
        self.disconnect();
    }
}
