//! `ct-transport`: moves opaque text lines between the controller and the
//! client.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`tcp`]      | `TcpTransport`: listener, reader and writer threads       |
//! | [`loopback`] | `LoopbackTransport`: in-memory double                     |
//! | [`error`]    | `TransportError`, `TransportResult<T>`                    |
//!
//! # Threading
//!
//! The controller never touches a socket.  It pushes lines into an outbound
//! FIFO and polls an inbound queue once per tick; the network threads only
//! move strings between those queues and the wire.

pub mod error;
pub mod loopback;
pub mod tcp;

#[cfg(test)]
mod tests;

pub use error::{TransportError, TransportResult};
pub use loopback::LoopbackTransport;
pub use tcp::TcpTransport;

/// What the controller needs from a connection.
pub trait Transport: Send {
    /// `true` while a client is attached and neither side has hung up.
    fn is_connected(&self) -> bool;

    /// Queue `line` for sending.  Lines go out in the order they were queued.
    fn enqueue_outbound(&self, line: String) -> TransportResult<()>;

    /// Next complete inbound line, if one has arrived.
    fn poll_inbound(&self) -> Option<String>;

    /// Stop the network threads.  Idempotent.
    fn shutdown(&self);
}
