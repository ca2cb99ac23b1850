//! `ct-protocol`: what the controller says to the client, and how it
//! correlates the answers.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`message`] | `Message` variants, `MessageKind`, `Processor`, `CraneOperation` |
//! | [`pool`]    | `MessagePool` (in-flight messages keyed by correlation id)  |
//! | [`wire`]    | line encoding, `parse_ack`, `tag_value`                     |
//! | [`error`]   | `ProtocolError`, `ProtocolResult<T>`                        |
//!
//! # Correlation
//!
//! Every message gets a fresh, strictly increasing id.  The client echoes the
//! id back in an acknowledgement; [`MessagePool::acknowledge`] removes and
//! returns the matching message exactly once.

pub mod error;
pub mod message;
pub mod pool;
pub mod wire;

#[cfg(test)]
mod tests;

pub use error::{ProtocolError, ProtocolResult};
pub use message::{CraneOperation, Message, MessageKind, Processor};
pub use pool::MessagePool;
pub use wire::{encode, parse_ack, tag_value};
