//! `MessagePool`: messages sent but not yet acknowledged.

use std::collections::BTreeMap;

use tracing::debug;

use ct_core::MessageId;

use crate::{encode, Message, ProtocolError, ProtocolResult};

/// In-flight messages keyed by correlation id.
///
/// Ids start at 1 and only grow, so an id is never reused within a run even
/// after its message has been acknowledged.
pub struct MessagePool {
    next_id:   MessageId,
    in_flight: BTreeMap<MessageId, Message>,
}

impl MessagePool {
    pub fn new() -> Self {
        Self { next_id: MessageId(1), in_flight: BTreeMap::new() }
    }

    /// Assign the next id to `message`, record it as in flight, and return
    /// the id with the encoded line for the transport.
    pub fn send(&mut self, message: Message) -> (MessageId, String) {
        let id = self.next_id;
        self.next_id = id.next();
        let line = encode(id, &message);
        debug!(id = %id, kind = %message.kind(), "message sent");
        self.in_flight.insert(id, message);
        (id, line)
    }

    /// Remove and return the message acknowledged by `id`.
    pub fn acknowledge(&mut self, id: MessageId) -> ProtocolResult<Message> {
        self.in_flight.remove(&id).ok_or(ProtocolError::UnknownMessageId(id))
    }

    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.in_flight.get(&id)
    }

    pub fn contains(&self, id: MessageId) -> bool {
        self.in_flight.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.in_flight.len()
    }

    pub fn is_empty(&self) -> bool {
        self.in_flight.is_empty()
    }

    /// In-flight messages in id order.
    pub fn iter(&self) -> impl Iterator<Item = (MessageId, &Message)> {
        self.in_flight.iter().map(|(id, m)| (*id, m))
    }
}

impl Default for MessagePool {
    fn default() -> Self {
        Self::new()
    }
}
