use thiserror::Error;

use ct_core::MessageId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("no in-flight message with id {0}")]
    UnknownMessageId(MessageId),

    #[error("malformed acknowledgement: {reason} in {payload:?}")]
    MalformedAcknowledgement { reason: &'static str, payload: String },
}

pub type ProtocolResult<T> = Result<T, ProtocolError>;
