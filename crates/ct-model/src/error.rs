use thiserror::Error;

use ct_core::{AgvId, ContainerNumber, CraneRef, TransportType, TransporterId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("container {container} is not aboard transporter {transporter}")]
    ContainerNotFound { transporter: TransporterId, container: ContainerNumber },

    #[error("container {0} is not in storage")]
    NotInStorage(ContainerNumber),

    #[error("container {0} is already in storage")]
    AlreadyStored(ContainerNumber),

    #[error("unknown transporter {0}")]
    UnknownTransporter(TransporterId),

    #[error("unknown crane {0}")]
    UnknownCrane(CraneRef),

    #[error("unknown AGV {0}")]
    UnknownAgv(AgvId),

    #[error("{kind} depot {index} does not exist")]
    DepotOutOfRange { kind: TransportType, index: usize },

    #[error("{kind} depot {index} is already held by transporter {holder}")]
    DepotOccupied { kind: TransportType, index: usize, holder: TransporterId },

    #[error("transporter {transporter} has no room for container {container}")]
    NoRoom { transporter: TransporterId, container: ContainerNumber },
}

pub type ModelResult<T> = Result<T, ModelError>;
