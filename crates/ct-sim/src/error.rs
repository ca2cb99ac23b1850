use thiserror::Error;

use ct_core::CtError;
use ct_model::ModelError;
use ct_protocol::ProtocolError;
use ct_routing::RoutingError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("controller configuration error: {0}")]
    Config(#[from] CtError),

    /// The waypoint topology or its lookup tables are broken.  Fatal.
    #[error("routing error: {0}")]
    Routing(#[from] RoutingError),

    #[error("model error: {0}")]
    Model(#[from] ModelError),

    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

impl SimError {
    /// `true` for errors that must stop the controller.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SimError::Routing(_) | SimError::Config(_))
    }
}

pub type SimResult<T> = Result<T, SimError>;
